use std::ops::{Add, AddAssign, Index, IndexMut, Mul, MulAssign, Sub, SubAssign};

use faer::{unzip, zip, Col};

use crate::{IndexType, Scalar, Scale};

use super::{Vector, VectorCommon};

/// A dense batch backed by a faer column.
#[derive(Debug, Clone, PartialEq)]
pub struct FaerVec<T: Scalar> {
    pub(crate) data: Col<T>,
}

impl<T: Scalar> FaerVec<T> {
    pub fn inner(&self) -> &Col<T> {
        &self.data
    }
    pub fn into_inner(self) -> Col<T> {
        self.data
    }
}

impl<T: Scalar> From<Col<T>> for FaerVec<T> {
    fn from(data: Col<T>) -> Self {
        Self { data }
    }
}

impl<T: Scalar> VectorCommon for FaerVec<T> {
    type T = T;
}

macro_rules! impl_bin_op {
    ($trait:ident, $method:ident, $operator:tt) => {
        impl<T: Scalar> $trait<FaerVec<T>> for FaerVec<T> {
            type Output = FaerVec<T>;
            fn $method(self, rhs: FaerVec<T>) -> Self::Output {
                Self::Output {
                    data: self.data $operator &rhs.data,
                }
            }
        }
    };
}

macro_rules! impl_assign_bin_op {
    ($trait:ident, $method:ident, $operator:tt) => {
        impl<T: Scalar> $trait<FaerVec<T>> for FaerVec<T> {
            fn $method(&mut self, rhs: FaerVec<T>) {
                self.data $operator &rhs.data;
            }
        }
        impl<T: Scalar> $trait<&FaerVec<T>> for FaerVec<T> {
            fn $method(&mut self, rhs: &FaerVec<T>) {
                self.data $operator &rhs.data;
            }
        }
    };
}

impl_bin_op!(Add, add, +);
impl_bin_op!(Sub, sub, -);
impl_assign_bin_op!(AddAssign, add_assign, +=);
impl_assign_bin_op!(SubAssign, sub_assign, -=);

impl<T: Scalar> Mul<Scale<T>> for FaerVec<T> {
    type Output = FaerVec<T>;
    fn mul(self, rhs: Scale<T>) -> Self::Output {
        let scale: faer::Scale<T> = rhs.into();
        Self::Output {
            data: &self.data * scale,
        }
    }
}

impl<T: Scalar> MulAssign<Scale<T>> for FaerVec<T> {
    fn mul_assign(&mut self, rhs: Scale<T>) {
        self.data *= faer::Scale(rhs.value());
    }
}

impl<T: Scalar> Index<IndexType> for FaerVec<T> {
    type Output = T;
    fn index(&self, index: IndexType) -> &Self::Output {
        &self.data[index]
    }
}

impl<T: Scalar> IndexMut<IndexType> for FaerVec<T> {
    fn index_mut(&mut self, index: IndexType) -> &mut Self::Output {
        &mut self.data[index]
    }
}

impl<T: Scalar> Vector for FaerVec<T> {
    fn len(&self) -> IndexType {
        self.data.nrows()
    }
    fn from_element(len: usize, value: T) -> Self {
        let data = Col::from_fn(len, |_| value);
        FaerVec { data }
    }
    fn from_vec(vec: Vec<T>) -> Self {
        let data = Col::from_fn(vec.len(), |i| vec[i]);
        FaerVec { data }
    }
    fn clone_as_vec(&self) -> Vec<T> {
        self.data.iter().cloned().collect()
    }
    fn fill(&mut self, value: T) {
        self.data.iter_mut().for_each(|s| *s = value);
    }
    fn copy_from(&mut self, other: &Self) {
        self.data.copy_from(&other.data)
    }
    fn axpy(&mut self, alpha: T, x: &Self, beta: T) {
        zip!(self.data.as_mut(), x.data.as_ref())
            .for_each(|unzip!(si, xi)| *si = *si * beta + *xi * alpha);
    }
    fn component_mul_assign(&mut self, other: &Self) {
        zip!(self.data.as_mut(), other.data.as_ref()).for_each(|unzip!(s, o)| *s *= *o);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type V = FaerVec<f64>;

    #[test]
    fn test_construction() {
        super::super::tests::test_construction::<V>();
    }

    #[test]
    fn test_axpy() {
        super::super::tests::test_axpy::<V>();
    }

    #[test]
    fn test_ops() {
        super::super::tests::test_ops::<V>();
    }
}
