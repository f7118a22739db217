use crate::scalar::Scale;
use crate::{IndexType, Scalar};
use num_traits::Zero;
use std::fmt::Debug;
use std::ops::{Add, AddAssign, Index, IndexMut, Mul, MulAssign, Sub, SubAssign};

#[cfg(feature = "faer")]
pub mod faer_serial;
#[cfg(feature = "nalgebra")]
pub mod nalgebra_serial;

pub trait VectorCommon: Sized + Debug {
    type T: Scalar;
}

impl<V> VectorCommon for &V
where
    V: VectorCommon,
{
    type T = V::T;
}

/// A dense batch of sample values: one scalar per sample point.
///
/// This is the shape that every quantity in a PINN training step takes,
/// sample coordinates, recorded network outputs, their derivatives, residuals
/// and exact solutions all have one value per sample.
pub trait Vector:
    VectorCommon
    + Clone
    + PartialEq
    + Add<Self, Output = Self>
    + Sub<Self, Output = Self>
    + AddAssign<Self>
    + SubAssign<Self>
    + for<'a> AddAssign<&'a Self>
    + for<'a> SubAssign<&'a Self>
    + Mul<Scale<Self::T>, Output = Self>
    + MulAssign<Scale<Self::T>>
    + Index<IndexType, Output = Self::T>
    + IndexMut<IndexType, Output = Self::T>
{
    fn len(&self) -> IndexType;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    fn from_element(len: usize, value: Self::T) -> Self;
    fn zeros(len: usize) -> Self {
        Self::from_element(len, Self::T::zero())
    }
    fn from_vec(vec: Vec<Self::T>) -> Self;
    fn clone_as_vec(&self) -> Vec<Self::T>;
    fn fill(&mut self, value: Self::T);
    fn copy_from(&mut self, other: &Self);

    /// `self = alpha * x + beta * self`
    fn axpy(&mut self, alpha: Self::T, x: &Self, beta: Self::T);

    fn component_mul_assign(&mut self, other: &Self);

    fn assert_eq_st(&self, other: &Self, tol: Self::T) {
        let tol = Self::from_element(self.len(), tol);
        self.assert_eq(other, &tol);
    }

    fn assert_eq(&self, other: &Self, tol: &Self) {
        assert_eq!(
            self.len(),
            other.len(),
            "Vector length mismatch: {} != {}",
            self.len(),
            other.len()
        );
        for i in 0..self.len() {
            if num_traits::abs(self[i] - other[i]) > tol[i] {
                eprintln!("left: {:?}", self);
                eprintln!("right: {:?}", other);
                panic!(
                    "Vector element mismatch at index {}: {} != {}",
                    i, self[i], other[i]
                );
            }
        }
    }
}
