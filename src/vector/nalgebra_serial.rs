use std::ops::{Mul, MulAssign};

use nalgebra::DVector;

use crate::{IndexType, Scalar, Scale};

use super::{Vector, VectorCommon};

impl<T: Scalar> VectorCommon for DVector<T> {
    type T = T;
}

impl<T: Scalar> Mul<Scale<T>> for DVector<T> {
    type Output = DVector<T>;
    fn mul(self, rhs: Scale<T>) -> Self::Output {
        self * rhs.value()
    }
}

impl<T: Scalar> Mul<Scale<T>> for &DVector<T> {
    type Output = DVector<T>;
    fn mul(self, rhs: Scale<T>) -> Self::Output {
        self * rhs.value()
    }
}

impl<T: Scalar> MulAssign<Scale<T>> for DVector<T> {
    fn mul_assign(&mut self, rhs: Scale<T>) {
        *self *= rhs.value();
    }
}

impl<T: Scalar> Vector for DVector<T> {
    fn len(&self) -> IndexType {
        self.len()
    }
    fn from_element(len: usize, value: T) -> Self {
        Self::from_element(len, value)
    }
    fn from_vec(vec: Vec<T>) -> Self {
        Self::from_vec(vec)
    }
    fn clone_as_vec(&self) -> Vec<T> {
        self.iter().copied().collect()
    }
    fn fill(&mut self, value: T) {
        self.iter_mut().for_each(|x: &mut _| *x = value);
    }
    fn copy_from(&mut self, other: &Self) {
        self.copy_from(other);
    }
    fn axpy(&mut self, alpha: T, x: &Self, beta: T) {
        self.axpy(alpha, x, beta);
    }
    fn component_mul_assign(&mut self, other: &Self) {
        self.component_mul_assign(other);
    }
}
