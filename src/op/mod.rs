use crate::{Scalar, Vector};
use serde::Serialize;

/// A generic operator trait.
///
/// Op is the base trait for everything in this crate that evaluates functions over a
/// batch of samples. It fixes the scalar and vector types used, and describes the
/// shape of the operator: how many scalar fields it produces per sample and how many
/// fixed parameters it carries.
pub trait Op {
    type T: Scalar;
    type V: Vector<T = Self::T>;

    /// Return the number of scalar fields the operator produces per sample.
    fn nout(&self) -> usize;

    /// Return the number of fixed parameters of the operator.
    fn nparams(&self) -> usize;

    /// Return statistics about the operator (e.g. how many times its residual or
    /// exact solution was evaluated)
    fn statistics(&self) -> OpStatistics {
        OpStatistics::default()
    }
}

impl<C: Op> Op for &C {
    type T = C::T;
    type V = C::V;
    fn nout(&self) -> usize {
        C::nout(*self)
    }
    fn nparams(&self) -> usize {
        C::nparams(*self)
    }
    fn statistics(&self) -> OpStatistics {
        C::statistics(*self)
    }
}

#[derive(Default, Clone, Serialize)]
pub struct OpStatistics {
    pub number_of_residual_evals: usize,
    pub number_of_exact_sol_evals: usize,
    pub number_of_grad_evals: usize,
}

impl OpStatistics {
    pub fn new() -> Self {
        Self {
            number_of_residual_evals: 0,
            number_of_exact_sol_evals: 0,
            number_of_grad_evals: 0,
        }
    }

    pub fn increment_residual(&mut self) {
        self.number_of_residual_evals += 1;
    }

    pub fn increment_exact_sol(&mut self) {
        self.number_of_exact_sol_evals += 1;
    }

    pub fn increment_grad(&mut self) {
        self.number_of_grad_evals += 1;
    }
}
