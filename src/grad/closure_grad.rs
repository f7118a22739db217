use std::cell::RefCell;

use crate::op::OpStatistics;
use crate::{GradTape, Vector};

/// A [GradTape] backed by closures.
///
/// Owns the input batch it was "recorded" against and three closures computing the
/// output and its first and second derivatives at that batch. A training harness
/// that can extract derivative functions from its autodiff engine can wrap them
/// here; the tests use it with analytic or finite-difference derivatives.
pub struct ClosureGrad<V, F, G, H>
where
    V: Vector,
    F: Fn(&V, &mut V),
    G: Fn(&V, &mut V),
    H: Fn(&V, &mut V),
{
    func: F,
    first_deriv: G,
    second_deriv: H,
    x: V,
    statistics: RefCell<OpStatistics>,
}

impl<V, F, G, H> ClosureGrad<V, F, G, H>
where
    V: Vector,
    F: Fn(&V, &mut V),
    G: Fn(&V, &mut V),
    H: Fn(&V, &mut V),
{
    pub fn new(func: F, first_deriv: G, second_deriv: H, x: V) -> Self {
        Self {
            func,
            first_deriv,
            second_deriv,
            x,
            statistics: RefCell::new(OpStatistics::default()),
        }
    }

    /// the input batch the closures are evaluated at
    pub fn x(&self) -> &V {
        &self.x
    }

    pub fn statistics(&self) -> OpStatistics {
        self.statistics.borrow().clone()
    }
}

impl<V, F, G, H> GradTape for ClosureGrad<V, F, G, H>
where
    V: Vector,
    F: Fn(&V, &mut V),
    G: Fn(&V, &mut V),
    H: Fn(&V, &mut V),
{
    type T = V::T;
    type V = V;

    fn nsamples(&self) -> usize {
        self.x.len()
    }
    fn value_inplace(&self, y: &mut V) {
        (self.func)(&self.x, y)
    }
    fn jacobian_inplace(&self, dy: &mut V) {
        self.statistics.borrow_mut().increment_grad();
        (self.first_deriv)(&self.x, dy)
    }
    fn hessian_inplace(&self, d2y: &mut V) {
        self.statistics.borrow_mut().increment_grad();
        (self.second_deriv)(&self.x, d2y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Vector;
    use nalgebra::DVector;

    type V = DVector<f64>;

    // y = x^2, dy/dx = 2x, d2y/dx2 = 2
    fn quadratic_tape(x: V) -> impl GradTape<T = f64, V = V> {
        ClosureGrad::new(
            |x: &V, y: &mut V| {
                for i in 0..x.len() {
                    y[i] = x[i] * x[i];
                }
            },
            |x: &V, dy: &mut V| {
                for i in 0..x.len() {
                    dy[i] = 2.0 * x[i];
                }
            },
            |x: &V, d2y: &mut V| {
                for i in 0..x.len() {
                    d2y[i] = 2.0;
                }
            },
            x,
        )
    }

    #[test]
    fn closure_grad_derivatives() {
        let x = V::from_vec(vec![0.0, 1.0, -2.0]);
        let tape = quadratic_tape(x);
        assert_eq!(tape.nsamples(), 3);
        tape.value()
            .assert_eq_st(&V::from_vec(vec![0.0, 1.0, 4.0]), 1e-14);
        tape.jacobian()
            .assert_eq_st(&V::from_vec(vec![0.0, 2.0, -4.0]), 1e-14);
        tape.hessian()
            .assert_eq_st(&V::from_vec(vec![2.0, 2.0, 2.0]), 1e-14);
    }

    #[test]
    fn closure_grad_statistics() {
        let x = V::from_vec(vec![1.0]);
        let tape = ClosureGrad::new(
            |_: &V, y: &mut V| y.fill(0.0),
            |_: &V, dy: &mut V| dy.fill(0.0),
            |_: &V, d2y: &mut V| d2y.fill(0.0),
            x,
        );
        let _ = tape.value();
        let _ = tape.jacobian();
        let _ = tape.hessian();
        let _ = tape.hessian();
        let stats = tape.statistics();
        assert_eq!(stats.number_of_grad_evals, 3);
    }
}
