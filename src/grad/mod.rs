use crate::{Scalar, Vector};

pub mod closure_grad;

/// A handle to a recorded differentiable computation `y = f(x)` over a batch of
/// samples.
///
/// Systems need first and second derivatives of the network output with respect to
/// the sample coordinates to form their residuals, but they do not compute them:
/// differentiation belongs to the surrounding framework's autodiff engine. That
/// engine records the computation of `y` at a batch `x` with gradient tracking
/// enabled, and exposes the recording through this trait. A system then asks for
/// exactly the derivative orders its equation needs.
///
/// Implementations must be pure: extracting a value or derivative must not mutate
/// the recording, and repeated calls must return the same result. Derivatives are
/// elementwise over the batch, i.e. `jacobian()[i]` is `dy/dx` at sample `i`.
///
/// [crate::ClosureGrad] wraps plain closures in this trait, which is enough for a
/// harness that can supply derivative closures itself (and for tests, which use
/// analytic or finite-difference derivatives).
pub trait GradTape {
    type T: Scalar;
    type V: Vector<T = Self::T>;

    /// Return the number of samples in the recorded batch.
    fn nsamples(&self) -> usize;

    /// Compute the recorded output at each sample.
    fn value_inplace(&self, y: &mut Self::V);

    /// Compute the recorded output at each sample, and return the result.
    /// Use `[Self::value_inplace]` for a non-allocating version.
    fn value(&self) -> Self::V {
        let mut y = Self::V::zeros(self.nsamples());
        self.value_inplace(&mut y);
        y
    }

    /// Compute the first derivative of the output with respect to the input batch,
    /// elementwise over the batch.
    fn jacobian_inplace(&self, dy: &mut Self::V);

    /// Compute the first derivative of the output with respect to the input batch,
    /// and return the result. Use `[Self::jacobian_inplace]` for a non-allocating
    /// version.
    fn jacobian(&self) -> Self::V {
        let mut dy = Self::V::zeros(self.nsamples());
        self.jacobian_inplace(&mut dy);
        dy
    }

    /// Compute the second derivative of the output with respect to the input batch,
    /// elementwise over the batch.
    fn hessian_inplace(&self, d2y: &mut Self::V);

    /// Compute the second derivative of the output with respect to the input batch,
    /// and return the result. Use `[Self::hessian_inplace]` for a non-allocating
    /// version.
    fn hessian(&self) -> Self::V {
        let mut d2y = Self::V::zeros(self.nsamples());
        self.hessian_inplace(&mut d2y);
        d2y
    }
}

impl<G: GradTape> GradTape for &G {
    type T = G::T;
    type V = G::V;
    fn nsamples(&self) -> usize {
        G::nsamples(*self)
    }
    fn value_inplace(&self, y: &mut Self::V) {
        G::value_inplace(*self, y)
    }
    fn jacobian_inplace(&self, dy: &mut Self::V) {
        G::jacobian_inplace(*self, dy)
    }
    fn hessian_inplace(&self, d2y: &mut Self::V) {
        G::hessian_inplace(*self, d2y)
    }
}
