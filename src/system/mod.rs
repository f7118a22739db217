use crate::{GradTape, Op, Vector};

pub mod harmonic_oscillator;

/// This is the trait that defines a differential equation system for PINN training.
///
/// A system is defined by:
/// - its governing equation, given as a pointwise residual over a batch of samples
///   via [Self::equation], which the trainer minimises as a loss term, and
/// - optionally, a known closed-form solution via [Self::exact_solution], which an
///   evaluator compares the trained network against.
///
/// Whether the closed-form solution is available is fixed when the implementing
/// type is constructed and reported by [Self::has_exact_solution]; a system without
/// one returns `None` from [Self::exact_solution], it never fails.
pub trait System: Op {
    /// Compute the residual of the governing equation at each sample: how far the
    /// recorded output `y` is from satisfying the equation at the coordinates `x`.
    /// The residual is zero, pointwise, precisely when `y` satisfies the equation.
    ///
    /// Derivatives of `y` are taken through the tape, to whatever order the
    /// equation needs. Neither `x` nor the recording is mutated.
    ///
    /// # Panics
    ///
    /// Panics if `x`, the tape's batch and `res` do not all have the same length.
    fn equation_inplace<G>(&self, x: &Self::V, y: &G, res: &mut Self::V)
    where
        G: GradTape<T = Self::T, V = Self::V>;

    /// Compute the residual of the governing equation at each sample, and return
    /// the result. Use `[Self::equation_inplace]` for a non-allocating version.
    fn equation<G>(&self, x: &Self::V, y: &G) -> Self::V
    where
        G: GradTape<T = Self::T, V = Self::V>,
    {
        let mut res = Self::V::zeros(x.len());
        self.equation_inplace(x, y, &mut res);
        res
    }

    /// Returns true if the system was constructed with a known closed-form
    /// solution.
    fn has_exact_solution(&self) -> bool;

    /// Evaluate the closed-form solution at each sample, if the system has one.
    ///
    /// Returns `None` whenever [Self::has_exact_solution] is false, for every
    /// input; a valid zero-valued solution is `Some`, never `None`.
    fn exact_solution(&self, x: &Self::V) -> Option<Self::V>;
}
