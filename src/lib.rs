//! # pinn-systems
//!
//! pinn-systems defines differential equation systems for physics-informed neural
//! network (PINN) training. A PINN approximates the solution of a differential
//! equation with a neural network trained to minimise the equation's residual at a
//! batch of sample points, so a "system" here is not something to be integrated
//! numerically: it is the pair of functions a trainer needs, the pointwise residual
//! of the governing equation and (when one is known) the closed-form solution used
//! for validation.
//!
//! ## Systems
//!
//! A system implements the [System] trait. Its [System::equation] function takes a
//! batch of sample coordinates `x` and a differentiable recording `y` of the network
//! output at those coordinates, and returns the residual of the governing equation
//! at each sample. The residual is zero, pointwise, exactly where `y` satisfies the
//! equation; the trainer turns it into a loss term by taking a norm. If the system
//! was constructed with a known closed-form solution, [System::exact_solution]
//! evaluates it at a batch of coordinates, and returns `None` otherwise.
//!
//! The provided system is [HarmonicOscillator0D], a damped harmonic oscillator in
//! 0+1 dimensions with its analytic solution in all three damping regimes (see
//! [DampingRegime]).
//!
//! ## Differentiation
//!
//! Derivatives of the network output are supplied by the surrounding framework, not
//! computed here. The [GradTape] trait is the boundary: it is a handle to a recorded
//! computation `y = f(x)` from which first and second derivatives with respect to
//! the input batch can be extracted. A training harness wraps its autodiff engine in
//! a [GradTape]; the [ClosureGrad] struct does this for plain closures and is also
//! what the tests use, with analytic or finite-difference derivatives.
//!
//! ## Vector types
//!
//! Batches are held in a dense vector type implementing the [Vector] trait.
//! pinn-systems can use the [nalgebra](https://nalgebra.org) `DVector` type or the
//! [faer](https://github.com/sarah-ek/faer-rs) `Col` type (via [FaerVec]), selected
//! with the `nalgebra` and `faer` features (both on by default).

pub mod error;
pub mod grad;
pub mod op;
pub mod scalar;
pub mod system;
pub mod vector;

pub use error::{PinnSystemsError, SystemError};
pub use grad::{closure_grad::ClosureGrad, GradTape};
pub use op::{Op, OpStatistics};
pub use scalar::{scale, IndexType, Scalar, Scale};
pub use system::{
    harmonic_oscillator::{DampingRegime, HarmonicOscillator0D},
    System,
};
pub use vector::{Vector, VectorCommon};

#[cfg(feature = "faer")]
pub use vector::faer_serial::FaerVec;
