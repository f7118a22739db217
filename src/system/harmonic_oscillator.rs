use std::cell::RefCell;

use nalgebra::ComplexField;
use num_traits::{FromPrimitive, One, ToPrimitive, Zero};
use serde::Serialize;

use crate::error::{PinnSystemsError, SystemError};
use crate::op::OpStatistics;
use crate::{GradTape, Op, Scalar, System, Vector};

/// The qualitative behaviour of a damped harmonic oscillator, determined by the
/// damping ratio `xi0` relative to 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DampingRegime {
    /// `xi0 = 1` (within tolerance): fastest non-oscillatory decay
    Critical,
    /// `xi0 < 1`: oscillatory decay
    Underdamped,
    /// `xi0 > 1`: non-oscillatory decay
    Overdamped,
}

impl DampingRegime {
    /// Classify a damping ratio.
    ///
    /// The critical regime is selected with a tolerance of `sqrt(EPSILON)` around
    /// `xi0 = 1`, so that a ratio a few ulps away from critical does not end up in
    /// an oscillatory branch with a vanishing frequency.
    pub fn classify<T: Scalar>(xi0: T) -> Self {
        if (xi0 - T::one()).abs() <= T::EPSILON.sqrt() {
            DampingRegime::Critical
        } else if xi0 < T::one() {
            DampingRegime::Underdamped
        } else {
            DampingRegime::Overdamped
        }
    }
}

/// The damped harmonic oscillator in 0+1 dimensions. The ODE is
///
/// $$
/// \frac{d^2 y}{dt^2} + \xi_0 \omega_0 \frac{dy}{dt} + \frac{\omega_0^2}{4} y = 0
/// $$
///
/// with initial conditions `y(0) = y0`, `y'(0) = y1`.
///
/// `xi0` is the damping ratio and `omega0` the natural angular frequency, which
/// must be positive. The decay rate `xi = xi0*omega0/2`, the frequency magnitude
/// `omega = omega0*sqrt(|xi0^2 - 1|)/2` and the [DampingRegime] are derived once at
/// construction; the system is immutable afterwards.
///
/// The closed-form solution is known in all three regimes and is returned by
/// [System::exact_solution] unless the system was downgraded with
/// [Self::without_exact_solution].
pub struct HarmonicOscillator0D<V: Vector> {
    xi0: V::T,
    omega0: V::T,
    y0: V::T,
    y1: V::T,
    xi: V::T,
    omega: V::T,
    regime: DampingRegime,
    has_exact_sol: bool,
    statistics: RefCell<OpStatistics>,
}

impl<V: Vector> HarmonicOscillator0D<V> {
    /// Create a new oscillator from the damping ratio `xi0`, the natural angular
    /// frequency `omega0`, and the initial value `y0` and derivative `y1` at time
    /// zero.
    ///
    /// Fails if any parameter is non-finite or if `omega0` is not positive, rather
    /// than producing silently wrong physics later.
    pub fn new(xi0: V::T, omega0: V::T, y0: V::T, y1: V::T) -> Result<Self, PinnSystemsError> {
        for (name, value) in [("xi0", xi0), ("omega0", omega0), ("y0", y0), ("y1", y1)] {
            if !value.is_finite() {
                return Err(PinnSystemsError::from(SystemError::NonFiniteParameter {
                    name,
                    value: value.to_f64().unwrap_or(f64::NAN),
                }));
            }
        }
        if omega0 <= V::T::zero() {
            return Err(PinnSystemsError::from(
                SystemError::NonPositiveNaturalFrequency {
                    omega0: omega0.to_f64().unwrap(),
                },
            ));
        }
        let half = V::T::from_f64(0.5).unwrap();
        let xi = xi0 * omega0 * half;
        let omega = omega0 * (xi0 * xi0 - V::T::one()).abs().sqrt() * half;
        Ok(Self {
            xi0,
            omega0,
            y0,
            y1,
            xi,
            omega,
            regime: DampingRegime::classify(xi0),
            has_exact_sol: true,
            statistics: RefCell::new(OpStatistics::default()),
        })
    }

    /// Downgrade the system to one without a known closed-form solution, so that
    /// [System::exact_solution] returns `None`. Useful when evaluating a training
    /// pipeline as if the ground truth were unknown.
    pub fn without_exact_solution(mut self) -> Self {
        self.has_exact_sol = false;
        self
    }

    pub fn xi0(&self) -> V::T {
        self.xi0
    }
    pub fn omega0(&self) -> V::T {
        self.omega0
    }
    pub fn y0(&self) -> V::T {
        self.y0
    }
    pub fn y1(&self) -> V::T {
        self.y1
    }

    /// the decay rate `xi = xi0*omega0/2`
    pub fn xi(&self) -> V::T {
        self.xi
    }

    /// the oscillation (or decay) frequency magnitude `omega0*sqrt(|xi0^2 - 1|)/2`
    pub fn omega(&self) -> V::T {
        self.omega
    }

    pub fn regime(&self) -> DampingRegime {
        self.regime
    }
}

impl<V: Vector> Op for HarmonicOscillator0D<V> {
    type T = V::T;
    type V = V;

    fn nout(&self) -> usize {
        1
    }
    fn nparams(&self) -> usize {
        4
    }
    fn statistics(&self) -> OpStatistics {
        self.statistics.borrow().clone()
    }
}

impl<V: Vector> System for HarmonicOscillator0D<V> {
    fn equation_inplace<G>(&self, x: &Self::V, y: &G, res: &mut Self::V)
    where
        G: GradTape<T = Self::T, V = Self::V>,
    {
        assert_eq!(x.len(), y.nsamples(), "Batch lengths do not match");
        assert_eq!(x.len(), res.len(), "Batch lengths do not match");
        self.statistics.borrow_mut().increment_residual();

        let friction = self.xi0 * self.omega0;
        let stiffness = self.omega0 * self.omega0 * V::T::from_f64(0.25).unwrap();

        // res = d2y/dt2 + xi0*omega0 * dy/dt + omega0^2/4 * y
        y.hessian_inplace(res);
        let dy = y.jacobian();
        res.axpy(friction, &dy, V::T::one());
        let value = y.value();
        res.axpy(stiffness, &value, V::T::one());
    }

    fn has_exact_solution(&self) -> bool {
        self.has_exact_sol
    }

    fn exact_solution(&self, x: &Self::V) -> Option<Self::V> {
        if !self.has_exact_sol {
            return None;
        }
        self.statistics.borrow_mut().increment_exact_sol();

        let mut sol = V::zeros(x.len());
        let c0 = self.y0;
        match self.regime {
            DampingRegime::Critical => {
                let c1 = self.y1 + self.xi * self.y0;
                for i in 0..x.len() {
                    let t = x[i];
                    sol[i] = (-self.xi * t).exp() * (c0 + c1 * t);
                }
            }
            DampingRegime::Underdamped => {
                let c1 = (self.y1 + self.xi * self.y0) / self.omega;
                for i in 0..x.len() {
                    let t = x[i];
                    let env = (-self.xi * t).exp();
                    sol[i] =
                        env * (c0 * (self.omega * t).cos() + c1 * (self.omega * t).sin());
                }
            }
            DampingRegime::Overdamped => {
                let c1 = (self.y1 + self.xi * self.y0) / self.omega;
                for i in 0..x.len() {
                    let t = x[i];
                    let env = (-self.xi * t).exp();
                    sol[i] =
                        env * (c0 * (self.omega * t).cosh() + c1 * (self.omega * t).sinh());
                }
            }
        }
        Some(sol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{scale, ClosureGrad};
    use nalgebra::DVector;

    type V = DVector<f64>;
    type Ho = HarmonicOscillator0D<V>;

    fn grid(a: f64, b: f64, n: usize) -> V {
        let step = (b - a) / (n - 1) as f64;
        V::from_vec((0..n).map(|i| a + step * i as f64).collect())
    }

    fn shifted(x: &V, h: f64) -> V {
        let mut xs = x.clone();
        for i in 0..xs.len() {
            xs[i] += h;
        }
        xs
    }

    // A tape whose value is the exact solution of `sys`, with derivatives taken by
    // central finite differences. Feeding it back into the residual should give
    // (approximately) zero everywhere.
    fn exact_solution_tape(sys: &Ho, x: V) -> impl GradTape<T = f64, V = V> + '_ {
        let h = 1e-4;
        ClosureGrad::new(
            move |x: &V, y: &mut V| {
                y.copy_from(&sys.exact_solution(x).unwrap());
            },
            move |x: &V, dy: &mut V| {
                let yp = sys.exact_solution(&shifted(x, h)).unwrap();
                let ym = sys.exact_solution(&shifted(x, -h)).unwrap();
                for i in 0..x.len() {
                    dy[i] = (yp[i] - ym[i]) / (2.0 * h);
                }
            },
            move |x: &V, d2y: &mut V| {
                let yp = sys.exact_solution(&shifted(x, h)).unwrap();
                let y0 = sys.exact_solution(x).unwrap();
                let ym = sys.exact_solution(&shifted(x, -h)).unwrap();
                for i in 0..x.len() {
                    d2y[i] = (yp[i] - 2.0 * y0[i] + ym[i]) / (h * h);
                }
            },
            x,
        )
    }

    fn exact_derivative_at_zero(sys: &Ho) -> f64 {
        let h = 1e-6;
        let yp = sys.exact_solution(&V::from_vec(vec![h])).unwrap();
        let ym = sys.exact_solution(&V::from_vec(vec![-h])).unwrap();
        (yp[0] - ym[0]) / (2.0 * h)
    }

    const SCENARIOS: [(f64, f64, f64, f64); 5] = [
        (1.0, 2.0, 1.0, 0.0),
        (0.5, 2.0, 1.0, 0.0),
        (2.0, 1.0, 0.0, 1.0),
        (0.2, 3.0, -1.5, 2.0),
        (3.0, 0.7, 2.0, -1.0),
    ];

    #[test]
    fn critical_damping_scenario() {
        let sys = Ho::new(1.0, 2.0, 1.0, 0.0).unwrap();
        assert_eq!(sys.regime(), DampingRegime::Critical);
        assert_eq!(sys.xi(), 1.0);
        assert_eq!(sys.omega(), 0.0);
        let sol = sys.exact_solution(&V::from_vec(vec![0.0, 1.0])).unwrap();
        sol.assert_eq_st(
            &V::from_vec(vec![1.0, 2.0 / std::f64::consts::E]),
            1e-12,
        );
    }

    #[test]
    fn underdamped_scenario() {
        let sys = Ho::new(0.5, 2.0, 1.0, 0.0).unwrap();
        assert_eq!(sys.regime(), DampingRegime::Underdamped);
        assert!((sys.xi() - 0.5).abs() < 1e-14);
        assert!((sys.omega() - 0.75f64.sqrt()).abs() < 1e-14);
        let sol = sys.exact_solution(&V::from_vec(vec![0.0])).unwrap();
        sol.assert_eq_st(&V::from_vec(vec![1.0]), 1e-12);
    }

    #[test]
    fn overdamped_scenario() {
        let sys = Ho::new(2.0, 1.0, 0.0, 1.0).unwrap();
        assert_eq!(sys.regime(), DampingRegime::Overdamped);
        assert!((sys.xi() - 1.0).abs() < 1e-14);
        assert!((sys.omega() - 3.0f64.sqrt() / 2.0).abs() < 1e-14);
        assert!((exact_derivative_at_zero(&sys) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn exact_solution_satisfies_initial_conditions() {
        for (xi0, omega0, y0, y1) in SCENARIOS {
            let sys = Ho::new(xi0, omega0, y0, y1).unwrap();
            let sol = sys.exact_solution(&V::from_vec(vec![0.0])).unwrap();
            sol.assert_eq_st(&V::from_vec(vec![y0]), 1e-12);
            assert!(
                (exact_derivative_at_zero(&sys) - y1).abs() < 1e-5,
                "y'(0) != y1 for xi0 = {}",
                xi0
            );
        }
    }

    #[test]
    fn exact_solution_is_a_root_of_the_residual() {
        for (xi0, omega0, y0, y1) in SCENARIOS {
            let sys = Ho::new(xi0, omega0, y0, y1).unwrap();
            let x = grid(0.0, 2.0, 21);
            let tape = exact_solution_tape(&sys, x.clone());
            let res = sys.equation(&x, &tape);
            res.assert_eq_st(&V::zeros(x.len()), 1e-4);
        }
    }

    #[test]
    fn equation_is_linear_in_the_output() {
        let sys = Ho::new(0.5, 2.0, 1.0, 0.0).unwrap();
        let x = grid(0.0, 2.0, 11);
        let (a, b) = (2.5, -1.3);

        // y_1 = sin(t), y_2 = t^3, and their linear combination
        let tape1 = ClosureGrad::new(
            |x: &V, y: &mut V| {
                for i in 0..x.len() {
                    y[i] = x[i].sin();
                }
            },
            |x: &V, dy: &mut V| {
                for i in 0..x.len() {
                    dy[i] = x[i].cos();
                }
            },
            |x: &V, d2y: &mut V| {
                for i in 0..x.len() {
                    d2y[i] = -x[i].sin();
                }
            },
            x.clone(),
        );
        let tape2 = ClosureGrad::new(
            |x: &V, y: &mut V| {
                for i in 0..x.len() {
                    y[i] = x[i].powi(3);
                }
            },
            |x: &V, dy: &mut V| {
                for i in 0..x.len() {
                    dy[i] = 3.0 * x[i].powi(2);
                }
            },
            |x: &V, d2y: &mut V| {
                for i in 0..x.len() {
                    d2y[i] = 6.0 * x[i];
                }
            },
            x.clone(),
        );
        let combined = ClosureGrad::new(
            move |x: &V, y: &mut V| {
                for i in 0..x.len() {
                    y[i] = a * x[i].sin() + b * x[i].powi(3);
                }
            },
            move |x: &V, dy: &mut V| {
                for i in 0..x.len() {
                    dy[i] = a * x[i].cos() + b * 3.0 * x[i].powi(2);
                }
            },
            move |x: &V, d2y: &mut V| {
                for i in 0..x.len() {
                    d2y[i] = a * -x[i].sin() + b * 6.0 * x[i];
                }
            },
            x.clone(),
        );

        let mut expected = sys.equation(&x, &tape1) * scale(a);
        expected += sys.equation(&x, &tape2) * scale(b);
        sys.equation(&x, &combined).assert_eq_st(&expected, 1e-10);
    }

    #[test]
    fn no_exact_solution_returns_none() {
        let sys = Ho::new(0.5, 2.0, 1.0, 0.0).unwrap().without_exact_solution();
        assert!(!sys.has_exact_solution());
        assert!(sys.exact_solution(&V::from_vec(vec![0.0, 1.0])).is_none());
        assert!(sys.exact_solution(&V::zeros(0)).is_none());
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        assert!(matches!(
            Ho::new(0.5, 0.0, 1.0, 0.0),
            Err(PinnSystemsError::SystemError(
                SystemError::NonPositiveNaturalFrequency { .. }
            ))
        ));
        assert!(matches!(
            Ho::new(0.5, -1.0, 1.0, 0.0),
            Err(PinnSystemsError::SystemError(
                SystemError::NonPositiveNaturalFrequency { .. }
            ))
        ));
        assert!(matches!(
            Ho::new(f64::NAN, 2.0, 1.0, 0.0),
            Err(PinnSystemsError::SystemError(
                SystemError::NonFiniteParameter { name: "xi0", .. }
            ))
        ));
        assert!(matches!(
            Ho::new(0.5, 2.0, 1.0, f64::INFINITY),
            Err(PinnSystemsError::SystemError(
                SystemError::NonFiniteParameter { name: "y1", .. }
            ))
        ));
        assert!(Ho::new(0.5, 2.0, 1.0, 0.0).is_ok());
    }

    #[test]
    fn damping_regime_classification() {
        assert_eq!(DampingRegime::classify(1.0), DampingRegime::Critical);
        // within the sqrt(EPSILON) window, still critical
        assert_eq!(DampingRegime::classify(1.0 + 1e-9), DampingRegime::Critical);
        assert_eq!(DampingRegime::classify(1.0 - 1e-9), DampingRegime::Critical);
        assert_eq!(DampingRegime::classify(0.99), DampingRegime::Underdamped);
        assert_eq!(DampingRegime::classify(1.01), DampingRegime::Overdamped);
        assert_eq!(DampingRegime::classify(0.0), DampingRegime::Underdamped);
        assert_eq!(DampingRegime::classify(10.0), DampingRegime::Overdamped);
    }

    #[test]
    fn statistics_track_evaluations() {
        let sys = Ho::new(0.5, 2.0, 1.0, 0.0).unwrap();
        assert_eq!(sys.nout(), 1);
        assert_eq!(sys.nparams(), 4);
        let x = grid(0.0, 1.0, 5);
        let tape = exact_solution_tape(&sys, x.clone());
        let _ = sys.equation(&x, &tape);
        let _ = sys.equation(&x, &tape);
        let _ = sys.exact_solution(&x);
        let stats = sys.statistics();
        assert_eq!(stats.number_of_residual_evals, 2);
        // the finite-difference tape itself evaluates the exact solution too, so
        // only check it was counted at least once
        assert!(stats.number_of_exact_sol_evals >= 1);
    }

    #[cfg(feature = "faer")]
    #[test]
    fn exact_solution_with_faer_backend() {
        use crate::FaerVec;
        type Vf = FaerVec<f64>;
        let sys = HarmonicOscillator0D::<Vf>::new(1.0, 2.0, 1.0, 0.0).unwrap();
        let sol = sys.exact_solution(&Vf::from_vec(vec![0.0, 1.0])).unwrap();
        sol.assert_eq_st(
            &Vf::from_vec(vec![1.0, 2.0 / std::f64::consts::E]),
            1e-12,
        );
    }
}
