//! Newton solver with a stabilised (positive-definite) Hessian.

use super::stabiliser::{DiagonalShift, HessianStabiliser};
use crate::convergence::Solution;
use crate::driver::{self, Direction, IterationView};
use optim_core::config::{DiagonalShiftConfig, SolverConfig};
use optim_core::traits::Objective;
use optim_core::types::{SolverError, Vector};
use tracing::debug;

/// Newton's method that never fails on an indefinite Hessian.
///
/// Each iteration hands the Hessian to the stabiliser `S`, which returns a
/// direction from a positive-definite surrogate. Every direction taken is
/// therefore a descent direction, and the solver can escape saddle points
/// where plain Newton would stop with an error.
///
/// # Example
///
/// ```
/// use optim_core::config::{DiagonalShiftConfig, SolverConfig};
/// use optim_core::problems::SaddleObjective;
/// use optim_core::types::Vector;
/// use optim_solvers::{DiagonalShift, StabilisedNewtonSolver};
///
/// let solver = StabilisedNewtonSolver::new(
///     SolverConfig::new(1e-8, 200),
///     DiagonalShift::new(DiagonalShiftConfig::new(10.0)),
/// );
///
/// let solution = solver
///     .solve(&SaddleObjective::default(), &Vector::from_vec(vec![0.5, 0.2]))
///     .unwrap();
///
/// assert!(solution.converged);
/// assert!((solution.value - SaddleObjective::MIN_VALUE).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct StabilisedNewtonSolver<S = DiagonalShift> {
    config: SolverConfig,
    stabiliser: S,
}

impl StabilisedNewtonSolver<DiagonalShift> {
    /// Create a solver with default configuration and a default diagonal shift.
    pub fn with_defaults() -> Self {
        Self {
            config: SolverConfig::default(),
            stabiliser: DiagonalShift::default(),
        }
    }
}

impl Default for StabilisedNewtonSolver<DiagonalShift> {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl<S> StabilisedNewtonSolver<S>
where
    S: HessianStabiliser + Clone,
{
    /// Display name used in log output.
    pub const NAME: &'static str = "newton (projected hessian)";

    /// Create a solver with the given configuration and stabiliser.
    pub fn new(config: SolverConfig, stabiliser: S) -> Self {
        Self { config, stabiliser }
    }

    /// Get the solver configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Get the stabiliser template cloned into each solve.
    pub fn stabiliser(&self) -> &S {
        &self.stabiliser
    }

    /// Minimise `problem` starting from `x0`.
    ///
    /// # Errors
    ///
    /// * `SolverError::RegularisationOverflow` - the diagonal shift exceeded its cap
    /// * `SolverError::HessianNotPositiveDefinite` - the projected Hessian still failed to factorise
    /// * `SolverError::DimensionMismatch` - `x0` does not match the problem
    /// * `SolverError::NonFiniteValue` - the gradient became NaN or infinite
    /// * `SolverError::InvalidConfig` - the configuration failed validation
    pub fn solve<P>(&self, problem: &P, x0: &Vector) -> Result<Solution, SolverError>
    where
        P: Objective + ?Sized,
    {
        self.solve_with_observer(problem, x0, |_| {})
    }

    /// Like [`solve`](Self::solve), calling `observer` once per iteration.
    pub fn solve_with_observer<P, O>(
        &self,
        problem: &P,
        x0: &Vector,
        observer: O,
    ) -> Result<Solution, SolverError>
    where
        P: Objective + ?Sized,
        O: FnMut(&IterationView<'_>),
    {
        self.stabiliser.validate()?;
        debug!(stabiliser = self.stabiliser.name(), "stabiliser selected");

        let mut stabiliser = self.stabiliser.clone();
        driver::run(
            Self::NAME,
            problem,
            x0,
            &self.config,
            |x, gradient, iteration| {
                let hessian = problem.eval_hessian(x);
                let out = stabiliser.newton_direction(hessian, gradient, iteration)?;
                Ok(Direction {
                    direction: out.direction,
                    regularisation: out.regularisation,
                })
            },
            observer,
        )
    }
}

/// Newton's method with diagonal-shift stabilisation.
///
/// δ starts at `1e-4` each iteration and grows by `gamma` until `H + δ·I`
/// factorises.
///
/// # Errors
///
/// * `SolverError::InvalidConfig` - `gamma <= 1` or `eps <= 0`
/// * `SolverError::RegularisationOverflow` - δ exceeded its cap
pub fn stabilised_newton_solve<P>(
    problem: &P,
    x0: &Vector,
    gamma: f64,
    eps: f64,
    max_iters: usize,
) -> Result<Solution, SolverError>
where
    P: Objective + ?Sized,
{
    let config = SolverConfig {
        tolerance: eps,
        max_iterations: max_iters,
        ..Default::default()
    };
    let shift = DiagonalShiftConfig {
        gamma,
        ..Default::default()
    };
    StabilisedNewtonSolver::new(config, DiagonalShift::new(shift)).solve(problem, x0)
}
