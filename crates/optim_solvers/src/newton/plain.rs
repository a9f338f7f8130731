//! Plain Newton solver.

use crate::convergence::Solution;
use crate::driver::{self, Direction, IterationView};
use optim_core::config::SolverConfig;
use optim_core::traits::Objective;
use optim_core::types::{SolverError, Vector};

/// Newton's method with backtracking line search.
///
/// Factorises the Hessian with Cholesky each iteration. A Hessian that is not
/// positive definite aborts the solve: there is no fallback. Use
/// [`StabilisedNewtonSolver`](super::StabilisedNewtonSolver) for non-convex
/// problems.
///
/// # Example
///
/// ```
/// use optim_core::problems::QuadraticObjective;
/// use optim_core::types::{Matrix, Vector};
/// use optim_solvers::NewtonSolver;
///
/// let a = Matrix::from_row_slice(2, 2, &[4.0, 1.0, 1.0, 3.0]);
/// let problem = QuadraticObjective::new(a, Vector::from_vec(vec![1.0, 2.0]));
///
/// let solution = NewtonSolver::with_defaults()
///     .solve(&problem, &Vector::from_vec(vec![10.0, -7.0]))
///     .unwrap();
///
/// // One Newton step lands on the minimiser of a quadratic.
/// assert_eq!(solution.iterations, 1);
/// assert!(solution.converged);
/// ```
#[derive(Debug, Clone)]
pub struct NewtonSolver {
    config: SolverConfig,
}

impl NewtonSolver {
    /// Display name used in log output.
    pub const NAME: &'static str = "newton";

    /// Create a solver with the given configuration.
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self {
            config: SolverConfig::default(),
        }
    }

    /// Get the solver configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Minimise `problem` starting from `x0`.
    ///
    /// # Errors
    ///
    /// * `SolverError::HessianNotPositiveDefinite` - Cholesky failed at some iterate
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
        driver::run(
            Self::NAME,
            problem,
            x0,
            &self.config,
            |x, gradient, iteration| {
                let chol = problem
                    .eval_hessian(x)
                    .cholesky()
                    .ok_or(SolverError::HessianNotPositiveDefinite { iteration })?;
                Ok(Direction::unregularised(chol.solve(&(-gradient))))
            },
            observer,
        )
    }
}

impl Default for NewtonSolver {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Newton's method with tolerance `eps` and iteration cap `max_iters`.
///
/// Fails with `SolverError::HessianNotPositiveDefinite` if any Hessian on the
/// path cannot be Cholesky-factorised.
pub fn newton_solve<P>(
    problem: &P,
    x0: &Vector,
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
    NewtonSolver::new(config).solve(problem, x0)
}
