//! Steepest-descent solver.
//!
//! Each iteration steps along `d = −∇f(x)` with a backtracking line search.
//! No Hessian is evaluated: cheapest per iteration, slowest to converge. It
//! is the baseline the Newton variants are compared against.

use crate::convergence::Solution;
use crate::driver::{self, Direction, IterationView};
use optim_core::config::SolverConfig;
use optim_core::traits::Objective;
use optim_core::types::{SolverError, Vector};

/// Gradient descent with backtracking line search.
///
/// # Example
///
/// ```
/// use optim_core::config::SolverConfig;
/// use optim_core::problems::QuadraticObjective;
/// use optim_core::types::Vector;
/// use optim_solvers::GradientDescentSolver;
///
/// let problem = QuadraticObjective::diagonal(
///     Vector::from_vec(vec![1.0, 2.0]),
///     Vector::from_vec(vec![1.0, 2.0]),
/// );
/// let solver = GradientDescentSolver::new(SolverConfig::new(1e-6, 10_000));
///
/// let solution = solver.solve(&problem, &Vector::zeros(2)).unwrap();
/// assert!(solution.converged);
/// assert!((solution.x[0] - 1.0).abs() < 1e-5);
/// assert!((solution.x[1] - 1.0).abs() < 1e-5);
/// ```
#[derive(Debug, Clone)]
pub struct GradientDescentSolver {
    config: SolverConfig,
}

impl GradientDescentSolver {
    /// Display name used in log output.
    pub const NAME: &'static str = "gradient descent";

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
            |_, gradient, _| Ok(Direction::unregularised(-gradient)),
            observer,
        )
    }
}

impl Default for GradientDescentSolver {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Gradient descent with tolerance `eps` and iteration cap `max_iters`,
/// default line search.
pub fn gradient_descent_solve<P>(
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
    GradientDescentSolver::new(config).solve(problem, x0)
}
