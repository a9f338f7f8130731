//! Outer iteration loop shared by every descent solver.
//!
//! Solvers differ only in how they turn `(x, g)` into a search direction;
//! gradient evaluation, the stopping test, the line search, and the update
//! `x ← x + t·d` live here.

use crate::convergence::{ConvergenceState, Solution};
use crate::line_search::{backtracking, LineSearchStatus};
use optim_core::config::SolverConfig;
use optim_core::traits::Objective;
use optim_core::types::{SolverError, Vector};
use tracing::{debug, info, info_span, warn};

/// Read-only view of one outer iteration, passed to solve observers after
/// the line search and before the update.
#[derive(Debug, Clone, Copy)]
pub struct IterationView<'a> {
    /// Outer iteration index, starting at 0.
    pub iteration: usize,
    /// Current point.
    pub x: &'a Vector,
    /// Gradient at `x`.
    pub gradient: &'a Vector,
    /// Search direction.
    pub direction: &'a Vector,
    /// Accepted step length.
    pub step: f64,
    /// Line-search termination status.
    pub line_search: LineSearchStatus,
    /// Diagonal shift (or eigenvalue lift) applied to the Hessian; 0 if none.
    pub regularisation: f64,
}

impl IterationView<'_> {
    /// `gᵀd`.
    pub fn directional_derivative(&self) -> f64 {
        self.gradient.dot(self.direction)
    }
}

/// Search direction produced by a solver for one iteration.
pub(crate) struct Direction {
    pub(crate) direction: Vector,
    pub(crate) regularisation: f64,
}

impl Direction {
    pub(crate) fn unregularised(direction: Vector) -> Self {
        Self {
            direction,
            regularisation: 0.0,
        }
    }
}

/// Run the descent loop.
///
/// `direction_for(x, g, iteration)` is called only when `x` has not yet
/// converged.
pub(crate) fn run<P, D, O>(
    solver: &'static str,
    problem: &P,
    x0: &Vector,
    config: &SolverConfig,
    mut direction_for: D,
    mut observer: O,
) -> Result<Solution, SolverError>
where
    P: Objective + ?Sized,
    D: FnMut(&Vector, &Vector, usize) -> Result<Direction, SolverError>,
    O: FnMut(&IterationView<'_>),
{
    config.validate()?;

    let n = problem.n_unknowns();
    if x0.len() != n {
        return Err(SolverError::DimensionMismatch {
            expected: n,
            got: x0.len(),
        });
    }

    let span = info_span!("solve", solver, n_unknowns = n);
    let _enter = span.enter();
    info!("******** {} ********", solver);

    let mut state = ConvergenceState::new(config);
    let mut x = x0.clone();

    while state.iteration() < config.max_iterations {
        let iteration = state.iteration();
        let gradient = problem.eval_gradient(&x);
        let gradient_norm_sq = gradient.norm_squared();
        if !gradient_norm_sq.is_finite() {
            return Err(SolverError::NonFiniteValue { iteration });
        }

        if state.observe(gradient_norm_sq) {
            break;
        }

        let Direction {
            direction,
            regularisation,
        } = direction_for(&x, &gradient, iteration)?;

        let outcome = backtracking(problem, &x, &direction, &gradient, &config.line_search);

        debug!(
            iteration,
            gradient_norm_sq,
            step = outcome.step,
            shrinks = outcome.shrinks,
            regularisation,
            "iteration"
        );

        observer(&IterationView {
            iteration,
            x: &x,
            gradient: &gradient,
            direction: &direction,
            step: outcome.step,
            line_search: outcome.status,
            regularisation,
        });

        x.axpy(outcome.step, &direction, 1.0);
        state.advance();
    }

    if !state.is_converged() {
        // The loop stopped on the cap; describe the returned point, not the
        // one before the last step.
        let gradient_norm_sq = problem.eval_gradient(&x).norm_squared();
        if !gradient_norm_sq.is_finite() {
            return Err(SolverError::NonFiniteValue {
                iteration: state.iteration(),
            });
        }
        state.observe(gradient_norm_sq);
    }

    if state.is_converged() {
        info!(
            iterations = state.iteration(),
            gradient_norm_sq = state.gradient_norm_sq(),
            "converged after {} iterations",
            state.iteration()
        );
    } else {
        warn!(
            iterations = state.iteration(),
            gradient_norm_sq = state.gradient_norm_sq(),
            "reached maximum iterations without convergence"
        );
    }

    let value = problem.eval_f(&x);
    Ok(state.into_solution(x, value))
}
