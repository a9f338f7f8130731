//! Backtracking line search with the Armijo sufficient-decrease condition.
//!
//! # Algorithm
//!
//! Starting from `t = t0`, shrink `t ← τ·t` until
//!
//! ```text
//! f(x + t·d) ≤ f(x) + α·t·gᵀd
//! ```
//!
//! or the shrink cap is reached. This is the only place where the solvers
//! evaluate the objective purely for step acceptance, so it dominates the
//! function-evaluation count per outer iteration.

use optim_core::config::LineSearchConfig;
use optim_core::traits::Objective;
use optim_core::types::Vector;
use tracing::warn;

/// Relative slack on the Armijo comparison. An exact Newton step on a
/// quadratic meets the inequality with equality at `α = ½`. The slack never
/// admits a step that raises the objective.
const ARMIJO_ROUNDOFF: f64 = 10.0 * f64::EPSILON;

/// How a line search terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSearchStatus {
    /// The Armijo inequality holds at the returned step.
    Accepted,
    /// `gᵀd > 0`: the direction is not a descent direction and the initial
    /// step was returned without any objective evaluation.
    NotDescent,
    /// The shrink cap was hit without satisfying the Armijo inequality.
    ShrinkLimit,
}

/// Result of [`backtracking`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSearchOutcome {
    /// Step length `t`.
    pub step: f64,
    /// Termination status.
    pub status: LineSearchStatus,
    /// Number of times `t` was multiplied by `τ`.
    pub shrinks: usize,
    /// Directional derivative `gᵀd`.
    pub directional_derivative: f64,
}

impl LineSearchOutcome {
    /// Step length `t`.
    #[inline]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Whether the Armijo inequality holds at [`step`](Self::step).
    #[inline]
    pub fn is_accepted(&self) -> bool {
        self.status == LineSearchStatus::Accepted
    }
}

/// Backtracking line search along `direction` from `x`.
///
/// # Arguments
///
/// * `problem` - Objective; only [`Objective::eval_f`] is called
/// * `x` - Current point
/// * `direction` - Search direction `d`
/// * `gradient` - Gradient `g` at `x`
/// * `config` - Initial step, `α`, `τ`, and the shrink cap
///
/// # Example
///
/// ```
/// use optim_core::config::LineSearchConfig;
/// use optim_core::problems::QuadraticObjective;
/// use optim_core::traits::Objective;
/// use optim_core::types::Vector;
/// use optim_solvers::line_search::{backtracking, LineSearchStatus};
///
/// let problem = QuadraticObjective::diagonal(
///     Vector::from_vec(vec![1.0, 10.0]),
///     Vector::zeros(2),
/// );
/// let x = Vector::from_vec(vec![1.0, 1.0]);
/// let g = problem.eval_gradient(&x);
/// let d = -&g;
///
/// let outcome = backtracking(&problem, &x, &d, &g, &LineSearchConfig::default());
/// assert_eq!(outcome.status, LineSearchStatus::Accepted);
/// assert!(outcome.step > 0.0 && outcome.step <= 1.0);
/// ```
pub fn backtracking<P>(
    problem: &P,
    x: &Vector,
    direction: &Vector,
    gradient: &Vector,
    config: &LineSearchConfig,
) -> LineSearchOutcome
where
    P: Objective + ?Sized,
{
    let mut t = config.initial_step;
    let gtd = gradient.dot(direction);

    if gtd > 0.0 {
        warn!(
            directional_derivative = gtd,
            "direction increases the objective, returning initial step"
        );
        return LineSearchOutcome {
            step: t,
            status: LineSearchStatus::NotDescent,
            shrinks: 0,
            directional_derivative: gtd,
        };
    }

    let fx = problem.eval_f(x);
    let mut shrinks = 0;

    loop {
        let mut trial = x.clone();
        trial.axpy(t, direction, 1.0);

        let ft = problem.eval_f(&trial);
        let decrease = config.alpha * t * gtd;
        let slack = ARMIJO_ROUNDOFF * (fx.abs() + decrease.abs());
        let descends = ft < fx || (ft == fx && gtd == 0.0);
        if descends && ft <= fx + decrease + slack {
            return LineSearchOutcome {
                step: t,
                status: LineSearchStatus::Accepted,
                shrinks,
                directional_derivative: gtd,
            };
        }

        if shrinks >= config.max_shrinks {
            warn!(
                step = t,
                shrinks, "line search hit the shrink limit without sufficient decrease"
            );
            return LineSearchOutcome {
                step: t,
                status: LineSearchStatus::ShrinkLimit,
                shrinks,
                directional_derivative: gtd,
            };
        }

        t *= config.tau;
        shrinks += 1;
    }
}
