//! Objective decorator recording evaluation counts and convergence history.
//!
//! [`OptimisationStatistics`] wraps any [`Objective`] and forwards every call
//! unchanged, so it can be handed to any solver in place of the problem.
//! Each gradient evaluation is taken as one iteration observation: the
//! solvers evaluate the gradient exactly once per outer iteration plus once
//! at the returned point.
//!
//! Interior mutability (`Cell`/`RefCell`) keeps the `&self` signature of
//! [`Objective`]. The recorder is therefore `!Sync`.

use optim_core::traits::Objective;
use optim_core::types::{Matrix, Vector};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::time::{Duration, Instant};
use tracing::info;

/// One observation taken at a gradient evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationRecord {
    /// Index of the gradient evaluation since recording started.
    pub iteration: usize,
    /// `f(x)` at the observed point.
    pub value: f64,
    /// `‖∇f(x)‖` at the observed point.
    pub gradient_norm: f64,
}

/// Aggregate statistics of one recorded solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatisticsSummary {
    /// Outer iterations, inferred from the number of gradient observations.
    pub iterations: usize,
    /// Calls to `eval_f` made by the solver.
    pub f_evaluations: usize,
    /// Calls to `eval_gradient`.
    pub gradient_evaluations: usize,
    /// Calls to `eval_hessian`.
    pub hessian_evaluations: usize,
    /// Wall time since recording started.
    pub elapsed: Duration,
    /// First recorded observation.
    pub initial: Option<IterationRecord>,
    /// Last recorded observation.
    pub last: Option<IterationRecord>,
}

impl fmt::Display for StatisticsSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "iterations:            {}", self.iterations)?;
        writeln!(f, "f evaluations:         {}", self.f_evaluations)?;
        writeln!(f, "gradient evaluations:  {}", self.gradient_evaluations)?;
        writeln!(f, "hessian evaluations:   {}", self.hessian_evaluations)?;
        if let (Some(first), Some(last)) = (self.initial, self.last) {
            writeln!(f, "initial f:             {:>13.6e}", first.value)?;
            writeln!(f, "final f:               {:>13.6e}", last.value)?;
            writeln!(f, "final |grad|:          {:>13.6e}", last.gradient_norm)?;
        }
        write!(f, "elapsed:               {:.3?}", self.elapsed)
    }
}

/// Counting and history-recording wrapper around an objective.
///
/// # Example
///
/// ```
/// use optim_core::problems::Rosenbrock;
/// use optim_core::types::Vector;
/// use optim_solvers::{NewtonSolver, OptimisationStatistics};
///
/// let problem = OptimisationStatistics::new(Rosenbrock::default());
/// problem.start_recording();
///
/// let solution = NewtonSolver::with_defaults()
///     .solve(&problem, &Vector::from_vec(vec![1.2, 1.2]))
///     .unwrap();
///
/// let stats = problem.statistics();
/// assert_eq!(stats.iterations, solution.iterations);
/// assert_eq!(stats.hessian_evaluations, solution.iterations);
/// ```
#[derive(Debug)]
pub struct OptimisationStatistics<P> {
    inner: P,
    f_evaluations: Cell<usize>,
    gradient_evaluations: Cell<usize>,
    hessian_evaluations: Cell<usize>,
    records: RefCell<Vec<IterationRecord>>,
    started: Cell<Instant>,
}

impl<P: Objective> OptimisationStatistics<P> {
    /// Wrap `inner`. Recording is active immediately.
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            f_evaluations: Cell::new(0),
            gradient_evaluations: Cell::new(0),
            hessian_evaluations: Cell::new(0),
            records: RefCell::new(Vec::new()),
            started: Cell::new(Instant::now()),
        }
    }

    /// Clear counters and history, and restart the stopwatch.
    pub fn start_recording(&self) {
        self.f_evaluations.set(0);
        self.gradient_evaluations.set(0);
        self.hessian_evaluations.set(0);
        self.records.borrow_mut().clear();
        self.started.set(Instant::now());
    }

    /// Recorded history, oldest first.
    pub fn records(&self) -> Vec<IterationRecord> {
        self.records.borrow().clone()
    }

    /// Snapshot of the counters and history endpoints.
    pub fn statistics(&self) -> StatisticsSummary {
        let records = self.records.borrow();
        StatisticsSummary {
            iterations: records.len().saturating_sub(1),
            f_evaluations: self.f_evaluations.get(),
            gradient_evaluations: self.gradient_evaluations.get(),
            hessian_evaluations: self.hessian_evaluations.get(),
            elapsed: self.started.get().elapsed(),
            initial: records.first().copied(),
            last: records.last().copied(),
        }
    }

    /// Emit the summary through `tracing` at info level.
    pub fn print_statistics(&self) {
        let stats = self.statistics();
        info!(
            iterations = stats.iterations,
            f_evaluations = stats.f_evaluations,
            gradient_evaluations = stats.gradient_evaluations,
            hessian_evaluations = stats.hessian_evaluations,
            elapsed_ms = stats.elapsed.as_secs_f64() * 1e3,
            "optimisation statistics\n{}",
            stats
        );
    }

    /// The wrapped objective.
    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Unwrap, discarding the recorded data.
    pub fn into_inner(self) -> P {
        self.inner
    }
}

impl<P: Objective> Objective for OptimisationStatistics<P> {
    fn n_unknowns(&self) -> usize {
        self.inner.n_unknowns()
    }

    fn eval_f(&self, x: &Vector) -> f64 {
        self.f_evaluations.set(self.f_evaluations.get() + 1);
        self.inner.eval_f(x)
    }

    fn eval_gradient(&self, x: &Vector) -> Vector {
        self.gradient_evaluations.set(self.gradient_evaluations.get() + 1);
        let gradient = self.inner.eval_gradient(x);

        let mut records = self.records.borrow_mut();
        let iteration = records.len();
        records.push(IterationRecord {
            iteration,
            value: self.inner.eval_f(x),
            gradient_norm: gradient.norm(),
        });

        gradient
    }

    fn eval_hessian(&self, x: &Vector) -> Matrix {
        self.hessian_evaluations.set(self.hessian_evaluations.get() + 1);
        self.inner.eval_hessian(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gradient_descent::gradient_descent_solve;
    use crate::newton::newton_solve;
    use approx::assert_relative_eq;
    use optim_core::problems::{QuadraticObjective, Rosenbrock};

    fn quadratic() -> QuadraticObjective {
        let a = Matrix::from_row_slice(2, 2, &[4.0, 1.0, 1.0, 3.0]);
        QuadraticObjective::new(a, Vector::from_vec(vec![1.0, 2.0]))
    }

    // ========================================
    // Counting Tests
    // ========================================

    #[test]
    fn test_forwards_values_unchanged() {
        let problem = quadratic();
        let wrapped = OptimisationStatistics::new(quadratic());
        let x = Vector::from_vec(vec![0.3, -1.2]);

        assert_eq!(wrapped.n_unknowns(), 2);
        assert_eq!(wrapped.eval_f(&x), problem.eval_f(&x));
        assert_eq!(wrapped.eval_gradient(&x), problem.eval_gradient(&x));
        assert_eq!(wrapped.eval_hessian(&x), problem.eval_hessian(&x));
    }

    #[test]
    fn test_counts_each_kind_of_evaluation() {
        let wrapped = OptimisationStatistics::new(quadratic());
        let x = Vector::zeros(2);

        wrapped.eval_f(&x);
        wrapped.eval_f(&x);
        wrapped.eval_gradient(&x);
        wrapped.eval_hessian(&x);

        let stats = wrapped.statistics();
        // The value recorded alongside the gradient is not counted.
        assert_eq!(stats.f_evaluations, 2);
        assert_eq!(stats.gradient_evaluations, 1);
        assert_eq!(stats.hessian_evaluations, 1);
        assert_eq!(stats.iterations, 0);
    }

    #[test]
    fn test_start_recording_resets() {
        let wrapped = OptimisationStatistics::new(quadratic());
        let x = Vector::zeros(2);
        wrapped.eval_gradient(&x);
        wrapped.eval_f(&x);

        wrapped.start_recording();
        let stats = wrapped.statistics();
        assert_eq!(stats.f_evaluations, 0);
        assert_eq!(stats.gradient_evaluations, 0);
        assert!(stats.initial.is_none());
        assert!(wrapped.records().is_empty());
    }

    // ========================================
    // History Tests
    // ========================================

    #[test]
    fn test_newton_history_on_quadratic() {
        let wrapped = OptimisationStatistics::new(quadratic());
        let x0 = Vector::from_vec(vec![5.0, 5.0]);
        let solution = newton_solve(&wrapped, &x0, 1e-8, 100).unwrap();

        let records = wrapped.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].iteration, 0);
        assert_relative_eq!(records[0].value, quadratic().eval_f(&x0));
        assert_relative_eq!(records[1].value, solution.value);

        let stats = wrapped.statistics();
        assert_eq!(stats.iterations, solution.iterations);
        assert_eq!(stats.hessian_evaluations, 1);
        assert_eq!(stats.last, records.last().copied());
    }

    #[test]
    fn test_capped_solve_records_final_point() {
        let wrapped = OptimisationStatistics::new(Rosenbrock::default());
        let x0 = Vector::from_vec(vec![-1.2, 1.0]);
        let solution = gradient_descent_solve(&wrapped, &x0, 1e-10, 10).unwrap();

        let stats = wrapped.statistics();
        assert!(!solution.converged);
        assert_eq!(stats.iterations, 10);
        let last = stats.last.unwrap();
        assert_relative_eq!(last.gradient_norm, solution.gradient_norm());
        assert!(last.value < stats.initial.unwrap().value);
    }

    #[test]
    fn test_summary_display() {
        let wrapped = OptimisationStatistics::new(quadratic());
        wrapped.eval_gradient(&Vector::zeros(2));
        let text = wrapped.statistics().to_string();
        assert!(text.contains("gradient evaluations:  1"));
        assert!(text.contains("final f:"));
        wrapped.print_statistics();
    }

    #[test]
    fn test_into_inner() {
        let wrapped = OptimisationStatistics::new(Rosenbrock::new(2.0, 50.0));
        assert_eq!(wrapped.inner().a, 2.0);
        assert_eq!(wrapped.into_inner().b, 50.0);
    }
}
