//! Convergence bookkeeping and the solver result type.

use optim_core::config::SolverConfig;
use optim_core::types::Vector;

/// Convergence state of one solve call.
///
/// Created at solve start, updated once per outer iteration, terminal when
/// `‖g‖² ≤ 2·ε²` or the iteration count reaches its maximum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvergenceState {
    iteration: usize,
    gradient_norm_sq: f64,
    converged: bool,
    threshold: f64,
}

impl ConvergenceState {
    /// Fresh state for a solve with the given configuration.
    pub fn new(config: &SolverConfig) -> Self {
        Self {
            iteration: 0,
            gradient_norm_sq: f64::INFINITY,
            converged: false,
            threshold: config.convergence_threshold(),
        }
    }

    /// Record a squared gradient norm and report whether it meets the threshold.
    pub fn observe(&mut self, gradient_norm_sq: f64) -> bool {
        self.gradient_norm_sq = gradient_norm_sq;
        self.converged = gradient_norm_sq <= self.threshold;
        self.converged
    }

    /// Count one completed outer iteration.
    pub fn advance(&mut self) {
        self.iteration += 1;
    }

    /// Completed outer iterations.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Most recently observed `‖g‖²` (infinite before the first observation).
    pub fn gradient_norm_sq(&self) -> f64 {
        self.gradient_norm_sq
    }

    /// Whether the last observation met the threshold.
    pub fn is_converged(&self) -> bool {
        self.converged
    }

    /// The `2·ε²` threshold.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Package the terminal state with the final point.
    pub fn into_solution(self, x: Vector, value: f64) -> Solution {
        Solution {
            x,
            iterations: self.iteration,
            converged: self.converged,
            value,
            gradient_norm_sq: self.gradient_norm_sq,
        }
    }
}

/// Result of a solve call.
///
/// Hitting the iteration cap is not an error: `converged` is `false` and
/// `x` holds the last iterate.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Final point.
    pub x: Vector,
    /// Number of outer iterations (steps taken).
    pub iterations: usize,
    /// Whether `‖∇f(x)‖² ≤ 2·ε²` holds at `x`.
    pub converged: bool,
    /// `f(x)`.
    pub value: f64,
    /// `‖∇f(x)‖²`.
    pub gradient_norm_sq: f64,
}

impl Solution {
    /// `‖∇f(x)‖`.
    pub fn gradient_norm(&self) -> f64 {
        self.gradient_norm_sq.sqrt()
    }

    /// Split into the final point and the converged flag.
    pub fn into_parts(self) -> (Vector, bool) {
        (self.x, self.converged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = ConvergenceState::new(&SolverConfig::new(1e-2, 10));
        assert_eq!(state.iteration(), 0);
        assert!(!state.is_converged());
        assert!(state.gradient_norm_sq().is_infinite());
        assert!((state.threshold() - 2e-4).abs() < 1e-18);
    }

    #[test]
    fn test_observe_at_threshold_converges() {
        let mut state = ConvergenceState::new(&SolverConfig::new(1e-2, 10));
        assert!(!state.observe(3e-4));
        assert!(state.observe(state.threshold()));
        assert!(state.is_converged());
    }

    #[test]
    fn test_nan_never_converges() {
        let mut state = ConvergenceState::new(&SolverConfig::default());
        assert!(!state.observe(f64::NAN));
    }

    #[test]
    fn test_into_solution() {
        let mut state = ConvergenceState::new(&SolverConfig::default());
        state.advance();
        state.advance();
        state.observe(0.0);
        let solution = state.into_solution(Vector::from_vec(vec![1.0]), -3.0);

        assert_eq!(solution.iterations, 2);
        assert!(solution.converged);
        assert_eq!(solution.value, -3.0);
        assert_eq!(solution.gradient_norm(), 0.0);

        let (x, converged) = solution.into_parts();
        assert_eq!(x[0], 1.0);
        assert!(converged);
    }
}
