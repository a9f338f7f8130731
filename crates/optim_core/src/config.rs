//! Solver configuration types.
//!
//! Every solve call receives its parameters explicitly; there is no global
//! mutable state. The defaults reproduce the classic textbook settings:
//!
//! | Parameter                   | Default     |
//! |-----------------------------|-------------|
//! | `tolerance` (ε)             | 1e-4        |
//! | `max_iterations`            | 1,000,000   |
//! | line search `initial_step`  | 1.0         |
//! | line search `alpha`         | 0.5         |
//! | line search `tau`           | 0.75        |
//! | line search `max_shrinks`   | 1000        |
//! | diagonal shift `gamma`      | 10          |
//! | diagonal shift seed δ       | 1e-4        |
//! | diagonal shift cap          | 1e20        |

use crate::types::SolverError;

/// Configuration for the backtracking (Armijo) line search.
///
/// # Example
///
/// ```
/// use optim_core::config::LineSearchConfig;
///
/// let config = LineSearchConfig::default();
/// assert_eq!(config.initial_step, 1.0);
/// assert_eq!(config.alpha, 0.5);
/// assert_eq!(config.tau, 0.75);
/// assert_eq!(config.max_shrinks, 1000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LineSearchConfig {
    /// Initial step length `t0`.
    pub initial_step: f64,
    /// Sufficient-decrease factor `α` in `f(x + t·d) ≤ f(x) + α·t·gᵀd`.
    pub alpha: f64,
    /// Shrink factor `τ` applied as `t ← τ·t`.
    pub tau: f64,
    /// Hard cap on the number of shrink steps.
    pub max_shrinks: usize,
}

impl Default for LineSearchConfig {
    fn default() -> Self {
        Self {
            initial_step: 1.0,
            alpha: 0.5,
            tau: 0.75,
            max_shrinks: 1000,
        }
    }
}

impl LineSearchConfig {
    /// Create a line-search configuration with the default shrink cap.
    ///
    /// # Panics
    ///
    /// Panics if `initial_step <= 0`, or if `alpha` or `tau` lie outside `(0, 1)`.
    pub fn new(initial_step: f64, alpha: f64, tau: f64) -> Self {
        assert!(initial_step > 0.0, "initial_step must be positive");
        assert!(alpha > 0.0 && alpha < 1.0, "alpha must lie in (0, 1)");
        assert!(tau > 0.0 && tau < 1.0, "tau must lie in (0, 1)");
        Self {
            initial_step,
            alpha,
            tau,
            ..Default::default()
        }
    }

    /// Override the shrink cap.
    pub fn with_max_shrinks(mut self, max_shrinks: usize) -> Self {
        self.max_shrinks = max_shrinks;
        self
    }

    /// Check the parameters without panicking.
    pub fn validate(&self) -> Result<(), SolverError> {
        if !(self.initial_step > 0.0 && self.initial_step.is_finite()) {
            return Err(SolverError::InvalidConfig(format!(
                "line search initial_step must be positive and finite, got {}",
                self.initial_step
            )));
        }
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(SolverError::InvalidConfig(format!(
                "line search alpha must lie in (0, 1), got {}",
                self.alpha
            )));
        }
        if !(self.tau > 0.0 && self.tau < 1.0) {
            return Err(SolverError::InvalidConfig(format!(
                "line search tau must lie in (0, 1), got {}",
                self.tau
            )));
        }
        Ok(())
    }
}

/// Configuration shared by all descent solvers.
///
/// The solver stops once `‖∇f(x)‖² ≤ 2·tolerance²` or after
/// `max_iterations` outer iterations.
///
/// # Example
///
/// ```
/// use optim_core::config::{LineSearchConfig, SolverConfig};
///
/// let config: SolverConfig = SolverConfig::default();
/// assert_eq!(config.tolerance, 1e-4);
/// assert_eq!(config.max_iterations, 1_000_000);
///
/// let custom = SolverConfig::new(1e-6, 500)
///     .with_line_search(LineSearchConfig::new(1.0, 1e-4, 0.5));
/// assert_eq!(custom.line_search.alpha, 1e-4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SolverConfig {
    /// Stopping tolerance ε on the gradient norm.
    pub tolerance: f64,
    /// Safety cap on outer iterations.
    pub max_iterations: usize,
    /// Step-length control.
    pub line_search: LineSearchConfig,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-4,
            max_iterations: 1_000_000,
            line_search: LineSearchConfig::default(),
        }
    }
}

impl SolverConfig {
    /// Create a configuration with the default line search.
    ///
    /// # Panics
    ///
    /// Panics if `tolerance <= 0`.
    ///
    /// # Example
    ///
    /// ```
    /// use optim_core::config::SolverConfig;
    ///
    /// let config = SolverConfig::new(1e-8, 200);
    /// assert_eq!(config.max_iterations, 200);
    /// ```
    pub fn new(tolerance: f64, max_iterations: usize) -> Self {
        assert!(tolerance > 0.0, "tolerance must be positive");
        Self {
            tolerance,
            max_iterations,
            line_search: LineSearchConfig::default(),
        }
    }

    /// Replace the line-search parameters.
    pub fn with_line_search(mut self, line_search: LineSearchConfig) -> Self {
        self.line_search = line_search;
        self
    }

    /// Relaxed tolerance (1e-3) and a short iteration budget (10,000).
    pub fn fast() -> Self {
        Self {
            tolerance: 1e-3,
            max_iterations: 10_000,
            ..Default::default()
        }
    }

    /// Tight tolerance (1e-8) with the default iteration cap.
    pub fn high_precision() -> Self {
        Self {
            tolerance: 1e-8,
            ..Default::default()
        }
    }

    /// Threshold on the squared gradient norm: `2·ε²`.
    #[inline]
    pub fn convergence_threshold(&self) -> f64 {
        2.0 * self.tolerance * self.tolerance
    }

    /// Check the parameters without panicking.
    pub fn validate(&self) -> Result<(), SolverError> {
        if !(self.tolerance > 0.0 && self.tolerance.is_finite()) {
            return Err(SolverError::InvalidConfig(format!(
                "tolerance must be positive and finite, got {}",
                self.tolerance
            )));
        }
        self.line_search.validate()
    }

    /// Parse a configuration from TOML. Missing keys take their defaults.
    ///
    /// # Example
    ///
    /// ```
    /// use optim_core::config::SolverConfig;
    ///
    /// let config = SolverConfig::from_toml_str(
    ///     r#"
    ///     tolerance = 1e-6
    ///
    ///     [line_search]
    ///     tau = 0.5
    ///     "#,
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(config.tolerance, 1e-6);
    /// assert_eq!(config.max_iterations, 1_000_000);
    /// assert_eq!(config.line_search.tau, 0.5);
    /// ```
    #[cfg(feature = "serde")]
    pub fn from_toml_str(source: &str) -> Result<Self, SolverError> {
        let config: Self =
            toml::from_str(source).map_err(|e| SolverError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

/// Lifecycle of the diagonal shift δ across outer iterations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RegularisationSchedule {
    /// Every outer iteration restarts from the seed δ.
    #[default]
    ResetEachIteration,
    /// The next escalation starts from `max(seed, δ_last / γ)`, where
    /// `δ_last` is the shift of the previous iteration. An iteration whose
    /// Hessian factorises unshifted clears it.
    CarryForward,
}

/// Configuration for diagonal-shift Hessian regularisation.
///
/// When `H` cannot be factorised, `H + δ·I` is tried with δ starting at
/// `initial_delta` and multiplied by `gamma` after each failure. Exceeding
/// `max_delta` is reported as an error instead of looping on.
///
/// # Example
///
/// ```
/// use optim_core::config::{DiagonalShiftConfig, RegularisationSchedule};
///
/// let config = DiagonalShiftConfig::default();
/// assert_eq!(config.gamma, 10.0);
/// assert_eq!(config.initial_delta, 1e-4);
/// assert_eq!(config.schedule, RegularisationSchedule::ResetEachIteration);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DiagonalShiftConfig {
    /// Growth factor γ applied to δ after a failed factorisation.
    pub gamma: f64,
    /// Seed value of δ.
    pub initial_delta: f64,
    /// Largest δ tried before giving up.
    pub max_delta: f64,
    /// Whether δ restarts from the seed each outer iteration.
    pub schedule: RegularisationSchedule,
}

impl Default for DiagonalShiftConfig {
    fn default() -> Self {
        Self {
            gamma: 10.0,
            initial_delta: 1e-4,
            max_delta: 1e20,
            schedule: RegularisationSchedule::ResetEachIteration,
        }
    }
}

impl DiagonalShiftConfig {
    /// Create a configuration with growth factor `gamma`.
    ///
    /// # Panics
    ///
    /// Panics if `gamma <= 1`.
    pub fn new(gamma: f64) -> Self {
        assert!(gamma > 1.0, "gamma must be greater than 1");
        Self {
            gamma,
            ..Default::default()
        }
    }

    /// Replace the seed δ.
    pub fn with_initial_delta(mut self, initial_delta: f64) -> Self {
        self.initial_delta = initial_delta;
        self
    }

    /// Replace the δ cap.
    pub fn with_max_delta(mut self, max_delta: f64) -> Self {
        self.max_delta = max_delta;
        self
    }

    /// Replace the δ lifecycle.
    pub fn with_schedule(mut self, schedule: RegularisationSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// Check the parameters without panicking.
    pub fn validate(&self) -> Result<(), SolverError> {
        if !(self.gamma > 1.0 && self.gamma.is_finite()) {
            return Err(SolverError::InvalidConfig(format!(
                "gamma must be greater than 1 and finite, got {}",
                self.gamma
            )));
        }
        if !(self.initial_delta > 0.0) {
            return Err(SolverError::InvalidConfig(format!(
                "initial_delta must be positive, got {}",
                self.initial_delta
            )));
        }
        if !(self.max_delta >= self.initial_delta) {
            return Err(SolverError::InvalidConfig(format!(
                "max_delta ({}) must not be below initial_delta ({})",
                self.max_delta, self.initial_delta
            )));
        }
        Ok(())
    }
}
