//! Error types for structured error handling.
//!
//! This module provides `SolverError`, covering the failure modes of the
//! descent solvers. Conditions the solvers handle locally (a non-descent
//! line-search direction, an indefinite Hessian on the stabilised path,
//! hitting the iteration cap) are not errors and never surface here.

use thiserror::Error;

/// Optimisation solver errors.
///
/// # Variants
/// - `HessianNotPositiveDefinite`: Cholesky factorisation failed in plain Newton
/// - `RegularisationOverflow`: Diagonal shift grew past its cap
/// - `DimensionMismatch`: Start point does not match the problem dimension
/// - `NonFiniteValue`: Objective produced NaN or infinite derivatives
/// - `InvalidConfig`: Configuration failed validation
///
/// # Examples
/// ```
/// use optim_core::types::SolverError;
///
/// let err = SolverError::HessianNotPositiveDefinite { iteration: 3 };
/// assert!(format!("{}", err).contains("iteration 3"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolverError {
    /// The Hessian could not be factorised as symmetric positive definite.
    #[error("Hessian is not positive definite or cannot be decomposed at iteration {iteration}")]
    HessianNotPositiveDefinite {
        /// Outer iteration at which factorisation failed
        iteration: usize,
    },

    /// The diagonal shift exceeded its configured maximum before the
    /// shifted Hessian became factorisable.
    #[error("Regularisation {delta:e} exceeded cap {max_delta:e} at iteration {iteration}")]
    RegularisationOverflow {
        /// Shift that would have been tried next
        delta: f64,
        /// Configured cap
        max_delta: f64,
        /// Outer iteration at which the cap was hit
        iteration: usize,
    },

    /// Start point length differs from the problem's number of unknowns.
    #[error("Dimension mismatch: problem has {expected} unknowns, start point has {got}")]
    DimensionMismatch {
        /// Dimension reported by the objective
        expected: usize,
        /// Dimension of the supplied start point
        got: usize,
    },

    /// Gradient evaluation produced a non-finite value.
    #[error("Non-finite gradient at iteration {iteration}")]
    NonFiniteValue {
        /// Outer iteration at which the value was observed
        iteration: usize,
    },

    /// Invalid solver configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
