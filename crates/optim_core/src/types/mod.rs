//! Core numeric and error types.
//!
//! This module provides:
//! - `error`: Structured error type for solver operations
//! - [`Vector`] and [`Matrix`]: dense `f64` storage used for points,
//!   gradients, and Hessians
//!
//! # Re-exports
//!
//! - [`SolverError`] from `error`

pub mod error;

pub use error::SolverError;

/// Dense real vector of dynamic dimension (points, gradients, directions).
pub type Vector = nalgebra::DVector<f64>;

/// Dense real square matrix of dynamic dimension (Hessians).
pub type Matrix = nalgebra::DMatrix<f64>;
