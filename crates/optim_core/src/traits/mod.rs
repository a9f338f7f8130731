//! Traits shared between problems and solvers.
//!
//! - [`Objective`]: value, gradient, and Hessian evaluation contract

pub mod objective;

pub use objective::Objective;
