//! Reference objectives.
//!
//! Small closed-form problems with exact derivatives, used to exercise the
//! solvers in tests and benchmarks:
//!
//! - [`QuadraticObjective`]: `½xᵀAx − bᵀx`, convex when `A` is positive definite
//! - [`Rosenbrock`]: the banana valley, smooth and non-convex
//! - [`SaddleObjective`]: saddle at the origin, minima at `(0, ±1)`
//! - [`SpringElement2D`]: one spring with rest length between two planar nodes

mod quadratic;
mod rosenbrock;
mod saddle;
mod spring;

pub use quadratic::QuadraticObjective;
pub use rosenbrock::Rosenbrock;
pub use saddle::SaddleObjective;
pub use spring::{HessianMode, SpringElement2D};
