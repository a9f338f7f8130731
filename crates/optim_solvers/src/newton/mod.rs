//! Newton's method and its Hessian-stabilised variant.
//!
//! Both solvers compute the direction from `H·d = −g` and share the line
//! search and stopping rule of gradient descent.
//!
//! - [`NewtonSolver`]: Cholesky of the raw Hessian; an indefinite or singular
//!   Hessian is a hard [`SolverError::HessianNotPositiveDefinite`](optim_core::types::SolverError)
//! - [`StabilisedNewtonSolver`]: delegates to a [`HessianStabiliser`] that
//!   always produces a descent direction
//!
//! ## Stabilisation Strategies
//!
//! | Strategy            | Mechanism                                  | Cost per iteration           |
//! |---------------------|--------------------------------------------|------------------------------|
//! | [`DiagonalShift`]   | Retry Cholesky on `H + δ·I`, δ ← γ·δ       | One factorisation per retry  |
//! | [`EigenvalueFloor`] | Clamp eigenvalues of `H` to a small floor  | One eigendecomposition       |

mod plain;
mod stabilised;
mod stabiliser;

pub use plain::{newton_solve, NewtonSolver};
pub use stabilised::{stabilised_newton_solve, StabilisedNewtonSolver};
pub use stabiliser::{DiagonalShift, EigenvalueFloor, HessianStabiliser, StabilisedDirection};
