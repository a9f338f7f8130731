//! # optim_solvers
//!
//! Descent solvers for unconstrained nonlinear optimisation.
//!
//! This crate sits on top of `optim_core` (L1) and drives any
//! [`Objective`](optim_core::traits::Objective) to a stationary point.
//!
//! ## Modules
//!
//! - `line_search`: Backtracking line search with the Armijo condition
//! - `gradient_descent`: Steepest descent scaled by the line search
//! - `newton`: Plain Newton (fails on indefinite Hessians) and the
//!   Hessian-stabilised variant with pluggable [`HessianStabiliser`]s
//! - `convergence`: Convergence state and the [`Solution`] type
//! - `recorder`: Objective decorator recording per-iteration statistics
//!
//! ## Example
//!
//! ```rust
//! use optim_core::problems::SaddleObjective;
//! use optim_core::types::Vector;
//! use optim_solvers::{newton_solve, stabilised_newton_solve};
//!
//! let problem = SaddleObjective::default();
//! let x0 = Vector::from_vec(vec![1.0, 0.1]);
//!
//! // The Hessian is indefinite at x0: plain Newton refuses.
//! assert!(newton_solve(&problem, &x0, 1e-6, 100).is_err());
//!
//! // The stabilised variant shifts the Hessian and reaches a minimum.
//! let solution = stabilised_newton_solve(&problem, &x0, 10.0, 1e-6, 100).unwrap();
//! assert!(solution.converged);
//! assert!((solution.x[1].abs() - 1.0).abs() < 1e-5);
//! ```

pub mod convergence;
pub mod gradient_descent;
pub mod line_search;
pub mod newton;
pub mod recorder;

mod driver;

pub use convergence::{ConvergenceState, Solution};
pub use driver::IterationView;
pub use gradient_descent::{gradient_descent_solve, GradientDescentSolver};
pub use line_search::{backtracking, LineSearchOutcome, LineSearchStatus};
pub use newton::{
    newton_solve, stabilised_newton_solve, DiagonalShift, EigenvalueFloor, HessianStabiliser,
    NewtonSolver, StabilisedDirection, StabilisedNewtonSolver,
};
pub use optim_core::types::SolverError;
pub use recorder::{IterationRecord, OptimisationStatistics, StatisticsSummary};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::convergence::*;
    pub use crate::gradient_descent::*;
    pub use crate::line_search::*;
    pub use crate::newton::*;
    pub use crate::recorder::*;
    pub use crate::IterationView;
    pub use optim_core::config::{
        DiagonalShiftConfig, LineSearchConfig, RegularisationSchedule, SolverConfig,
    };
    pub use optim_core::traits::Objective;
    pub use optim_core::types::{Matrix, SolverError, Vector};
}
