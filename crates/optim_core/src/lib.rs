//! # optim_core: Foundation for Unconstrained Optimisation
//!
//! ## Layer 1 (Foundation) Role
//!
//! optim_core is the bottom layer of the workspace, providing:
//! - The objective contract solvers are written against (`traits::Objective`)
//! - Dense vector/matrix aliases over nalgebra (`types`)
//! - Solver error taxonomy: `SolverError` (`types::error`)
//! - Solver and line-search configuration (`config`)
//! - Spectral projection of symmetric matrices (`math::projection`)
//! - Reference objectives for testing and benchmarking (`problems`)
//! - Random start-point generation (`sampling`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other optim_* crates, with minimal external dependencies:
//! - nalgebra: Dense vectors, matrices, Cholesky and symmetric eigendecomposition
//! - rand: Start-point sampling
//! - thiserror: Error derivation
//! - serde/toml: Configuration loading (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use optim_core::problems::QuadraticObjective;
//! use optim_core::traits::Objective;
//! use optim_core::types::{Matrix, Vector};
//!
//! // f(x) = ½ xᵀAx − bᵀx
//! let a = Matrix::from_row_slice(2, 2, &[2.0, 0.0, 0.0, 4.0]);
//! let b = Vector::from_vec(vec![2.0, 4.0]);
//! let problem = QuadraticObjective::new(a, b);
//!
//! assert_eq!(problem.n_unknowns(), 2);
//! let x = Vector::from_vec(vec![1.0, 1.0]);
//! assert!(problem.eval_gradient(&x).norm() < 1e-12);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for configuration types and `SolverConfig::from_toml_str`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod config;
pub mod math;
pub mod problems;
pub mod sampling;
pub mod traits;
pub mod types;
