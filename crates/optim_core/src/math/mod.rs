//! Numerical helpers shared by problems and solvers.
//!
//! - `projection`: eigenvalue-floor projection of symmetric matrices onto
//!   the positive-definite cone

pub mod projection;

pub use projection::{
    is_positive_definite, project_spectrum, project_to_positive_definite, SpectralProjection,
    DEFAULT_EIGENVALUE_FLOOR,
};
