//! Eigenvalue-floor projection of symmetric matrices.
//!
//! A symmetric matrix `H = V·diag(λ)·Vᵀ` is projected to
//! `V·diag(max(λ, floor))·Vᵀ`, which is positive definite for any
//! `floor > 0`. This is the alternative to diagonal-shift regularisation when
//! an eigendecomposition is affordable, typically for small element-local
//! Hessians.

use crate::types::{Matrix, Vector};

/// Eigenvalue floor used when none is specified.
pub const DEFAULT_EIGENVALUE_FLOOR: f64 = 1e-7;

/// Result of [`project_spectrum`].
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralProjection {
    /// Reconstructed matrix with clamped eigenvalues.
    pub matrix: Matrix,
    /// Smallest eigenvalue of the input matrix.
    pub min_eigenvalue: f64,
    /// Number of eigenvalues that were raised to the floor.
    pub clamped: usize,
}

impl SpectralProjection {
    /// Amount by which the smallest eigenvalue was lifted (0 if none was).
    pub fn lift(&self, floor: f64) -> f64 {
        (floor - self.min_eigenvalue).max(0.0)
    }
}

/// Project a symmetric matrix onto `{A : λ_min(A) ≥ floor}`.
///
/// Only the lower triangle of `h` is read. The output is symmetrised to
/// remove round-off from the reconstruction.
///
/// # Example
///
/// ```
/// use optim_core::math::project_spectrum;
/// use optim_core::types::Matrix;
///
/// let h = Matrix::from_row_slice(2, 2, &[1.0, 0.0, 0.0, -3.0]);
/// let projected = project_spectrum(&h, 1e-7);
///
/// assert_eq!(projected.clamped, 1);
/// assert_eq!(projected.min_eigenvalue, -3.0);
/// assert!((projected.matrix[(1, 1)] - 1e-7).abs() < 1e-12);
/// ```
pub fn project_spectrum(h: &Matrix, floor: f64) -> SpectralProjection {
    let eigen = h.clone().symmetric_eigen();
    let min_eigenvalue = eigen.eigenvalues.min();

    let mut clamped = 0;
    let floored: Vector = eigen.eigenvalues.map(|lambda| {
        if lambda < floor {
            clamped += 1;
            floor
        } else {
            lambda
        }
    });

    let v = &eigen.eigenvectors;
    let reconstructed = v * Matrix::from_diagonal(&floored) * v.transpose();
    let matrix = (&reconstructed + reconstructed.transpose()) * 0.5;

    SpectralProjection {
        matrix,
        min_eigenvalue,
        clamped,
    }
}

/// Shorthand for [`project_spectrum`] returning only the matrix.
pub fn project_to_positive_definite(h: &Matrix, floor: f64) -> Matrix {
    project_spectrum(h, floor).matrix
}

/// Whether a Cholesky factorisation of `h` succeeds.
pub fn is_positive_definite(h: &Matrix) -> bool {
    h.clone().cholesky().is_some()
}
