//! Planar spring element with rest length.

use crate::math::projection::{project_to_positive_definite, DEFAULT_EIGENVALUE_FLOOR};
use crate::traits::Objective;
use crate::types::{Matrix, Vector};

/// Which Hessian a [`SpringElement2D`] reports.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum HessianMode {
    /// The exact second derivative, indefinite when the spring is compressed.
    #[default]
    Exact,
    /// The exact Hessian with eigenvalues raised to the given floor.
    ProjectedPsd {
        /// Smallest eigenvalue kept in the reported Hessian
        floor: f64,
    },
}

impl HessianMode {
    /// Projection with [`DEFAULT_EIGENVALUE_FLOOR`].
    pub fn projected() -> Self {
        HessianMode::ProjectedPsd {
            floor: DEFAULT_EIGENVALUE_FLOOR,
        }
    }
}

/// Energy of one spring between nodes `p₀ = (x₀, y₀)` and `p₁ = (x₁, y₁)`:
///
/// ```text
/// f = ½·k·(‖p₀ − p₁‖² − l²)²
/// ```
///
/// Unknowns are ordered `[x₀, y₀, x₁, y₁]`. The energy is translation
/// invariant, so the exact Hessian is always singular, and it is indefinite
/// whenever `‖p₀ − p₁‖ < l`. [`HessianMode::ProjectedPsd`] reports a
/// positive-definite surrogate instead.
///
/// # Example
///
/// ```
/// use optim_core::problems::{HessianMode, SpringElement2D};
/// use optim_core::traits::Objective;
/// use optim_core::types::Vector;
///
/// let spring = SpringElement2D::new(1.0, 2.0).with_hessian_mode(HessianMode::projected());
/// let x = Vector::from_vec(vec![0.0, 0.0, 1.0, 0.0]);
///
/// // ‖d‖² − l² = 1 − 4 = −3 → f = ½·9
/// assert_eq!(spring.eval_f(&x), 4.5);
/// assert!(spring.eval_hessian(&x).cholesky().is_some());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringElement2D {
    stiffness: f64,
    rest_length: f64,
    hessian_mode: HessianMode,
}

impl SpringElement2D {
    /// Create a spring with stiffness `k` and rest length `l`, exact Hessian.
    pub fn new(stiffness: f64, rest_length: f64) -> Self {
        Self {
            stiffness,
            rest_length,
            hessian_mode: HessianMode::Exact,
        }
    }

    /// Select the reported Hessian.
    pub fn with_hessian_mode(mut self, mode: HessianMode) -> Self {
        self.hessian_mode = mode;
        self
    }

    /// Stiffness `k`.
    pub fn stiffness(&self) -> f64 {
        self.stiffness
    }

    /// Rest length `l`.
    pub fn rest_length(&self) -> f64 {
        self.rest_length
    }

    /// Current spring length `‖p₀ − p₁‖`.
    pub fn length(&self, x: &Vector) -> f64 {
        let (dx, dy) = Self::offset(x);
        (dx * dx + dy * dy).sqrt()
    }

    fn offset(x: &Vector) -> (f64, f64) {
        (x[0] - x[2], x[1] - x[3])
    }

    /// `‖d‖² − l²`.
    fn strain(&self, dx: f64, dy: f64) -> f64 {
        dx * dx + dy * dy - self.rest_length * self.rest_length
    }

    fn exact_hessian(&self, x: &Vector) -> Matrix {
        let (dx, dy) = Self::offset(x);
        let s = self.strain(dx, dy);
        let k2 = 2.0 * self.stiffness;

        // B = 2k(s·I + 2·d·dᵀ); H = [[B, −B], [−B, B]]
        let b00 = k2 * (s + 2.0 * dx * dx);
        let b01 = k2 * 2.0 * dx * dy;
        let b11 = k2 * (s + 2.0 * dy * dy);

        let mut h = Matrix::zeros(4, 4);
        for (block_i, sign_i) in [(0usize, 1.0), (2usize, -1.0)] {
            for (block_j, sign_j) in [(0usize, 1.0), (2usize, -1.0)] {
                let sign = sign_i * sign_j;
                h[(block_i, block_j)] = sign * b00;
                h[(block_i, block_j + 1)] = sign * b01;
                h[(block_i + 1, block_j)] = sign * b01;
                h[(block_i + 1, block_j + 1)] = sign * b11;
            }
        }
        h
    }
}

impl Objective for SpringElement2D {
    fn n_unknowns(&self) -> usize {
        4
    }

    fn eval_f(&self, x: &Vector) -> f64 {
        let (dx, dy) = Self::offset(x);
        let s = self.strain(dx, dy);
        0.5 * self.stiffness * s * s
    }

    fn eval_gradient(&self, x: &Vector) -> Vector {
        let (dx, dy) = Self::offset(x);
        let scale = 2.0 * self.stiffness * self.strain(dx, dy);
        Vector::from_vec(vec![scale * dx, scale * dy, -scale * dx, -scale * dy])
    }

    fn eval_hessian(&self, x: &Vector) -> Matrix {
        let h = self.exact_hessian(x);
        match self.hessian_mode {
            HessianMode::Exact => h,
            HessianMode::ProjectedPsd { floor } => project_to_positive_definite(&h, floor),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::projection::is_positive_definite;
    use approx::assert_relative_eq;

    fn central_difference_hessian(spring: &SpringElement2D, x: &Vector) -> Matrix {
        let h = 1e-6;
        let mut hess = Matrix::zeros(4, 4);
        for j in 0..4 {
            let mut xp = x.clone();
            let mut xm = x.clone();
            xp[j] += h;
            xm[j] -= h;
            let column = (spring.eval_gradient(&xp) - spring.eval_gradient(&xm)) / (2.0 * h);
            hess.set_column(j, &column);
        }
        hess
    }

    #[test]
    fn test_energy_zero_at_rest_length() {
        let spring = SpringElement2D::new(3.0, 1.0);
        let x = Vector::from_vec(vec![0.0, 0.0, 0.6, 0.8]);
        assert_relative_eq!(spring.eval_f(&x), 0.0, epsilon = 1e-14);
        assert!(spring.eval_gradient(&x).norm() < 1e-14);
        assert_relative_eq!(spring.length(&x), 1.0, epsilon = 1e-14);
    }

    #[test]
    fn test_gradient_sums_to_zero() {
        let spring = SpringElement2D::new(2.0, 1.5);
        let x = Vector::from_vec(vec![0.3, -0.2, 1.7, 0.9]);
        let g = spring.eval_gradient(&x);
        assert_relative_eq!(g[0] + g[2], 0.0, epsilon = 1e-14);
        assert_relative_eq!(g[1] + g[3], 0.0, epsilon = 1e-14);
    }

    #[test]
    fn test_exact_hessian_matches_finite_difference() {
        let spring = SpringElement2D::new(2.0, 1.5);
        let x = Vector::from_vec(vec![0.3, -0.2, 1.7, 0.9]);
        let exact = spring.eval_hessian(&x);
        let fd = central_difference_hessian(&spring, &x);
        for i in 0..4 {
            for j in 0..4 {
                assert_relative_eq!(exact[(i, j)], fd[(i, j)], epsilon = 1e-5);
            }
        }
    }

    #[test]
    fn test_compressed_spring_hessian_indefinite() {
        let spring = SpringElement2D::new(1.0, 2.0);
        let x = Vector::from_vec(vec![0.0, 0.0, 0.5, 0.0]);
        let h = spring.eval_hessian(&x);
        assert!(h.clone().symmetric_eigen().eigenvalues.min() < 0.0);
        assert!(!is_positive_definite(&h));
    }

    #[test]
    fn test_projected_hessian_positive_definite() {
        let spring = SpringElement2D::new(1.0, 2.0).with_hessian_mode(HessianMode::projected());
        let x = Vector::from_vec(vec![0.0, 0.0, 0.5, 0.0]);
        let h = spring.eval_hessian(&x);
        assert!(is_positive_definite(&h));
        assert!(h.symmetric_eigen().eigenvalues.min() >= DEFAULT_EIGENVALUE_FLOOR * 0.5);
    }
}
