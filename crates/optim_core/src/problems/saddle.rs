//! Saddle objective with an indefinite Hessian near the origin.

use crate::traits::Objective;
use crate::types::{Matrix, Vector};

/// `f(x, y) = ½c·x² + ¼y⁴ − ½y²`.
///
/// Stationary points: a saddle at the origin and two minima at `(0, ±1)`
/// with value `−¼`. The Hessian `diag(c, 3y² − 1)` is indefinite for
/// `|y| < 1/√3`, which makes plain Newton fail there while the function
/// stays bounded below.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SaddleObjective {
    /// Curvature `c > 0` along the first coordinate.
    pub curvature: f64,
}

impl Default for SaddleObjective {
    fn default() -> Self {
        Self { curvature: 1.0 }
    }
}

impl SaddleObjective {
    /// Minimum value attained at `(0, ±1)`.
    pub const MIN_VALUE: f64 = -0.25;

    /// Create a saddle with the given first-coordinate curvature.
    pub fn new(curvature: f64) -> Self {
        Self { curvature }
    }
}

impl Objective for SaddleObjective {
    fn n_unknowns(&self) -> usize {
        2
    }

    fn eval_f(&self, x: &Vector) -> f64 {
        let (u, v) = (x[0], x[1]);
        0.5 * self.curvature * u * u + 0.25 * v.powi(4) - 0.5 * v * v
    }

    fn eval_gradient(&self, x: &Vector) -> Vector {
        let (u, v) = (x[0], x[1]);
        Vector::from_vec(vec![self.curvature * u, v * v * v - v])
    }

    fn eval_hessian(&self, x: &Vector) -> Matrix {
        let v = x[1];
        Matrix::from_diagonal(&Vector::from_vec(vec![self.curvature, 3.0 * v * v - 1.0]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stationary_points() {
        let f = SaddleObjective::default();
        for point in [[0.0, 0.0], [0.0, 1.0], [0.0, -1.0]] {
            let x = Vector::from_vec(point.to_vec());
            assert_eq!(f.eval_gradient(&x).norm(), 0.0);
        }
        assert_eq!(
            f.eval_f(&Vector::from_vec(vec![0.0, 1.0])),
            SaddleObjective::MIN_VALUE
        );
    }

    #[test]
    fn test_hessian_indefinite_at_origin() {
        let f = SaddleObjective::new(2.0);
        let h = f.eval_hessian(&Vector::zeros(2));
        assert_eq!(h[(0, 0)], 2.0);
        assert_eq!(h[(1, 1)], -1.0);
        assert_eq!(h[(0, 1)], 0.0);
    }
}
