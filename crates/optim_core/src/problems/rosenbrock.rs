//! Two-dimensional Rosenbrock function.

use crate::traits::Objective;
use crate::types::{Matrix, Vector};

/// `f(x, y) = (a − x)² + b(y − x²)²`, minimum `0` at `(a, a²)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rosenbrock {
    /// Location parameter `a`.
    pub a: f64,
    /// Valley steepness `b`.
    pub b: f64,
}

impl Default for Rosenbrock {
    fn default() -> Self {
        Self { a: 1.0, b: 100.0 }
    }
}

impl Rosenbrock {
    /// Create a Rosenbrock function with custom parameters.
    pub fn new(a: f64, b: f64) -> Self {
        Self { a, b }
    }

    /// The global minimiser `(a, a²)`.
    pub fn minimiser(&self) -> Vector {
        Vector::from_vec(vec![self.a, self.a * self.a])
    }
}

impl Objective for Rosenbrock {
    fn n_unknowns(&self) -> usize {
        2
    }

    fn eval_f(&self, x: &Vector) -> f64 {
        let (u, v) = (x[0], x[1]);
        (self.a - u).powi(2) + self.b * (v - u * u).powi(2)
    }

    fn eval_gradient(&self, x: &Vector) -> Vector {
        let (u, v) = (x[0], x[1]);
        let r = v - u * u;
        Vector::from_vec(vec![
            -2.0 * (self.a - u) - 4.0 * self.b * u * r,
            2.0 * self.b * r,
        ])
    }

    fn eval_hessian(&self, x: &Vector) -> Matrix {
        let (u, v) = (x[0], x[1]);
        let off = -4.0 * self.b * u;
        Matrix::from_row_slice(
            2,
            2,
            &[
                2.0 - 4.0 * self.b * (v - u * u) + 8.0 * self.b * u * u,
                off,
                off,
                2.0 * self.b,
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_minimum() {
        let f = Rosenbrock::default();
        let x = f.minimiser();
        assert_eq!(f.eval_f(&x), 0.0);
        assert_eq!(f.eval_gradient(&x).norm(), 0.0);
    }

    #[test]
    fn test_gradient_matches_central_difference() {
        let f = Rosenbrock::default();
        let x = Vector::from_vec(vec![-1.2, 1.0]);
        let g = f.eval_gradient(&x);
        let h = 1e-6;
        for i in 0..2 {
            let mut xp = x.clone();
            let mut xm = x.clone();
            xp[i] += h;
            xm[i] -= h;
            let fd = (f.eval_f(&xp) - f.eval_f(&xm)) / (2.0 * h);
            assert_relative_eq!(g[i], fd, max_relative = 1e-6);
        }
    }

    #[test]
    fn test_hessian_indefinite_off_valley() {
        let f = Rosenbrock::default();
        // Above the valley floor the curvature along x turns negative.
        let x = Vector::from_vec(vec![0.0, 1.0]);
        let h = f.eval_hessian(&x);
        assert!(h[(0, 0)] < 0.0);
    }
}
