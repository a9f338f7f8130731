//! Quadratic objective `½xᵀAx − bᵀx`.

use crate::traits::Objective;
use crate::types::{Matrix, Vector};

/// Quadratic objective `f(x) = ½xᵀAx − bᵀx` with symmetric `A`.
///
/// Gradient `Ax − b`, Hessian `A`. When `A` is positive definite the unique
/// minimiser solves `Ax = b`.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadraticObjective {
    a: Matrix,
    b: Vector,
}

impl QuadraticObjective {
    /// Create a quadratic from its matrix and linear term.
    ///
    /// `a` is symmetrised as `(A + Aᵀ)/2`.
    ///
    /// # Panics
    ///
    /// Panics if `a` is not square or its size differs from `b`.
    pub fn new(a: Matrix, b: Vector) -> Self {
        assert!(a.is_square(), "quadratic matrix must be square");
        assert_eq!(a.nrows(), b.len(), "matrix and vector sizes differ");
        let a = (&a + a.transpose()) * 0.5;
        Self { a, b }
    }

    /// Diagonal quadratic `Σ ½dᵢxᵢ² − bᵢxᵢ`.
    pub fn diagonal(d: Vector, b: Vector) -> Self {
        Self::new(Matrix::from_diagonal(&d), b)
    }

    /// The (symmetrised) matrix `A`.
    pub fn matrix(&self) -> &Matrix {
        &self.a
    }

    /// The linear term `b`.
    pub fn linear_term(&self) -> &Vector {
        &self.b
    }

    /// Solution of `Ax = b`, or `None` if `A` is not positive definite.
    pub fn minimiser(&self) -> Option<Vector> {
        self.a.clone().cholesky().map(|chol| chol.solve(&self.b))
    }
}

impl Objective for QuadraticObjective {
    fn n_unknowns(&self) -> usize {
        self.b.len()
    }

    fn eval_f(&self, x: &Vector) -> f64 {
        0.5 * x.dot(&(&self.a * x)) - self.b.dot(x)
    }

    fn eval_gradient(&self, x: &Vector) -> Vector {
        &self.a * x - &self.b
    }

    fn eval_hessian(&self, _x: &Vector) -> Matrix {
        self.a.clone()
    }
}
