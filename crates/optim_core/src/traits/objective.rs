//! The objective contract consumed by every solver.

use crate::types::{Matrix, Vector};

/// Objective function to be minimised.
///
/// Implementors expose their dimension and the first three orders of
/// derivative information at a point. The four operations must agree: the
/// gradient is the true derivative of [`eval_f`](Objective::eval_f) and the
/// Hessian the true second derivative. Solvers assume exactness and never
/// verify it.
///
/// The Hessian must be symmetric but may be indefinite or singular.
///
/// # Example
///
/// ```
/// use optim_core::traits::Objective;
/// use optim_core::types::{Matrix, Vector};
///
/// /// f(x) = Σ xᵢ²
/// struct SumOfSquares(usize);
///
/// impl Objective for SumOfSquares {
///     fn n_unknowns(&self) -> usize {
///         self.0
///     }
///
///     fn eval_f(&self, x: &Vector) -> f64 {
///         x.norm_squared()
///     }
///
///     fn eval_gradient(&self, x: &Vector) -> Vector {
///         x * 2.0
///     }
///
///     fn eval_hessian(&self, _x: &Vector) -> Matrix {
///         Matrix::identity(self.0, self.0) * 2.0
///     }
/// }
///
/// let f = SumOfSquares(3);
/// let x = Vector::from_vec(vec![1.0, 2.0, 3.0]);
/// assert_eq!(f.eval_f(&x), 14.0);
/// ```
pub trait Objective {
    /// Number of scalar unknowns `n`.
    fn n_unknowns(&self) -> usize;

    /// Function value f(x).
    fn eval_f(&self, x: &Vector) -> f64;

    /// Gradient ∇f(x), a vector of length `n`.
    fn eval_gradient(&self, x: &Vector) -> Vector;

    /// Hessian ∇²f(x), a symmetric `n × n` matrix.
    fn eval_hessian(&self, x: &Vector) -> Matrix;
}

impl<T: Objective + ?Sized> Objective for &T {
    fn n_unknowns(&self) -> usize {
        (**self).n_unknowns()
    }

    fn eval_f(&self, x: &Vector) -> f64 {
        (**self).eval_f(x)
    }

    fn eval_gradient(&self, x: &Vector) -> Vector {
        (**self).eval_gradient(x)
    }

    fn eval_hessian(&self, x: &Vector) -> Matrix {
        (**self).eval_hessian(x)
    }
}

impl<T: Objective + ?Sized> Objective for Box<T> {
    fn n_unknowns(&self) -> usize {
        (**self).n_unknowns()
    }

    fn eval_f(&self, x: &Vector) -> f64 {
        (**self).eval_f(x)
    }

    fn eval_gradient(&self, x: &Vector) -> Vector {
        (**self).eval_gradient(x)
    }

    fn eval_hessian(&self, x: &Vector) -> Matrix {
        (**self).eval_hessian(x)
    }
}
