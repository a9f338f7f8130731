//! Hessian stabilisation strategies for Newton's method.
//!
//! A stabiliser turns a possibly indefinite Hessian `H` and gradient `g` into
//! a direction `d` solving `(H + E)·d = −g` for some `E` that makes the system
//! positive definite. Since `H + E ≻ 0`, `gᵀd = −gᵀ(H + E)⁻¹g < 0` whenever
//! `g ≠ 0`.

use optim_core::config::{DiagonalShiftConfig, RegularisationSchedule};
use optim_core::math::{project_spectrum, DEFAULT_EIGENVALUE_FLOOR};
use optim_core::types::{Matrix, SolverError, Vector};
use tracing::trace;

/// Direction produced by a [`HessianStabiliser`].
#[derive(Debug, Clone, PartialEq)]
pub struct StabilisedDirection {
    /// Solution of the regularised Newton system.
    pub direction: Vector,
    /// Magnitude of the correction: the diagonal shift δ, or the lift of the
    /// smallest eigenvalue. Zero when `H` was factorised unchanged.
    pub regularisation: f64,
}

/// Strategy for solving a Newton system with a positive-definite surrogate
/// of the Hessian.
///
/// Stabilisers may keep state between outer iterations of one solve (see
/// [`RegularisationSchedule::CarryForward`]). Solvers clone the stabiliser at
/// the start of each solve so state never leaks across calls.
pub trait HessianStabiliser {
    /// Short name for log output.
    fn name(&self) -> &'static str;

    /// Check the stabiliser parameters before a solve starts.
    fn validate(&self) -> Result<(), SolverError> {
        Ok(())
    }

    /// Solve `(H + E)·d = −g` for the outer iteration `iteration`.
    ///
    /// # Errors
    ///
    /// Returns an error if no positive-definite surrogate could be factorised.
    fn newton_direction(
        &mut self,
        hessian: Matrix,
        gradient: &Vector,
        iteration: usize,
    ) -> Result<StabilisedDirection, SolverError>;
}

/// Retry Cholesky on `H + δ·I`, multiplying δ by γ after each failure.
///
/// The unshifted Hessian is tried first. If it factorises, the plain Newton
/// direction is used and no regularisation is reported.
///
/// # Example
///
/// ```
/// use optim_core::config::DiagonalShiftConfig;
/// use optim_core::types::{Matrix, Vector};
/// use optim_solvers::{DiagonalShift, HessianStabiliser};
///
/// // diag(1, -0.5) needs δ > 0.5: 1e-4, 1e-3, 1e-2, 1e-1 fail, then δ = 1.
/// let h = Matrix::from_diagonal(&Vector::from_vec(vec![1.0, -0.5]));
/// let g = Vector::from_vec(vec![1.0, 1.0]);
///
/// let mut shift = DiagonalShift::new(DiagonalShiftConfig::new(10.0));
/// let out = shift.newton_direction(h, &g, 0).unwrap();
///
/// assert!((out.regularisation - 1.0).abs() < 1e-12);
/// assert!(g.dot(&out.direction) < 0.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DiagonalShift {
    config: DiagonalShiftConfig,
    carried: Option<f64>,
}

impl DiagonalShift {
    /// Create a stabiliser from its configuration.
    pub fn new(config: DiagonalShiftConfig) -> Self {
        Self {
            config,
            carried: None,
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &DiagonalShiftConfig {
        &self.config
    }

    /// Shift carried into the next iteration, if any. Cleared whenever the
    /// unshifted Hessian factorises.
    pub fn carried_delta(&self) -> Option<f64> {
        self.carried
    }

    fn seed(&self) -> f64 {
        match (self.config.schedule, self.carried) {
            (RegularisationSchedule::CarryForward, Some(last)) => {
                (last / self.config.gamma).max(self.config.initial_delta)
            }
            _ => self.config.initial_delta,
        }
    }
}

impl HessianStabiliser for DiagonalShift {
    fn name(&self) -> &'static str {
        "diagonal shift"
    }

    fn validate(&self) -> Result<(), SolverError> {
        self.config.validate()
    }

    fn newton_direction(
        &mut self,
        hessian: Matrix,
        gradient: &Vector,
        iteration: usize,
    ) -> Result<StabilisedDirection, SolverError> {
        let rhs = -gradient;

        if let Some(chol) = hessian.clone().cholesky() {
            self.carried = None;
            return Ok(StabilisedDirection {
                direction: chol.solve(&rhs),
                regularisation: 0.0,
            });
        }

        let mut delta = self.seed();
        loop {
            if !(delta <= self.config.max_delta) {
                return Err(SolverError::RegularisationOverflow {
                    delta,
                    max_delta: self.config.max_delta,
                    iteration,
                });
            }

            let mut shifted = hessian.clone();
            for i in 0..shifted.nrows() {
                shifted[(i, i)] += delta;
            }

            if let Some(chol) = shifted.cholesky() {
                self.carried = Some(delta);
                return Ok(StabilisedDirection {
                    direction: chol.solve(&rhs),
                    regularisation: delta,
                });
            }

            trace!(iteration, delta, "shifted hessian still indefinite");
            delta *= self.config.gamma;
        }
    }
}

/// Replace the Hessian by its eigenvalue-floored projection.
///
/// Costs one symmetric eigendecomposition per iteration, which is affordable
/// for small problems and element-local Hessians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EigenvalueFloor {
    floor: f64,
}

impl Default for EigenvalueFloor {
    fn default() -> Self {
        Self {
            floor: DEFAULT_EIGENVALUE_FLOOR,
        }
    }
}

impl EigenvalueFloor {
    /// Create a stabiliser clamping eigenvalues to at least `floor`.
    ///
    /// # Panics
    ///
    /// Panics if `floor <= 0`.
    pub fn new(floor: f64) -> Self {
        assert!(floor > 0.0, "eigenvalue floor must be positive");
        Self { floor }
    }

    /// The eigenvalue floor.
    pub fn floor(&self) -> f64 {
        self.floor
    }
}

impl HessianStabiliser for EigenvalueFloor {
    fn name(&self) -> &'static str {
        "eigenvalue floor"
    }

    fn newton_direction(
        &mut self,
        hessian: Matrix,
        gradient: &Vector,
        iteration: usize,
    ) -> Result<StabilisedDirection, SolverError> {
        let projection = project_spectrum(&hessian, self.floor);
        let regularisation = projection.lift(self.floor);
        if projection.clamped > 0 {
            trace!(
                iteration,
                clamped = projection.clamped,
                min_eigenvalue = projection.min_eigenvalue,
                "clamped hessian eigenvalues"
            );
        }

        let chol = projection
            .matrix
            .cholesky()
            .ok_or(SolverError::HessianNotPositiveDefinite { iteration })?;

        Ok(StabilisedDirection {
            direction: chol.solve(&(-gradient)),
            regularisation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn diag(values: &[f64]) -> Matrix {
        Matrix::from_diagonal(&Vector::from_vec(values.to_vec()))
    }

    // ========================================
    // DiagonalShift Tests
    // ========================================

    #[test]
    fn test_positive_definite_hessian_is_not_shifted() {
        let h = Matrix::from_row_slice(2, 2, &[4.0, 1.0, 1.0, 3.0]);
        let g = Vector::from_vec(vec![1.0, 2.0]);

        let mut shift = DiagonalShift::default();
        let out = shift.newton_direction(h.clone(), &g, 0).unwrap();

        assert_eq!(out.regularisation, 0.0);
        let residual = &h * &out.direction + &g;
        assert!(residual.norm() < 1e-12);
        assert_eq!(shift.carried_delta(), None);
    }

    #[test]
    fn test_indefinite_hessian_escalates_by_gamma() {
        let g = Vector::from_vec(vec![1.0, -1.0]);

        let mut shift = DiagonalShift::new(DiagonalShiftConfig::new(10.0));
        let out = shift.newton_direction(diag(&[2.0, -0.05]), &g, 3).unwrap();

        // 1e-4, 1e-3, 1e-2 leave the second entry negative; 1e-1 works.
        assert_relative_eq!(out.regularisation, 1e-1, max_relative = 1e-12);
        assert_relative_eq!(out.direction[0], -1.0 / 2.1, max_relative = 1e-12);
        assert_relative_eq!(out.direction[1], 1.0 / 0.05, max_relative = 1e-9);
        assert!(g.dot(&out.direction) < 0.0);
    }

    #[test]
    fn test_singular_hessian_gets_smallest_shift() {
        let g = Vector::from_vec(vec![1.0, 1.0]);
        let mut shift = DiagonalShift::default();
        let out = shift.newton_direction(diag(&[1.0, 0.0]), &g, 0).unwrap();
        assert_relative_eq!(out.regularisation, 1e-4);
    }

    #[test]
    fn test_reset_schedule_restarts_from_seed() {
        let g = Vector::from_vec(vec![0.0, 1.0]);
        let mut shift = DiagonalShift::default();

        let first = shift.newton_direction(diag(&[1.0, -5.0]), &g, 0).unwrap();
        assert_relative_eq!(first.regularisation, 10.0, max_relative = 1e-12);

        let second = shift.newton_direction(diag(&[1.0, -5e-4]), &g, 1).unwrap();
        assert_relative_eq!(second.regularisation, 1e-3, max_relative = 1e-12);
    }

    #[test]
    fn test_carry_forward_starts_near_last_shift() {
        let g = Vector::from_vec(vec![0.0, 1.0]);
        let config =
            DiagonalShiftConfig::default().with_schedule(RegularisationSchedule::CarryForward);
        let mut shift = DiagonalShift::new(config);

        let first = shift.newton_direction(diag(&[1.0, -5.0]), &g, 0).unwrap();
        assert_relative_eq!(first.regularisation, 10.0, max_relative = 1e-12);
        assert_relative_eq!(shift.carried_delta().unwrap(), 10.0, max_relative = 1e-12);

        // Starts at 10 / γ = 1 rather than at the seed.
        let second = shift.newton_direction(diag(&[1.0, -5e-4]), &g, 1).unwrap();
        assert_relative_eq!(second.regularisation, 1.0, max_relative = 1e-12);
    }

    #[test]
    fn test_carry_forward_resets_after_unshifted_iteration() {
        let g = Vector::from_vec(vec![0.0, 1.0]);
        let config =
            DiagonalShiftConfig::default().with_schedule(RegularisationSchedule::CarryForward);
        let mut shift = DiagonalShift::new(config);

        let first = shift.newton_direction(diag(&[1.0, -5.0]), &g, 0).unwrap();
        assert_relative_eq!(first.regularisation, 10.0, max_relative = 1e-12);

        let convex = shift.newton_direction(diag(&[1.0, 2.0]), &g, 1).unwrap();
        assert_eq!(convex.regularisation, 0.0);
        assert_eq!(shift.carried_delta(), None);

        // Back to the seed: 1e-4 and 1e-3 fail, 1e-2 factorises.
        let third = shift.newton_direction(diag(&[1.0, -5e-3]), &g, 2).unwrap();
        assert_relative_eq!(third.regularisation, 1e-2, max_relative = 1e-12);
    }

    #[test]
    fn test_overflow_is_reported() {
        let g = Vector::from_vec(vec![1.0]);
        let config = DiagonalShiftConfig::default().with_max_delta(1e-2);
        let mut shift = DiagonalShift::new(config);

        match shift.newton_direction(diag(&[-1.0]), &g, 7) {
            Err(SolverError::RegularisationOverflow {
                delta,
                max_delta,
                iteration,
            }) => {
                assert!(delta > max_delta);
                assert_eq!(max_delta, 1e-2);
                assert_eq!(iteration, 7);
            }
            other => panic!("Expected RegularisationOverflow, got {:?}", other),
        }
    }

    #[test]
    fn test_nan_hessian_overflows_instead_of_looping() {
        let g = Vector::from_vec(vec![1.0]);
        let mut shift = DiagonalShift::default();
        let result = shift.newton_direction(diag(&[f64::NAN]), &g, 0);
        assert!(matches!(
            result,
            Err(SolverError::RegularisationOverflow { .. })
        ));
    }

    // ========================================
    // EigenvalueFloor Tests
    // ========================================

    #[test]
    fn test_eigenvalue_floor_flips_nothing_on_convex_hessian() {
        let h = Matrix::from_row_slice(2, 2, &[4.0, 1.0, 1.0, 3.0]);
        let g = Vector::from_vec(vec![1.0, 2.0]);

        let mut floor = EigenvalueFloor::default();
        let out = floor.newton_direction(h.clone(), &g, 0).unwrap();

        assert_eq!(out.regularisation, 0.0);
        let residual = &h * &out.direction + &g;
        assert!(residual.norm() < 1e-10);
    }

    #[test]
    fn test_eigenvalue_floor_gives_descent_on_indefinite_hessian() {
        let h = diag(&[1.0, -2.0]);
        let g = Vector::from_vec(vec![0.5, 0.5]);

        let mut floor = EigenvalueFloor::new(1e-2);
        let out = floor.newton_direction(h, &g, 0).unwrap();

        assert_relative_eq!(out.regularisation, 2.01, max_relative = 1e-10);
        assert!(g.dot(&out.direction) < 0.0);
        assert_relative_eq!(out.direction[1], -50.0, max_relative = 1e-8);
    }

    #[test]
    #[should_panic(expected = "eigenvalue floor must be positive")]
    fn test_eigenvalue_floor_rejects_zero() {
        let _ = EigenvalueFloor::new(0.0);
    }

    #[test]
    fn test_diagonal_shift_validation() {
        let bad = DiagonalShift::new(DiagonalShiftConfig {
            gamma: 1.0,
            ..Default::default()
        });
        assert!(matches!(bad.validate(), Err(SolverError::InvalidConfig(_))));
        assert!(DiagonalShift::default().validate().is_ok());
        assert!(EigenvalueFloor::default().validate().is_ok());
    }

    #[test]
    fn test_names() {
        assert_eq!(DiagonalShift::default().name(), "diagonal shift");
        assert_eq!(EigenvalueFloor::default().name(), "eigenvalue floor");
    }
}
