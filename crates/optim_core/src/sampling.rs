//! Random start-point generation for multi-start exploration.
//!
//! Randomness is confined to this module; the solvers themselves are
//! deterministic. Callers own the generator, so a seeded `StdRng` gives
//! reproducible start points.
//!
//! # Example
//!
//! ```
//! use optim_core::sampling::{random_start_point, DEFAULT_START_RANGE};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let (lo, hi) = DEFAULT_START_RANGE;
//! let x0 = random_start_point(&mut rng, 8, lo, hi);
//!
//! assert_eq!(x0.len(), 8);
//! assert!(x0.iter().all(|&v| (lo..=hi).contains(&v)));
//! ```

use crate::types::Vector;
use rand::Rng;

/// Range used for start points when the caller has no better prior.
pub const DEFAULT_START_RANGE: (f64, f64) = (-10.0, 10.0);

/// Draw a point of dimension `n` with coordinates uniform in `[lo, hi]`.
///
/// # Panics
///
/// Panics if `lo > hi`.
pub fn random_start_point<R: Rng + ?Sized>(rng: &mut R, n: usize, lo: f64, hi: f64) -> Vector {
    assert!(lo <= hi, "empty sampling range [{lo}, {hi}]");
    Vector::from_fn(n, |_, _| rng.gen_range(lo..=hi))
}

/// Draw `count` independent start points.
pub fn random_start_points<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    n: usize,
    lo: f64,
    hi: f64,
) -> Vec<Vector> {
    (0..count)
        .map(|_| random_start_point(rng, n, lo, hi))
        .collect()
}
