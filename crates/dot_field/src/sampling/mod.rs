//! Blue-noise point generation over a rectangular region.
//!
//! This module defines the [`PositionSampling`] trait, the uniform [`grid::SpatialGrid`]
//! used to accelerate neighbour rejection, and the Poisson-disk sampler built on it.
use mint::Vector2;
use rand::RngCore;

pub mod grid;
pub mod poisson_disk;

pub use grid::SpatialGrid;
pub use poisson_disk::{effective_min_dist, PoissonDiskSampling, PoissonSamples, SpacingPolicy};

/// Trait for position sampling over `[0, width) × [0, height)`.
pub trait PositionSampling: Send + Sync {
    fn generate(&self, domain_extent: Vector2<f64>, rng: &mut dyn RngCore) -> Vec<Vector2<f64>>;
}

/// Generate a random float in the range [0, 1).
#[inline]
pub(crate) fn rand01(rng: &mut dyn RngCore) -> f64 {
    // 53 random mantissa bits.
    (rng.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
}

/// Generate a random index in `0..len`. `len` must be non-zero.
#[inline]
pub(crate) fn rand_index(rng: &mut dyn RngCore, len: usize) -> usize {
    debug_assert!(len > 0);
    ((rand01(rng) * len as f64) as usize).min(len - 1)
}

/// Compute the next smaller representable float value.
///
/// Returns a value that is strictly less than the input, useful for
/// ensuring bounds are strictly inside a domain.
#[inline]
pub(crate) fn next_down(val: f64) -> f64 {
    if val.is_nan() {
        return f64::NAN;
    }

    if val == f64::NEG_INFINITY {
        return f64::NEG_INFINITY;
    }

    if val == f64::INFINITY {
        return f64::MAX;
    }

    if val == 0.0 {
        return -f64::from_bits(1);
    }

    let bits = val.to_bits();
    if val > 0.0 {
        f64::from_bits(bits.saturating_sub(1))
    } else {
        f64::from_bits(bits.saturating_add(1))
    }
}
