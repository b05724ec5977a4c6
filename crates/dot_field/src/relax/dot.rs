//! Dots: randomly shaped ellipses scattered over the canvas.
use std::f64::consts::TAU;

use glam::DVec2;
use rand::RngCore;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::FieldConfig;
use crate::sampling::rand01;

/// Smallest radius multiplier applied to the base radius.
pub const RADIUS_JITTER_MIN: f64 = 0.8;
/// Upper bound (exclusive) of the radius multiplier.
pub const RADIUS_JITTER_MAX: f64 = 1.2;
/// Axis scale factors are drawn from `[SCALE_MIN, SCALE_MAX)`.
pub const SCALE_MIN: f64 = 0.9;
pub const SCALE_MAX: f64 = 1.1;

/// A single dot. Only `position` changes after creation.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Dot {
    /// Centre in canvas coordinates.
    pub position: DVec2,
    /// Radius before axis scaling.
    pub radius: f64,
    pub x_scale: f64,
    pub y_scale: f64,
    /// Rotation in radians, `[0, 2π)`.
    pub rotation: f64,
}

impl Dot {
    pub fn new(position: DVec2, radius: f64) -> Self {
        Self {
            position,
            radius,
            x_scale: 1.0,
            y_scale: 1.0,
            rotation: 0.0,
        }
    }

    pub fn with_scale(mut self, x_scale: f64, y_scale: f64) -> Self {
        self.x_scale = x_scale;
        self.y_scale = y_scale;
        self
    }

    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    /// A dot anywhere in `[0, extent)` with jittered radius, scale and rotation.
    pub fn random(extent: DVec2, base_radius: f64, rng: &mut dyn RngCore) -> Self {
        let position = DVec2::new(rand01(rng) * extent.x, rand01(rng) * extent.y);
        let radius =
            base_radius * (RADIUS_JITTER_MIN + rand01(rng) * (RADIUS_JITTER_MAX - RADIUS_JITTER_MIN));
        let x_scale = SCALE_MIN + rand01(rng) * (SCALE_MAX - SCALE_MIN);
        let y_scale = SCALE_MIN + rand01(rng) * (SCALE_MAX - SCALE_MIN);
        let rotation = rand01(rng) * TAU;

        Self {
            position,
            radius,
            x_scale,
            y_scale,
            rotation,
        }
    }

    /// Horizontal semi-axis.
    #[inline]
    pub fn rx(&self) -> f64 {
        self.radius * self.x_scale
    }

    /// Vertical semi-axis.
    #[inline]
    pub fn ry(&self) -> f64 {
        self.radius * self.y_scale
    }

    /// Rotation in degrees, as used by SVG transforms.
    #[inline]
    pub fn rotation_degrees(&self) -> f64 {
        self.rotation * 180.0 / std::f64::consts::PI
    }
}

/// Scatters `config.dot_count` random dots over the canvas.
pub fn scatter_dots(config: &FieldConfig, rng: &mut dyn RngCore) -> Vec<Dot> {
    let extent = config.extent();
    (0..config.dot_count)
        .map(|_| Dot::random(extent, config.dot_radius, rng))
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn random_dots_stay_in_documented_ranges() {
        let mut rng = StdRng::seed_from_u64(11);
        let extent = DVec2::new(800.0, 600.0);
        for _ in 0..500 {
            let dot = Dot::random(extent, 15.0, &mut rng);
            assert!(dot.position.x >= 0.0 && dot.position.x < 800.0);
            assert!(dot.position.y >= 0.0 && dot.position.y < 600.0);
            assert!(dot.radius >= 12.0 && dot.radius < 18.0);
            assert!(dot.x_scale >= 0.9 && dot.x_scale < 1.1);
            assert!(dot.y_scale >= 0.9 && dot.y_scale < 1.1);
            assert!(dot.rotation >= 0.0 && dot.rotation < TAU);
        }
    }

    #[test]
    fn scatter_dots_uses_population_size() {
        let mut rng = StdRng::seed_from_u64(3);
        let config = FieldConfig::default().with_dot_count(17);
        assert_eq!(scatter_dots(&config, &mut rng).len(), 17);
    }

    #[test]
    fn axes_and_degrees() {
        let dot = Dot::new(DVec2::new(1.0, 2.0), 10.0)
            .with_scale(1.1, 0.9)
            .with_rotation(std::f64::consts::PI);
        assert!((dot.rx() - 11.0).abs() < 1e-12);
        assert!((dot.ry() - 9.0).abs() < 1e-12);
        assert!((dot.rotation_degrees() - 180.0).abs() < 1e-12);
    }
}
