//! Brightness-gated stippling of blue-noise point sets.
use glam::DVec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub mod filter;
pub mod raster;

pub use filter::{StippleFilter, StippleResult};
pub use raster::{GrayscaleRaster, LumaBuffer};

/// Binary-mode mark radius is `min_dist / MARK_RADIUS_DIVISOR`.
pub const MARK_RADIUS_DIVISOR: f64 = 4.5;
/// Default shrink applied to variable-radius marks.
pub const DEFAULT_SIZE_FACTOR: f64 = 0.85;

/// How a sampled point becomes a mark.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StippleMode {
    /// Fixed-size, randomly rotated and scaled marks, emitted with probability
    /// falling with brightness and rising towards the midline.
    BinaryPresence { mark_radius: f64 },
    /// A circle at every point with radius `(1 - brightness) * min_dist / 2 * size_factor`.
    VariableRadius { size_factor: f64 },
}

impl StippleMode {
    /// Binary presence with the mark radius derived from the sampling distance.
    pub fn binary_presence_for(min_dist: f64) -> Self {
        StippleMode::BinaryPresence {
            mark_radius: min_dist / MARK_RADIUS_DIVISOR,
        }
    }

    pub fn variable_radius() -> Self {
        StippleMode::VariableRadius {
            size_factor: DEFAULT_SIZE_FACTOR,
        }
    }

    pub fn validate(&self) -> Result<()> {
        match *self {
            StippleMode::BinaryPresence { mark_radius } => {
                if !mark_radius.is_finite() || mark_radius <= 0.0 {
                    return Err(Error::InvalidConfig("mark_radius must be > 0".into()));
                }
            }
            StippleMode::VariableRadius { size_factor } => {
                if !size_factor.is_finite() || size_factor <= 0.0 {
                    return Err(Error::InvalidConfig("size_factor must be > 0".into()));
                }
            }
        }
        Ok(())
    }
}

/// Primitive used to draw a mark.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MarkShape {
    Ellipse,
    Circle,
}

/// One stipple mark in canvas coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Mark {
    pub center: DVec2,
    pub rx: f64,
    pub ry: f64,
    /// Radians.
    pub rotation: f64,
    pub shape: MarkShape,
}

impl Mark {
    pub fn circle(center: DVec2, radius: f64) -> Self {
        Self {
            center,
            rx: radius,
            ry: radius,
            rotation: 0.0,
            shape: MarkShape::Circle,
        }
    }

    pub fn ellipse(center: DVec2, rx: f64, ry: f64, rotation: f64) -> Self {
        Self {
            center,
            rx,
            ry,
            rotation,
            shape: MarkShape::Ellipse,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_radius_follows_min_dist() {
        let mode = StippleMode::binary_presence_for(9.0);
        assert_eq!(mode, StippleMode::BinaryPresence { mark_radius: 2.0 });
        assert!(mode.validate().is_ok());
    }

    #[test]
    fn validate_rejects_non_positive_sizes() {
        assert!(StippleMode::BinaryPresence { mark_radius: 0.0 }
            .validate()
            .is_err());
        assert!(StippleMode::VariableRadius { size_factor: -0.5 }
            .validate()
            .is_err());
        assert!(StippleMode::variable_radius().validate().is_ok());
    }

    #[test]
    fn circle_marks_are_unrotated() {
        let mark = Mark::circle(DVec2::new(3.0, 4.0), 2.5);
        assert_eq!(mark.shape, MarkShape::Circle);
        assert_eq!((mark.rx, mark.ry, mark.rotation), (2.5, 2.5, 0.0));
    }
}
