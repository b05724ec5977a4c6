//! The forbidden horizontal band and canvas clamping.
use glam::DVec2;

/// Slack for the rounding in `center_y ± clearance`.
const BAND_EPSILON: f64 = 1e-9;

/// Horizontal band centred on `center_y` that dot centres keep clear of.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ForbiddenBand {
    pub center_y: f64,
    pub height: f64,
}

impl ForbiddenBand {
    /// Band bisecting a canvas of the given height.
    pub fn centered(canvas_height: f64, height: f64) -> Self {
        Self {
            center_y: canvas_height / 2.0,
            height,
        }
    }

    /// Minimum centre-to-midline distance for a dot of `radius`.
    #[inline]
    pub fn clearance(&self, radius: f64) -> f64 {
        radius + self.height / 2.0
    }

    /// Snaps `y` to the band edge on its current side when it is too close.
    /// A centre exactly on the midline goes below it.
    #[inline]
    pub fn push_out(&self, y: f64, radius: f64) -> f64 {
        let clearance = self.clearance(radius);
        if (y - self.center_y).abs() >= clearance {
            y
        } else if y < self.center_y {
            self.center_y - clearance
        } else {
            self.center_y + clearance
        }
    }

    /// Whether a centre at `y` keeps the required clearance.
    pub fn admits(&self, y: f64, radius: f64) -> bool {
        (y - self.center_y).abs() >= self.clearance(radius) - BAND_EPSILON
    }
}

/// Clamps a centre so a dot of `radius` stays inside `[0, extent]`.
#[inline]
pub fn clamp_to_canvas(p: DVec2, radius: f64, extent: DVec2) -> DVec2 {
    DVec2::new(
        p.x.min(extent.x - radius).max(radius),
        p.y.min(extent.y - radius).max(radius),
    )
}
