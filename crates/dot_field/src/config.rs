//! Run configuration shared by the relaxation and stippling stages.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::relax::{CoincidencePolicy, UpdateOrder, RADIUS_JITTER_MAX};
use crate::sampling::SpacingPolicy;
use crate::stipple::StippleMode;

/// Parameters for a full dot field run.
///
/// Defaults reproduce the classic 800×600 layout of 240 dots relaxed for 10000
/// passes around a 30 unit band, stippled with an 8 unit Poisson spacing.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FieldConfig {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Number of dots scattered and relaxed.
    pub dot_count: usize,
    /// Base dot radius before per-dot jitter.
    pub dot_radius: f64,
    /// Fixed number of relaxation passes.
    pub iterations: usize,
    /// Height of the forbidden band centred on the horizontal midline.
    pub band_height: f64,
    /// Poisson-disk minimum separation.
    pub min_dist: f64,
    /// Candidate attempts per active point before it retires.
    pub k: usize,
    /// How positions are updated within a relaxation pass.
    pub update_order: UpdateOrder,
    /// What to do when two dots coincide exactly.
    pub coincidence: CoincidencePolicy,
    /// Distance used by the sampler's neighbour rejection.
    pub spacing: SpacingPolicy,
    /// How sampled points turn into marks.
    pub stipple: StippleMode,
}

impl Default for FieldConfig {
    fn default() -> Self {
        let min_dist = 8.0;
        Self {
            width: 800,
            height: 600,
            dot_count: 240,
            dot_radius: 15.0,
            iterations: 10_000,
            band_height: 30.0,
            min_dist,
            k: 30,
            update_order: UpdateOrder::default(),
            coincidence: CoincidencePolicy::default(),
            spacing: SpacingPolicy::default(),
            stipple: StippleMode::binary_presence_for(min_dist),
        }
    }
}

impl FieldConfig {
    /// Creates a default [`FieldConfig`] for a canvas of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Sets the number of dots.
    pub fn with_dot_count(mut self, dot_count: usize) -> Self {
        self.dot_count = dot_count;
        self
    }

    /// Sets the base dot radius.
    pub fn with_dot_radius(mut self, dot_radius: f64) -> Self {
        self.dot_radius = dot_radius;
        self
    }

    /// Sets the relaxation pass count.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Sets the forbidden band height.
    pub fn with_band_height(mut self, band_height: f64) -> Self {
        self.band_height = band_height;
        self
    }

    /// Sets the Poisson minimum distance. The stipple mode is left untouched.
    pub fn with_min_dist(mut self, min_dist: f64) -> Self {
        self.min_dist = min_dist;
        self
    }

    /// Sets the number of candidate attempts per active point.
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    pub fn with_update_order(mut self, update_order: UpdateOrder) -> Self {
        self.update_order = update_order;
        self
    }

    pub fn with_coincidence(mut self, coincidence: CoincidencePolicy) -> Self {
        self.coincidence = coincidence;
        self
    }

    pub fn with_spacing(mut self, spacing: SpacingPolicy) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_stipple(mut self, stipple: StippleMode) -> Self {
        self.stipple = stipple;
        self
    }

    /// Canvas size as floating point `(width, height)`.
    pub fn extent(&self) -> glam::DVec2 {
        glam::DVec2::new(self.width as f64, self.height as f64)
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidConfig(
                "canvas width and height must be > 0".into(),
            ));
        }
        if self.dot_count == 0 {
            return Err(Error::InvalidConfig("dot_count must be > 0".into()));
        }
        if !self.dot_radius.is_finite() || self.dot_radius <= 0.0 {
            return Err(Error::InvalidConfig("dot_radius must be > 0".into()));
        }
        if !self.band_height.is_finite() || self.band_height < 0.0 {
            return Err(Error::InvalidConfig("band_height must be >= 0".into()));
        }
        if !self.min_dist.is_finite() || self.min_dist <= 0.0 {
            return Err(Error::InvalidConfig("min_dist must be > 0".into()));
        }
        if self.k == 0 {
            return Err(Error::InvalidConfig("k must be > 0".into()));
        }

        // The largest dot must fit between the band edge and the canvas edge,
        // otherwise the canvas clamp pushes it back into the band. The band edge
        // sits at the base radius plus half the band height.
        let max_radius = self.dot_radius * RADIUS_JITTER_MAX;
        if 2.0 * max_radius > self.width as f64 {
            return Err(Error::InvalidConfig(format!(
                "canvas width {} cannot hold dots of radius {max_radius}",
                self.width
            )));
        }
        let half_height = self.height as f64 / 2.0;
        if self.dot_radius + self.band_height / 2.0 + max_radius > half_height {
            return Err(Error::InvalidConfig(format!(
                "band of height {} leaves no room for dots of radius {max_radius} on a canvas of height {}",
                self.band_height, self.height
            )));
        }

        self.stipple.validate()
    }
}
