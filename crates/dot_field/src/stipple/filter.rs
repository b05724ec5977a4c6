//! Per-point mark decisions from reference image brightness.
use std::f64::consts::TAU;

use glam::DVec2;
use rand::RngCore;
use tracing::debug;

use crate::sampling::rand01;
use crate::stipple::raster::GrayscaleRaster;
use crate::stipple::{Mark, StippleMode};

const DENSITY_CENTER: f64 = 1.3;
const DENSITY_FALLOFF: f64 = 0.6;
const MARK_SCALE_MIN: f64 = 0.9;
const MARK_SCALE_SPAN: f64 = 0.2;

/// Outcome of filtering one point set.
#[derive(Debug, Clone, Default)]
pub struct StippleResult {
    pub marks: Vec<Mark>,
    /// Points whose pixel lay inside the raster.
    pub considered: usize,
    /// Points skipped because their pixel lay outside the raster.
    pub out_of_bounds: usize,
    /// Considered points that produced no mark.
    pub suppressed: usize,
}

/// Turns sampled points into marks according to a [`StippleMode`].
#[derive(Debug, Clone, Copy)]
pub struct StippleFilter {
    pub mode: StippleMode,
    /// Sampling distance the points were generated with.
    pub min_dist: f64,
}

impl StippleFilter {
    pub fn new(mode: StippleMode, min_dist: f64) -> Self {
        Self { mode, min_dist }
    }

    /// Midline bias: 1.3 on the centre row falling to 0.7 on the top and bottom rows.
    #[inline]
    pub fn density_factor(pixel_y: i64, height: u32) -> f64 {
        let half = height as f64 / 2.0;
        let dist_from_center = (pixel_y as f64 - half).abs() / half;
        DENSITY_CENTER - DENSITY_FALLOFF * dist_from_center
    }

    /// Radius of a variable-radius mark; zero or negative means no mark.
    #[inline]
    pub fn variable_radius(&self, brightness: f64, size_factor: f64) -> f64 {
        (1.0 - brightness) * (self.min_dist / 2.0) * size_factor
    }

    /// Filters `points` against `raster`.
    ///
    /// Pixels are addressed by flooring point coordinates. Variable-radius mode
    /// never draws from `rng`.
    pub fn apply(
        &self,
        raster: &dyn GrayscaleRaster,
        points: &[DVec2],
        rng: &mut dyn RngCore,
    ) -> StippleResult {
        let (_, height) = raster.dimensions();
        let mut result = StippleResult::default();

        for &p in points {
            let px = p.x.floor() as i64;
            let py = p.y.floor() as i64;
            let Some(luma) = raster.try_luma_at(px, py) else {
                result.out_of_bounds += 1;
                continue;
            };
            result.considered += 1;
            let brightness = luma as f64 / 255.0;

            let mark = match self.mode {
                StippleMode::BinaryPresence { mark_radius } => {
                    let threshold = brightness * Self::density_factor(py, height);
                    if rand01(rng) >= threshold {
                        let rotation = rand01(rng) * TAU;
                        let x_scale = MARK_SCALE_MIN + rand01(rng) * MARK_SCALE_SPAN;
                        let y_scale = MARK_SCALE_MIN + rand01(rng) * MARK_SCALE_SPAN;
                        Some(Mark::ellipse(
                            p,
                            mark_radius * x_scale,
                            mark_radius * y_scale,
                            rotation,
                        ))
                    } else {
                        None
                    }
                }
                StippleMode::VariableRadius { size_factor } => {
                    let radius = self.variable_radius(brightness, size_factor);
                    (radius > 0.0).then(|| Mark::circle(p, radius))
                }
            };

            match mark {
                Some(mark) => result.marks.push(mark),
                None => result.suppressed += 1,
            }
        }

        debug!(
            "Stipple filter emitted {} marks from {} points ({} out of bounds).",
            result.marks.len(),
            points.len(),
            result.out_of_bounds
        );
        result
    }
}
