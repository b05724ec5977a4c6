//! Poisson disk position sampling strategy.
//!
//! Bridson's algorithm over `[0, width) × [0, height)`, with an optional
//! centreline density profile that lets points pack tighter near the horizontal
//! midline and pushes them apart towards the top and bottom edges.
use std::f64::consts::TAU;

use glam::DVec2;
use mint::Vector2;
use rand::RngCore;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::sampling::grid::SpatialGrid;
use crate::sampling::{next_down, rand01, rand_index, PositionSampling};

/// Base multiplier of the centreline density profile.
const DENSITY_BASE: f64 = 0.7;
/// Vertical distance that adds one full `min_dist` to the effective spacing is `height / DENSITY_SPAN`.
const DENSITY_SPAN: f64 = 1.5;

/// Distance used when testing a candidate against its neighbours.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SpacingPolicy {
    /// Every candidate must keep `min_dist` from its neighbours.
    Uniform,
    /// `min_dist * (0.7 + |y - height/2| / (height/1.5))`: tighter near the midline.
    #[default]
    CenterlineDensity,
}

/// Effective minimum distance for a candidate at height `y`.
#[inline]
pub fn effective_min_dist(policy: SpacingPolicy, y: f64, height: f64, min_dist: f64) -> f64 {
    match policy {
        SpacingPolicy::Uniform => min_dist,
        SpacingPolicy::CenterlineDensity => {
            let density_factor = (y - height / 2.0).abs() / (height / DENSITY_SPAN);
            min_dist * (DENSITY_BASE + density_factor)
        }
    }
}

/// Poisson disk sampling strategy.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PoissonDiskSampling {
    /// Minimum distance between samples in canvas units.
    pub min_dist: f64,
    /// Candidate attempts around an active point before it retires.
    pub k: usize,
    /// Neighbour rejection distance policy.
    pub spacing: SpacingPolicy,
}

/// Output of one sampling run.
#[derive(Debug, Clone, Default)]
pub struct PoissonSamples {
    /// Accepted points in acceptance order; the first one is the seed.
    pub points: Vec<DVec2>,
    /// Candidates generated in total.
    pub attempts: usize,
    /// Candidates rejected for leaving the region or crowding a neighbour.
    pub rejected: usize,
    /// Acceptances that replaced an earlier occupant of the same grid cell.
    pub overwritten_cells: usize,
}

impl PositionSampling for PoissonDiskSampling {
    fn generate(&self, domain_extent: Vector2<f64>, rng: &mut dyn RngCore) -> Vec<Vector2<f64>> {
        match self.sample(DVec2::from(domain_extent), rng) {
            Ok(samples) => samples.points.into_iter().map(Into::into).collect(),
            Err(_) => Vec::new(),
        }
    }
}

impl PoissonDiskSampling {
    /// Create a new PoissonDiskSampling with the given spacing and attempt count.
    pub fn new(min_dist: f64, k: usize) -> Self {
        Self {
            min_dist,
            k,
            spacing: SpacingPolicy::default(),
        }
    }

    pub fn with_spacing(mut self, spacing: SpacingPolicy) -> Self {
        self.spacing = spacing;
        self
    }

    /// Samples `[0, extent.x) × [0, extent.y)`, always returning at least the seed point.
    pub fn sample(&self, extent: DVec2, rng: &mut dyn RngCore) -> Result<PoissonSamples> {
        if !self.min_dist.is_finite() || self.min_dist <= 0.0 {
            return Err(Error::InvalidConfig("min_dist must be > 0".into()));
        }
        if self.k == 0 {
            return Err(Error::InvalidConfig("k must be > 0".into()));
        }
        if !(extent.x > 0.0 && extent.y > 0.0) || !extent.is_finite() {
            return Err(Error::InvalidConfig(
                "sampling extent must be > 0 in both components".into(),
            ));
        }

        debug!(
            "Poisson sampling {}x{} with min_dist {} and k {} ({:?}).",
            extent.x, extent.y, self.min_dist, self.k, self.spacing
        );
        let mut sampler = PoissonDiskSampler::new(self, extent);
        Ok(sampler.run(rng))
    }
}

struct PoissonDiskSampler<'a> {
    params: &'a PoissonDiskSampling,
    bounds: DVec2,
    grid: SpatialGrid,
    points: Vec<DVec2>,
    active: Vec<u32>,
    attempts: usize,
    rejected: usize,
    overwritten_cells: usize,
}

impl<'a> PoissonDiskSampler<'a> {
    fn new(params: &'a PoissonDiskSampling, bounds: DVec2) -> Self {
        Self {
            params,
            bounds,
            grid: SpatialGrid::new(bounds, params.min_dist),
            points: Vec::new(),
            active: Vec::new(),
            attempts: 0,
            rejected: 0,
            overwritten_cells: 0,
        }
    }

    #[inline]
    fn in_bounds(&self, p: DVec2) -> bool {
        p.x >= 0.0 && p.x < self.bounds.x && p.y >= 0.0 && p.y < self.bounds.y
    }

    fn is_valid_point(&self, candidate: DVec2) -> bool {
        if !self.in_bounds(candidate) {
            return false;
        }
        let dist = effective_min_dist(
            self.params.spacing,
            candidate.y,
            self.bounds.y,
            self.params.min_dist,
        );
        self.grid.is_far_enough(&self.points, candidate, dist)
    }

    fn add_point(&mut self, point: DVec2) {
        let index = self.points.len() as u32;
        self.points.push(point);
        self.active.push(index);
        if let Some(previous) = self.grid.insert(point, index) {
            trace!("Point {} replaced point {} in its grid cell.", index, previous);
            self.overwritten_cells += 1;
        }
    }

    fn candidate_around(&self, rng: &mut dyn RngCore, origin: DVec2) -> DVec2 {
        let angle = rand01(rng) * TAU;
        let distance = self.params.min_dist + rand01(rng) * self.params.min_dist;
        origin + DVec2::from_angle(angle) * distance
    }

    fn run(&mut self, rng: &mut dyn RngCore) -> PoissonSamples {
        let initial = DVec2::new(
            (rand01(rng) * self.bounds.x).min(next_down(self.bounds.x)),
            (rand01(rng) * self.bounds.y).min(next_down(self.bounds.y)),
        );
        self.add_point(initial);

        while !self.active.is_empty() {
            let slot = rand_index(rng, self.active.len());
            let origin = self.points[self.active[slot] as usize];
            let mut found_any = false;

            for _ in 0..self.params.k {
                let candidate = self.candidate_around(rng, origin);
                self.attempts += 1;
                if self.is_valid_point(candidate) {
                    self.add_point(candidate);
                    found_any = true;
                } else {
                    self.rejected += 1;
                }
            }

            if !found_any {
                self.active.swap_remove(slot);
            }
        }

        PoissonSamples {
            points: std::mem::take(&mut self.points),
            attempts: self.attempts,
            rejected: self.rejected,
            overwritten_cells: self.overwritten_cells,
        }
    }
}
