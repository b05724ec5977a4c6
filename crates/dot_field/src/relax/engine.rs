//! Positional repulsion relaxation.
//!
//! Each pass pushes every dot away from neighbours closer than the ideal spacing
//! `sqrt(area / n)`, then keeps it out of the forbidden band and inside the canvas.
//! Band clearance is measured with the base dot radius; the canvas clamp uses each
//! dot's own radius.
//! There is no velocity or damping, and the pass count is fixed.
use glam::DVec2;
use tracing::{debug, info, warn};

use crate::config::FieldConfig;
use crate::error::{Error, Result};
use crate::relax::band::{clamp_to_canvas, ForbiddenBand};
use crate::relax::dot::Dot;
use crate::relax::{CoincidencePolicy, UpdateOrder};

const GOLDEN_ANGLE: f64 = 2.399_963_229_728_653;

/// Per-pass statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StepStats {
    /// Largest distance any dot moved during the pass, after clamping.
    pub max_displacement: f64,
    /// Exactly coincident pairs that were pushed apart along an escape direction.
    pub coincident_pairs: usize,
}

/// Summary of a full relaxation run.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RelaxationSummary {
    pub iterations: usize,
    /// Largest displacement seen in the final pass.
    pub final_max_displacement: f64,
    pub coincident_pairs: usize,
}

/// Relaxes a population of dots on a fixed canvas.
#[derive(Clone, Debug)]
pub struct RelaxationEngine {
    extent: DVec2,
    band: ForbiddenBand,
    band_radius: f64,
    iterations: usize,
    update_order: UpdateOrder,
    coincidence: CoincidencePolicy,
}

impl RelaxationEngine {
    /// Builds an engine from a validated configuration.
    pub fn new(config: &FieldConfig) -> Result<Self> {
        config.validate()?;
        let extent = config.extent();
        Ok(Self {
            extent,
            band: ForbiddenBand::centered(extent.y, config.band_height),
            band_radius: config.dot_radius,
            iterations: config.iterations,
            update_order: config.update_order,
            coincidence: config.coincidence,
        })
    }

    pub fn band(&self) -> ForbiddenBand {
        self.band
    }

    /// Radius used for the band clearance of every dot.
    pub fn band_radius(&self) -> f64 {
        self.band_radius
    }

    pub fn extent(&self) -> DVec2 {
        self.extent
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Spacing at which `population` dots would evenly tile the canvas.
    pub fn ideal_spacing(&self, population: usize) -> f64 {
        ((self.extent.x * self.extent.y) / population.max(1) as f64).sqrt()
    }

    /// Runs the configured number of passes. No convergence test, no early exit.
    pub fn run(&self, dots: &mut [Dot]) -> Result<RelaxationSummary> {
        info!(
            "Relaxing {} dots for {} iterations ({:?}).",
            dots.len(),
            self.iterations,
            self.update_order
        );
        let mut summary = RelaxationSummary::default();
        for iteration in 0..self.iterations {
            let stats = self.step(dots)?;
            summary.iterations += 1;
            summary.final_max_displacement = stats.max_displacement;
            summary.coincident_pairs += stats.coincident_pairs;
            if (iteration + 1) % 1000 == 0 {
                debug!(
                    "Relaxation pass {}: max displacement {:.4}.",
                    iteration + 1,
                    stats.max_displacement
                );
            }
        }
        if summary.coincident_pairs > 0 {
            warn!(
                "Separated {} coincident dot pairs during relaxation.",
                summary.coincident_pairs
            );
        }
        info!(
            "Relaxation finished; final max displacement {:.4}.",
            summary.final_max_displacement
        );
        Ok(summary)
    }

    /// Runs a single relaxation pass.
    pub fn step(&self, dots: &mut [Dot]) -> Result<StepStats> {
        match self.update_order {
            UpdateOrder::Sequential => self.step_sequential(dots),
            UpdateOrder::Synchronous => self.step_synchronous(dots),
        }
    }

    fn step_sequential(&self, dots: &mut [Dot]) -> Result<StepStats> {
        let ideal = self.ideal_spacing(dots.len());
        let mut stats = StepStats::default();
        for i in 0..dots.len() {
            let displacement = self.displacement(dots, i, ideal, &mut stats)?;
            let before = dots[i].position;
            let after = self.constrain(before + displacement, dots[i].radius);
            dots[i].position = after;
            stats.max_displacement = stats.max_displacement.max(before.distance(after));
        }
        Ok(stats)
    }

    fn step_synchronous(&self, dots: &mut [Dot]) -> Result<StepStats> {
        let ideal = self.ideal_spacing(dots.len());
        let mut stats = StepStats::default();
        let mut displacements = Vec::with_capacity(dots.len());
        for i in 0..dots.len() {
            displacements.push(self.displacement(dots, i, ideal, &mut stats)?);
        }
        // Each pair is seen from both sides.
        stats.coincident_pairs /= 2;

        for (dot, displacement) in dots.iter_mut().zip(displacements) {
            let before = dot.position;
            let after = self.constrain(before + displacement, dot.radius);
            dot.position = after;
            stats.max_displacement = stats.max_displacement.max(before.distance(after));
        }
        Ok(stats)
    }

    /// Summed repulsion on dot `i` from every other dot within `ideal`.
    fn displacement(
        &self,
        dots: &[Dot],
        i: usize,
        ideal: f64,
        stats: &mut StepStats,
    ) -> Result<DVec2> {
        let here = dots[i].position;
        let mut displacement = DVec2::ZERO;

        for (j, other) in dots.iter().enumerate() {
            if i == j {
                continue;
            }
            let diff = here - other.position;
            let distance = diff.length();
            if distance >= ideal {
                continue;
            }

            let direction = if distance > 0.0 {
                diff / distance
            } else {
                match self.coincidence {
                    CoincidencePolicy::Fail => {
                        return Err(Error::DegenerateGeometry {
                            first: i.min(j),
                            second: i.max(j),
                        });
                    }
                    CoincidencePolicy::Escape => {
                        // Sequential passes only meet a coincident pair from its
                        // first member; the second has been moved by then.
                        if i < j || self.update_order == UpdateOrder::Synchronous {
                            stats.coincident_pairs += 1;
                        }
                        escape_direction(i, j)
                    }
                }
            };

            let force = (ideal - distance) / ideal;
            displacement += direction * force;
        }

        Ok(displacement)
    }

    #[inline]
    fn constrain(&self, p: DVec2, radius: f64) -> DVec2 {
        let y = self.band.push_out(p.y, self.band_radius);
        clamp_to_canvas(DVec2::new(p.x, y), radius, self.extent)
    }
}

/// Direction pushing dot `i` away from a dot `j` at the same position.
/// Antisymmetric: `escape_direction(j, i) == -escape_direction(i, j)`.
fn escape_direction(i: usize, j: usize) -> DVec2 {
    let (low, high) = (i.min(j), i.max(j));
    let angle = (low as f64 * 7.0 + high as f64) * GOLDEN_ANGLE;
    let u = DVec2::from_angle(angle);
    if i == high {
        u
    } else {
        -u
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::relax::dot::scatter_dots;

    fn small_config() -> FieldConfig {
        FieldConfig::new(200, 160)
            .with_dot_count(24)
            .with_dot_radius(6.0)
            .with_band_height(12.0)
            .with_iterations(300)
    }

    fn assert_constraints(engine: &RelaxationEngine, dots: &[Dot]) {
        let extent = engine.extent();
        for (i, dot) in dots.iter().enumerate() {
            let p = dot.position;
            assert!(
                engine.band().admits(p.y, engine.band_radius()),
                "dot {i} at {p:?} sits inside the band"
            );
            assert!(p.x >= dot.radius && p.x <= extent.x - dot.radius, "dot {i} x {p:?}");
            assert!(p.y >= dot.radius && p.y <= extent.y - dot.radius, "dot {i} y {p:?}");
        }
    }

    #[test]
    fn ideal_spacing_tiles_canvas() {
        let engine = RelaxationEngine::new(&FieldConfig::default()).expect("valid config");
        let expected = (800.0_f64 * 600.0 / 240.0).sqrt();
        assert!((engine.ideal_spacing(240) - expected).abs() < 1e-12);
    }

    #[test]
    fn sequential_run_honours_band_and_bounds() {
        let config = small_config();
        let engine = RelaxationEngine::new(&config).expect("valid config");
        let mut rng = StdRng::seed_from_u64(21);
        let mut dots = scatter_dots(&config, &mut rng);

        let summary = engine.run(&mut dots).expect("relaxation");
        assert_eq!(summary.iterations, 300);
        assert_constraints(&engine, &dots);
    }

    #[test]
    fn synchronous_run_honours_band_and_bounds() {
        let config = small_config().with_update_order(UpdateOrder::Synchronous);
        let engine = RelaxationEngine::new(&config).expect("valid config");
        let mut rng = StdRng::seed_from_u64(22);
        let mut dots = scatter_dots(&config, &mut rng);

        engine.run(&mut dots).expect("relaxation");
        assert_constraints(&engine, &dots);
    }

    #[test]
    fn relaxation_spreads_a_clump() {
        let config = small_config().with_iterations(200);
        let engine = RelaxationEngine::new(&config).expect("valid config");
        let mut dots: Vec<Dot> = (0..24)
            .map(|i| {
                let offset = DVec2::new((i % 6) as f64, (i / 6) as f64);
                Dot::new(DVec2::new(60.0, 40.0) + offset, 6.0)
            })
            .collect();

        let min_pair = |dots: &[Dot]| {
            let mut min = f64::MAX;
            for a in 0..dots.len() {
                for b in (a + 1)..dots.len() {
                    min = min.min(dots[a].position.distance(dots[b].position));
                }
            }
            min
        };
        let before = min_pair(&dots);
        engine.run(&mut dots).expect("relaxation");
        assert!(min_pair(&dots) > before * 5.0);
    }

    #[test]
    fn coincident_dots_escape_in_opposite_directions() {
        let config = small_config().with_update_order(UpdateOrder::Synchronous);
        let engine = RelaxationEngine::new(&config).expect("valid config");
        let mut dots = vec![
            Dot::new(DVec2::new(100.0, 40.0), 6.0),
            Dot::new(DVec2::new(100.0, 40.0), 6.0),
        ];

        let stats = engine.step(&mut dots).expect("escape policy");
        assert_eq!(stats.coincident_pairs, 1);
        assert_ne!(dots[0].position, dots[1].position);
        let mid = (dots[0].position + dots[1].position) / 2.0;
        assert!(mid.distance(DVec2::new(100.0, 40.0)) < 1e-9);
    }

    #[test]
    fn sequential_escape_counts_pair_once() {
        let engine = RelaxationEngine::new(&small_config()).expect("valid config");
        let mut dots = vec![
            Dot::new(DVec2::new(100.0, 40.0), 6.0),
            Dot::new(DVec2::new(100.0, 40.0), 6.0),
        ];
        let stats = engine.step(&mut dots).expect("escape policy");
        assert_eq!(stats.coincident_pairs, 1);
        assert_ne!(dots[0].position, dots[1].position);
    }

    #[test]
    fn coincident_dots_fail_when_requested() {
        let config = small_config().with_coincidence(CoincidencePolicy::Fail);
        let engine = RelaxationEngine::new(&config).expect("valid config");
        let mut dots = vec![
            Dot::new(DVec2::new(50.0, 30.0), 6.0),
            Dot::new(DVec2::new(120.0, 30.0), 6.0),
            Dot::new(DVec2::new(50.0, 30.0), 6.0),
        ];

        let err = engine.step(&mut dots).expect_err("degenerate geometry");
        assert!(matches!(
            err,
            Error::DegenerateGeometry {
                first: 0,
                second: 2
            }
        ));
    }

    #[test]
    fn band_clearance_uses_base_radius() {
        let engine = RelaxationEngine::new(&FieldConfig::default()).expect("valid config");
        let mut dots = vec![
            Dot::new(DVec2::new(100.0, 275.0), 12.0),
            Dot::new(DVec2::new(700.0, 268.0), 18.0),
        ];

        engine.step(&mut dots).expect("step");
        // Clearance is 15 + 30 / 2 for both dots, whatever their own radius.
        assert_eq!(dots[0].position.y, 270.0);
        assert_eq!(dots[1].position.y, 268.0);
    }

    #[test]
    fn escape_direction_is_antisymmetric() {
        for (i, j) in [(0, 1), (3, 9), (17, 4)] {
            let a = escape_direction(i, j);
            let b = escape_direction(j, i);
            assert!((a + b).length() < 1e-12);
            assert!((a.length() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn sequential_pass_sees_updated_neighbours() {
        let base = small_config().with_iterations(1);
        let seq = RelaxationEngine::new(&base).expect("valid config");
        let sync = RelaxationEngine::new(&base.clone().with_update_order(UpdateOrder::Synchronous))
            .expect("valid config");

        let start = vec![
            Dot::new(DVec2::new(90.0, 40.0), 6.0),
            Dot::new(DVec2::new(100.0, 40.0), 6.0),
            Dot::new(DVec2::new(110.0, 40.0), 6.0),
        ];
        let mut a = start.clone();
        let mut b = start;
        seq.step(&mut a).expect("step");
        sync.step(&mut b).expect("step");

        // Synchronous leaves the middle dot balanced; sequential does not.
        assert!((b[1].position.x - 100.0).abs() < 1e-9);
        assert!((a[1].position.x - 100.0).abs() > 1e-6);
    }
}
