//! Stage runners: relax a dot field, and stipple a raster from blue-noise samples.
use glam::DVec2;
use rand::RngCore;
use tracing::{info, warn};

use crate::config::FieldConfig;
use crate::error::{Error, Result};
use crate::events::{EventSink, FieldEvent, FieldEventKind};
use crate::relax::{scatter_dots, Dot, RelaxationEngine, RelaxationSummary};
use crate::sampling::{PoissonDiskSampling, PoissonSamples};
use crate::stipple::{GrayscaleRaster, StippleFilter, StippleResult};

/// Relaxed dots together with the run summary.
#[derive(Debug, Clone)]
pub struct RelaxedField {
    pub dots: Vec<Dot>,
    pub summary: RelaxationSummary,
}

/// Marks produced for a raster together with the samples they came from.
#[derive(Debug, Clone)]
pub struct StippledRaster {
    pub samples: PoissonSamples,
    pub result: StippleResult,
}

/// Scatters `config.dot_count` dots and relaxes them.
pub fn relax_dots<R: RngCore>(config: &FieldConfig, rng: &mut R) -> Result<RelaxedField> {
    relax_dots_with_events(config, rng, &mut ())
}

pub fn relax_dots_with_events<R: RngCore>(
    config: &FieldConfig,
    rng: &mut R,
    sink: &mut dyn EventSink,
) -> Result<RelaxedField> {
    let engine = RelaxationEngine::new(config)?;
    let mut dots = scatter_dots(config, rng);

    if sink.wants(FieldEventKind::RelaxationStarted) {
        sink.send(FieldEvent::RelaxationStarted {
            dot_count: dots.len(),
            iterations: engine.iterations(),
            ideal_spacing: engine.ideal_spacing(dots.len()),
        });
    }

    let summary = engine.run(&mut dots)?;

    if summary.coincident_pairs > 0 && sink.wants(FieldEventKind::Warning) {
        sink.send(FieldEvent::Warning {
            context: "relaxation".into(),
            message: format!(
                "Separated {} coincident dot pairs",
                summary.coincident_pairs
            ),
        });
    }
    if sink.wants(FieldEventKind::RelaxationFinished) {
        sink.send(FieldEvent::RelaxationFinished { summary });
    }

    Ok(RelaxedField { dots, summary })
}

/// Samples the raster's extent with the configured Poisson parameters and filters
/// the samples into marks by brightness.
pub fn stipple_raster<R: RngCore>(
    config: &FieldConfig,
    raster: &dyn GrayscaleRaster,
    rng: &mut R,
) -> Result<StippledRaster> {
    stipple_raster_with_events(config, raster, rng, &mut ())
}

pub fn stipple_raster_with_events<R: RngCore>(
    config: &FieldConfig,
    raster: &dyn GrayscaleRaster,
    rng: &mut R,
    sink: &mut dyn EventSink,
) -> Result<StippledRaster> {
    config.stipple.validate()?;
    let (width, height) = raster.dimensions();
    if width == 0 || height == 0 {
        return Err(Error::InvalidConfig("reference raster is empty".into()));
    }
    let extent = DVec2::new(width as f64, height as f64);

    let sampling = PoissonDiskSampling::new(config.min_dist, config.k).with_spacing(config.spacing);
    let samples = sampling.sample(extent, rng)?;
    info!(
        "Sampled {} points over {}x{} ({} candidates).",
        samples.points.len(),
        width,
        height,
        samples.attempts
    );
    if samples.overwritten_cells > 0 {
        warn!(
            "{} samples displaced an earlier point from its grid cell.",
            samples.overwritten_cells
        );
        if sink.wants(FieldEventKind::Warning) {
            sink.send(FieldEvent::Warning {
                context: "sampling".into(),
                message: format!(
                    "{} grid cells were overwritten",
                    samples.overwritten_cells
                ),
            });
        }
    }
    if sink.wants(FieldEventKind::SamplingFinished) {
        sink.send(FieldEvent::SamplingFinished {
            points: samples.points.len(),
            attempts: samples.attempts,
            overwritten_cells: samples.overwritten_cells,
        });
    }

    let filter = StippleFilter::new(config.stipple, config.min_dist);
    let result = filter.apply(raster, &samples.points, rng);
    info!(
        "Stippling kept {} of {} points.",
        result.marks.len(),
        result.considered
    );

    if sink.wants(FieldEventKind::MarkEmitted) {
        for mark in &result.marks {
            sink.send(FieldEvent::MarkEmitted { mark: *mark });
        }
    }
    if sink.wants(FieldEventKind::StippleFinished) {
        sink.send(FieldEvent::StippleFinished {
            considered: result.considered,
            out_of_bounds: result.out_of_bounds,
            emitted: result.marks.len(),
        });
    }

    Ok(StippledRaster { samples, result })
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::events::VecSink;
    use crate::stipple::{LumaBuffer, StippleMode};

    fn small_config() -> FieldConfig {
        FieldConfig::new(160, 120)
            .with_dot_count(20)
            .with_dot_radius(5.0)
            .with_band_height(10.0)
            .with_iterations(50)
            .with_min_dist(6.0)
    }

    #[test]
    fn relax_dots_emits_start_and_finish() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut sink = VecSink::new();
        let field = relax_dots_with_events(&small_config(), &mut rng, &mut sink).expect("relax");

        assert_eq!(field.dots.len(), 20);
        assert_eq!(field.summary.iterations, 50);
        assert_eq!(sink.count(FieldEventKind::RelaxationStarted), 1);
        assert_eq!(sink.count(FieldEventKind::RelaxationFinished), 1);
    }

    #[test]
    fn relax_dots_rejects_invalid_config() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = relax_dots(&small_config().with_dot_count(0), &mut rng).expect_err("invalid");
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn stipple_raster_reports_every_mark() {
        let mut rng = StdRng::seed_from_u64(2);
        let raster = LumaBuffer::filled(160, 120, 0);
        let mut sink = VecSink::new();
        let out = stipple_raster_with_events(&small_config(), &raster, &mut rng, &mut sink)
            .expect("stipple");

        assert_eq!(out.result.marks.len(), out.samples.points.len());
        assert_eq!(sink.count(FieldEventKind::SamplingFinished), 1);
        assert_eq!(sink.count(FieldEventKind::StippleFinished), 1);
        assert_eq!(
            sink.count(FieldEventKind::MarkEmitted),
            out.result.marks.len()
        );
    }

    #[test]
    fn stipple_raster_variable_mode_on_white_is_empty() {
        let mut rng = StdRng::seed_from_u64(3);
        let raster = LumaBuffer::filled(100, 80, 255);
        let config = small_config().with_stipple(StippleMode::variable_radius());
        let mut sink = VecSink::without_marks();
        let out = stipple_raster_with_events(&config, &raster, &mut rng, &mut sink).expect("stipple");

        assert!(!out.samples.points.is_empty());
        assert!(out.result.marks.is_empty());
        assert_eq!(sink.count(FieldEventKind::MarkEmitted), 0);
    }

    #[test]
    fn stipple_raster_rejects_empty_raster() {
        let mut rng = StdRng::seed_from_u64(4);
        let raster = LumaBuffer::filled(0, 10, 0);
        assert!(stipple_raster(&small_config(), &raster, &mut rng).is_err());
    }
}
