use dot_field::prelude::*;
use dot_field_examples::{init_tracing, render_dots, render_marks, run_seed, PngRaster};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info, warn};

const DOT_FIELD_SVG: &str = "output.svg";
const DOT_FIELD_PNG: &str = "output.png";
const STIPPLED_SVG: &str = "stippled_output.svg";
const STIPPLED_PNG: &str = "stippled_output.png";

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = FieldConfig::default();
    config.validate()?;
    let mut rng = StdRng::seed_from_u64(run_seed());

    let mut warnings = 0usize;
    let mut sink = FnSink::new(|event: FieldEvent| match event {
        FieldEvent::RelaxationStarted {
            dot_count,
            iterations,
            ideal_spacing,
        } => info!("Relaxing {dot_count} dots for {iterations} passes (spacing {ideal_spacing:.2})."),
        FieldEvent::Warning { context, message } => {
            warnings += 1;
            warn!("{context}: {message}");
        }
        _ => {}
    });

    let field = relax_dots_with_events(&config, &mut rng, &mut sink)?;
    info!(
        "Relaxation finished after {} passes, last max displacement {:.4}.",
        field.summary.iterations, field.summary.final_max_displacement
    );

    if let Err(err) = save_dot_field_svg(DOT_FIELD_SVG, config.width, config.height, &field.dots) {
        error!("Could not write {DOT_FIELD_SVG}: {err}");
    }

    let canvas = render_dots(config.width, config.height, &field.dots);
    if let Err(err) = canvas.save_png(DOT_FIELD_PNG) {
        error!("Could not write {DOT_FIELD_PNG}: {err:#}; skipping stippling.");
        return Ok(());
    }

    let reference = match PngRaster::open(DOT_FIELD_PNG) {
        Ok(raster) => raster,
        Err(err) => {
            error!("Could not read back {DOT_FIELD_PNG}: {err:#}; skipping stippling.");
            return Ok(());
        }
    };

    let stipple_config = config
        .clone()
        .with_stipple(StippleMode::binary_presence_for(config.min_dist));
    let stippled = stipple_raster_with_events(&stipple_config, &reference, &mut rng, &mut sink)?;
    drop(sink);

    if let Err(err) = save_marks_svg(
        STIPPLED_SVG,
        config.width,
        config.height,
        &stippled.result.marks,
    ) {
        error!("Could not write {STIPPLED_SVG}: {err}");
    }
    render_marks(config.width, config.height, &stippled.result.marks).save_png(STIPPLED_PNG)?;

    if warnings > 0 {
        warn!("Finished with {warnings} warnings.");
    }
    Ok(())
}
