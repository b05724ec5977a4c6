use dot_field::prelude::*;
use dot_field_examples::{init_tracing, render_marks, run_seed, PngRaster};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::error;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let input = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "output.png".to_string());
    let reference = PngRaster::open(&input)?;
    let (width, height) = reference.dimensions();

    let config = FieldConfig::new(width, height).with_stipple(StippleMode::variable_radius());
    let mut rng = StdRng::seed_from_u64(run_seed());
    let out = stipple_raster(&config, &reference, &mut rng)?;

    if let Err(err) = save_marks_svg("stippled_variable.svg", width, height, &out.result.marks) {
        error!("Could not write stippled_variable.svg: {err}");
    }
    render_marks(width, height, &out.result.marks).save_png("stippled_variable.png")?;
    Ok(())
}
