use dot_field::prelude::*;
use dot_field_examples::{init_tracing, render_marks, run_seed};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = FieldConfig::default();
    let extent = config.extent();
    let seed = run_seed();

    for (policy, out_path) in [
        (SpacingPolicy::Uniform, "spacing_uniform.png"),
        (SpacingPolicy::CenterlineDensity, "spacing_centerline.png"),
    ] {
        let mut rng = StdRng::seed_from_u64(seed);
        let samples = PoissonDiskSampling::new(config.min_dist, config.k)
            .with_spacing(policy)
            .sample(extent, &mut rng)?;
        info!(
            "{policy:?}: {} points, {} rejected candidates, {} overwritten cells.",
            samples.points.len(),
            samples.rejected,
            samples.overwritten_cells
        );

        let marks = samples
            .points
            .iter()
            .map(|p| Mark::circle(*p, 1.5))
            .collect::<Vec<_>>();
        render_marks(config.width, config.height, &marks).save_png(out_path)?;
    }
    Ok(())
}
