mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use dot_field::sampling::PoissonDiskSampling;
use dot_field::stipple::{LumaBuffer, StippleFilter, StippleMode};
use glam::DVec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn stipple_filter_benches(c: &mut Criterion) {
    let raster = LumaBuffer::from_fn(800, 600, |x, y| ((x ^ y) & 0xFF) as u8);
    let mut rng = StdRng::seed_from_u64(0x57_1991E);
    let points = PoissonDiskSampling::new(8.0, 30)
        .sample(DVec2::new(800.0, 600.0), &mut rng)
        .map(|s| s.points)
        .unwrap_or_default();

    let mut group = c.benchmark_group("stipple/filter");
    group.throughput(common::elements_throughput(points.len()));

    let modes = [
        ("binary", StippleMode::binary_presence_for(8.0)),
        ("variable", StippleMode::variable_radius()),
    ];
    for (name, mode) in modes {
        let filter = StippleFilter::new(mode, 8.0);
        group.bench_with_input(BenchmarkId::from_parameter(name), &name, |b, _| {
            b.iter(|| {
                let result = filter.apply(&raster, &points, &mut rng);
                black_box(result.marks.len());
            });
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = stipple_filter_benches
}
criterion_main!(benches);
