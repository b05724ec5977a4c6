mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use dot_field::sampling::{PoissonDiskSampling, SpacingPolicy};
use glam::DVec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

const MIN_DISTS: [f64; 4] = [32.0, 16.0, 8.0, 4.0];
const POLICIES: [SpacingPolicy; 2] = [SpacingPolicy::Uniform, SpacingPolicy::CenterlineDensity];

fn sampling_poisson_benches(c: &mut Criterion) {
    let extent = DVec2::new(800.0, 600.0);

    for policy in POLICIES {
        let mut group = c.benchmark_group(format!("sampling/poisson_disk/{policy:?}"));

        for &min_dist in &MIN_DISTS {
            let strategy = PoissonDiskSampling::new(min_dist, 30).with_spacing(policy);
            let mut rng_est = StdRng::seed_from_u64(0xBEEFu64 ^ (min_dist as u64));
            let expected = strategy
                .sample(extent, &mut rng_est)
                .map(|s| s.points.len())
                .unwrap_or(0);
            group.throughput(common::elements_throughput(expected));

            let mut rng = StdRng::seed_from_u64(0xC0FFEEu64 ^ (min_dist as u64));
            group.bench_with_input(BenchmarkId::from_parameter(min_dist), &min_dist, |b, _| {
                b.iter(|| {
                    let samples = strategy.sample(extent, &mut rng);
                    black_box(samples.map(|s| s.points.len()).unwrap_or(0));
                });
            });
        }

        group.finish();
    }
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = sampling_poisson_benches
}
criterion_main!(benches);
