mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use dot_field::config::FieldConfig;
use dot_field::relax::{scatter_dots, RelaxationEngine, UpdateOrder};
use rand::rngs::StdRng;
use rand::SeedableRng;

const POPULATIONS: [usize; 3] = [60, 240, 960];
const ORDERS: [UpdateOrder; 2] = [UpdateOrder::Sequential, UpdateOrder::Synchronous];

fn relaxation_step_benches(c: &mut Criterion) {
    for order in ORDERS {
        let mut group = c.benchmark_group(format!("relax/step/{order:?}"));

        for &population in &POPULATIONS {
            let config = FieldConfig::default()
                .with_dot_count(population)
                .with_dot_radius(6.0)
                .with_update_order(order);
            let engine = match RelaxationEngine::new(&config) {
                Ok(engine) => engine,
                Err(e) => panic!("bench config rejected: {e}"),
            };
            let mut rng = StdRng::seed_from_u64(0xA11CE ^ population as u64);
            let mut dots = scatter_dots(&config, &mut rng);
            group.throughput(common::elements_throughput(population * population));

            group.bench_with_input(
                BenchmarkId::from_parameter(population),
                &population,
                |b, _| {
                    b.iter(|| {
                        let stats = engine.step(&mut dots);
                        black_box(stats.map(|s| s.max_displacement).unwrap_or(0.0));
                    });
                },
            );
        }

        group.finish();
    }
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = relaxation_step_benches
}
criterion_main!(benches);
