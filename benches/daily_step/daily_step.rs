use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use sird::coupler::cross_infect;
use sird::population::{Population, PopulationParameters};
use sird::scenario::Scenario;
use std::hint::black_box;

static DAYS: u64 = 365;

fn populations(count: usize) -> Vec<Population> {
    (0..count)
        .map(|index| {
            PopulationParameters::new(1_000.0 * (index + 1) as f64, 0.4, 0.1, 0.01, 0.05)
                .name(format!("group{index}"))
                .quarantine_leak(0.25)
                .quarantine_length(14)
                .build()
                .expect("valid parameters")
        })
        .collect()
}

fn default_scenario() {
    let mut simulation = Scenario::default().build().expect("valid scenario");
    simulation.run(DAYS).expect("simulation failed");
    black_box(simulation.totals());
}

pub fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("default scenario, one year", |bencher| {
        bencher.iter(default_scenario)
    });

    let mut group = c.benchmark_group("cross_infect");
    for count in [2, 8, 32] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |bencher, &count| {
            let mut populations = populations(count);
            bencher.iter(|| cross_infect(black_box(&mut populations)));
        });
    }
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
