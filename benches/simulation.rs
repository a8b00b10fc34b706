use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use vecdyn::parameters::Parameters;
use vecdyn::scenario::run_scenario;
use vecdyn::simulator::simulate;
use vecdyn::spray::SpraySchedule;

fn season_benchmarks(c: &mut Criterion) {
    let parameters = Parameters::default();
    let grid = parameters.output_grid();
    let initial = parameters.initial_state();

    c.bench_function("single_season_untreated", |b| {
        b.iter(|| {
            simulate(
                black_box(initial),
                &parameters,
                &grid,
                &SpraySchedule::none(),
            )
            .unwrap()
        });
    });

    c.bench_function("full_scenario_comparison", |b| {
        b.iter(|| run_scenario(black_box(&parameters)).unwrap());
    });
}

criterion_group!(benches, season_benchmarks);
criterion_main!(benches);
