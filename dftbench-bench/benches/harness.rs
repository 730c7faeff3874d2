use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use dftbench::clock::MonotonicClock;
use dftbench::config::{BenchConfig, SignalConfig};
use dftbench::harness::Harness;
use dftbench::progress::Silent;
use dftbench::random::StdRandom;
use dftbench::transform::PlannedFft;

fn bench_harness(c: &mut Criterion) {
    let mut group = c.benchmark_group("harness_run");
    for &invert in &[false, true] {
        let config = BenchConfig {
            signal: SignalConfig {
                size: 1024,
                ..SignalConfig::default()
            },
            trials: 10,
            invert,
            ..BenchConfig::default()
        };
        let mut harness = Harness::new(config, PlannedFft::new(), MonotonicClock::new()).unwrap();
        let mut rng = StdRandom::seeded(7);
        let label = if invert { "round_trip" } else { "forward" };
        group.bench_function(BenchmarkId::new(label, 1024), |b| {
            b.iter(|| harness.run(&mut rng, &mut Silent).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_harness);
criterion_main!(benches);
