//! Criterion benchmarks for the O(n^2) pairwise table build and the
//! neighbor-smoothing pass.
//!
//! Run with: cargo bench
//! Run specific group: cargo bench -- pairwise_build

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::time::Duration;

use combocrack::{
    neighbors, DistanceKind, Distribution, PairwiseConfig, PairwiseTable,
};

fn bench_pairwise_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("pairwise_build");
    group.measurement_time(Duration::from_secs(10));

    for digit_count in [1usize, 2, 3] {
        group.bench_with_input(
            BenchmarkId::new("rotation", digit_count),
            &digit_count,
            |b, &digit_count| {
                let config = PairwiseConfig {
                    digit_count,
                    distance: DistanceKind::rotation(),
                    encourage_distance: false,
                };
                b.iter(|| PairwiseTable::build(config).unwrap());
            },
        );
        group.bench_with_input(
            BenchmarkId::new("rotation_encouraged", digit_count),
            &digit_count,
            |b, &digit_count| {
                let config = PairwiseConfig {
                    digit_count,
                    distance: DistanceKind::rotation(),
                    encourage_distance: true,
                };
                b.iter(|| PairwiseTable::build(config).unwrap());
            },
        );
    }
    group.finish();
}

fn bench_smoothing(c: &mut Criterion) {
    let mut group = c.benchmark_group("neighbor_smoothing");

    for radius in [1u32, 2, 3] {
        group.bench_with_input(BenchmarkId::new("d3", radius), &radius, |b, &radius| {
            let dist = Distribution::uniform_over(1000);
            b.iter(|| neighbors::smooth(&dist, 3, radius).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_pairwise_build, bench_smoothing);
criterion_main!(benches);
