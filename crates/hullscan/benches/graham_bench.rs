//! Criterion benchmarks for the Graham scan.
//! Focus sizes: n in {10, 100, 1_000, 10_000}.
//! Results: by default under target/criterion; to store under data/bench, run:
//!   CARGO_TARGET_DIR=data/bench cargo bench -p hullscan

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use hullscan::api::{graham_scan, sample_disk, sample_disk_grid, DiskSampleCfg, SampleReplay};
use hullscan::Point;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn circle_points(n: usize, seed: u64) -> Vec<Point<f64>> {
    // worst case for the scan: every point ends up on the hull
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let th: f64 = rng.gen::<f64>() * std::f64::consts::TAU;
            Point::new(th.cos(), th.sin())
        })
        .collect()
}

fn bench_graham(c: &mut Criterion) {
    let mut group = c.benchmark_group("graham");
    for &n in &[10usize, 100, 1_000, 10_000] {
        let cfg = DiskSampleCfg {
            count: n,
            snap_to_grid: false,
            ..DiskSampleCfg::default()
        };
        group.bench_with_input(BenchmarkId::new("disk_f64", n), &n, |b, _| {
            b.iter_batched(
                || sample_disk(cfg, SampleReplay { seed: 43, index: 0 }),
                |pts| {
                    let _hull = graham_scan(&pts).unwrap();
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("disk_grid_i64", n), &n, |b, _| {
            b.iter_batched(
                || sample_disk_grid(cfg, SampleReplay { seed: 44, index: 0 }),
                |pts| {
                    let _hull = graham_scan(&pts).unwrap();
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("circle_f64", n), &n, |b, &n| {
            b.iter_batched(
                || circle_points(n, 45),
                |pts| {
                    let _hull = graham_scan(&pts).unwrap();
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_graham);
criterion_main!(benches);
