//! Criterion benchmarks for sampler_core.
//!
//! Benchmarks cover:
//! - Raw engine throughput for 32- and 64-bit words
//! - Naive integer and real draws
//! - Diagonal adapters under each window policy

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sampler_core::distribution::{
    BaseDistribution, Diagonal, Lower, Middle, NaiveInt, NaiveReal, Upper,
};
use sampler_core::engine::{Engine, Tiny};

fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine");

    for n in [1_000, 100_000] {
        group.bench_with_input(BenchmarkId::new("tiny_u64", n), &n, |b, &n| {
            let mut engine = Tiny::<u64>::new(42);
            b.iter(|| {
                let mut acc = 0u64;
                for _ in 0..n {
                    acc ^= engine.generate();
                }
                black_box(acc)
            });
        });

        group.bench_with_input(BenchmarkId::new("tiny_u32", n), &n, |b, &n| {
            let mut engine = Tiny::<u32>::new(42);
            b.iter(|| {
                let mut acc = 0u32;
                for _ in 0..n {
                    acc ^= engine.generate();
                }
                black_box(acc)
            });
        });
    }

    group.bench_function("discard_1m", |b| {
        let mut engine = Tiny::<u64>::new(42);
        b.iter(|| engine.discard(black_box(1_000_000)));
    });

    group.finish();
}

fn bench_naive(c: &mut Criterion) {
    let mut group = c.benchmark_group("naive");
    let n = 10_000;

    group.bench_function("int_i32", |b| {
        let mut engine = Tiny::<u64>::new(7);
        let dist = NaiveInt::new(0i32, 1000);
        b.iter(|| {
            let mut sum = 0i64;
            for _ in 0..n {
                sum += i64::from(dist.sample(&mut engine));
            }
            black_box(sum)
        });
    });

    group.bench_function("real_f64", |b| {
        let mut engine = Tiny::<u64>::new(7);
        let dist = NaiveReal::new(0.0f64, 1.0);
        b.iter(|| {
            let mut sum = 0.0;
            for _ in 0..n {
                sum += dist.sample(&mut engine);
            }
            black_box(sum)
        });
    });

    group.finish();
}

fn run_diagonal<const D: usize, S: sampler_core::Side>(n: usize) -> f64 {
    let mut engine = Tiny::<u64>::new(11);
    let mut diagonal = Diagonal::<NaiveReal<f64>, D, S>::with_range(0.0, 1.0);
    diagonal.samples(&mut engine).take(n).sum()
}

fn bench_diagonal(c: &mut Criterion) {
    let mut group = c.benchmark_group("diagonal");
    let n = 10_000;

    group.bench_function("lower_d3", |b| b.iter(|| black_box(run_diagonal::<3, Lower>(n))));
    group.bench_function("upper_d3", |b| b.iter(|| black_box(run_diagonal::<3, Upper>(n))));
    group.bench_function("middle_d3", |b| b.iter(|| black_box(run_diagonal::<3, Middle>(n))));
    group.bench_function("lower_d8", |b| b.iter(|| black_box(run_diagonal::<8, Lower>(n))));
    group.bench_function("middle_d8", |b| b.iter(|| black_box(run_diagonal::<8, Middle>(n))));

    group.finish();
}

criterion_group!(benches, bench_engine, bench_naive, bench_diagonal);
criterion_main!(benches);
