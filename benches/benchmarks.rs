//! Benchmarks for runstats accumulators
//!
//! Run with: cargo bench --features full

// Require all features for benchmarks
#[cfg(not(all(feature = "statistics", feature = "summation")))]
compile_error!("Benchmarks require all features. Run: cargo bench --features full");

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use runstats::statistics::{GeneralizedMean, RegressionAccumulator, StatisticsAccumulator};
use runstats::summation::PairwiseSummation;
use runstats::traits::Accumulator;

// ============================================================================
// Statistics Accumulator Benchmarks
// ============================================================================

fn bench_statistics(c: &mut Criterion) {
    let mut group = c.benchmark_group("statistics_accumulator");
    group.throughput(Throughput::Elements(1));

    group.bench_function("insert", |b| {
        let mut stats = StatisticsAccumulator::<f64>::new();
        let mut i = 0u64;
        b.iter(|| {
            stats.insert(i as f64);
            i = i.wrapping_add(1);
        });
    });

    group.bench_function("slide", |b| {
        let mut stats = StatisticsAccumulator::<f64>::new();
        for i in 0..1_000u64 {
            stats.insert(i as f64);
        }
        let mut i = 1_000u64;
        b.iter(|| {
            stats.insert(i as f64);
            stats.remove((i - 1_000) as f64);
            i += 1;
        });
    });

    group.bench_function("query_all", |b| {
        let stats: StatisticsAccumulator = (0..100_000u64).map(|i| i as f64).collect();
        b.iter(|| {
            black_box(stats.average());
            black_box(stats.variance_sample());
            black_box(stats.stdev_population());
            black_box(stats.sum());
        });
    });

    group.bench_function("merge", |b| {
        let s1: StatisticsAccumulator = (0..10_000u64).map(|i| i as f64).collect();
        let s2: StatisticsAccumulator = (10_000..20_000u64).map(|i| i as f64).collect();
        b.iter(|| {
            let mut s = s1.clone();
            s.merge(black_box(&s2)).unwrap();
        });
    });

    group.finish();
}

// ============================================================================
// Regression Accumulator Benchmarks
// ============================================================================

fn bench_regression(c: &mut Criterion) {
    let mut group = c.benchmark_group("regression_accumulator");
    group.throughput(Throughput::Elements(1));

    group.bench_function("insert", |b| {
        let mut fit = RegressionAccumulator::<f64>::new();
        let mut i = 0u64;
        b.iter(|| {
            let x = i as f64;
            fit.insert(x, 2.0 * x + 1.0);
            i = i.wrapping_add(1);
        });
    });

    group.bench_function("slide", |b| {
        let mut fit = RegressionAccumulator::<f64>::new();
        for i in 0..1_000u64 {
            let x = i as f64;
            fit.insert(x, 2.0 * x + 1.0);
        }
        let mut i = 1_000u64;
        b.iter(|| {
            let x = i as f64;
            let old = (i - 1_000) as f64;
            fit.insert(x, 2.0 * x + 1.0);
            fit.remove(old, 2.0 * old + 1.0);
            i += 1;
        });
    });

    group.bench_function("query_all", |b| {
        let fit: RegressionAccumulator = (0..10_000u64)
            .map(|i| (i as f64, (i % 17) as f64))
            .collect();
        b.iter(|| {
            black_box(fit.gain());
            black_box(fit.bias());
            black_box(fit.correlation());
            black_box(fit.predict_inverse(black_box(3.0)));
        });
    });

    group.finish();
}

// ============================================================================
// Generalized Mean Benchmarks
// ============================================================================

fn bench_generalized_mean(c: &mut Criterion) {
    let mut group = c.benchmark_group("generalized_mean");
    group.throughput(Throughput::Elements(1));

    for (name, exponent) in [("geometric", 0.0), ("harmonic", -1.0), ("cubic", 3.0)] {
        group.bench_function(format!("insert_{}", name), |b| {
            let mut mean = GeneralizedMean::<f64>::new(exponent);
            let mut i = 1u64;
            b.iter(|| {
                mean.insert(i as f64);
                i = i.wrapping_add(1).max(1);
            });
        });
    }

    group.finish();
}

// ============================================================================
// Pairwise Summation Benchmarks
// ============================================================================

fn bench_pairwise(c: &mut Criterion) {
    let mut group = c.benchmark_group("pairwise_summation");
    group.throughput(Throughput::Elements(1));

    group.bench_function("add", |b| {
        let mut sum = PairwiseSummation::<f64>::new();
        let mut i = 0u64;
        b.iter(|| {
            i += 1;
            sum.add(1.0 / i as f64);
        });
    });

    for n in [1_000u64, 1_000_000] {
        group.bench_with_input(BenchmarkId::new("total", n), &n, |b, &n| {
            let sum: PairwiseSummation = (1..=n).map(|i| 1.0 / i as f64).collect();
            b.iter(|| black_box(sum.total()));
        });
    }

    group.bench_function("merge", |b| {
        let s1: PairwiseSummation = (1..=10_000u64).map(|i| i as f64).collect();
        let s2: PairwiseSummation = (1..=12_345u64).map(|i| i as f64).collect();
        b.iter(|| {
            let mut s = s1.clone();
            s.merge(black_box(&s2)).unwrap();
        });
    });

    group.finish();
}

// ============================================================================
// Main
// ============================================================================

criterion_group!(
    benches,
    bench_statistics,
    bench_regression,
    bench_generalized_mean,
    bench_pairwise,
);

criterion_main!(benches);
