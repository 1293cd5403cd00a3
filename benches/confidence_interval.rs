//! Confidence interval engine benchmark
//!
//! Measures the cost of the harness decision loop: the subsession size
//! search followed by the interval computation, for series of the lengths a
//! benchmark run typically collects.
//!
//! # Run Instructions
//!
//! ```bash
//! cargo bench --bench confidence_interval
//! ```

use benchci::statistics::{
    analyze_series, confidence_interval, optimal_subsession_size, AnalysisConfig, MeanMethod,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// AR(1)-style series with a fixed LCG so runs are comparable
fn correlated_series(n: usize) -> Vec<f64> {
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    let mut prev = 0.0;
    (0..n)
        .map(|_| {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            let noise = (state >> 11) as f64 / (1u64 << 53) as f64 - 0.5;
            prev = 0.7 * prev + noise;
            100.0 + prev
        })
        .collect()
}

fn bench_confidence_interval(c: &mut Criterion) {
    let mut group = c.benchmark_group("confidence_interval");
    for size in [100, 1_000, 10_000] {
        let series = correlated_series(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &series, |b, s| {
            b.iter(|| confidence_interval(black_box(s), 4, 0.95, MeanMethod::Arithmetic));
        });
    }
    group.finish();
}

fn bench_subsession_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("optimal_subsession_size");
    for size in [100, 1_000, 10_000] {
        let series = correlated_series(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &series, |b, s| {
            b.iter(|| optimal_subsession_size(black_box(s), MeanMethod::Harmonic, 0.1));
        });
    }
    group.finish();
}

fn bench_analyze_series(c: &mut Criterion) {
    let series = correlated_series(1_000);
    let config = AnalysisConfig {
        target_ci_width: Some(0.05),
        ..AnalysisConfig::normal()
    };
    c.bench_function("analyze_series_1000", |b| {
        b.iter(|| analyze_series(black_box(&series), &config));
    });
}

criterion_group!(
    benches,
    bench_confidence_interval,
    bench_subsession_search,
    bench_analyze_series
);
criterion_main!(benches);
