//! Benchmarks for pead-math operations.
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use ndarray::{Array1, Array2};
use rand::Rng;
use pead_math::{classical_covariance, hc1_covariance, least_squares, trim_mask, winsorize};

fn random_array(n: usize) -> Array1<f64> {
    let mut rng = rand::thread_rng();
    Array1::from_iter((0..n).map(|_| rng.r#gen::<f64>() * 0.1 - 0.05))
}

fn design_with_intercept(n: usize) -> Array2<f64> {
    let mut rng = rand::thread_rng();
    Array2::from_shape_fn((n, 2), |(_, j)| if j == 0 { 1.0 } else { rng.r#gen::<f64>() * 20.0 - 10.0 })
}

fn bench_least_squares(c: &mut Criterion) {
    let mut group = c.benchmark_group("least_squares");

    // Estimation windows and pooled cross-sections
    for n in [60, 250, 1000, 10000] {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let y = random_array(n);
            let x = design_with_intercept(n);
            b.iter(|| least_squares(black_box(&y), black_box(&x)).unwrap());
        });
    }

    group.finish();
}

fn bench_covariance(c: &mut Criterion) {
    let mut group = c.benchmark_group("covariance");

    for n in [100, 1000, 10000] {
        let y = random_array(n);
        let x = design_with_intercept(n);
        let fit = least_squares(&y, &x).unwrap();

        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("classical", n), &n, |b, _| {
            b.iter(|| classical_covariance(black_box(&fit)));
        });
        group.bench_with_input(BenchmarkId::new("hc1", n), &n, |b, _| {
            b.iter(|| hc1_covariance(black_box(&x), black_box(&fit)).unwrap());
        });
    }

    group.finish();
}

fn bench_outliers(c: &mut Criterion) {
    let mut group = c.benchmark_group("outliers");

    for size in [100, 1000, 10000, 100000] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("winsorize", size), &size, |b, &size| {
            let data = random_array(size);
            b.iter(|| winsorize(black_box(&data), black_box(0.05)).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("trim_mask", size), &size, |b, &size| {
            let data = random_array(size);
            b.iter(|| trim_mask(black_box(&data), black_box(0.05)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_least_squares, bench_covariance, bench_outliers);
criterion_main!(benches);
