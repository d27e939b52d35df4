//! Benchmarks for parameter conversions
//!
//! Per-matrix conversion cost by port count, and whole-sweep conversion
//! with and without the rayon pool.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ndarray::Array2;
use num_complex::Complex64;
use rfnet_core::frequency::{Frequency, FrequencyUnit};
use rfnet_core::math::convert;
use rfnet_core::{Config, Network, ParameterType};
use std::f64::consts::PI;

fn port_matrix(nports: usize, phase: f64) -> Array2<Complex64> {
    Array2::from_shape_fn((nports, nports), |(i, j)| {
        let mag = if i == j { 0.1 } else { 0.9 / nports as f64 };
        Complex64::from_polar(mag, phase * (i + j + 1) as f64)
    })
}

fn create_test_network(nfreq: usize, nports: usize, parallel: bool) -> Network {
    let f = (0..nfreq)
        .map(|k| 1.0 + 9.0 * k as f64 / nfreq.max(2).saturating_sub(1) as f64)
        .collect();
    let freq = Frequency::from_f(f, FrequencyUnit::GHz);
    let data = (0..nfreq)
        .map(|k| port_matrix(nports, 2.0 * PI * k as f64 / nfreq as f64))
        .collect();
    let z0 = vec![Complex64::new(50.0, 0.0); nports];

    Network::new(freq, data, z0, ParameterType::S)
        .expect("valid network")
        .with_config(Config::default().with_parallel(parallel))
}

fn bench_matrix_conversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("matrix_conversion");

    for to in [ParameterType::Z, ParameterType::Y, ParameterType::T] {
        for nports in [2, 4, 8, 16].iter() {
            let s = port_matrix(*nports, 0.3);
            let z0 = vec![Complex64::new(50.0, 0.0); *nports];
            let id = BenchmarkId::new(format!("s2{}", to.to_string().to_lowercase()), nports);

            group.bench_with_input(id, nports, |b, _| {
                b.iter(|| black_box(convert(&s, ParameterType::S, to, &z0)))
            });
        }
    }

    group.finish();
}

fn bench_two_port_closed_forms(c: &mut Criterion) {
    let mut group = c.benchmark_group("two_port_closed_forms");
    let s = port_matrix(2, 0.3);
    let z0 = vec![Complex64::new(50.0, 0.0); 2];

    for to in [ParameterType::A, ParameterType::H] {
        group.bench_function(format!("s2{}", to.to_string().to_lowercase()), |b| {
            b.iter(|| black_box(convert(&s, ParameterType::S, to, &z0)))
        });
    }

    group.finish();
}

fn bench_network_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("network_sweep");

    for nfreq in [100, 1000, 5000].iter() {
        for parallel in [false, true] {
            let network = create_test_network(*nfreq, 4, parallel);
            let mode = if parallel { "par" } else { "seq" };
            let id = BenchmarkId::new(format!("z_{}", mode), nfreq);

            group.bench_with_input(id, nfreq, |b, _| b.iter(|| black_box(network.z())));
        }
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_matrix_conversion,
    bench_two_port_closed_forms,
    bench_network_sweep
);
criterion_main!(benches);
