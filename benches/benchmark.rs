//! Benchmarks for machine setup and conversion.
//!
//! Measures configuration parsing, settings application, single-keystroke
//! conversion and line throughput for the standard five-slot machine.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use enigma::config::parse_config;
use enigma::settings::apply_settings;

/// Configuration used consistently across all benchmarks.
const BENCH_CONF: &str = include_str!("../tests/data/default.conf");

/// Settings line used consistently across all benchmarks.
const BENCH_SETUP: &str = "* B Beta III IV I AXLE FGHI (HQ) (EX) (IP) (TR) (BY)";

/// Benchmarks parsing the configuration into a machine.
fn bench_parse_config(c: &mut Criterion) {
    c.bench_function("parse_config", |b| {
        b.iter(|| parse_config(black_box(BENCH_CONF)).unwrap());
    });
}

/// Benchmarks applying a full settings line (insert, positions, rings, plugboard).
fn bench_apply_settings(c: &mut Criterion) {
    let mut machine = parse_config(BENCH_CONF).unwrap();
    c.bench_function("apply_settings", |b| {
        b.iter(|| apply_settings(&mut machine, black_box(BENCH_SETUP)).unwrap());
    });
}

/// Benchmarks a single keystroke: stepping plus the full signal path.
///
/// The machine is configured once and keeps stepping between iterations,
/// so every notch and double-step path is exercised over time.
fn bench_convert(c: &mut Criterion) {
    let mut machine = parse_config(BENCH_CONF).unwrap();
    apply_settings(&mut machine, BENCH_SETUP).unwrap();

    c.bench_function("convert_single", |b| {
        b.iter(|| machine.convert(black_box(7)).unwrap());
    });
}

/// Benchmarks `convert_line` throughput across message lengths.
fn bench_convert_line(c: &mut Criterion) {
    let mut machine = parse_config(BENCH_CONF).unwrap();
    apply_settings(&mut machine, BENCH_SETUP).unwrap();

    let mut group = c.benchmark_group("convert_line");
    for len in [16usize, 256, 4096] {
        let message: String = "FROM HIS SHOULDER HIAWATHA "
            .chars()
            .cycle()
            .take(len)
            .collect();
        group.throughput(Throughput::Bytes(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &message, |b, msg| {
            b.iter(|| machine.convert_line(black_box(msg)).unwrap());
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_parse_config,
    bench_apply_settings,
    bench_convert,
    bench_convert_line
);
criterion_main!(benches);
