// ============================================================================
// Decimal Benchmarks
// ============================================================================
//
// Benchmark Categories:
// 1. Float Conversion - Shortest and exact digit generation
// 2. Text - Parsing and rendering
// 3. Arithmetic - Division at several precisions, power
// 4. Encoding - Binary layout and wire record
// ============================================================================

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use exact_decimal::prelude::*;
use std::hint::black_box;

// ============================================================================
// Float Conversion Benchmarks
// ============================================================================

fn benchmark_from_f64(c: &mut Criterion) {
    let mut group = c.benchmark_group("from_f64");

    for (name, value) in [
        ("short", 0.1),
        ("long", 0.1 + 0.2),
        ("large", 1.7976931348623157e308),
        ("subnormal", 5e-324),
    ] {
        group.bench_with_input(BenchmarkId::new("shortest", name), &value, |b, &value| {
            b.iter(|| black_box(Decimal::from_f64(black_box(value))));
        });
        group.bench_with_input(BenchmarkId::new("exact", name), &value, |b, &value| {
            b.iter(|| black_box(Decimal::from_f64_exact(black_box(value))));
        });
    }

    group.finish();
}

fn benchmark_to_f64(c: &mut Criterion) {
    let d: Decimal = "12345.6789".parse().unwrap();
    c.bench_function("to_f64", |b| {
        b.iter(|| black_box(black_box(&d).to_f64()));
    });
}

// ============================================================================
// Text Benchmarks
// ============================================================================

fn benchmark_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for input in ["42", "-123.4500", "6.02214076e23", "3.14159265358979323846264338327950288"] {
        group.bench_with_input(BenchmarkId::from_parameter(input), &input, |b, input| {
            b.iter(|| black_box(black_box(input).parse::<Decimal>()));
        });
    }

    group.finish();
}

fn benchmark_display(c: &mut Criterion) {
    let d: Decimal = "-98765.000123400".parse().unwrap();
    c.bench_function("display", |b| {
        b.iter(|| black_box(black_box(&d).to_string()));
    });
    c.bench_function("string_fixed", |b| {
        b.iter(|| black_box(black_box(&d).string_fixed(2)));
    });
}

// ============================================================================
// Arithmetic Benchmarks
// ============================================================================

fn benchmark_division(c: &mut Criterion) {
    let mut group = c.benchmark_group("div_round");
    let one = Decimal::new(1, 0);
    let seven = Decimal::new(7, 0);

    for precision in [2, 16, 64] {
        group.bench_with_input(
            BenchmarkId::from_parameter(precision),
            &precision,
            |b, &precision| {
                b.iter(|| black_box(one.div_round(black_box(&seven), precision)));
            },
        );
    }

    group.finish();
}

fn benchmark_pow(c: &mut Criterion) {
    let base: Decimal = "1.0001".parse().unwrap();
    let exponent = Decimal::new(365, 0);
    c.bench_function("pow_365", |b| {
        b.iter(|| black_box(black_box(&base).pow(&exponent)));
    });
}

// ============================================================================
// Encoding Benchmarks
// ============================================================================

fn benchmark_encoding(c: &mut Criterion) {
    let d: Decimal = "-123456789012345678901234567890.0987654321".parse().unwrap();
    let bytes = d.to_bytes();
    let record = NumberValue::new(d.clone()).unwrap();
    let wire = record.encode().unwrap();

    c.bench_function("binary_encode", |b| {
        b.iter(|| black_box(black_box(&d).to_bytes()));
    });
    c.bench_function("binary_decode", |b| {
        b.iter(|| black_box(Decimal::from_bytes(black_box(&bytes))));
    });
    c.bench_function("wire_decode", |b| {
        b.iter(|| black_box(NumberValue::decode(black_box(&wire))));
    });
}

criterion_group!(
    benches,
    benchmark_from_f64,
    benchmark_to_f64,
    benchmark_parse,
    benchmark_display,
    benchmark_division,
    benchmark_pow,
    benchmark_encoding,
);
criterion_main!(benches);
