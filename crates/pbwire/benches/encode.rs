//! Benchmarks for wire-format emission
//!
//! These benchmarks verify that:
//! 1. Varint emission cost scales with encoded width, not value
//! 2. Packed emission beats unpacked for repeated numeric fields
//! 3. The counting sink makes pre-sizing effectively free

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};

use pbwire::{Builder, CountingSink, Emitter};

/// Representative values for each varint width class
const VARINT_WIDTHS: &[(&str, u64)] = &[
    ("1_byte", 0x7F),
    ("3_bytes", 0x10_0001),
    ("5_bytes", 0x8000_0001),
    ("10_bytes", u64::MAX),
];

fn bench_varint_raw(c: &mut Criterion) {
    let mut group = c.benchmark_group("varint_raw");

    for &(name, value) in VARINT_WIDTHS {
        group.throughput(Throughput::Elements(1));
        group.bench_function(name, |b| {
            let mut buf = Vec::with_capacity(16);
            b.iter(|| {
                buf.clear();
                let mut emitter = Emitter::new(&mut buf);
                emitter.emit_varint_raw(black_box(value)).unwrap();
            })
        });
    }

    group.finish();
}

fn bench_packed_vs_repeated(c: &mut Criterion) {
    let mut group = c.benchmark_group("int32_field");

    let values: Vec<i32> = (0..1000).map(|i| i * 31).collect();
    group.throughput(Throughput::Elements(values.len() as u64));

    group.bench_function("packed_1000", |b| {
        let mut buf = Vec::with_capacity(4096);
        b.iter(|| {
            buf.clear();
            let mut builder = Builder::new(&mut buf);
            builder.emit_int32_packed(1u32, black_box(&values)).unwrap();
        })
    });

    group.bench_function("repeated_1000", |b| {
        let mut buf = Vec::with_capacity(8192);
        b.iter(|| {
            buf.clear();
            let mut builder = Builder::new(&mut buf);
            builder
                .emit_int32_repeated(1u32, black_box(&values).iter().copied())
                .unwrap();
        })
    });

    group.finish();
}

fn bench_fixed64_packed(c: &mut Criterion) {
    let mut group = c.benchmark_group("fixed64_packed");

    let values: Vec<u64> = (0..1000).map(|i| i * 0x9E37_79B9).collect();
    group.throughput(Throughput::Bytes((values.len() * 8) as u64));

    group.bench_function("1000_elements", |b| {
        let mut buf = Vec::with_capacity(8192);
        b.iter(|| {
            buf.clear();
            let mut builder = Builder::new(&mut buf);
            builder
                .emit_fixed64_packed(1u32, black_box(&values))
                .unwrap();
        })
    });

    group.finish();
}

fn bench_string_emission(c: &mut Criterion) {
    let mut group = c.benchmark_group("string_field");

    let message = "a".repeat(256);
    group.throughput(Throughput::Bytes(message.len() as u64));

    group.bench_function("256_bytes", |b| {
        let mut buf = Vec::with_capacity(512);
        b.iter(|| {
            buf.clear();
            let mut builder = Builder::new(&mut buf);
            builder.emit_string(1u32, black_box(&message)).unwrap();
        })
    });

    group.finish();
}

fn bench_counting_sink(c: &mut Criterion) {
    let mut group = c.benchmark_group("counting_sink");

    let values: Vec<i64> = (0..1000).map(|i| i - 500).collect();
    group.throughput(Throughput::Elements(values.len() as u64));

    group.bench_function("presize_1000_sint64", |b| {
        b.iter(|| {
            let mut builder = Builder::new(CountingSink::new());
            builder.emit_sint64_packed(1u32, black_box(&values)).unwrap();
            black_box(builder.into_sink().count())
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_varint_raw,
    bench_packed_vs_repeated,
    bench_fixed64_packed,
    bench_string_emission,
    bench_counting_sink
);
criterion_main!(benches);
