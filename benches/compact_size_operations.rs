use compact_size::serialization::compact_size::{decode_compact_size, encode_compact_size};
use compact_size::serialization::length_prefixed::{
    decode_length_prefixed, encode_length_prefixed,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const FORM_SAMPLES: [(&str, u64); 4] = [
    ("1b", 0xfc),
    ("3b", 0xffff),
    ("5b", 0xffff_ffff),
    ("9b", u64::MAX),
];

fn benchmark_encode(c: &mut Criterion) {
    for (name, value) in FORM_SAMPLES {
        c.bench_function(&format!("encode_compact_size_{name}"), |b| {
            b.iter(|| black_box(encode_compact_size(black_box(value))))
        });
    }
}

fn benchmark_decode(c: &mut Criterion) {
    for (name, value) in FORM_SAMPLES {
        let encoded = encode_compact_size(value);
        c.bench_function(&format!("decode_compact_size_{name}"), |b| {
            b.iter(|| black_box(decode_compact_size(black_box(&encoded))))
        });
    }
}

fn benchmark_length_prefixed(c: &mut Criterion) {
    // 520 bytes: maximum script element size
    let payload = vec![0x51u8; 520];
    let encoded = encode_length_prefixed(&payload);

    c.bench_function("encode_length_prefixed_520b", |b| {
        b.iter(|| black_box(encode_length_prefixed(black_box(&payload))))
    });

    c.bench_function("decode_length_prefixed_520b", |b| {
        b.iter(|| black_box(decode_length_prefixed(black_box(&encoded))))
    });
}

criterion_group!(
    benches,
    benchmark_encode,
    benchmark_decode,
    benchmark_length_prefixed
);
criterion_main!(benches);
