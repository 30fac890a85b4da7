use criterion::{Criterion, black_box, criterion_group, criterion_main};
use qrcore::decoder::galois::qr_code_field_256;
use qrcore::decoder::reed_solomon::ReedSolomonDecoder;
use qrcore::{BitMatrix, DecodeHints, ECLevel, decode_batch, decode_bits, detect_and_decode};

#[path = "../tests/common/mod.rs"]
mod common;

use common::Segment;

const PAYLOAD: &str = "HTTPS://EXAMPLE.COM/BENCH/0123456789";

fn bench_detect_decode_v1(c: &mut Criterion) {
    let image = common::symbol_image(1, ECLevel::M, 2, &[Segment::Byte(b"bench")]);
    let hints = DecodeHints::none();
    c.bench_function("detect_decode_v1", |b| {
        b.iter(|| detect_and_decode(black_box(&image), black_box(&hints)))
    });
}

fn bench_detect_decode_v7(c: &mut Criterion) {
    let image = common::symbol_image(7, ECLevel::Q, 5, &[Segment::Alphanumeric(PAYLOAD)]);
    let hints = DecodeHints::none();
    c.bench_function("detect_decode_v7", |b| {
        b.iter(|| detect_and_decode(black_box(&image), black_box(&hints)))
    });
}

fn bench_decode_bits_v10(c: &mut Criterion) {
    let modules = common::symbol(10, ECLevel::H, 1, &[Segment::Alphanumeric(PAYLOAD)]);
    c.bench_function("decode_bits_v10", |b| {
        b.iter(|| decode_bits(black_box(modules.clone())))
    });
}

fn bench_blank_640x480(c: &mut Criterion) {
    let image = BitMatrix::new(640, 480);
    let hints = DecodeHints::none();
    c.bench_function("detect_blank_640x480", |b| {
        b.iter(|| detect_and_decode(black_box(&image), black_box(&hints)))
    });
}

fn bench_reed_solomon(c: &mut Criterion) {
    let decoder = ReedSolomonDecoder::new(qr_code_field_256());
    let data: Vec<u8> = (0..46u8).collect();
    let mut block = data.clone();
    block.extend(common::ec_codewords(&data, 22));
    let mut received: Vec<u16> = block.iter().map(|&b| u16::from(b)).collect();
    for i in [3, 17, 25, 40, 51] {
        received[i] ^= 0x3C;
    }
    c.bench_function("reed_solomon_5_errors", |b| {
        b.iter(|| {
            let mut codewords = received.clone();
            decoder.decode(black_box(&mut codewords), 22)
        })
    });
}

fn bench_decode_batch(c: &mut Criterion) {
    let images: Vec<BitMatrix> = (0..8)
        .map(|mask| common::symbol_image(2, ECLevel::M, mask, &[Segment::Numeric("0123456789")]))
        .collect();
    let hints = DecodeHints::none();
    c.bench_function("decode_batch_8", |b| {
        b.iter(|| decode_batch(black_box(&images), black_box(&hints)))
    });
}

criterion_group!(
    benches,
    bench_detect_decode_v1,
    bench_detect_decode_v7,
    bench_decode_bits_v10,
    bench_blank_640x480,
    bench_reed_solomon,
    bench_decode_batch
);
criterion_main!(benches);
