//! Benchmark suite for the ERLE/RLE pattern codec.
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dlpc900_benches::{checkerboard, half_split, sizes, solid};
use dlpc900_types::codec::{combine, decode, encode_erle, encode_rle};
use std::hint::black_box;

fn bench_erle_encode(c: &mut Criterion) {
	let mut group = c.benchmark_group("erle_encode");

	let (w, h) = sizes::DLP6500;
	let cases = [("solid", solid(w, h, 1)), ("half_split", half_split(w, h)), ("checkerboard", checkerboard(w, h))];

	for (name, pattern) in cases {
		let frame = combine(&[pattern]).unwrap().remove(0);
		group.throughput(Throughput::Elements((w * h) as u64));
		group.bench_with_input(BenchmarkId::new("dlp6500", name), &frame, |b, frame| {
			b.iter(|| black_box(encode_erle(black_box(frame)).unwrap()));
		});
	}

	group.finish();
}

fn bench_rle_encode(c: &mut Criterion) {
	let mut group = c.benchmark_group("rle_encode");

	let (w, h) = sizes::DLP6500;
	let frame = combine(&[half_split(w, h)]).unwrap().remove(0);

	group.throughput(Throughput::Elements((w * h) as u64));
	group.bench_function("dlp6500_half_split", |b| {
		b.iter(|| black_box(encode_rle(black_box(&frame)).unwrap()));
	});

	group.finish();
}

fn bench_decode(c: &mut Criterion) {
	let mut group = c.benchmark_group("decode");

	let (w, h) = sizes::DLP6500;
	let frame = combine(&[half_split(w, h)]).unwrap().remove(0);
	let encoded = encode_erle(&frame).unwrap();

	group.throughput(Throughput::Elements((w * h) as u64));
	group.bench_function("erle_dlp6500_half_split", |b| {
		b.iter(|| black_box(decode(black_box(encoded.as_bytes()), w, h).unwrap()));
	});

	group.finish();
}

fn bench_tiny_patterns(c: &mut Criterion) {
	let mut group = c.benchmark_group("erle_encode_tiny");

	let (w, h) = sizes::TINY;
	let frame = combine(&[checkerboard(w, h)]).unwrap().remove(0);

	group.bench_function("checkerboard_64x64", |b| {
		b.iter(|| black_box(encode_erle(black_box(&frame)).unwrap()));
	});

	group.finish();
}

criterion_group!(benches, bench_erle_encode, bench_rle_encode, bench_decode, bench_tiny_patterns);
criterion_main!(benches);
