//! Performance benchmarks for the block-buffered bit channel
//!
//! This benchmark suite evaluates:
//! - BitWriter throughput for short and long codes
//! - BitReader throughput across block sizes

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use oxihuff_core::{BitReader, BitWriter, HuffmanConfig};
use std::hint::black_box;
use std::io::Cursor;

/// Standard data sizes for benchmarking
mod data_sizes {
    pub const SMALL: usize = 4 * 1024; // 4 KB
    pub const LARGE: usize = 256 * 1024; // 256 KB
}

/// Pseudo-random bytes from a linear congruential generator.
fn random_bytes(size: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(size);
    let mut seed: u64 = 0x123456789ABCDEF0;
    for _ in 0..size {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
        data.push((seed >> 32) as u8);
    }
    data
}

/// Benchmark writing bytes as 8-bit codes
fn bench_writer_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("bitwriter_sizes");

    for (size_name, size) in [("4KB", data_sizes::SMALL), ("256KB", data_sizes::LARGE)] {
        let data = random_bytes(size);

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size_name), &data, |b, data| {
            b.iter(|| {
                let mut output = Vec::with_capacity(data.len());
                let mut writer =
                    BitWriter::new(&mut output, HuffmanConfig::DEFAULT).expect("valid config");
                for &byte in data {
                    writer.write_bits(byte as u32, 8).expect("write to vec");
                }
                writer.finalize().expect("finalize to vec");
                black_box(output);
            });
        });
    }

    group.finish();
}

/// Benchmark reading single bits across block sizes
fn bench_reader_block_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("bitreader_block_sizes");
    let data = random_bytes(data_sizes::LARGE);

    for config in [
        HuffmanConfig::SMALL,
        HuffmanConfig::DEFAULT,
        HuffmanConfig::LARGE,
    ] {
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(config.block_size),
            &data,
            |b, data| {
                b.iter(|| {
                    let mut reader =
                        BitReader::new(Cursor::new(data), config).expect("valid config");
                    let mut ones = 0u64;
                    while let Some(bit) = reader.read_bit().expect("read from slice") {
                        ones += bit as u64;
                    }
                    black_box(ones);
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_writer_sizes, bench_reader_block_sizes);
criterion_main!(benches);
