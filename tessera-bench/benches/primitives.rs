//! Primitive Benchmarks
//!
//! The building blocks under ML-KEM: the Keccak sponge, NTT, samplers and
//! 12-bit codec.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tessera_ml_kem::encode::{byte_decode, byte_encode};
use tessera_ml_kem::hash::prf;
use tessera_ml_kem::ntt::{inv_ntt, multiply_ntts, ntt};
use tessera_ml_kem::sample::{sample_ntt, sample_poly_cbd};
use tessera_ml_kem::sha3::{Sha3_256, Sha3_512, Shake128, Shake256};

fn bench_sha3(c: &mut Criterion) {
    let mut group = c.benchmark_group("SHA-3");

    for size in [32usize, 1184, 4096] {
        let data = vec![0xA5u8; size];
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("SHA3-256", size), &data, |b, data| {
            b.iter(|| black_box(Sha3_256::digest_of(data)))
        });
        group.bench_with_input(BenchmarkId::new("SHA3-512", size), &data, |b, data| {
            b.iter(|| black_box(Sha3_512::digest_of(data)))
        });
    }

    group.throughput(Throughput::Bytes(504));
    group.bench_function("SHAKE128 squeeze 504", |b| {
        b.iter(|| black_box(Shake128::with_input(&[7u8; 34]).read_vec(504)))
    });
    group.bench_function("SHAKE256 squeeze 192", |b| {
        b.iter(|| black_box(Shake256::with_input(&[7u8; 33]).read_vec(192)))
    });

    group.finish();
}

fn bench_ntt(c: &mut Criterion) {
    let mut group = c.benchmark_group("NTT");
    let f: [u16; 256] = core::array::from_fn(|i| (i * 13 % 3329) as u16);
    let g: [u16; 256] = core::array::from_fn(|i| (i * 29 % 3329) as u16);

    group.bench_function("forward", |b| {
        b.iter(|| {
            let mut x = f;
            ntt(black_box(&mut x));
            x
        })
    });
    group.bench_function("inverse", |b| {
        b.iter(|| {
            let mut x = f;
            inv_ntt(black_box(&mut x));
            x
        })
    });
    group.bench_function("MultiplyNTTs", |b| {
        b.iter(|| black_box(multiply_ntts(&f, &g)))
    });

    group.finish();
}

fn bench_sampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("Sampling");
    let seed = [0x42u8; 34];
    let sigma = [0x17u8; 32];

    group.bench_function("SampleNTT", |b| {
        b.iter(|| black_box(sample_ntt(&seed).unwrap()))
    });
    for eta in [2usize, 3] {
        let bytes = prf(eta, &sigma, 0).unwrap();
        group.bench_with_input(BenchmarkId::new("SamplePolyCBD", eta), &bytes, |b, bytes| {
            b.iter(|| black_box(sample_poly_cbd(eta, bytes).unwrap()))
        });
    }

    group.finish();
}

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("ByteEncode");
    let coeffs: [u16; 256] = core::array::from_fn(|i| (i * 7 % 3329) as u16);
    let bytes = byte_encode(12, &coeffs).unwrap();

    group.bench_function("encode d=12", |b| {
        b.iter(|| black_box(byte_encode(12, &coeffs).unwrap()))
    });
    group.bench_function("decode d=12", |b| {
        b.iter(|| black_box(byte_decode(12, &bytes).unwrap()))
    });

    group.finish();
}

criterion_group!(benches, bench_sha3, bench_ntt, bench_sampling, bench_codec);

criterion_main!(benches);
