//! ML-KEM Benchmarks
//!
//! Benchmarks for all ML-KEM parameter sets using the Criterion framework.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rand::rng;
use tessera_core::Kem;
use tessera_ml_kem::{MlKem1024, MlKem512, MlKem768};

/// Register KeyGen/Encaps/Decaps/roundtrip benchmarks for one parameter set.
macro_rules! bench_variant {
    ($c:expr, $name:literal, $variant:ident) => {{
        let mut group = $c.benchmark_group($name);
        group.throughput(Throughput::Elements(1));

        group.bench_function("KeyGen", |b| {
            b.iter(|| {
                let mut rng = rng();
                black_box($variant::keygen(&mut rng).unwrap())
            })
        });

        group.bench_function("KeyGen (derand)", |b| {
            b.iter(|| black_box($variant::keygen_derand(&[0x42; 32], &[0x43; 32])))
        });

        let mut setup_rng = rng();
        let (ek, dk) = $variant::keygen(&mut setup_rng).unwrap();
        let (_, ct) = $variant::encaps(&ek, &mut setup_rng).unwrap();

        group.bench_function("Encaps", |b| {
            b.iter(|| {
                let mut thread_rng = rng();
                black_box($variant::encaps(&ek, &mut thread_rng).unwrap())
            })
        });

        group.bench_function("Decaps", |b| {
            b.iter(|| black_box($variant::decaps(&dk, &ct).unwrap()))
        });

        group.bench_function("Roundtrip", |b| {
            b.iter(|| {
                let mut rng = rng();
                let (ek, dk) = $variant::keygen(&mut rng).unwrap();
                let (_ss_sender, ct) = $variant::encaps(&ek, &mut rng).unwrap();
                black_box($variant::decaps(&dk, &ct).unwrap())
            })
        });

        group.finish();
    }};
}

fn bench_ml_kem_512(c: &mut Criterion) {
    bench_variant!(c, "ML-KEM-512", MlKem512);
}

fn bench_ml_kem_768(c: &mut Criterion) {
    bench_variant!(c, "ML-KEM-768", MlKem768);
}

fn bench_ml_kem_1024(c: &mut Criterion) {
    bench_variant!(c, "ML-KEM-1024", MlKem1024);
}

criterion_group!(benches, bench_ml_kem_512, bench_ml_kem_768, bench_ml_kem_1024);

criterion_main!(benches);
