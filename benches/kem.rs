//! KEM benchmarks across all parameter sets.

use core::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use mlwe_kem::{
    decapsulate, encapsulate_derand, keypair_derand, KemParams, Level1, Level3, Level5,
};

fn fixed_keygen_seed(tag: u8) -> [u8; 32] {
    core::array::from_fn(|i| (i as u8).wrapping_add(tag.wrapping_mul(37)))
}

fn fixed_enc_coins(tag: u8) -> [u8; 32] {
    core::array::from_fn(|i| (i as u8).wrapping_add(tag.wrapping_mul(53)))
}

fn bench_level<P: KemParams>(c: &mut Criterion, label: &str, tag: u8) {
    let keygen_seed = fixed_keygen_seed(tag);
    let enc_coins = fixed_enc_coins(tag);
    let (pk, sk) = keypair_derand::<P>(&keygen_seed);
    let (ct, _) = encapsulate_derand::<P>(&pk, &enc_coins);

    c.bench_function(&format!("{label}/keypair_derand"), |b| {
        b.iter(|| {
            let out = keypair_derand::<P>(black_box(&keygen_seed));
            black_box(out);
        });
    });

    c.bench_function(&format!("{label}/encapsulate_derand"), |b| {
        b.iter(|| {
            let out = encapsulate_derand::<P>(black_box(&pk), black_box(&enc_coins));
            black_box(out);
        });
    });

    c.bench_function(&format!("{label}/decapsulate"), |b| {
        b.iter(|| {
            let out = decapsulate::<P>(black_box(&ct), black_box(&sk));
            black_box(out);
        });
    });
}

fn kem_benches(c: &mut Criterion) {
    bench_level::<Level1>(c, "level1", 1);
    bench_level::<Level3>(c, "level3", 2);
    bench_level::<Level5>(c, "level5", 3);
}

criterion_group!(benches, kem_benches);
criterion_main!(benches);
