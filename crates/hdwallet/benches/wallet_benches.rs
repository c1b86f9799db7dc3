//! Criterion benchmarks for key derivation, mnemonics and secret sharing.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use hdwallet::{shamir, ChildNumber, DerivationPath, ExtendedKey, Mnemonic, Wordlist};

fn bench_derivation(c: &mut Criterion) {
    let seed = [0x01u8; 64];
    let master = ExtendedKey::master_from_seed(&seed).expect("valid seed");
    let xpub = master.neuter();
    let path = DerivationPath::bip44(0, 0, 0, 0).expect("valid path");

    c.bench_function("master_from_seed", |b| {
        b.iter(|| ExtendedKey::master_from_seed(black_box(&seed)))
    });

    c.bench_function("derive_hardened_child", |b| {
        let child = ChildNumber::hardened(0).expect("in range");
        b.iter(|| master.derive_child(black_box(child)))
    });

    c.bench_function("derive_normal_child_private", |b| {
        let child = ChildNumber::normal(0).expect("in range");
        b.iter(|| master.derive_child(black_box(child)))
    });

    c.bench_function("derive_normal_child_public", |b| {
        let child = ChildNumber::normal(0).expect("in range");
        b.iter(|| xpub.derive_child(black_box(child)))
    });

    c.bench_function("resolve_bip44_path", |b| {
        b.iter(|| path.resolve(black_box(&master), 100))
    });
}

fn bench_mnemonic(c: &mut Criterion) {
    let wordlist = Wordlist::builtin("english").expect("bundled list");
    let entropy = [0x5Au8; 32];
    let mnemonic = Mnemonic::from_entropy(&wordlist, &entropy).expect("valid entropy");

    c.bench_function("mnemonic_from_entropy_24_words", |b| {
        b.iter(|| Mnemonic::from_entropy(&wordlist, black_box(&entropy)))
    });

    c.bench_function("mnemonic_parse_24_words", |b| {
        b.iter(|| Mnemonic::parse(&wordlist, black_box(mnemonic.phrase())))
    });

    c.bench_function("mnemonic_to_seed", |b| {
        b.iter(|| mnemonic.to_seed(black_box("TREZOR")))
    });
}

fn bench_shamir(c: &mut Criterion) {
    let secret = [0x42u8; 64];
    let set = shamir::split(&secret, 5, 3).expect("valid parameters");

    c.bench_function("shamir_split_64_bytes_3_of_5", |b| {
        b.iter(|| shamir::split(black_box(&secret), 5, 3))
    });

    c.bench_function("shamir_combine_64_bytes_3_of_5", |b| {
        b.iter(|| shamir::combine(black_box(&set.shares()[..3]), 3))
    });
}

criterion_group!(benches, bench_derivation, bench_mnemonic, bench_shamir);
criterion_main!(benches);
