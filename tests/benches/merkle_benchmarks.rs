//! # GenesisDrop Benchmarks
//!
//! Performance checks for the hot paths of the claim pipeline:
//!
//! | Path | Target |
//! |------|--------|
//! | Tree build (10k addresses) | interactive (< 100ms) |
//! | Proof generation | O(log n), sub-microsecond lookup |
//! | Proof verification | O(log n) hashing |
//! | Batch codec round-trip | linear in payload |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use gd_01_merkle_commitment::{verify_proof, BatchProofCodec, MerkleTree, Proof};
use shared_types::Address;

fn random_accounts(seed: u64, count: usize) -> Vec<Address> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count).map(|_| rng.gen::<[u8; 20]>()).collect()
}

fn bench_tree_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("gd-01-tree-build");

    for size in [100usize, 1_000, 10_000] {
        let accounts = random_accounts(1, size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("build", size), &accounts, |b, accounts| {
            b.iter(|| black_box(MerkleTree::new(accounts.iter().copied())))
        });
    }

    group.finish();
}

fn bench_proof_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("gd-01-proof-generation");

    for size in [1_000usize, 10_000] {
        let accounts = random_accounts(2, size);
        let tree = MerkleTree::new(accounts.iter().copied());
        let target = accounts[size / 2];

        group.bench_with_input(BenchmarkId::new("proof_of", size), &tree, |b, tree| {
            b.iter(|| black_box(tree.proof_of(&target).unwrap()))
        });
    }

    group.finish();
}

fn bench_proof_verification(c: &mut Criterion) {
    let mut group = c.benchmark_group("gd-01-proof-verification");

    for size in [1_000usize, 10_000] {
        let accounts = random_accounts(3, size);
        let tree = MerkleTree::new(accounts.iter().copied());
        let target = accounts[size / 3];
        let proof = tree.proof_of(&target).unwrap();
        let root = tree.root();

        group.bench_with_input(
            BenchmarkId::new("verify_proof", size),
            &(target, proof, root),
            |b, (target, proof, root)| b.iter(|| black_box(verify_proof(target, proof, root))),
        );
    }

    group.finish();
}

fn bench_batch_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("gd-01-batch-codec");

    let accounts = random_accounts(4, 4_096);
    let tree = MerkleTree::new(accounts.iter().copied());
    let batch: Vec<Proof> = accounts[..256]
        .iter()
        .map(|a| tree.proof_of(a).unwrap())
        .collect();
    let packed = BatchProofCodec::encode(&batch);

    group.throughput(Throughput::Bytes(packed.len() as u64));
    group.bench_function("encode_256_proofs", |b| {
        b.iter(|| black_box(BatchProofCodec::encode(&batch)))
    });
    group.bench_function("decode_256_proofs", |b| {
        b.iter(|| black_box(BatchProofCodec::decode(&packed).unwrap()))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_tree_build,
    bench_proof_generation,
    bench_proof_verification,
    bench_batch_codec
);
criterion_main!(benches);
