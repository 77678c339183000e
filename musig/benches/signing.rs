use criterion::{black_box, criterion_group, criterion_main, Criterion};
use musig::{key_agg, verify, KeyPair, TreeNode};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn single_nesting_tree() -> TreeNode {
    TreeNode::aggregator(
        "root",
        vec![
            TreeNode::leaf("a"),
            TreeNode::aggregator("group-b", vec![TreeNode::leaf("b1"), TreeNode::leaf("b2")]),
        ],
    )
}

fn bench_key_agg(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let keys: Vec<_> = (0..8)
        .map(|_| *KeyPair::generate(&mut rng).public_key())
        .collect();

    c.bench_function("musig_key_agg_8", |bencher| {
        bencher.iter(|| {
            let pk = key_agg(black_box(&keys)).expect("aggregate");
            black_box(pk);
        })
    });
}

fn bench_full_pipeline(c: &mut Criterion) {
    c.bench_function("musig_nested_pipeline", |bencher| {
        bencher.iter(|| {
            let mut rng = StdRng::seed_from_u64(42);
            let mut root = single_nesting_tree();
            root.compute_depths();
            root.key_gen_tree(&mut rng).expect("key generation");
            root.round1_tree(&mut rng).expect("round 1");
            let sigma = root.round2_tree(black_box(b"bench-message")).expect("round 2");
            black_box(sigma);
        })
    });
}

fn bench_verify(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let mut root = single_nesting_tree();
    root.compute_depths();
    root.key_gen_tree(&mut rng).expect("key generation");
    let x_tilde = root.public_key().expect("aggregate key");
    root.round1_tree(&mut rng).expect("round 1");
    let sigma = root.round2_tree(b"bench-message").expect("round 2");

    c.bench_function("musig_verify", |bencher| {
        bencher.iter(|| {
            let ok = verify(black_box(&x_tilde), black_box(b"bench-message"), &sigma);
            black_box(ok);
        })
    });
}

criterion_group!(benches, bench_key_agg, bench_full_pipeline, bench_verify);
criterion_main!(benches);
