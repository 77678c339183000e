use musig::{verify, Signature, TreeNode};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() {
    let mut rng = StdRng::seed_from_u64(42);

    // Signer a next to a two-member inner group.
    let mut root = TreeNode::aggregator(
        "root",
        vec![
            TreeNode::leaf("a"),
            TreeNode::aggregator("group-b", vec![TreeNode::leaf("b1"), TreeNode::leaf("b2")]),
        ],
    );
    root.compute_depths();

    root.key_gen_tree(&mut rng).expect("key generation");
    let x_tilde = root.public_key().expect("aggregate key");

    root.round1_tree(&mut rng).expect("round 1");

    let message = b"single-nesting";
    let sigma = root.round2_tree(message).expect("round 2");

    let sig_bytes = bincode::serialize(&sigma).expect("serialize sig");
    let sigma2: Signature = bincode::deserialize(&sig_bytes).expect("deserialize sig");

    let ok = verify(&x_tilde, message, &sigma2);
    assert!(ok);
    println!("signature over {:?} verified: {ok}", message.as_slice());
}
