//! Nested MuSig2 multi-signatures over secp256k1.
//!
//! A set of signers, arranged as the leaves of an arbitrary-depth tree whose
//! internal nodes are cosigner groups, jointly produce a single
//! Schnorr-style signature verifiable under one aggregate public key. No
//! signer learns another's secret key and no round takes more than two
//! message exchanges per signer.
//!
//! The scheme generalizes flat MuSig2 by composing coefficients
//! multiplicatively across tree depth: a leaf's effective weight in the flat
//! aggregate key is the product of its aggregation coefficient at every
//! ancestor level, and its nonce contribution is scaled by the product of
//! every level's binding scalar. Every level re-binds its nonce aggregate to
//! its own aggregate key before exposing it upward.
//!
//! # Example
//!
//! ```
//! use musig::{verify, TreeNode};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let mut rng = StdRng::seed_from_u64(42);
//!
//! // One top-level signer alongside a nested group of two.
//! let mut root = TreeNode::aggregator(
//!     "root",
//!     vec![
//!         TreeNode::leaf("a"),
//!         TreeNode::aggregator("group-b", vec![TreeNode::leaf("b1"), TreeNode::leaf("b2")]),
//!     ],
//! );
//!
//! root.compute_depths();
//! root.key_gen_tree(&mut rng).expect("key generation");
//! root.round1_tree(&mut rng).expect("round 1");
//!
//! let message = b"single-nesting";
//! let signature = root.round2_tree(message).expect("round 2");
//!
//! let aggregate_key = root.public_key().expect("aggregate key");
//! assert!(verify(&aggregate_key, message, &signature));
//! ```
//!
//! # Security invariants
//!
//! - A [`Round1State`] is strictly single-use: [`sign_prime`] consumes it,
//!   and a second invocation on the same state is rejected. Reusing round-1
//!   secrets across sessions is equivalent to nonce reuse and leaks the
//!   secret key.
//! - A tree may be reused across signing sessions only by re-running
//!   round 1 with fresh nonces.
//! - All hash inputs are exact serialized bytes with fixed ordering;
//!   key aggregation is order-independent via sorted-multiset hashing.

mod aggregate;
mod constants;
mod errors;
mod hash;
mod keys;
mod nonce;
mod sign;
mod tree;


pub use aggregate::{sign_agg_prime, verify, Signature};
pub use constants::{NU, POINT_SIZE, SCALAR_SIZE, SIG_SIZE};
pub use curve::{Point, Scalar};
pub use errors::MusigError;
pub use hash::{h_agg, h_non, h_non_bar, h_sig, tagged_hash, tagged_hash_scalar};
pub use keys::{key_agg, key_agg_coef, KeyPair};
pub use nonce::{bind_nonces, nonce_agg, nonce_gen, Round1Output, Round1State};
pub use sign::{sign_prime, PartialSignature, SignPrimeTrace};
pub use tree::{AggregatorNode, LeafNode, TreeNode};
