//! Domain-separated ("tagged") hashing and the four protocol hash roles.
//!
//! Every hash is `SHA256(SHA256(tag) ‖ SHA256(tag) ‖ data...)` (the BIP-340
//! construction), computed over exact serialized bytes so that collision
//! resistance holds over wire representations rather than structural
//! equality. Input ordering per role is part of the security argument and
//! must not be rearranged.

use std::sync::OnceLock;

use curve::{scalar_reduce, serialize_point, serialize_point_list, Point, Scalar, POINT_SIZE};
use sha2::{Digest, Sha256};

use crate::constants::{TAG_AGG, TAG_NON, TAG_NON_BAR, TAG_SIG};

/// A tagged-hash role with its `SHA256(tag) ‖ SHA256(tag)` prefix computed
/// once per process.
struct TaggedHasher {
    tag: &'static str,
    prefix: OnceLock<[u8; 64]>,
}

impl TaggedHasher {
    const fn new(tag: &'static str) -> Self {
        Self {
            tag,
            prefix: OnceLock::new(),
        }
    }

    fn prefix(&self) -> &[u8; 64] {
        self.prefix.get_or_init(|| tag_prefix(self.tag))
    }

    fn hash_scalar(&self, parts: &[&[u8]]) -> Scalar {
        let mut hasher = Sha256::new();
        hasher.update(self.prefix());
        for part in parts {
            hasher.update(part);
        }
        scalar_reduce(&hasher.finalize().into())
    }
}

static AGG: TaggedHasher = TaggedHasher::new(TAG_AGG);
static NON: TaggedHasher = TaggedHasher::new(TAG_NON);
static NON_BAR: TaggedHasher = TaggedHasher::new(TAG_NON_BAR);
static SIG: TaggedHasher = TaggedHasher::new(TAG_SIG);

fn tag_prefix(tag: &str) -> [u8; 64] {
    let tag_hash: [u8; 32] = Sha256::digest(tag.as_bytes()).into();
    let mut prefix = [0u8; 64];
    prefix[..32].copy_from_slice(&tag_hash);
    prefix[32..].copy_from_slice(&tag_hash);
    prefix
}

/// Computes the BIP-340 tagged hash `SHA256(SHA256(tag) ‖ SHA256(tag) ‖
/// data...)`.
pub fn tagged_hash(tag: &str, data: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(tag_prefix(tag));
    for part in data {
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// [`tagged_hash`] reduced to a scalar by big-endian interpretation modulo
/// the group order.
pub fn tagged_hash_scalar(tag: &str, data: &[&[u8]]) -> Scalar {
    scalar_reduce(&tagged_hash(tag, data))
}

/// Serializes a key multiset sorted by compressed encoding, so any
/// permutation of the same keys hashes identically.
fn sorted_keyset_bytes(keys: &[Point]) -> Vec<u8> {
    let mut encodings: Vec<[u8; POINT_SIZE]> = keys.iter().map(serialize_point).collect();
    encodings.sort_unstable();
    let mut out = Vec::with_capacity(encodings.len() * POINT_SIZE);
    for encoding in &encodings {
        out.extend_from_slice(encoding);
    }
    out
}

/// `H_agg(L, X_i)`: a key's aggregation coefficient within keyset `L`.
///
/// The keyset is hashed as a sorted multiset, making aggregation
/// order-independent; the target key follows unsorted.
pub fn h_agg(keys: &[Point], key: &Point) -> Scalar {
    let keyset = sorted_keyset_bytes(keys);
    let target = serialize_point(key);
    AGG.hash_scalar(&[&keyset, &target])
}

/// `H_non(X~, Rs)`: the binding scalar tying a nonce aggregate to its own
/// level's aggregate key.
pub fn h_non(x_tilde: &Point, nonces: &[Point]) -> Scalar {
    let key = serialize_point(x_tilde);
    let nonce_bytes = serialize_point_list(nonces);
    NON.hash_scalar(&[&key, &nonce_bytes])
}

/// `H_non_bar(X~, Rs, m)`: the top-level binding scalar, additionally bound
/// to the message.
pub fn h_non_bar(x_tilde: &Point, nonces: &[Point], message: &[u8]) -> Scalar {
    let key = serialize_point(x_tilde);
    let nonce_bytes = serialize_point_list(nonces);
    NON_BAR.hash_scalar(&[&key, &nonce_bytes, message])
}

/// `H_sig(X~, R, m)`: the Schnorr challenge.
pub fn h_sig(x_tilde: &Point, r: &Point, message: &[u8]) -> Scalar {
    let key = serialize_point(x_tilde);
    let nonce = serialize_point(r);
    SIG.hash_scalar(&[&key, &nonce, message])
}
