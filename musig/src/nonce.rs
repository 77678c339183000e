//! Round 1: nonce generation, aggregation, and per-level binding.

use curve::{random_scalar, Point, Scalar};
use rand::{CryptoRng, RngCore};

use crate::constants::NU;
use crate::errors::MusigError;
use crate::hash::h_non;

/// A signer's (or subtree's) public nonce commitments for one signing
/// session: exactly [`NU`] points.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Round1Output {
    /// The nonce commitments `R_j = G * r_j`, in order.
    pub nonces: Vec<Point>,
}

/// The secret half of a round-1 output: exactly [`NU`] scalars, positionally
/// paired with the commitments.
///
/// Single-use. Partial signing empties it on consumption, so a second use is
/// detectable and rejected; reusing the secrets would leak the signer's key.
#[derive(Debug)]
pub struct Round1State {
    pub(crate) secrets: Vec<Scalar>,
}

impl Round1State {
    /// Whether partial signing has already consumed this state.
    pub fn is_consumed(&self) -> bool {
        self.secrets.is_empty()
    }
}

/// Generates a leaf's round-1 output: [`NU`] independent `(r_j, G * r_j)`
/// pairs.
pub fn nonce_gen<R: CryptoRng + RngCore + ?Sized>(rng: &mut R) -> (Round1Output, Round1State) {
    let mut secrets = Vec::with_capacity(NU);
    let mut nonces = Vec::with_capacity(NU);
    for _ in 0..NU {
        let r = random_scalar(rng);
        nonces.push(Point::GENERATOR * r);
        secrets.push(r);
    }
    (Round1Output { nonces }, Round1State { secrets })
}

/// Aggregates round-1 outputs componentwise: the `j`-th result is the sum of
/// every input's `j`-th nonce.
///
/// This is the *internal* (unbound) aggregate at one tree level.
pub fn nonce_agg(outs: &[Round1Output]) -> Result<Vec<Point>, MusigError> {
    if outs.is_empty() {
        return Err(MusigError::EmptyNonceList);
    }
    for (index, out) in outs.iter().enumerate() {
        if out.nonces.len() != NU {
            return Err(MusigError::NonceCountMismatch {
                index,
                expected: NU,
                actual: out.nonces.len(),
            });
        }
    }

    let mut aggregate = Vec::with_capacity(NU);
    for j in 0..NU {
        let mut r_j = outs[0].nonces[j];
        for out in &outs[1..] {
            r_j += out.nonces[j];
        }
        aggregate.push(r_j);
    }
    Ok(aggregate)
}

/// Binds an internal nonce aggregate to its level's aggregate key.
///
/// Computes `b = H_non(node_pk, internal_agg)` and `bound[j] =
/// internal_agg[j] * b^j`. A node exposes `bound`, never `internal_agg`, to
/// its parent: every level re-binds its aggregate before it becomes visible
/// one level up, which blocks cross-level nonce grinding.
pub fn bind_nonces(internal_agg: &[Point], node_pk: &Point) -> (Vec<Point>, Scalar) {
    let b = h_non(node_pk, internal_agg);
    let mut bound = Vec::with_capacity(internal_agg.len());
    let mut b_pow = Scalar::ONE;
    for nonce in internal_agg {
        bound.push(*nonce * b_pow);
        b_pow *= b;
    }
    (bound, b)
}
