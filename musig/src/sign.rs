//! Round 2: the nested partial-signing algorithm.

use std::mem;

use curve::{scalar_pow, Point, Scalar};

use crate::constants::NU;
use crate::errors::MusigError;
use crate::hash::{h_non, h_non_bar, h_sig};
use crate::keys::{key_agg, key_agg_coef};
use crate::nonce::Round1State;

/// A leaf's (or subtree's) contribution to the final signature scalar,
/// together with the effective nonce it was computed against.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PartialSignature {
    /// The partial signature scalar `s1`.
    pub s: Scalar,
    /// The effective nonce `R`, identical across all honest leaves of a
    /// session.
    pub r: Point,
}

/// Every intermediate value of a partial-signing run, for diagnostics and
/// verification tooling. Not required for protocol correctness.
#[derive(Clone, Debug)]
pub struct SignPrimeTrace {
    /// Virtual aggregate key of the path subtree at each level, deepest
    /// level holding the leaf's own key.
    pub pk1: Vec<Point>,
    /// The reconstructed keyset at each level: path key first, then the
    /// level's cosigner keys.
    pub key_lists: Vec<Vec<Point>>,
    /// Aggregation coefficient of the path key at each level.
    pub a1: Vec<Scalar>,
    /// Binding scalar at each level (`b[0]` is message-bound).
    pub b: Vec<Scalar>,
    /// The flat aggregate key of the whole tree.
    pub x_tilde: Point,
    /// The effective nonce.
    pub r: Point,
    /// Product of all binding scalars.
    pub b_check: Scalar,
    /// The Schnorr challenge.
    pub c: Scalar,
    /// Challenge multiplied by the product of all aggregation coefficients.
    pub c_check: Scalar,
    /// The resulting partial signature scalar.
    pub s1: Scalar,
}

fn level_key_list(path_key: &Point, cosigners: &[Point]) -> Vec<Point> {
    let mut keys = Vec::with_capacity(1 + cosigners.len());
    keys.push(*path_key);
    keys.extend_from_slice(cosigners);
    keys
}

/// Produces a leaf's partial signature over `message`.
///
/// `outs[d]` is the *unbound* internal nonce aggregate of the leaf's ancestor
/// at depth `d` (root first), and `cosigner_keys[d]` holds the public keys of
/// that ancestor's other children. Both run root-to-leaf and must have equal
/// length `Λ ≥ 1`.
///
/// The round-1 `state` is consumed: its secrets are taken, zeroed after use,
/// and the state left empty, so invoking this twice on the same state fails
/// with [`MusigError::StateConsumed`]. All validation happens before the
/// secrets are touched.
///
/// The signer's effective weight in the flat aggregate key is the product of
/// its aggregation coefficient at every ancestor level, and its nonce
/// contribution is scaled by the product of every level's binding scalar;
/// this is what generalizes flat MuSig2 (`Λ = 1`) to nested trees.
pub fn sign_prime(
    state: &mut Round1State,
    outs: &[Vec<Point>],
    sk: &Scalar,
    message: &[u8],
    cosigner_keys: &[Vec<Point>],
) -> Result<(PartialSignature, SignPrimeTrace), MusigError> {
    let lambda = outs.len();
    if lambda == 0 {
        return Err(MusigError::NoAncestorLevels);
    }
    if cosigner_keys.len() != lambda {
        return Err(MusigError::LevelCountMismatch {
            outs: lambda,
            cosigners: cosigner_keys.len(),
        });
    }
    if state.secrets.is_empty() {
        return Err(MusigError::StateConsumed);
    }
    if state.secrets.len() != NU {
        return Err(MusigError::MalformedState {
            expected: NU,
            actual: state.secrets.len(),
        });
    }
    for (index, level_out) in outs.iter().enumerate() {
        if level_out.len() != NU {
            return Err(MusigError::NonceCountMismatch {
                index,
                expected: NU,
                actual: level_out.len(),
            });
        }
    }

    // Validation passed; take ownership of the secret nonces and leave the
    // state empty so reuse is detected.
    let mut secrets = mem::take(&mut state.secrets);

    // Reconstruct the chain of virtual aggregate keys from the leaf's
    // immediate parent (level Λ-1) up to the root (level 0). pk1[d] is the
    // key of the path child of the ancestor at depth d, so key_agg of
    // level d's keyset yields pk1[d-1], the ancestor's own aggregate key.
    let mut pk1 = vec![Point::IDENTITY; lambda];
    let mut key_lists = vec![Vec::new(); lambda];
    let mut a1 = vec![Scalar::ZERO; lambda];
    let mut b = vec![Scalar::ZERO; lambda];

    pk1[lambda - 1] = Point::GENERATOR * *sk;
    key_lists[lambda - 1] = level_key_list(&pk1[lambda - 1], &cosigner_keys[lambda - 1]);
    a1[lambda - 1] = key_agg_coef(&key_lists[lambda - 1], &pk1[lambda - 1]);
    if lambda >= 2 {
        pk1[lambda - 2] = key_agg(&key_lists[lambda - 1])?;
    }

    for d in (0..lambda - 1).rev() {
        // The binding scalar the ancestor at depth d+1 derived in round 1,
        // keyed by that ancestor's own aggregate key pk1[d].
        b[d + 1] = h_non(&pk1[d], &outs[d + 1]);
        key_lists[d] = level_key_list(&pk1[d], &cosigner_keys[d]);
        a1[d] = key_agg_coef(&key_lists[d], &pk1[d]);
        if d > 0 {
            pk1[d - 1] = key_agg(&key_lists[d])?;
        }
    }

    let x_tilde = key_agg(&key_lists[0])?;
    b[0] = h_non_bar(&x_tilde, &outs[0], message);

    // Effective nonce: the binding-weighted sum of the top-level aggregate.
    let mut big_r = Point::IDENTITY;
    for (j, nonce) in outs[0].iter().enumerate() {
        big_r += *nonce * scalar_pow(&b[0], j as u64);
    }

    let b_check: Scalar = b.iter().product();
    let c = h_sig(&x_tilde, &big_r, message);
    let c_check = a1.iter().fold(c, |acc, a| acc * a);

    let mut s1 = c_check * *sk;
    for (j, r_j) in secrets.iter().enumerate() {
        s1 += *r_j * scalar_pow(&b_check, j as u64);
    }

    for secret in &mut secrets {
        *secret = Scalar::ZERO;
    }

    let result = PartialSignature { s: s1, r: big_r };
    let trace = SignPrimeTrace {
        pk1,
        key_lists,
        a1,
        b,
        x_tilde,
        r: big_r,
        b_check,
        c,
        c_check,
        s1,
    };
    Ok((result, trace))
}
