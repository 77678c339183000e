//! Signer key pairs and rogue-key-resistant key aggregation.

use curve::{multi_scalar_mul, random_scalar, Point, Scalar};
use rand::{CryptoRng, RngCore};

use crate::errors::MusigError;
use crate::hash::h_agg;

/// A signer's key pair with `pk = G * sk`.
///
/// The secret scalar never leaves the pair except into partial signing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct KeyPair {
    sk: Scalar,
    pk: Point,
}

impl KeyPair {
    /// Generates a fresh key pair from a cryptographically secure rng.
    pub fn generate<R: CryptoRng + RngCore + ?Sized>(rng: &mut R) -> Self {
        let sk = random_scalar(rng);
        Self {
            sk,
            pk: Point::GENERATOR * sk,
        }
    }

    /// The public key `G * sk`.
    pub fn public_key(&self) -> &Point {
        &self.pk
    }

    /// The secret scalar.
    pub fn secret_key(&self) -> &Scalar {
        &self.sk
    }
}

/// Computes a key's aggregation coefficient `H_agg(L, X_i)` within keyset
/// `keys`.
///
/// Deterministic and order-independent in `keys`: every caller holding the
/// same multiset obtains the same weight.
pub fn key_agg_coef(keys: &[Point], key: &Point) -> Scalar {
    h_agg(keys, key)
}

/// Aggregates a keyset into a single key: `Σ X_i * H_agg(L, X_i)`.
///
/// Weighting each key by a hash of the full set prevents rogue-key attacks:
/// no participant can choose a key that cancels the others' contributions,
/// because its weight depends on the complete set including itself.
pub fn key_agg(keys: &[Point]) -> Result<Point, MusigError> {
    if keys.is_empty() {
        return Err(MusigError::EmptyKeyList);
    }
    let coefs: Vec<Scalar> = keys.iter().map(|key| key_agg_coef(keys, key)).collect();
    Ok(multi_scalar_mul(keys, &coefs))
}
