//! Partial-signature aggregation and signature verification.

use std::fmt;

use curve::{
    deserialize_point, scalar_from_bytes, serialize_point, serialize_scalar, Point, Scalar,
    POINT_SIZE, SCALAR_SIZE,
};
use serde::de::{Error as DeError, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::SIG_SIZE;
use crate::errors::MusigError;
use crate::hash::h_sig;

/// A complete Schnorr-style signature `(R, s)`, produced at the tree root
/// after a full round-2 pass and immutable from then on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    /// The effective nonce.
    pub r: Point,
    /// The aggregate signature scalar.
    pub s: Scalar,
}

impl Signature {
    /// Canonical encoding: compressed `R` followed by big-endian `s`
    /// ([`SIG_SIZE`] bytes).
    pub fn to_bytes(&self) -> [u8; SIG_SIZE] {
        let mut out = [0u8; SIG_SIZE];
        out[..POINT_SIZE].copy_from_slice(&serialize_point(&self.r));
        out[POINT_SIZE..].copy_from_slice(&serialize_scalar(&self.s));
        out
    }

    /// Decodes a signature from its canonical encoding.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MusigError> {
        if bytes.len() != SIG_SIZE {
            return Err(MusigError::InvalidSignatureEncoding);
        }
        let r = deserialize_point(&bytes[..POINT_SIZE])
            .ok_or(MusigError::InvalidSignatureEncoding)?;
        let mut scalar_bytes = [0u8; SCALAR_SIZE];
        scalar_bytes.copy_from_slice(&bytes[POINT_SIZE..]);
        let s = scalar_from_bytes(&scalar_bytes).ok_or(MusigError::InvalidSignatureEncoding)?;
        Ok(Self { r, s })
    }
}

impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(&self.to_bytes())
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SignatureVisitor;

        impl<'de> Visitor<'de> for SignatureVisitor {
            type Value = Signature;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{SIG_SIZE} signature bytes")
            }

            fn visit_bytes<E: DeError>(self, v: &[u8]) -> Result<Signature, E> {
                Signature::from_bytes(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_bytes(SignatureVisitor)
    }
}

/// Sums partial signatures into one signature scalar, paired with the
/// claimed-common effective nonce.
pub fn sign_agg_prime(partials: &[Scalar], r: Point) -> Signature {
    Signature {
        r,
        s: partials.iter().sum(),
    }
}

/// Verifies a signature against an aggregate key: recomputes the challenge
/// `c = H_sig(X~, R, m)` and accepts iff `G * s == R + X~ * c`.
///
/// Pure; never errors and never mutates.
pub fn verify(x_tilde: &Point, message: &[u8], signature: &Signature) -> bool {
    let c = h_sig(x_tilde, &signature.r, message);
    Point::GENERATOR * signature.s == signature.r + *x_tilde * c
}
