//! Scalars modulo the secp256k1 group order
//! n = 0xfffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141.
//!
//! Addition, multiplication and negation reduce modulo `n` natively in
//! [`k256::Scalar`]; this module adds canonical byte conversions and
//! exponentiation.

use k256::elliptic_curve::ops::Reduce;
use k256::elliptic_curve::{Curve, PrimeField};
use k256::{FieldBytes, Secp256k1, U256};

/// Scalar in the prime field of order `n`.
pub type Scalar = k256::Scalar;

/// Size of a serialized scalar in bytes (big-endian).
pub const SCALAR_SIZE: usize = 32;

/// The secp256k1 group order `n`.
pub const ORDER: U256 = Secp256k1::ORDER;

/// Parses a big-endian byte string as a canonical scalar.
///
/// Returns `None` if the value is not strictly below the group order.
pub fn scalar_from_bytes(bytes: &[u8; SCALAR_SIZE]) -> Option<Scalar> {
    Option::from(Scalar::from_repr(FieldBytes::from(*bytes)))
}

/// Interprets a big-endian byte string as an integer and reduces it modulo
/// the group order. Used to map hash digests onto scalars.
pub fn scalar_reduce(bytes: &[u8; SCALAR_SIZE]) -> Scalar {
    <Scalar as Reduce<U256>>::reduce_bytes(&FieldBytes::from(*bytes))
}

/// Serializes a scalar as 32 big-endian bytes.
pub fn serialize_scalar(scalar: &Scalar) -> [u8; SCALAR_SIZE] {
    scalar.to_bytes().into()
}

/// Computes `base^exp` by square-and-multiply.
///
/// `exp = 0` yields the multiplicative identity.
pub fn scalar_pow(base: &Scalar, exp: u64) -> Scalar {
    let mut result = Scalar::ONE;
    let mut cur_base = *base;
    let mut cur_exp = exp;
    while cur_exp > 0 {
        if cur_exp & 1 == 1 {
            result *= cur_base;
        }
        cur_base *= cur_base;
        cur_exp >>= 1;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use k256::elliptic_curve::bigint::ArrayEncoding;

    #[test]
    fn test_pow_zero_exponent() {
        let base = Scalar::from(42u64);
        assert_eq!(scalar_pow(&base, 0), Scalar::ONE);
        assert_eq!(scalar_pow(&Scalar::ZERO, 0), Scalar::ONE);
    }

    #[test]
    fn test_pow_small_exponents() {
        let base = Scalar::from(3u64);
        assert_eq!(scalar_pow(&base, 1), base);
        assert_eq!(scalar_pow(&base, 2), base * base);
        assert_eq!(scalar_pow(&base, 5), Scalar::from(243u64));
    }

    #[test]
    fn test_serialize_round_trip() {
        let scalar = Scalar::from(0xdeadbeefu64);
        let bytes = serialize_scalar(&scalar);
        assert_eq!(scalar_from_bytes(&bytes), Some(scalar));
    }

    #[test]
    fn test_from_bytes_rejects_order() {
        // The group order itself is not a canonical scalar.
        let order_bytes: [u8; SCALAR_SIZE] = ORDER.to_be_byte_array().into();
        assert_eq!(scalar_from_bytes(&order_bytes), None);
        // Reduction maps it to zero.
        assert_eq!(scalar_reduce(&order_bytes), Scalar::ZERO);
    }

    #[test]
    fn test_reduce_small_value_is_identity() {
        let mut bytes = [0u8; SCALAR_SIZE];
        bytes[SCALAR_SIZE - 1] = 7;
        assert_eq!(scalar_reduce(&bytes), Scalar::from(7u64));
    }
}
