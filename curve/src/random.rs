//! Uniform random scalar sampling.

use rand::{CryptoRng, RngCore};

use crate::scalar::{scalar_from_bytes, Scalar, SCALAR_SIZE};

/// Samples a uniform scalar in `[1, n-1]`.
///
/// Rejection-samples 32-byte strings until one parses as a canonical non-zero
/// scalar, so the result is unbiased and never zero.
pub fn random_scalar<R: CryptoRng + RngCore + ?Sized>(rng: &mut R) -> Scalar {
    loop {
        let mut bytes = [0u8; SCALAR_SIZE];
        rng.fill_bytes(&mut bytes);
        if let Some(scalar) = scalar_from_bytes(&bytes) {
            if scalar != Scalar::ZERO {
                return scalar;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_scalar_nonzero() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..64 {
            assert_ne!(random_scalar(&mut rng), Scalar::ZERO);
        }
    }

    #[test]
    fn test_random_scalar_distinct() {
        let mut rng = StdRng::seed_from_u64(42);
        let a = random_scalar(&mut rng);
        let b = random_scalar(&mut rng);
        assert_ne!(a, b);
    }
}
