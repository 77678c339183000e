//! Multi-scalar multiplication.

use crate::{Point, Scalar};

/// Computes `Σ points[i] * scalars[i]`.
///
/// The protocol's key aggregation is a small MSM (one term per cosigner at a
/// single tree level), so a plain fold is sufficient; no windowing.
pub fn multi_scalar_mul(points: &[Point], scalars: &[Scalar]) -> Point {
    assert_eq!(
        points.len(),
        scalars.len(),
        "points and scalars must have same length"
    );

    points
        .iter()
        .zip(scalars.iter())
        .fold(Point::IDENTITY, |acc, (point, scalar)| acc + *point * *scalar)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_identity() {
        assert_eq!(multi_scalar_mul(&[], &[]), Point::IDENTITY);
    }

    #[test]
    fn test_matches_naive_sum() {
        let g = Point::GENERATOR;
        let points = [g, g * Scalar::from(2u64), g * Scalar::from(3u64)];
        let scalars = [
            Scalar::from(5u64),
            Scalar::from(7u64),
            Scalar::from(11u64),
        ];
        let expected = points[0] * scalars[0] + points[1] * scalars[1] + points[2] * scalars[2];
        assert_eq!(multi_scalar_mul(&points, &scalars), expected);
    }

    #[test]
    fn test_single_term() {
        let p = Point::GENERATOR * Scalar::from(9u64);
        let s = Scalar::from(4u64);
        assert_eq!(multi_scalar_mul(&[p], &[s]), p * s);
    }
}
