//! secp256k1 group elements and their canonical SEC1 compressed encoding.

use k256::elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint};
use k256::{AffinePoint, EncodedPoint, ProjectivePoint};

/// Element of the secp256k1 group, generated by [`Point::GENERATOR`].
pub type Point = ProjectivePoint;

/// Size of a serialized compressed point in bytes.
pub const POINT_SIZE: usize = 33;

/// Serializes a point in SEC1 compressed form (33 bytes).
///
/// All protocol points are multiples of the generator by non-zero scalars, so
/// the identity never occurs in a valid transcript; it maps to 33 zero bytes,
/// which no valid encoding collides with and [`deserialize_point`] rejects.
pub fn serialize_point(point: &Point) -> [u8; POINT_SIZE] {
    let mut out = [0u8; POINT_SIZE];
    if *point == Point::IDENTITY {
        return out;
    }
    let encoded = point.to_affine().to_encoded_point(true);
    out.copy_from_slice(encoded.as_bytes());
    out
}

/// Parses a SEC1 compressed encoding back into a point.
///
/// Returns `None` for anything that is not exactly 33 bytes of a compressed
/// point on the curve. Uncompressed and identity encodings are rejected.
pub fn deserialize_point(bytes: &[u8]) -> Option<Point> {
    if bytes.len() != POINT_SIZE {
        return None;
    }
    let encoded = EncodedPoint::from_bytes(bytes).ok()?;
    if encoded.is_identity() {
        return None;
    }
    let affine = Option::<AffinePoint>::from(AffinePoint::from_encoded_point(&encoded))?;
    Some(Point::from(affine))
}

/// Concatenates the compressed encodings of a list of points, in order.
pub fn serialize_point_list(points: &[Point]) -> Vec<u8> {
    let mut out = Vec::with_capacity(points.len() * POINT_SIZE);
    for point in points {
        out.extend_from_slice(&serialize_point(point));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Scalar;

    #[test]
    fn test_generator_round_trip() {
        let g = Point::GENERATOR;
        let bytes = serialize_point(&g);
        assert_eq!(deserialize_point(&bytes), Some(g));
    }

    #[test]
    fn test_multiple_round_trip() {
        let p = Point::GENERATOR * Scalar::from(123456789u64);
        let bytes = serialize_point(&p);
        assert_eq!(deserialize_point(&bytes), Some(p));
    }

    #[test]
    fn test_identity_encoding_rejected() {
        let bytes = serialize_point(&Point::IDENTITY);
        assert_eq!(bytes, [0u8; POINT_SIZE]);
        assert_eq!(deserialize_point(&bytes), None);
    }

    #[test]
    fn test_wrong_length_rejected() {
        let bytes = serialize_point(&Point::GENERATOR);
        assert_eq!(deserialize_point(&bytes[..32]), None);
        let mut long = bytes.to_vec();
        long.push(0);
        assert_eq!(deserialize_point(&long), None);
    }

    #[test]
    fn test_point_list_concatenation() {
        let a = Point::GENERATOR;
        let b = Point::GENERATOR * Scalar::from(2u64);
        let joined = serialize_point_list(&[a, b]);
        assert_eq!(joined.len(), 2 * POINT_SIZE);
        assert_eq!(&joined[..POINT_SIZE], &serialize_point(&a));
        assert_eq!(&joined[POINT_SIZE..], &serialize_point(&b));
    }
}
