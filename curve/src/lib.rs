//! secp256k1 group and scalar primitives for the nested multi-signature
//! protocol.
//!
//! This crate wraps the arithmetic of [`k256`] behind the small surface the
//! protocol needs: canonical compressed-point and big-endian scalar
//! (de)serialization, big-endian reduction of hash output modulo the group
//! order, square-and-multiply exponentiation, rejection-sampled random
//! scalars, and multi-scalar multiplication. The curve parameters and
//! generator are fixed to secp256k1.

mod msm;
mod point;
mod random;
mod scalar;

pub use msm::multi_scalar_mul;
pub use point::{deserialize_point, serialize_point, serialize_point_list, Point, POINT_SIZE};
pub use random::random_scalar;
pub use scalar::{
    scalar_from_bytes, scalar_pow, scalar_reduce, serialize_scalar, Scalar, ORDER, SCALAR_SIZE,
};
