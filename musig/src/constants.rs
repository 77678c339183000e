//! Constants of the nested multi-signature protocol.

pub use curve::{POINT_SIZE, SCALAR_SIZE};

/// Number of nonces per signer and signing session ("ν" in the MuSig2 paper).
///
/// Fixed by the security proof; not user-configurable.
pub const NU: usize = 2;

/// Size of a serialized signature in bytes: compressed point `R` (33 bytes)
/// followed by big-endian scalar `s` (32 bytes).
pub const SIG_SIZE: usize = POINT_SIZE + SCALAR_SIZE;

/// Domain-separation tag for key-aggregation coefficients.
pub(crate) const TAG_AGG: &str = "NestedMuSig2/agg";

/// Domain-separation tag for per-level nonce binding.
pub(crate) const TAG_NON: &str = "NestedMuSig2/non";

/// Domain-separation tag for the message-bound top-level nonce binding.
pub(crate) const TAG_NON_BAR: &str = "NestedMuSig2/non_bar";

/// Domain-separation tag for the Schnorr challenge.
pub(crate) const TAG_SIG: &str = "NestedMuSig2/sig";
