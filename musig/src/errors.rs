//! Error types for the nested multi-signature protocol.

use thiserror::Error;

/// Errors reported by key aggregation, the signing rounds, and the tree
/// orchestrator.
///
/// Validation errors are raised before any one-time secret is consumed.
/// Consistency errors abort the whole signing session: they indicate either a
/// topology mismatch between rounds or a faulty participant, and are not
/// retryable without restarting round 1 with fresh nonces.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MusigError {
    /// Key aggregation was invoked on an empty key list.
    #[error("key aggregation requires at least one public key")]
    EmptyKeyList,

    /// Nonce aggregation was invoked on an empty output list.
    #[error("nonce aggregation requires at least one round-1 output")]
    EmptyNonceList,

    /// A round-1 output does not carry the fixed number of nonces.
    #[error("round-1 output {index} has {actual} nonces, expected {expected}")]
    NonceCountMismatch {
        /// Index of the offending output (ancestor level or input position).
        index: usize,
        /// Required nonce count (`NU`).
        expected: usize,
        /// Nonce count actually present.
        actual: usize,
    },

    /// The per-level nonce aggregates and cosigner key lists disagree in
    /// length.
    #[error("got {outs} nonce-aggregate levels but {cosigners} cosigner-key levels")]
    LevelCountMismatch {
        /// Number of ancestor nonce aggregates supplied.
        outs: usize,
        /// Number of cosigner key lists supplied.
        cosigners: usize,
    },

    /// Partial signing was invoked with no ancestor levels at all.
    #[error("partial signing requires at least the top-level nonce aggregate")]
    NoAncestorLevels,

    /// The round-1 state was already consumed by an earlier partial signing.
    ///
    /// This is a security-critical misuse (nonce reuse leaks the secret key),
    /// not a plain validation failure.
    #[error("round-1 state already consumed; signing again would reuse nonces")]
    StateConsumed,

    /// The round-1 state carries the wrong number of secret nonces.
    #[error("round-1 state has {actual} secrets, expected {expected}")]
    MalformedState {
        /// Required secret count (`NU`).
        expected: usize,
        /// Secret count actually present.
        actual: usize,
    },

    /// Two children of an aggregator produced different effective nonces.
    #[error("children of `{id}` produced different effective nonces")]
    MismatchedEffectiveNonce {
        /// Id of the aggregator whose children disagree.
        id: String,
    },

    /// No leaf with the requested id exists in the tree.
    #[error("leaf not found: `{id}`")]
    LeafNotFound {
        /// The id that was searched for.
        id: String,
    },

    /// The addressed leaf is the tree root and has no aggregator ancestors.
    #[error("leaf `{id}` has no aggregator ancestors and cannot sign")]
    LeafHasNoAncestors {
        /// Id of the ancestor-less leaf.
        id: String,
    },

    /// A node is missing its key material for the requested pass.
    #[error("missing public key on node `{id}`")]
    MissingKey {
        /// Id of the node without key material.
        id: String,
    },

    /// A node is missing its round-1 output or state for the requested pass.
    #[error("missing round-1 material on node `{id}`")]
    MissingRound1 {
        /// Id of the node without round-1 material.
        id: String,
    },

    /// A node is missing its round-2 partial signature or effective nonce.
    #[error("missing round-2 output on node `{id}`")]
    MissingRound2Output {
        /// Id of the node without round-2 output.
        id: String,
    },

    /// An operation that needs an aggregator was invoked on a leaf.
    #[error("node `{id}` is not an aggregator")]
    NotAnAggregator {
        /// Id of the leaf found instead.
        id: String,
    },

    /// An aggregator node has no children.
    #[error("aggregator `{id}` has no children")]
    EmptyAggregator {
        /// Id of the childless aggregator.
        id: String,
    },

    /// A serialized signature did not decode to a valid point and scalar.
    #[error("invalid signature encoding")]
    InvalidSignatureEncoding,
}
