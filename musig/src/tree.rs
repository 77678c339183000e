//! The cosigner tree: topology, per-node protocol state, and the traversals
//! driving key generation, both signing rounds, and the bottom-up signature
//! merge.
//!
//! Leaves hold signer key pairs and one-time nonce state; aggregator nodes
//! own their children outright (no sharing, no cycles by construction) and
//! hold the per-level aggregation context: the exact child key list used for
//! key aggregation, each child's coefficient, the unbound internal nonce
//! aggregate, and the bound output exposed to the parent.

use curve::{Point, Scalar};
use rand::{CryptoRng, RngCore};

use crate::aggregate::{sign_agg_prime, Signature};
use crate::errors::MusigError;
use crate::keys::{key_agg, key_agg_coef, KeyPair};
use crate::nonce::{bind_nonces, nonce_agg, nonce_gen, Round1Output, Round1State};
use crate::sign::sign_prime;

/// A signing participant at the bottom of the tree.
#[derive(Debug)]
pub struct LeafNode {
    /// Stable identifier, unique within the tree.
    pub id: String,
    /// Distance from the root; assigned by [`TreeNode::compute_depths`].
    pub depth: usize,
    /// The signer's key pair, populated once by the key-generation pass.
    pub keypair: Option<KeyPair>,
    /// Public nonce commitments for the current session.
    pub round1_out: Option<Round1Output>,
    /// Secret nonce state for the current session; taken and consumed by
    /// round 2.
    pub round1_state: Option<Round1State>,
    /// The leaf's partial signature scalar, after round 2.
    pub partial_sig: Option<Scalar>,
    /// The leaf's effective nonce, after round 2.
    pub effective_nonce: Option<Point>,
}

/// A cosigner group: an internal node aggregating its children.
#[derive(Debug)]
pub struct AggregatorNode {
    /// Stable identifier, unique within the tree.
    pub id: String,
    /// Distance from the root; assigned by [`TreeNode::compute_depths`].
    pub depth: usize,
    /// The node's children, in the order supplied at construction.
    pub children: Vec<TreeNode>,
    /// Aggregate public key of `key_list`.
    pub pk: Option<Point>,
    /// The exact child keys `pk` was aggregated from, in child order (the
    /// hash-internal sorting is not reflected here).
    pub key_list: Vec<Point>,
    /// Each child's aggregation coefficient within `key_list`, recorded for
    /// reuse without recomputation.
    pub child_coefs: Vec<Scalar>,
    /// The unbound componentwise sum of the children's round-1 outputs,
    /// needed again in round 2.
    pub internal_agg: Option<Vec<Point>>,
    /// The binding scalar derived from `pk` and `internal_agg`.
    pub binding_value: Option<Scalar>,
    /// The bound nonce output this node exposes to its own parent.
    pub round1_out: Option<Round1Output>,
    /// Sum of the children's partial signatures, after the round-2 merge.
    pub partial_sig: Option<Scalar>,
    /// The common effective nonce of the children, after the round-2 merge.
    pub effective_nonce: Option<Point>,
    /// The final signature; only ever populated at the root.
    pub signature: Option<Signature>,
}

/// A node of the cosigner tree: either a signing leaf or an aggregator
/// group.
#[derive(Debug)]
pub enum TreeNode {
    /// A signing participant.
    Leaf(LeafNode),
    /// A cosigner group over `children`.
    Aggregator(AggregatorNode),
}

impl TreeNode {
    /// Creates a leaf with no key or session state yet.
    pub fn leaf(id: impl Into<String>) -> Self {
        TreeNode::Leaf(LeafNode {
            id: id.into(),
            depth: 0,
            keypair: None,
            round1_out: None,
            round1_state: None,
            partial_sig: None,
            effective_nonce: None,
        })
    }

    /// Creates an aggregator over `children` (child order is preserved and
    /// becomes the key-list order).
    pub fn aggregator(id: impl Into<String>, children: Vec<TreeNode>) -> Self {
        TreeNode::Aggregator(AggregatorNode {
            id: id.into(),
            depth: 0,
            children,
            pk: None,
            key_list: Vec::new(),
            child_coefs: Vec::new(),
            internal_agg: None,
            binding_value: None,
            round1_out: None,
            partial_sig: None,
            effective_nonce: None,
            signature: None,
        })
    }

    /// The node's identifier.
    pub fn id(&self) -> &str {
        match self {
            TreeNode::Leaf(leaf) => &leaf.id,
            TreeNode::Aggregator(agg) => &agg.id,
        }
    }

    /// The node's depth (root = 0), valid after [`Self::compute_depths`].
    pub fn depth(&self) -> usize {
        match self {
            TreeNode::Leaf(leaf) => leaf.depth,
            TreeNode::Aggregator(agg) => agg.depth,
        }
    }

    /// Whether this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, TreeNode::Leaf(_))
    }

    /// The node's public key: a leaf's own key, an aggregator's aggregate
    /// key. `None` before key generation.
    pub fn public_key(&self) -> Option<Point> {
        match self {
            TreeNode::Leaf(leaf) => leaf.keypair.as_ref().map(|kp| *kp.public_key()),
            TreeNode::Aggregator(agg) => agg.pk,
        }
    }

    /// The round-1 output this node exposes to its parent (bound, for
    /// aggregators).
    pub fn round1_out(&self) -> Option<&Round1Output> {
        match self {
            TreeNode::Leaf(leaf) => leaf.round1_out.as_ref(),
            TreeNode::Aggregator(agg) => agg.round1_out.as_ref(),
        }
    }

    /// The final signature, present at the root after a successful round 2.
    pub fn signature(&self) -> Option<&Signature> {
        match self {
            TreeNode::Leaf(_) => None,
            TreeNode::Aggregator(agg) => agg.signature.as_ref(),
        }
    }

    /// Assigns depths (root = 0, strictly increasing toward the leaves) and
    /// returns the maximum depth of the tree.
    pub fn compute_depths(&mut self) -> usize {
        self.assign_depths(0)
    }

    fn assign_depths(&mut self, depth: usize) -> usize {
        match self {
            TreeNode::Leaf(leaf) => {
                leaf.depth = depth;
                depth
            }
            TreeNode::Aggregator(agg) => {
                agg.depth = depth;
                let mut max_depth = depth;
                for child in &mut agg.children {
                    max_depth = max_depth.max(child.assign_depths(depth + 1));
                }
                max_depth
            }
        }
    }

    /// Key-generation pass, post-order: every leaf gets a fresh key pair;
    /// every aggregator records its children's keys as `key_list`, their
    /// coefficients, and its own aggregate key.
    ///
    /// Key material is populated once per tree and never mutated afterward.
    pub fn key_gen_tree<R: CryptoRng + RngCore + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<(), MusigError> {
        match self {
            TreeNode::Leaf(leaf) => {
                leaf.keypair = Some(KeyPair::generate(rng));
                Ok(())
            }
            TreeNode::Aggregator(agg) => {
                if agg.children.is_empty() {
                    return Err(MusigError::EmptyAggregator { id: agg.id.clone() });
                }
                for child in &mut agg.children {
                    child.key_gen_tree(rng)?;
                }
                let mut key_list = Vec::with_capacity(agg.children.len());
                for child in &agg.children {
                    let pk = child.public_key().ok_or_else(|| MusigError::MissingKey {
                        id: child.id().to_owned(),
                    })?;
                    key_list.push(pk);
                }
                agg.pk = Some(key_agg(&key_list)?);
                agg.child_coefs = key_list
                    .iter()
                    .map(|pk| key_agg_coef(&key_list, pk))
                    .collect();
                agg.key_list = key_list;
                Ok(())
            }
        }
    }

    /// Round-1 pass, post-order: leaves generate nonces; every aggregator
    /// sums its children's outputs into the unbound `internal_agg`, binds it
    /// to its own aggregate key, and exposes only the bound output upward.
    pub fn round1_tree<R: CryptoRng + RngCore + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<(), MusigError> {
        match self {
            TreeNode::Leaf(leaf) => {
                let (out, state) = nonce_gen(rng);
                leaf.round1_out = Some(out);
                leaf.round1_state = Some(state);
                Ok(())
            }
            TreeNode::Aggregator(agg) => {
                if agg.children.is_empty() {
                    return Err(MusigError::EmptyAggregator { id: agg.id.clone() });
                }
                for child in &mut agg.children {
                    child.round1_tree(rng)?;
                }
                let mut child_outs = Vec::with_capacity(agg.children.len());
                for child in &agg.children {
                    let out = child
                        .round1_out()
                        .cloned()
                        .ok_or_else(|| MusigError::MissingRound1 {
                            id: child.id().to_owned(),
                        })?;
                    child_outs.push(out);
                }
                let internal_agg = nonce_agg(&child_outs)?;
                let pk = agg.pk.ok_or_else(|| MusigError::MissingKey {
                    id: agg.id.clone(),
                })?;
                let (bound, b) = bind_nonces(&internal_agg, &pk);
                agg.internal_agg = Some(internal_agg);
                agg.binding_value = Some(b);
                agg.round1_out = Some(Round1Output { nonces: bound });
                Ok(())
            }
        }
    }

    /// Walks root-to-leaf and collects, per ancestor level, the unbound
    /// internal nonce aggregate and the other children's public keys.
    ///
    /// Output is root-first: index 0 is the root's context. This external
    /// ordering is load-bearing for the hash inputs of partial signing and
    /// must match what [`crate::sign_prime`] expects.
    pub fn collect_sign_prime_inputs(
        &self,
        leaf_id: &str,
    ) -> Result<(Vec<Vec<Point>>, Vec<Vec<Point>>), MusigError> {
        let mut path = Vec::new();
        if !find_path(self, leaf_id, &mut path) {
            return Err(MusigError::LeafNotFound {
                id: leaf_id.to_owned(),
            });
        }
        if path.is_empty() {
            return Err(MusigError::LeafHasNoAncestors {
                id: leaf_id.to_owned(),
            });
        }

        let mut outs = Vec::with_capacity(path.len());
        let mut cosigner_keys = Vec::with_capacity(path.len());
        for (ancestor, child_index) in &path {
            let internal_agg =
                ancestor
                    .internal_agg
                    .as_ref()
                    .ok_or_else(|| MusigError::MissingRound1 {
                        id: ancestor.id.clone(),
                    })?;
            outs.push(internal_agg.clone());

            let mut siblings = Vec::with_capacity(ancestor.children.len().saturating_sub(1));
            for (index, child) in ancestor.children.iter().enumerate() {
                if index == *child_index {
                    continue;
                }
                let pk = child.public_key().ok_or_else(|| MusigError::MissingKey {
                    id: child.id().to_owned(),
                })?;
                siblings.push(pk);
            }
            cosigner_keys.push(siblings);
        }
        Ok((outs, cosigner_keys))
    }

    /// Round-2 pass: every leaf produces its partial signature from the
    /// collected ancestor context (consuming its round-1 state), then the
    /// results are merged bottom-up and the final signature stored at the
    /// root.
    pub fn round2_tree(&mut self, message: &[u8]) -> Result<Signature, MusigError> {
        if self.is_leaf() {
            return Err(MusigError::NotAnAggregator {
                id: self.id().to_owned(),
            });
        }

        for leaf_id in self.leaf_ids() {
            let (outs, cosigner_keys) = self.collect_sign_prime_inputs(&leaf_id)?;
            let leaf = self
                .find_leaf_mut(&leaf_id)
                .ok_or_else(|| MusigError::LeafNotFound { id: leaf_id.clone() })?;
            let sk = *leaf
                .keypair
                .as_ref()
                .ok_or_else(|| MusigError::MissingKey { id: leaf_id.clone() })?
                .secret_key();
            let mut state = leaf
                .round1_state
                .take()
                .ok_or_else(|| MusigError::MissingRound1 { id: leaf_id.clone() })?;

            let (partial, _trace) = sign_prime(&mut state, &outs, &sk, message, &cosigner_keys)?;
            leaf.partial_sig = Some(partial.s);
            leaf.effective_nonce = Some(partial.r);
        }

        let sigma = self.aggregate_round2()?;
        if let TreeNode::Aggregator(agg) = self {
            agg.signature = Some(sigma);
        }
        Ok(sigma)
    }

    /// Merges partial signatures bottom-up: a leaf yields `(R, s)`; an
    /// aggregator fails if any two children disagree on the effective nonce
    /// (desynchronized binding, a correctness bug or adversarial input),
    /// else sums their scalars and stores the result as its own.
    pub fn aggregate_round2(&mut self) -> Result<Signature, MusigError> {
        match self {
            TreeNode::Leaf(leaf) => {
                let r = leaf
                    .effective_nonce
                    .ok_or_else(|| MusigError::MissingRound2Output { id: leaf.id.clone() })?;
                let s = leaf
                    .partial_sig
                    .ok_or_else(|| MusigError::MissingRound2Output { id: leaf.id.clone() })?;
                Ok(Signature { r, s })
            }
            TreeNode::Aggregator(agg) => {
                if agg.children.is_empty() {
                    return Err(MusigError::EmptyAggregator { id: agg.id.clone() });
                }
                let mut child_sigs = Vec::with_capacity(agg.children.len());
                for child in &mut agg.children {
                    child_sigs.push(child.aggregate_round2()?);
                }
                let r = child_sigs[0].r;
                for sig in &child_sigs[1..] {
                    if sig.r != r {
                        return Err(MusigError::MismatchedEffectiveNonce {
                            id: agg.id.clone(),
                        });
                    }
                }
                let partials: Vec<Scalar> = child_sigs.iter().map(|sig| sig.s).collect();
                let sigma = sign_agg_prime(&partials, r);
                agg.partial_sig = Some(sigma.s);
                agg.effective_nonce = Some(sigma.r);
                Ok(sigma)
            }
        }
    }

    /// Ids of all leaves, in post-order.
    pub fn leaf_ids(&self) -> Vec<String> {
        let mut ids = Vec::new();
        self.collect_leaf_ids(&mut ids);
        ids
    }

    fn collect_leaf_ids(&self, ids: &mut Vec<String>) {
        match self {
            TreeNode::Leaf(leaf) => ids.push(leaf.id.clone()),
            TreeNode::Aggregator(agg) => {
                for child in &agg.children {
                    child.collect_leaf_ids(ids);
                }
            }
        }
    }

    /// Finds a leaf by id anywhere in the tree.
    pub fn find_leaf_mut(&mut self, leaf_id: &str) -> Option<&mut LeafNode> {
        match self {
            TreeNode::Leaf(leaf) => (leaf.id == leaf_id).then_some(leaf),
            TreeNode::Aggregator(agg) => {
                for child in &mut agg.children {
                    if let Some(found) = child.find_leaf_mut(leaf_id) {
                        return Some(found);
                    }
                }
                None
            }
        }
    }
}

/// Depth-first search for `leaf_id`, recording the `(ancestor, child_index)`
/// pairs from the root down. Backtracks on dead ends; `path` holds the full
/// root-to-leaf chain exactly when the leaf is found.
fn find_path<'a>(
    node: &'a TreeNode,
    leaf_id: &str,
    path: &mut Vec<(&'a AggregatorNode, usize)>,
) -> bool {
    match node {
        TreeNode::Leaf(leaf) => leaf.id == leaf_id,
        TreeNode::Aggregator(agg) => {
            for (index, child) in agg.children.iter().enumerate() {
                path.push((agg, index));
                if find_path(child, leaf_id, path) {
                    return true;
                }
                path.pop();
            }
            false
        }
    }
}
