use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use tracing::{debug, trace};

use super::leaf::hash_leaf;
use super::types::{MembershipProof, Position, ProofStep};
use crate::config::SCHEME_ID;
use crate::errors::TreeError;
use crate::hash::{hash_pair, Hash};
use crate::record::Item;

/// Number of children per internal node.
const ARITY: usize = 2;

/// Binary SHA-256 Merkle tree storing every level for subsequent openings.
///
/// Missing children on the rightmost edge are duplicated from the last present
/// node, so a level of `n` nodes always produces `ceil(n / 2)` parents.
///
/// ```text
///            root
///          /      \
///        p0        p1
///       /  \      /  \
///      l0  l1    l2  (l2)
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MerkleTree {
    root: Hash,
    layers: Vec<Vec<Hash>>,
}

impl MerkleTree {
    /// Hashes every item into a leaf and folds the leaves up to the root.
    pub fn build(items: &[Item], salt: Option<&str>) -> Result<Self, TreeError> {
        let leaves = items.iter().map(|item| hash_leaf(item, salt)).collect();
        Self::from_leaves(leaves)
    }

    /// Builds the tree from precomputed leaf digests.
    pub fn from_leaves(leaves: Vec<Hash>) -> Result<Self, TreeError> {
        let Some(&first) = leaves.first() else {
            return Err(TreeError::EmptyItems);
        };

        let mut root = first;
        let mut layers = vec![leaves];
        while let Some(current) = layers.last().filter(|layer| layer.len() > 1) {
            let next: Vec<Hash> = current
                .chunks(ARITY)
                .map(|pair| {
                    let left = &pair[0];
                    hash_pair(left, pair.get(1).unwrap_or(left))
                })
                .collect();
            trace!(width = next.len(), "folded merkle layer");
            root = next[0];
            layers.push(next);
        }

        debug!(
            leaves = layers[0].len(),
            depth = layers.len() - 1,
            root = %root,
            "built meeting merkle tree"
        );
        Ok(Self { root, layers })
    }

    /// Root digest committing to the ordered item list.
    pub fn root(&self) -> Hash {
        self.root
    }

    /// Leaf digests in item order (`layers()[0]`).
    pub fn leaves(&self) -> &[Hash] {
        &self.layers[0]
    }

    /// Every level from the leaves up to the single-node root level.
    pub fn layers(&self) -> &[Vec<Hash>] {
        &self.layers
    }

    pub fn leaf_count(&self) -> usize {
        self.layers[0].len()
    }

    /// Distance from the leaves to the root; `0` for a single item.
    pub fn depth(&self) -> usize {
        self.layers.len() - 1
    }

    /// Authentication path for the leaf at `index`, ordered leaf to root.
    pub fn open(&self, index: usize) -> Result<Vec<ProofStep>, TreeError> {
        if index >= self.leaf_count() {
            return Err(TreeError::IndexOutOfBounds {
                index,
                len: self.leaf_count(),
            });
        }

        let mut path = Vec::with_capacity(self.depth());
        let mut current = index;
        for layer in &self.layers[..self.depth()] {
            let step = if current % ARITY == 1 {
                ProofStep::new(Position::Left, layer[current - 1])
            } else {
                // A missing right sibling is the duplicated node itself.
                let sibling = layer.get(current + 1).unwrap_or(&layer[current]);
                ProofStep::new(Position::Right, *sibling)
            };
            path.push(step);
            current /= ARITY;
        }
        Ok(path)
    }

    /// Full membership proof (leaf, path and root) for `index`.
    pub fn prove(&self, index: usize) -> Result<MembershipProof, TreeError> {
        let proof = self.open(index)?;
        Ok(MembershipProof {
            index,
            leaf: self.layers[0][index],
            proof,
            root: self.root,
        })
    }
}

impl Serialize for MerkleTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("MerkleTree", 4)?;
        state.serialize_field("scheme", SCHEME_ID)?;
        state.serialize_field("root", &self.root)?;
        state.serialize_field("leaves", self.leaves())?;
        state.serialize_field("layers", &self.layers)?;
        state.end()
    }
}

/// Builds the tree for `items`, failing only when the list is empty.
pub fn build_tree(items: &[Item], salt: Option<&str>) -> Result<MerkleTree, TreeError> {
    MerkleTree::build(items, salt)
}
