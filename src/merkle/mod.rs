//! Merkle commitment layer for meeting records.
//!
//! The module fixes the following protocol knobs:
//!
//! * **Arity:** binary. A lone rightmost node is paired with a copy of itself
//!   (duplicate-last padding), never with a zero digest and never promoted to
//!   the next level unchanged.
//! * **Leaf layout:** `salt \n agenda \n notes` (salt omitted when absent),
//!   UTF-8 encoded, hashed with SHA-256. No length prefix or index tag.
//! * **Node layout:** SHA-256 over the raw 64-byte concatenation of the left
//!   and right child digests.
//! * **Paths:** ordered leaf to root; every step names the side its sibling
//!   occupies so verifiers never re-derive parity from the index.

mod leaf;
mod proof;
mod tree;
mod types;

pub use leaf::{compute_leaf_hash, hash_leaf, leaf_payload};
pub use proof::{
    compute_root, compute_root_from_path, generate_proof, verify, verify_hex, verify_record,
};
pub use tree::{build_tree, MerkleTree};
pub use types::{MembershipProof, Position, ProofStep};
