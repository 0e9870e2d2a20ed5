use tracing::{debug, warn};

use super::tree::MerkleTree;
use super::types::{MembershipProof, Position, ProofStep};
use crate::errors::{MeetingResult, ValidationError};
use crate::hash::{hash_pair, Hash};
use crate::record::{Item, Record};

/// Builds the tree for `items` and opens the leaf at `index`.
pub fn generate_proof(
    items: &[Item],
    index: usize,
    salt: Option<&str>,
) -> MeetingResult<MembershipProof> {
    let tree = MerkleTree::build(items, salt)?;
    let proof = tree.prove(index)?;
    debug!(index, steps = proof.proof.len(), root = %proof.root, "generated membership proof");
    Ok(proof)
}

/// Recomputes the root reached by folding `proof` upward from `leaf`.
pub fn compute_root_from_path(leaf: &Hash, proof: &[ProofStep]) -> Hash {
    proof.iter().fold(*leaf, |current, step| match step.position {
        Position::Left => hash_pair(&step.hash, &current),
        Position::Right => hash_pair(&current, &step.hash),
    })
}

/// Returns `true` when `proof` folds `leaf` up to `expected_root`.
///
/// A wrong path or root is a `false` result, never an error.
pub fn verify(leaf: &Hash, proof: &[ProofStep], expected_root: &Hash) -> bool {
    let computed = compute_root_from_path(leaf, proof);
    let matches = computed.ct_eq(expected_root);
    debug!(steps = proof.len(), matches, "verified membership path");
    matches
}

/// [`verify`] over hex-encoded leaf and root digests.
///
/// Malformed hex is a [`ValidationError`]; a well-formed mismatch is
/// `Ok(false)`. Step hashes are already typed, so a malformed step is rejected
/// when the proof itself is parsed.
pub fn verify_hex(
    leaf: &str,
    proof: &[ProofStep],
    expected_root: &str,
) -> Result<bool, ValidationError> {
    let leaf = Hash::from_hex(leaf, "leaf")?;
    let expected_root = Hash::from_hex(expected_root, "expected root")?;
    Ok(verify(&leaf, proof, &expected_root))
}

/// Root digest of a validated record.
pub fn compute_root(record: &Record) -> MeetingResult<Hash> {
    Ok(record.tree()?.root())
}

/// Rebuilds the record's tree and compares its root to `expected_root`.
///
/// A root string that is not a 64-character hex digest yields `false`.
pub fn verify_record(record: &Record, expected_root: &str) -> bool {
    let expected = match Hash::from_hex(expected_root, "expected root") {
        Ok(hash) => hash,
        Err(err) => {
            warn!(%err, "rejecting malformed expected root");
            return false;
        }
    };
    match compute_root(record) {
        Ok(root) => root.ct_eq(&expected),
        Err(err) => {
            warn!(%err, "record tree could not be rebuilt");
            false
        }
    }
}
