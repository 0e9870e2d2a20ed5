//! Tamper-evident fingerprints for meeting records.
//!
//! A meeting record is an ordered list of agenda/notes items. The crate
//! canonicalizes the record, hashes each item into a SHA-256 leaf and folds the
//! leaves into a binary Merkle tree whose root fingerprints the whole record.
//! Membership proofs let a holder show that one item belongs to a record with a
//! known root without revealing the other items.
//!
//! ```
//! use meeting_merkle::{generate_proof, parse_record_str, verify};
//!
//! let record = parse_record_str(r#"{
//!     "meeting_id": "Team-Weekly",
//!     "timestamp": "2025-09-18T10:00:00Z",
//!     "items": [
//!         {"agenda": "Budget", "notes": "Approved."},
//!         {"agenda": "Hiring", "notes": "Deferred."}
//!     ]
//! }"#)?;
//! let root = record.tree()?.root();
//! let proof = generate_proof(record.items(), 1, record.salt())?;
//! assert!(verify(&proof.leaf, &proof.proof, &root));
//! # Ok::<(), meeting_merkle::MeetingError>(())
//! ```
//!
//! All operations are pure, synchronous and allocation-bounded by the record
//! size. Every public type is a plain value, so callers may share records and
//! proofs across threads freely.

pub mod config;
pub mod document;
pub mod errors;
pub mod hash;
pub mod merkle;
pub mod record;

pub use document::{verify_document_str, DocumentReport, ProofDocument};
pub use errors::{MeetingError, MeetingResult, TreeError, ValidationError};
pub use hash::Hash;
pub use merkle::{
    build_tree, compute_leaf_hash, compute_root, compute_root_from_path, generate_proof,
    hash_leaf, verify, verify_hex, verify_record, MembershipProof, MerkleTree, Position,
    ProofStep,
};
pub use record::{
    canonicalize_text, load_record, parse_record, parse_record_str, Item, Record,
};
