//! Portable proof documents exchanged between provers and verifiers.
//!
//! A document bundles a membership proof with the item it proves and the
//! record metadata needed to recompute the leaf:
//!
//! ```json
//! {"meeting_id": "...", "timestamp": "...", "salt": "...", "index": 0,
//!  "item": {"agenda": "...", "notes": "..."}, "leaf": "<hex>",
//!  "proof": [{"position": "right", "hash": "<hex>"}], "root": "<hex>"}
//! ```
//!
//! Field names and order are part of the interoperability contract. `salt` is
//! omitted when the record has none.

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::errors::{MeetingResult, ValidationError};
use crate::hash::Hash;
use crate::merkle::{compute_root_from_path, hash_leaf, MembershipProof, Position, ProofStep};
use crate::record::{
    canonical_optional_string, canonical_string, ensure_object, parse_item, validate_timestamp,
    Item, Record,
};

/// Self-contained membership proof for one record item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProofDocument {
    pub meeting_id: String,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salt: Option<String>,
    pub index: usize,
    pub item: Item,
    pub leaf: Hash,
    pub proof: Vec<ProofStep>,
    pub root: Hash,
}

/// Outcome of checking a [`ProofDocument`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DocumentReport {
    /// Index claimed by the document.
    pub index: usize,
    /// Leaf recomputed from the canonical item and salt.
    pub computed_leaf: Hash,
    /// Root reached by folding the path from `computed_leaf`.
    pub computed_root: Hash,
    /// Whether `computed_leaf` equals the declared leaf.
    pub leaf_ok: bool,
    /// Whether `computed_root` equals the declared root.
    pub root_ok: bool,
}

impl DocumentReport {
    /// `true` when both the item binding and the path check succeeded.
    pub fn verified(&self) -> bool {
        self.leaf_ok && self.root_ok
    }
}

impl ProofDocument {
    /// Proves membership of the item at `index` in `record`.
    pub fn from_record(record: &Record, index: usize) -> MeetingResult<Self> {
        let proof = record.tree()?.prove(index)?;
        Ok(Self::from_parts(record, proof))
    }

    fn from_parts(record: &Record, proof: MembershipProof) -> Self {
        Self {
            meeting_id: record.id().to_owned(),
            timestamp: record.timestamp().to_owned(),
            salt: record.salt().map(str::to_owned),
            index: proof.index,
            item: record.items()[proof.index].clone(),
            leaf: proof.leaf,
            proof: proof.proof,
            root: proof.root,
        }
    }

    /// Validates parsed JSON into a document.
    ///
    /// Metadata and the item go through the same canonicalization as record
    /// input; digests must be 64 hex characters.
    pub fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let doc = ensure_object(value, "Proof document")?;

        let index = doc
            .get("index")
            .and_then(Value::as_u64)
            .and_then(|index| usize::try_from(index).ok())
            .ok_or(ValidationError::InvalidProofIndex)?;
        let steps = doc
            .get("proof")
            .and_then(Value::as_array)
            .ok_or(ValidationError::ProofNotArray)?;

        let meeting_id = canonical_string(
            doc.get("meeting_id").or_else(|| doc.get("id")),
            "meeting_id",
        )?;
        let timestamp = validate_timestamp(canonical_string(doc.get("timestamp"), "timestamp")?)?;
        let salt = canonical_optional_string(doc.get("salt"), "salt")?;
        let item = parse_item(doc.get("item").unwrap_or(&Value::Null), "item")?;

        let leaf = parse_hash(doc.get("leaf"), "leaf")?;
        let proof = steps
            .iter()
            .enumerate()
            .map(|(step, raw)| parse_step(step, raw))
            .collect::<Result<Vec<_>, _>>()?;
        let root = parse_hash(doc.get("root"), "root")?;

        Ok(Self {
            meeting_id,
            timestamp,
            salt,
            index,
            item,
            leaf,
            proof,
            root,
        })
    }

    /// Parses JSON text into a document.
    pub fn from_json_str(text: &str) -> Result<Self, ValidationError> {
        let value: Value =
            serde_json::from_str(text).map_err(|err| ValidationError::invalid_json(&err))?;
        Self::from_value(&value)
    }

    /// The bare membership proof carried by this document.
    pub fn membership_proof(&self) -> MembershipProof {
        MembershipProof {
            index: self.index,
            leaf: self.leaf,
            proof: self.proof.clone(),
            root: self.root,
        }
    }

    /// Recomputes the leaf from the item and folds the path to the root.
    ///
    /// Mismatches are reported through [`DocumentReport`], never as errors.
    pub fn verify(&self) -> DocumentReport {
        let computed_leaf = hash_leaf(&self.item, self.salt.as_deref());
        let computed_root = compute_root_from_path(&computed_leaf, &self.proof);
        let report = DocumentReport {
            index: self.index,
            computed_leaf,
            computed_root,
            leaf_ok: computed_leaf.ct_eq(&self.leaf),
            root_ok: computed_root.ct_eq(&self.root),
        };
        debug!(
            index = self.index,
            leaf_ok = report.leaf_ok,
            root_ok = report.root_ok,
            "checked proof document"
        );
        report
    }
}

fn parse_hash(value: Option<&Value>, context: &'static str) -> Result<Hash, ValidationError> {
    let raw = value
        .and_then(Value::as_str)
        .ok_or(ValidationError::MalformedHash { context })?;
    Hash::from_hex(raw, context)
}

fn parse_step(step: usize, value: &Value) -> Result<ProofStep, ValidationError> {
    let fields = ensure_object(value, &format!("Proof step {step}"))?;
    let position = fields
        .get("position")
        .and_then(Value::as_str)
        .and_then(Position::from_label)
        .ok_or(ValidationError::InvalidStepPosition { step })?;
    let hash = parse_hash(fields.get("hash"), "proof hash")?;
    Ok(ProofStep::new(position, hash))
}

/// Parses and checks a proof document in one call.
///
/// Malformed documents are errors; a document that parses but does not verify
/// yields a report whose [`DocumentReport::verified`] is `false`.
pub fn verify_document_str(text: &str) -> Result<DocumentReport, ValidationError> {
    Ok(ProofDocument::from_json_str(text)?.verify())
}
