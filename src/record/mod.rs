//! Parse-and-validate boundary for meeting records.
//!
//! Raw JSON never reaches the hashing layer. [`parse_record`] checks every
//! field, canonicalizes newline sequences and returns a [`Record`] whose item
//! list is guaranteed to be non-empty. Any failure aborts the whole parse; no
//! partially validated record is ever produced.

mod canonical;
mod timestamp;

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::errors::{MeetingError, MeetingResult, ValidationError};
use crate::hash::Hash;
use crate::merkle::{build_tree, hash_leaf, MerkleTree};

pub use canonical::canonicalize_text;
pub(crate) use canonical::{canonical_optional_string, canonical_string, ensure_object, parse_item};
pub use timestamp::parse_timestamp;

/// One agenda entry together with its notes.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    pub agenda: String,
    pub notes: String,
}

impl Item {
    /// Creates an item, canonicalizing both fields.
    pub fn new(agenda: impl AsRef<str>, notes: impl AsRef<str>) -> Self {
        Self {
            agenda: canonicalize_text(agenda.as_ref()),
            notes: canonicalize_text(notes.as_ref()),
        }
    }
}

/// Validated meeting record.
///
/// Serialises with the `meeting_id` key used by the input format.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Record {
    #[serde(rename = "meeting_id")]
    id: String,
    timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    salt: Option<String>,
    items: Vec<Item>,
}

impl Record {
    /// Builds a record from typed parts, applying the same rules as
    /// [`parse_record`].
    pub fn new(
        id: impl AsRef<str>,
        timestamp: impl AsRef<str>,
        salt: Option<&str>,
        items: Vec<Item>,
    ) -> Result<Self, ValidationError> {
        let timestamp = validate_timestamp(canonicalize_text(timestamp.as_ref()))?;
        if items.is_empty() {
            return Err(ValidationError::EmptyItems);
        }
        let items = items
            .into_iter()
            .map(|item| Item::new(item.agenda, item.notes))
            .collect();
        Ok(Self {
            id: canonicalize_text(id.as_ref()),
            timestamp,
            salt: salt.map(canonicalize_text),
            items,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn salt(&self) -> Option<&str> {
        self.salt.as_deref()
    }

    /// Items in commitment order; never empty.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Builds the Merkle tree committing to this record.
    pub fn tree(&self) -> MeetingResult<MerkleTree> {
        Ok(build_tree(&self.items, self.salt())?)
    }

    /// Leaf digest of the item at `index`, if it exists.
    pub fn leaf(&self, index: usize) -> Option<Hash> {
        self.items
            .get(index)
            .map(|item| hash_leaf(item, self.salt()))
    }
}

impl TryFrom<&Value> for Record {
    type Error = ValidationError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        parse_record(value)
    }
}

pub(crate) fn validate_timestamp(value: String) -> Result<String, ValidationError> {
    if parse_timestamp(&value).is_none() {
        return Err(ValidationError::InvalidTimestamp { path: "timestamp" });
    }
    Ok(value)
}

/// Validates parsed JSON and produces a canonical [`Record`].
///
/// The identifier is read from `meeting_id`, falling back to `id`. Unknown
/// keys are ignored.
pub fn parse_record(value: &Value) -> Result<Record, ValidationError> {
    let meeting = ensure_object(value, "Meeting record")?;
    let id = canonical_string(
        meeting.get("meeting_id").or_else(|| meeting.get("id")),
        "meeting_id",
    )?;
    let timestamp = validate_timestamp(canonical_string(meeting.get("timestamp"), "timestamp")?)?;
    let salt = canonical_optional_string(meeting.get("salt"), "salt")?;

    let entries = meeting
        .get("items")
        .and_then(Value::as_array)
        .ok_or(ValidationError::ItemsNotArray)?;
    if entries.is_empty() {
        return Err(ValidationError::EmptyItems);
    }
    let items = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| parse_item(entry, &format!("items[{index}]")))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Record {
        id,
        timestamp,
        salt,
        items,
    })
}

/// Parses JSON text into a validated [`Record`].
pub fn parse_record_str(text: &str) -> Result<Record, ValidationError> {
    let value: Value = serde_json::from_str(text).map_err(|err| ValidationError::invalid_json(&err))?;
    parse_record(&value)
}

/// Reads and validates a record file.
pub fn load_record(path: impl AsRef<Path>) -> MeetingResult<Record> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|err| MeetingError::Io {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    let record = parse_record_str(&raw)?;
    debug!(
        path = %path.display(),
        meeting_id = %record.id(),
        items = record.items().len(),
        "loaded meeting record"
    );
    Ok(record)
}
