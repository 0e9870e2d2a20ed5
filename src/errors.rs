//! Error taxonomy shared by the canonicalizer, the tree builder and the proof
//! verifier.
//!
//! Verification *failure* is never an error: a well-formed proof that does not
//! fold to the expected root is reported as `false`. The types below only cover
//! inputs that could not be interpreted at all.

use core::fmt;
use std::path::PathBuf;

/// Result alias used throughout the crate.
pub type MeetingResult<T> = core::result::Result<T, MeetingError>;

/// Input did not conform to the record or proof-document schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Value at `context` was not a JSON object.
    NotAnObject {
        /// Human readable location, e.g. `items[2]`.
        context: String,
    },
    /// Value at `path` was missing or not a string.
    NotAString {
        /// Field path, e.g. `items[2].notes`.
        path: String,
    },
    /// Timestamp did not parse as an ISO-8601 instant.
    InvalidTimestamp {
        /// Field path of the timestamp.
        path: &'static str,
    },
    /// `items` was missing or not an array.
    ItemsNotArray,
    /// `items` was an empty array.
    EmptyItems,
    /// A digest was not 64 hexadecimal characters.
    MalformedHash {
        /// Which digest was rejected (`leaf`, `proof hash`, `expected root`).
        context: &'static str,
    },
    /// Proof document index was missing, negative or fractional.
    InvalidProofIndex,
    /// Proof document `proof` field was not an array.
    ProofNotArray,
    /// Proof step carried a position other than `left`/`right`.
    InvalidStepPosition {
        /// Zero-based step number.
        step: usize,
    },
    /// Raw text was not valid JSON.
    InvalidJson {
        /// Message reported by the JSON parser.
        message: String,
    },
}

impl ValidationError {
    pub(crate) fn not_an_object(context: impl Into<String>) -> Self {
        ValidationError::NotAnObject {
            context: context.into(),
        }
    }

    pub(crate) fn not_a_string(path: impl Into<String>) -> Self {
        ValidationError::NotAString { path: path.into() }
    }

    pub(crate) fn invalid_json(err: &serde_json::Error) -> Self {
        ValidationError::InvalidJson {
            message: err.to_string(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::NotAnObject { context } => write!(f, "{context} must be an object"),
            ValidationError::NotAString { path } => write!(f, "{path} must be a string"),
            ValidationError::InvalidTimestamp { path } => {
                write!(f, "{path} must be an ISO-8601 timestamp")
            }
            ValidationError::ItemsNotArray => write!(f, "items must be an array"),
            ValidationError::EmptyItems => write!(f, "items must contain at least one entry"),
            ValidationError::MalformedHash { context } => {
                write!(f, "{context} must be a 32-byte hex string")
            }
            ValidationError::InvalidProofIndex => {
                write!(f, "Proof index must be a non-negative integer")
            }
            ValidationError::ProofNotArray => write!(f, "proof must be an array of steps"),
            ValidationError::InvalidStepPosition { step } => write!(
                f,
                "Proof step {step} must specify position \"left\" or \"right\""
            ),
            ValidationError::InvalidJson { message } => {
                write!(f, "Failed to parse JSON: {message}")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Structural violation while building a tree or opening a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// The builder was handed zero items.
    EmptyItems,
    /// Requested leaf does not exist.
    IndexOutOfBounds {
        /// Requested leaf index.
        index: usize,
        /// Number of leaves in the tree.
        len: usize,
    },
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::EmptyItems => write!(f, "Cannot build Merkle tree with no items"),
            TreeError::IndexOutOfBounds { index, .. } => {
                write!(f, "Leaf index {index} is out of bounds")
            }
        }
    }
}

impl std::error::Error for TreeError {}

/// Unified error surfaced by the public API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeetingError {
    /// Schema violation in a record or proof document.
    Validation(ValidationError),
    /// Tree construction or opening failed.
    Tree(TreeError),
    /// A record or proof file could not be read.
    Io {
        /// File that failed to load.
        path: PathBuf,
        /// Operating system message.
        message: String,
    },
}

impl MeetingError {
    /// Returns the validation error when this is a schema violation.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            MeetingError::Validation(err) => Some(err),
            _ => None,
        }
    }

    /// Returns the tree error when this is a structural violation.
    pub fn as_tree(&self) -> Option<&TreeError> {
        match self {
            MeetingError::Tree(err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for MeetingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeetingError::Validation(err) => fmt::Display::fmt(err, f),
            MeetingError::Tree(err) => fmt::Display::fmt(err, f),
            MeetingError::Io { path, message } => {
                write!(f, "failed to read {}: {message}", path.display())
            }
        }
    }
}

impl std::error::Error for MeetingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MeetingError::Validation(err) => Some(err),
            MeetingError::Tree(err) => Some(err),
            MeetingError::Io { .. } => None,
        }
    }
}

impl From<ValidationError> for MeetingError {
    fn from(err: ValidationError) -> Self {
        MeetingError::Validation(err)
    }
}

impl From<TreeError> for MeetingError {
    fn from(err: TreeError) -> Self {
        MeetingError::Tree(err)
    }
}
