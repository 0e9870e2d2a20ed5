//! Frozen identifiers and constants of the meeting commitment scheme.
//!
//! Everything in this module is part of the wire contract shared with other
//! implementations (for example a browser client producing proofs for the same
//! records). Changing any value invalidates every previously issued root and
//! proof, so new layouts must ship under a new [`SCHEME_ID`].

/// Identifier of the leaf encoding, node hashing and padding layout.
///
/// * leaves hash `salt? || "\n" || agenda || "\n" || notes` with SHA-256,
/// * inner nodes hash the raw 64-byte concatenation `left || right`,
/// * a lone rightmost node is paired with a copy of itself.
pub const SCHEME_ID: &str = "meeting-merkle/sha256/dup-last/v1";

/// Size in bytes of every digest (SHA-256 output).
pub const DIGEST_SIZE: usize = 32;

/// Length of the lowercase hexadecimal rendering of a digest.
pub const DIGEST_HEX_LEN: usize = DIGEST_SIZE * 2;

/// Separator placed between the salt, agenda and notes fields of a leaf.
pub const FIELD_SEPARATOR: char = '\n';

/// JSON label of a sibling sitting to the left of the proved node.
pub const POSITION_LEFT: &str = "left";

/// JSON label of a sibling sitting to the right of the proved node.
pub const POSITION_RIGHT: &str = "right";

/// Environment variable consulted for log directives by the command line tool.
pub const LOG_ENV_VAR: &str = "RUST_LOG";

/// Log directives applied when [`LOG_ENV_VAR`] is unset or blank.
pub const DEFAULT_LOG_DIRECTIVES: &str = "meeting_merkle=info";

/// Resolves the log directives from an optional environment value.
///
/// Blank values fall back to [`DEFAULT_LOG_DIRECTIVES`].
pub fn log_directives(env_value: Option<String>) -> String {
    match env_value {
        Some(value) if !value.trim().is_empty() => value,
        _ => DEFAULT_LOG_DIRECTIVES.to_owned(),
    }
}
