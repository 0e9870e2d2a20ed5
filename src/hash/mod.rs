//! SHA-256 primitives for the meeting commitment scheme.
//!
//! * [`Hash`] – fixed 32-byte digest with a lowercase hexadecimal wire form.
//! * [`Hasher`] – streaming helper wrapping the `sha2` implementation.
//! * [`hash`] / [`hash_pair`] – one-shot helpers for leaf payloads and inner
//!   nodes. Inner nodes always hash raw bytes, never hex strings.

mod digest;
mod hasher;

pub use digest::Hash;
pub use hasher::{hash, hash_pair, Hasher};
