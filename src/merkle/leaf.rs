use crate::config::FIELD_SEPARATOR;
use crate::hash::{hash, Hash};
use crate::record::Item;

/// Canonical leaf payload.
///
/// `agenda \n notes` without a salt, `salt \n agenda \n notes` with one. An
/// empty salt is treated as absent so that records produced by clients that
/// test salt truthiness hash identically.
pub fn leaf_payload(item: &Item, salt: Option<&str>) -> Vec<u8> {
    let salt = salt.filter(|salt| !salt.is_empty());
    let capacity = salt.map_or(0, |salt| salt.len() + 1) + item.agenda.len() + 1 + item.notes.len();
    let mut payload = String::with_capacity(capacity);
    if let Some(salt) = salt {
        payload.push_str(salt);
        payload.push(FIELD_SEPARATOR);
    }
    payload.push_str(&item.agenda);
    payload.push(FIELD_SEPARATOR);
    payload.push_str(&item.notes);
    payload.into_bytes()
}

/// SHA-256 of the canonical leaf payload.
pub fn hash_leaf(item: &Item, salt: Option<&str>) -> Hash {
    hash(&leaf_payload(item, salt))
}

/// Hex rendering of [`hash_leaf`].
pub fn compute_leaf_hash(item: &Item, salt: Option<&str>) -> String {
    hash_leaf(item, salt).to_hex()
}
