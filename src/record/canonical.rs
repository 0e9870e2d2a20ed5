use serde_json::{Map, Value};

use super::Item;
use crate::errors::ValidationError;

/// Rewrites every `\r\n` and lone `\r` sequence to `\n`.
pub fn canonicalize_text(value: &str) -> String {
    if !value.contains('\r') {
        return value.to_owned();
    }
    value.replace("\r\n", "\n").replace('\r', "\n")
}

pub(crate) fn ensure_object<'a>(
    value: &'a Value,
    context: &str,
) -> Result<&'a Map<String, Value>, ValidationError> {
    value
        .as_object()
        .ok_or_else(|| ValidationError::not_an_object(context))
}

/// Type-checks a required string field and canonicalizes its newlines.
pub(crate) fn canonical_string(value: Option<&Value>, path: &str) -> Result<String, ValidationError> {
    match value {
        Some(Value::String(text)) => Ok(canonicalize_text(text)),
        _ => Err(ValidationError::not_a_string(path)),
    }
}

/// Like [`canonical_string`] but an absent key yields `None`.
///
/// An explicit `null` is still rejected.
pub(crate) fn canonical_optional_string(
    value: Option<&Value>,
    path: &str,
) -> Result<Option<String>, ValidationError> {
    match value {
        None => Ok(None),
        Some(_) => canonical_string(value, path).map(Some),
    }
}

/// Validates one `{agenda, notes}` object reported under `context`.
pub(crate) fn parse_item(value: &Value, context: &str) -> Result<Item, ValidationError> {
    let item = ensure_object(value, context)?;
    Ok(Item {
        agenda: canonical_string(item.get("agenda"), &format!("{context}.agenda"))?,
        notes: canonical_string(item.get("notes"), &format!("{context}.notes"))?,
    })
}
