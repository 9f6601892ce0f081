//! Merge-with-defaults loading
//!
//! A persisted document may predate fields added by later versions. On
//! load it is merged into the default document:
//! - nested records present in both are merged field by field, recursively
//! - any other persisted field replaces the default when the JSON types
//!   match, otherwise the default is kept
//! - fields unknown to the default, or whose default is null, are taken
//!   from the persisted record as-is
//!
//! A field can have the right JSON type and still not deserialize, such as
//! an unknown week layout or a negative weekday. Such fields are dropped one
//! at a time until the rest loads: scalars fall back to their default,
//! records are salvaged field by field and lists keep their readable items.

use super::document::AppDocument;
use crate::error::Result;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::mem::discriminant;

/// Merge `persisted` into a copy of `default`
pub fn merge_with_defaults(default: &Value, persisted: Value) -> Value {
    match (default, persisted) {
        (Value::Object(default_fields), Value::Object(persisted_fields)) => {
            Value::Object(merge_records(default_fields, persisted_fields))
        }
        (Value::Null, persisted) => persisted,
        (default, persisted) if discriminant(default) == discriminant(&persisted) => persisted,
        (default, persisted) => {
            tracing::warn!(
                "Persisted value {} does not match default type, keeping default",
                persisted
            );
            default.clone()
        }
    }
}

fn merge_records(default: &Map<String, Value>, persisted: Map<String, Value>) -> Map<String, Value> {
    let mut result = default.clone();

    for (key, value) in persisted {
        let merged = match default.get(&key) {
            Some(default_value) => merge_with_defaults(default_value, value),
            None => value,
        };
        result.insert(key, merged);
    }

    result
}

/// Parse a persisted document and complete it with current defaults
///
/// A persisted value that is not a JSON object yields the default document.
pub fn load_document(raw: &str) -> Result<AppDocument> {
    let persisted: Value = serde_json::from_str(raw)?;

    if !persisted.is_object() {
        tracing::warn!("Persisted document is not an object, using defaults");
        return Ok(AppDocument::default());
    }

    let default = serde_json::to_value(AppDocument::default())?;
    let merged = merge_with_defaults(&default, persisted);

    if let Err(e) = AppDocument::deserialize(&merged) {
        tracing::warn!("Persisted document has unreadable fields, salvaging: {}", e);
        let mut salvaged = default;
        salvage(&mut salvaged, "", merged);
        return Ok(serde_json::from_value(salvaged)?);
    }

    Ok(serde_json::from_value(merged)?)
}

fn loads(document: &Value) -> bool {
    AppDocument::deserialize(document).is_ok()
}

/// Move `value` into `document` at `pointer`, keeping only what still loads
///
/// `document` loads before the call and still loads after it.
fn salvage(document: &mut Value, pointer: &str, value: Value) {
    let Some(slot) = document.pointer_mut(pointer) else {
        return;
    };
    let previous = std::mem::replace(slot, value.clone());
    if loads(document) {
        return;
    }
    put(document, pointer, previous.clone());

    match value {
        Value::Object(fields) if previous.is_object() => {
            for (key, field) in fields {
                let child = format!("{}/{}", pointer, key.replace('~', "~0").replace('/', "~1"));
                let added = document.pointer(&child).is_none();
                if added {
                    if let Some(Value::Object(record)) = document.pointer_mut(pointer) {
                        record.insert(key.clone(), Value::Null);
                    }
                }

                salvage(document, &child, field);

                if added && !loads(document) {
                    if let Some(Value::Object(record)) = document.pointer_mut(pointer) {
                        record.remove(&key);
                    }
                }
            }
        }
        Value::Array(items) => {
            put(document, pointer, Value::Array(Vec::new()));
            if !loads(document) {
                put(document, pointer, previous);
                return;
            }

            for item in items {
                let Some(Value::Array(list)) = document.pointer_mut(pointer) else {
                    return;
                };
                list.push(item);
                if !loads(document) {
                    if let Some(Value::Array(list)) = document.pointer_mut(pointer) {
                        if let Some(dropped) = list.pop() {
                            tracing::warn!("Dropped unreadable entry in {}: {}", pointer, dropped);
                        }
                    }
                }
            }
        }
        value => {
            tracing::warn!("Dropped unreadable value at {}: {}", pointer, value);
        }
    }
}

fn put(document: &mut Value, pointer: &str, value: Value) {
    if let Some(slot) = document.pointer_mut(pointer) {
        *slot = value;
    }
}
