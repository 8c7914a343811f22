//! Document model and canonical serialization.
//!
//! A fetched payload is *expected* to be a JSON object but nothing enforces
//! it. [`Document::parse`] makes that an explicit branch: either the bytes are
//! a top-level object ([`Document::Parsed`]) or they are kept verbatim
//! ([`Document::Unparseable`]). Arrays, scalars and `null` are syntactically
//! valid JSON but land in the unparseable branch.
//!
//! ## Canonical forms
//!
//! - **Canonical bytes**: compact encoding, object keys sorted recursively.
//!   Two logically equal mappings always encode to identical bytes.
//! - **Pretty bytes**: same key order, two-space indentation. This is the
//!   on-disk snapshot format.
//!
//! The reserved capture field ([`RESERVED_FIELD`]) is bookkeeping and never
//! takes part in a comparison.

use crate::errors::{Result, RoapidError};
use serde_json::{Map, Value};

/// Field injected at persist time holding the RFC 3339 capture instant.
pub const RESERVED_FIELD: &str = "roLastUpdated";

/// A JSON object keyed by field name.
pub type JsonMap = Map<String, Value>;

/// A payload classified by whether it is a top-level JSON object.
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    Parsed(JsonMap),
    Unparseable(Vec<u8>),
}

impl Document {
    /// Classify raw bytes. Never fails.
    pub fn parse(bytes: &[u8]) -> Self {
        match serde_json::from_slice::<Value>(bytes) {
            Ok(Value::Object(map)) => Document::Parsed(map),
            _ => Document::Unparseable(bytes.to_vec()),
        }
    }

    /// Strict variant for callers that must have an object.
    ///
    /// # Errors
    ///
    /// Returns `RoapidError::Format` naming what was found instead.
    pub fn parse_object(bytes: &[u8]) -> Result<JsonMap> {
        match serde_json::from_slice::<Value>(bytes) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(RoapidError::Format {
                message: format!("found {} at top level", json_kind(&other)),
            }),
            Err(e) => Err(RoapidError::Format {
                message: e.to_string(),
            }),
        }
    }

    pub fn is_parsed(&self) -> bool {
        matches!(self, Document::Parsed(_))
    }

    /// Consume the document, keeping only the object form.
    pub fn into_object(self) -> Option<JsonMap> {
        match self {
            Document::Parsed(map) => Some(map),
            Document::Unparseable(_) => None,
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Remove the reserved field, returning its previous value.
pub fn strip_reserved(map: &mut JsonMap) -> Option<Value> {
    map.remove(RESERVED_FIELD)
}

/// Insert or overwrite the reserved field with a capture timestamp.
pub fn stamp(map: &mut JsonMap, captured_at: impl Into<String>) {
    map.insert(RESERVED_FIELD.to_string(), Value::String(captured_at.into()));
}

/// Compact, key-sorted encoding used for equality checks.
///
/// # Errors
///
/// Returns `RoapidError::Serialization` if encoding fails.
pub fn canonical_bytes(map: &JsonMap) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(&sorted_object(map))?)
}

/// Indented, key-sorted encoding used for persisted snapshots.
///
/// # Errors
///
/// Returns `RoapidError::Serialization` if encoding fails.
pub fn pretty_bytes(map: &JsonMap) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(&sorted_object(map))?)
}

// serde_json's Map is a BTreeMap unless `preserve_order` gets unified in by
// some other crate, so sort explicitly.
fn sorted_object(map: &JsonMap) -> Value {
    let mut entries: Vec<(&String, &Value)> = map.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    Value::Object(
        entries
            .into_iter()
            .map(|(k, v)| (k.clone(), sorted_value(v)))
            .collect(),
    )
}

fn sorted_value(value: &Value) -> Value {
    match value {
        Value::Object(map) => sorted_object(map),
        Value::Array(items) => Value::Array(items.iter().map(sorted_value).collect()),
        other => other.clone(),
    }
}

/// Which path a comparison took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareMode {
    /// Both sides parsed; canonical encodings compared with the reserved
    /// field removed
    Canonical,
    /// Stored bytes were not a JSON object; raw bytes compared
    RawStored,
    /// New payload was not a JSON object; raw bytes compared
    RawIncoming,
}

/// Verdict of comparing a stored snapshot against a new payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Comparison {
    pub changed: bool,
    pub mode: CompareMode,
}

/// Compare stored snapshot bytes with a new payload, ignoring the reserved
/// field.
///
/// Parse failures are not errors: either side failing to parse as an object
/// degrades to raw byte equality against the original stored bytes.
///
/// # Errors
///
/// Returns `RoapidError::Serialization` only if re-encoding a parsed map
/// fails.
pub fn compare(stored: &[u8], incoming: &[u8]) -> Result<Comparison> {
    let mut stored_map = match Document::parse(stored) {
        Document::Parsed(map) => map,
        Document::Unparseable(_) => {
            return Ok(Comparison {
                changed: stored != incoming,
                mode: CompareMode::RawStored,
            })
        }
    };
    strip_reserved(&mut stored_map);
    let stored_canonical = canonical_bytes(&stored_map)?;

    let mut incoming_map = match Document::parse(incoming) {
        Document::Parsed(map) => map,
        Document::Unparseable(_) => {
            return Ok(Comparison {
                changed: stored != incoming,
                mode: CompareMode::RawIncoming,
            })
        }
    };
    strip_reserved(&mut incoming_map);
    let incoming_canonical = canonical_bytes(&incoming_map)?;

    Ok(Comparison {
        changed: stored_canonical != incoming_canonical,
        mode: CompareMode::Canonical,
    })
}
