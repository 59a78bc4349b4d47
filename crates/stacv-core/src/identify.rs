//! # STAC Object Identification
//!
//! Derives the [`ObjectKind`] and [`SpecVersion`] of a parsed document.
//!
//! The `type` field is authoritative when it names a STAC kind. Documents
//! from the pre-1.0 line carry no `type` on catalogs and collections, so
//! structural markers decide: `geometry` with `properties` is an item,
//! `extent` is a collection, and any remaining object with an `id` is a
//! catalog. An unrecognized `type` (e.g. `FeatureCollection`) is
//! [`ObjectKind::Unknown`].
//!
//! The kind is identified before the version is read, so a document with a
//! missing `stac_version` still reports what it is.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::StacError;

/// The semantic type of a STAC object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ObjectKind {
    Item,
    Collection,
    Catalog,
    Unknown,
}

impl ObjectKind {
    /// File stem of the core schema for this kind (`item`, `collection`,
    /// `catalog`), or `None` when no core schema exists.
    pub fn schema_stem(&self) -> Option<&'static str> {
        match self {
            Self::Item => Some("item"),
            Self::Collection => Some("collection"),
            Self::Catalog => Some("catalog"),
            Self::Unknown => None,
        }
    }

    /// Whether objects of this kind can declare child or item links.
    pub fn has_children(&self) -> bool {
        matches!(self, Self::Collection | Self::Catalog)
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Item => "ITEM",
            Self::Collection => "COLLECTION",
            Self::Catalog => "CATALOG",
            Self::Unknown => "UNKNOWN",
        };
        f.write_str(s)
    }
}

/// The `stac_version` declared by a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpecVersion(String);

impl SpecVersion {
    /// Wrap a version string as found in a document.
    pub fn new(version: impl Into<String>) -> Self {
        Self(version.into())
    }

    /// The version exactly as declared.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `(major, minor, patch)` ignoring any pre-release suffix, or `None`
    /// when the string is not a dotted release number.
    pub fn release(&self) -> Option<(u64, u64, u64)> {
        let core = self.0.split(['-', '+']).next()?;
        let mut parts = core.split('.');
        let major = parts.next()?.parse().ok()?;
        let minor = parts.next()?.parse().ok()?;
        let patch = parts.next()?.parse().ok()?;
        if parts.next().is_some() {
            return None;
        }
        Some((major, minor, patch))
    }

    /// Pre-1.0 release line.
    pub fn is_legacy(&self) -> bool {
        matches!(self.release(), Some((0, _, _)))
    }
}

impl fmt::Display for SpecVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identify both kind and version.
///
/// # Errors
///
/// `TypeIdentification` when no kind can be established, `MissingVersion`
/// when `stac_version` is absent or not a non-empty string.
pub fn identify(doc: &Value) -> Result<(ObjectKind, SpecVersion), StacError> {
    let kind = identify_kind(doc)?;
    let version = read_version(doc)?;
    Ok((kind, version))
}

/// Identify the kind of a STAC document.
pub fn identify_kind(doc: &Value) -> Result<ObjectKind, StacError> {
    let object = doc.as_object().ok_or_else(|| {
        StacError::TypeIdentification(format!("expected a JSON object, found {}", json_type(doc)))
    })?;

    match object.get("type").and_then(Value::as_str) {
        Some("Feature") => return Ok(ObjectKind::Item),
        Some("Collection") => return Ok(ObjectKind::Collection),
        Some("Catalog") => return Ok(ObjectKind::Catalog),
        _ => {}
    }

    if object.contains_key("geometry") && object.contains_key("properties") {
        Ok(ObjectKind::Item)
    } else if object.contains_key("extent") {
        Ok(ObjectKind::Collection)
    } else if object.contains_key("type") {
        Ok(ObjectKind::Unknown)
    } else if object.contains_key("id") {
        Ok(ObjectKind::Catalog)
    } else {
        Err(StacError::TypeIdentification(
            "object has neither a type nor an id field".to_string(),
        ))
    }
}

/// Read `stac_version` without defaulting.
pub fn read_version(doc: &Value) -> Result<SpecVersion, StacError> {
    match doc.get("stac_version") {
        None => Err(StacError::MissingVersion(
            "document has no stac_version field".to_string(),
        )),
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(SpecVersion::new(s.trim())),
        Some(other) => Err(StacError::MissingVersion(format!(
            "stac_version must be a non-empty string, found {}",
            json_type(other)
        ))),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
