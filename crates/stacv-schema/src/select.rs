//! # Schema Selection
//!
//! Maps (kind, version, mode) to the ordered list of schemas to check.
//!
//! ## Published schema lines
//!
//! | Version | Host |
//! |---------|------|
//! | ≥ 1.0 (incl. betas and RCs) | `schema_base_url` (schemas.stacspec.org) |
//! | 0.8.x, 0.9.x | `legacy_schema_base_url` (stac-spec repository tags) |
//! | anything else | `SchemaLookup` error |
//!
//! ## Base URIs
//!
//! A reference to a local schema carries the `file://` URI of its absolute
//! parent directory as base, so a custom schema split over several files
//! resolves its relative `$ref`s no matter where the process runs. Dropping
//! that base silently breaks `$ref` resolution.

use std::collections::HashSet;
use std::fmt;

use serde_json::Value;
use stacv_core::{Href, ObjectKind, SpecVersion, StacError, ValidatorConfig};
use url::Url;

use crate::mode::ValidationMode;

/// Override schemas for legacy versions whose upstream schemas are broken
/// or missing. Selected regardless of object kind.
pub const HOMEGROWN_OVERRIDES: &[(&str, &str)] =
    &[("0.9.0", "https://cdn.staclint.com/v0.9.0/collection.json")];

/// A resolvable locator for one JSON Schema document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SchemaReference {
    /// Where the schema document lives.
    pub location: Href,
    /// Base for relative `$ref`s inside the schema.
    pub base_uri: Option<Url>,
}

impl SchemaReference {
    /// A schema published at `url`; relative refs resolve against the URL.
    /// A `file://` URL (e.g. a local schema mirror) is read from disk.
    pub fn remote(url: Url) -> Self {
        Self {
            location: Href::parse(url.as_str()),
            base_uri: Some(url),
        }
    }

    /// A caller-supplied URL or path. Paths are made absolute and their
    /// parent directory becomes the base URI.
    pub fn from_reference(reference: &str) -> Self {
        let location = Href::parse(reference).absolute();
        let base_uri = location.base_uri();
        Self { location, base_uri }
    }
}

impl fmt::Display for SchemaReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.location.fmt(f)
    }
}

/// Chooses schemas per validation mode.
#[derive(Debug, Clone)]
pub struct SchemaSelector {
    config: ValidatorConfig,
}

impl SchemaSelector {
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    /// Ordered schemas for `mode`.
    ///
    /// `doc` is consulted only for its `stac_extensions` list.
    ///
    /// # Errors
    ///
    /// `SchemaLookup` when a core or extension schema has no published
    /// location, `UnsupportedMode` for [`ValidationMode::Recursive`], which
    /// selects per visited object instead.
    pub fn select(
        &self,
        kind: ObjectKind,
        version: &SpecVersion,
        mode: &ValidationMode,
        doc: &Value,
    ) -> Result<Vec<SchemaReference>, StacError> {
        match mode {
            ValidationMode::Core => Ok(vec![self.core(kind, version)?]),
            ValidationMode::Extensions => {
                let mut schemas = vec![self.core(kind, version)?];
                for id in declared_extensions(doc) {
                    schemas.push(self.extension(&id, version)?);
                }
                Ok(schemas)
            }
            ValidationMode::Custom(reference) => Ok(vec![SchemaReference::from_reference(reference)]),
            ValidationMode::Homegrown => Ok(homegrown_override(version).into_iter().collect()),
            ValidationMode::Recursive => Err(StacError::UnsupportedMode(
                "recursive validation selects schemas per visited object".to_string(),
            )),
        }
    }

    /// The core schema for `kind` pinned to `version`.
    pub fn core(&self, kind: ObjectKind, version: &SpecVersion) -> Result<SchemaReference, StacError> {
        let stem = kind
            .schema_stem()
            .ok_or_else(|| StacError::SchemaLookup(format!("no core schema for {kind} objects")))?;
        let base = match version.release() {
            Some((major, _, _)) if major >= 1 => &self.config.schema_base_url,
            Some((0, minor, _)) if minor >= 8 => &self.config.legacy_schema_base_url,
            _ => {
                return Err(StacError::SchemaLookup(format!(
                    "no published core schema for STAC version {version}"
                )))
            }
        };
        join(base, &format!("v{version}/{stem}-spec/json-schema/{stem}.json")).map(SchemaReference::remote)
    }

    /// The schema for one `stac_extensions` entry.
    ///
    /// URLs and `.json` paths are used as given. Short identifiers are only
    /// meaningful on the legacy line, where they name a directory of the
    /// stac-spec repository.
    pub fn extension(&self, id: &str, version: &SpecVersion) -> Result<SchemaReference, StacError> {
        if Href::parse(id).is_url() || id.ends_with(".json") {
            return Ok(SchemaReference::from_reference(id));
        }
        if version.is_legacy() {
            let path = format!("v{version}/extensions/{id}/json-schema/schema.json");
            return join(&self.config.legacy_schema_base_url, &path).map(SchemaReference::remote);
        }
        Err(StacError::SchemaLookup(format!(
            "extension {id:?} is not a schema URI and STAC {version} has no short extension names"
        )))
    }
}

/// `stac_extensions` entries in declaration order, duplicates removed
/// (first occurrence wins). Non-string entries are skipped.
pub fn declared_extensions(doc: &Value) -> Vec<String> {
    let Some(entries) = doc.get("stac_extensions").and_then(Value::as_array) else {
        return Vec::new();
    };
    let mut seen = HashSet::new();
    let mut extensions = Vec::new();
    for entry in entries {
        match entry.as_str() {
            Some(id) if seen.insert(id) => extensions.push(id.to_string()),
            Some(_) => {}
            None => tracing::warn!(%entry, "skipping non-string stac_extensions entry"),
        }
    }
    extensions
}

/// The legacy override for `version`, if one is defined.
pub fn homegrown_override(version: &SpecVersion) -> Option<SchemaReference> {
    HOMEGROWN_OVERRIDES
        .iter()
        .find(|(v, _)| *v == version.as_str())
        .and_then(|(_, url)| Url::parse(url).ok())
        .map(SchemaReference::remote)
}

fn join(base: &Url, path: &str) -> Result<Url, StacError> {
    base.join(path)
        .map_err(|e| StacError::SchemaLookup(format!("cannot build schema URL from {base} and {path}: {e}")))
}
