//! # Error Types — Closed Failure Taxonomy
//!
//! Every failure surfaced while validating a STAC object is a [`StacError`].
//! The report only ever shows the closed set of [`ErrorKind`]s; the mapping
//! from error to kind lives in [`StacError::kind`] and nowhere else.
//!
//! ## Design
//!
//! - Transport, filesystem and parse failures carry the reference that
//!   failed so a recursive report can be read without the logs.
//! - Schema violations always name the violating location in the document,
//!   using [`ROOT_MARKER`] when the violation is at the document root.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Marker used as the violation path when the document root is at fault.
pub const ROOT_MARKER: &str = "(root)";

/// The closed set of failure categories reported for a STAC object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    NetworkError,
    NotFoundError,
    ParseError,
    TypeIdentificationError,
    MissingVersionError,
    SchemaLookupError,
    SchemaViolation,
    RecursionNotApplicableError,
    UnsupportedModeError,
}

impl ErrorKind {
    /// Returns the report name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NetworkError => "NetworkError",
            Self::NotFoundError => "NotFoundError",
            Self::ParseError => "ParseError",
            Self::TypeIdentificationError => "TypeIdentificationError",
            Self::MissingVersionError => "MissingVersionError",
            Self::SchemaLookupError => "SchemaLookupError",
            Self::SchemaViolation => "SchemaViolation",
            Self::RecursionNotApplicableError => "RecursionNotApplicableError",
            Self::UnsupportedModeError => "UnsupportedModeError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single schema violation with structured context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// JSON Pointer to the violating value, or [`ROOT_MARKER`]. Never empty.
    pub path: String,
    /// JSON Pointer within the schema that triggered the error.
    pub schema_path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl Violation {
    /// Build a violation, replacing an empty instance path with [`ROOT_MARKER`].
    pub fn new(
        instance_path: impl Into<String>,
        schema_path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        let path = instance_path.into();
        Self {
            path: if path.is_empty() {
                ROOT_MARKER.to_string()
            } else {
                path
            },
            schema_path: schema_path.into(),
            message: message.into(),
        }
    }

    /// Whether the violation is at the document root.
    pub fn is_root(&self) -> bool {
        self.path == ROOT_MARKER
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Every failure the validator can attach to a result record.
#[derive(Error, Debug)]
pub enum StacError {
    /// A URL could not be retrieved (connection, TLS, non-2xx, body read).
    #[error("request to {href} failed: {reason}")]
    Network {
        /// URL that was requested.
        href: String,
        /// Transport-level reason.
        reason: String,
    },

    /// A local path does not exist or cannot be read.
    #[error("cannot read {path}: {reason}")]
    NotFound {
        /// Path that was read.
        path: String,
        /// Filesystem-level reason.
        reason: String,
    },

    /// The retrieved bytes are not valid JSON.
    #[error("{href} is not valid JSON: {reason}")]
    Parse {
        /// Reference whose content failed to parse.
        href: String,
        /// Parser message.
        reason: String,
    },

    /// No STAC object type could be established for the document.
    #[error("cannot identify STAC object type: {0}")]
    TypeIdentification(String),

    /// The document carries no usable `stac_version`.
    #[error("missing stac_version: {0}")]
    MissingVersion(String),

    /// No schema is published (or compilable) for the requested combination.
    #[error("schema lookup failed: {0}")]
    SchemaLookup(String),

    /// The document does not conform to a schema.
    #[error("{violation} (schema {schema})")]
    SchemaViolation {
        /// Schema the document was checked against.
        schema: String,
        /// First violation reported by the engine.
        violation: Violation,
    },

    /// Recursive validation was requested on an object without children.
    #[error("cannot recursively validate an {0}")]
    RecursionNotApplicable(String),

    /// The mode cannot be run by the component it was handed to.
    #[error("unsupported validation mode: {0}")]
    UnsupportedMode(String),
}

impl StacError {
    /// Map this error to its report category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Network { .. } => ErrorKind::NetworkError,
            Self::NotFound { .. } => ErrorKind::NotFoundError,
            Self::Parse { .. } => ErrorKind::ParseError,
            Self::TypeIdentification(_) => ErrorKind::TypeIdentificationError,
            Self::MissingVersion(_) => ErrorKind::MissingVersionError,
            Self::SchemaLookup(_) => ErrorKind::SchemaLookupError,
            Self::SchemaViolation { .. } => ErrorKind::SchemaViolation,
            Self::RecursionNotApplicable(_) => ErrorKind::RecursionNotApplicableError,
            Self::UnsupportedMode(_) => ErrorKind::UnsupportedModeError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_instance_path_becomes_root_marker() {
        let v = Violation::new("", "/required", r#""id" is a required property"#);
        assert!(v.is_root());
        assert_eq!(v.to_string(), r#"(root): "id" is a required property"#);
    }

    #[test]
    fn test_nested_instance_path_is_kept() {
        let v = Violation::new("/properties/datetime", "/properties/properties/type", "null is not of type \"string\"");
        assert!(!v.is_root());
        assert!(v.to_string().starts_with("/properties/datetime: "));
    }

    #[test]
    fn test_kind_mapping_is_total() {
        let cases = [
            (
                StacError::Network { href: "https://x".into(), reason: "refused".into() },
                ErrorKind::NetworkError,
            ),
            (
                StacError::NotFound { path: "a.json".into(), reason: "missing".into() },
                ErrorKind::NotFoundError,
            ),
            (
                StacError::Parse { href: "a.json".into(), reason: "eof".into() },
                ErrorKind::ParseError,
            ),
            (StacError::TypeIdentification("x".into()), ErrorKind::TypeIdentificationError),
            (StacError::MissingVersion("x".into()), ErrorKind::MissingVersionError),
            (StacError::SchemaLookup("x".into()), ErrorKind::SchemaLookupError),
            (
                StacError::SchemaViolation {
                    schema: "s.json".into(),
                    violation: Violation::new("", "", "bad"),
                },
                ErrorKind::SchemaViolation,
            ),
            (StacError::RecursionNotApplicable("ITEM".into()), ErrorKind::RecursionNotApplicableError),
            (StacError::UnsupportedMode("x".into()), ErrorKind::UnsupportedModeError),
        ];
        for (err, kind) in cases {
            assert_eq!(err.kind(), kind, "{err}");
        }
    }

    #[test]
    fn test_error_kind_serializes_as_name() {
        let s = serde_json::to_string(&ErrorKind::MissingVersionError).unwrap();
        assert_eq!(s, "\"MissingVersionError\"");
        assert_eq!(ErrorKind::SchemaViolation.to_string(), "SchemaViolation");
    }

    #[test]
    fn test_recursion_message_names_kind() {
        let err = StacError::RecursionNotApplicable("ITEM".into());
        assert_eq!(err.to_string(), "cannot recursively validate an ITEM");
    }
}
