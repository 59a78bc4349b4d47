//! # Result Records
//!
//! A [`ValidationResult`] is built from shared metadata (path, kind,
//! version) and the [`ModeOutcome`]s of every attempted mode, merged in
//! precedence order. Merging consumes the record and returns the updated
//! one; no mode handler ever mutates a shared record.

use serde::Serialize;
use stacv_core::{ErrorKind, ObjectKind, SpecVersion, StacError, Violation};
use stacv_schema::ValidationMode;

/// The outcome of one mode that ran to completion.
#[derive(Debug, Clone, PartialEq)]
pub struct ModeOutcome {
    /// Mode that produced this outcome.
    pub mode: ValidationMode,
    /// Schemas checked, in order.
    pub schemas: Vec<String>,
    /// The schema that rejected the document and all of its violations.
    pub failure: Option<(String, Vec<Violation>)>,
}

impl ModeOutcome {
    /// An outcome with nothing checked yet.
    pub fn new(mode: ValidationMode) -> Self {
        Self {
            mode,
            schemas: Vec::new(),
            failure: None,
        }
    }

    /// Whether the mode found no violations.
    pub fn passed(&self) -> bool {
        self.failure.is_none()
    }

    /// The first violation as a [`StacError::SchemaViolation`].
    pub fn violation_error(&self) -> Option<StacError> {
        let (schema, violations) = self.failure.as_ref()?;
        let first = violations.first()?;
        Some(StacError::SchemaViolation {
            schema: schema.clone(),
            violation: first.clone(),
        })
    }
}

/// One validated object in the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    /// Reference as given (target) or as resolved (walked descendants).
    pub path: String,
    pub asset_type: Option<ObjectKind>,
    pub version: Option<SpecVersion>,
    /// Modes attempted, in precedence order.
    pub validation_method: Vec<ValidationMode>,
    /// Logical AND of every attempted mode.
    pub valid_stac: bool,
    pub error_type: Option<ErrorKind>,
    pub error_message: Option<String>,
    /// Schemas checked, in order.
    pub schema: Vec<String>,
    /// Violations from the first schema that rejected the object.
    pub violations: Vec<Violation>,
}

impl ValidationResult {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            asset_type: None,
            version: None,
            validation_method: Vec::new(),
            valid_stac: true,
            error_type: None,
            error_message: None,
            schema: Vec::new(),
            violations: Vec::new(),
        }
    }

    pub fn with_kind(mut self, kind: ObjectKind) -> Self {
        self.asset_type = Some(kind);
        self
    }

    pub fn with_version(mut self, version: SpecVersion) -> Self {
        self.version = Some(version);
        self
    }

    /// Layer a completed mode over this record. The first violation seen
    /// across modes populates the error fields.
    pub fn merge(mut self, outcome: ModeOutcome) -> Self {
        if let Some(err) = outcome.violation_error() {
            self.valid_stac = false;
            if self.error_type.is_none() {
                self.error_type = Some(err.kind());
                self.error_message = Some(err.to_string());
            }
        }
        if let Some((_, violations)) = outcome.failure {
            if self.violations.is_empty() {
                self.violations = violations;
            }
        }
        self.validation_method.push(outcome.mode);
        self.schema.extend(outcome.schemas);
        self
    }

    /// Record the error that ended the run for this object. It replaces any
    /// earlier violation in the error fields; the violation list is kept.
    pub fn fail(mut self, mode: Option<ValidationMode>, err: &StacError) -> Self {
        if let Some(mode) = mode {
            self.validation_method.push(mode);
        }
        self.valid_stac = false;
        self.error_type = Some(err.kind());
        self.error_message = Some(err.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn violated(mode: ValidationMode, schema: &str) -> ModeOutcome {
        ModeOutcome {
            mode,
            schemas: vec![schema.to_string()],
            failure: Some((
                schema.to_string(),
                vec![Violation::new("/id", "/properties/id/type", "5 is not of type \"string\"")],
            )),
        }
    }

    fn passed(mode: ValidationMode, schema: &str) -> ModeOutcome {
        ModeOutcome {
            mode,
            schemas: vec![schema.to_string()],
            failure: None,
        }
    }

    #[test]
    fn test_all_passing_modes_stay_valid() {
        let result = ValidationResult::new("item.json")
            .merge(passed(ValidationMode::Core, "core.json"))
            .merge(passed(ValidationMode::Custom("c.json".into()), "c.json"));
        assert!(result.valid_stac);
        assert_eq!(result.error_type, None);
        assert_eq!(result.schema, ["core.json", "c.json"]);
        assert_eq!(result.validation_method.len(), 2);
    }

    #[test]
    fn test_one_violation_invalidates_record() {
        let result = ValidationResult::new("item.json")
            .merge(violated(ValidationMode::Core, "core.json"))
            .merge(passed(ValidationMode::Custom("c.json".into()), "c.json"));
        assert!(!result.valid_stac);
        assert_eq!(result.error_type, Some(ErrorKind::SchemaViolation));
        let message = result.error_message.unwrap();
        assert!(message.starts_with("/id: "), "{message}");
        assert!(message.contains("core.json"));
    }

    #[test]
    fn test_first_violation_wins() {
        let result = ValidationResult::new("item.json")
            .merge(violated(ValidationMode::Core, "core.json"))
            .merge(violated(ValidationMode::Extensions, "ext.json"));
        assert!(result.error_message.unwrap().contains("core.json"));
        assert_eq!(result.violations.len(), 1);
    }

    #[test]
    fn test_fail_records_terminal_error() {
        let result = ValidationResult::new("item.json")
            .merge(violated(ValidationMode::Core, "core.json"))
            .fail(
                Some(ValidationMode::Extensions),
                &StacError::SchemaLookup("no schema".into()),
            );
        assert!(!result.valid_stac);
        assert_eq!(result.error_type, Some(ErrorKind::SchemaLookupError));
        assert_eq!(result.violations.len(), 1);
        assert_eq!(result.validation_method, [ValidationMode::Core, ValidationMode::Extensions]);
    }
}
