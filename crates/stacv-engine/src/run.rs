//! # Validation Orchestrator
//!
//! One target document produces one run:
//!
//! FETCHING → IDENTIFYING → SELECTING → CHECKING → DONE
//!
//! with an early transition to FAILED from any state. Modes run in the
//! precedence order of [`ModeSet::ordered`]. A mode that finds violations
//! does not stop later modes; a raised error aborts every remaining mode
//! for the target and becomes its terminal error.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use stacv_core::{identify_kind, read_version, ErrorKind, Fetch, Href, ObjectKind, SpecVersion, StacError, ValidatorConfig};
use stacv_schema::{ModeSet, SchemaEngine, SchemaReference, SchemaSelector, ValidationMode};

use crate::result::{ModeOutcome, ValidationResult};

/// State of a run for one object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Fetching,
    Identifying,
    Selecting,
    Checking,
    /// Every requested mode was attempted (terminal).
    Done,
    /// A raised error ended the run (terminal).
    Failed(ErrorKind),
}

impl RunState {
    /// Whether this state is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed(_))
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fetching => f.write_str("FETCHING"),
            Self::Identifying => f.write_str("IDENTIFYING"),
            Self::Selecting => f.write_str("SELECTING"),
            Self::Checking => f.write_str("CHECKING"),
            Self::Done => f.write_str("DONE"),
            Self::Failed(kind) => write!(f, "FAILED({kind})"),
        }
    }
}

/// Drives fetch, identification, selection and checks for targets.
///
/// Owns the schema engine, so compiled schemas are shared by every object
/// validated through the same orchestrator.
pub struct Orchestrator {
    pub(crate) fetcher: Arc<dyn Fetch>,
    pub(crate) selector: SchemaSelector,
    pub(crate) engine: SchemaEngine,
}

impl fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Orchestrator")
            .field("selector", &self.selector)
            .field("engine", &self.engine)
            .finish_non_exhaustive()
    }
}

impl Orchestrator {
    pub fn new(fetcher: Arc<dyn Fetch>, config: ValidatorConfig) -> Self {
        Self {
            engine: SchemaEngine::new(Arc::clone(&fetcher)),
            selector: SchemaSelector::new(config),
            fetcher,
        }
    }

    /// Validate `reference` with every requested mode.
    ///
    /// Returns the target's record first, followed by one record per
    /// object visited by a recursive walk. Never fails: every error is
    /// part of a record.
    pub fn run(&self, reference: &str, modes: &ModeSet) -> Vec<ValidationResult> {
        let mut descendants = Vec::new();
        let result = self.run_target(reference, modes, &mut descendants);
        tracing::info!(
            path = %result.path,
            valid = result.valid_stac,
            visited = descendants.len(),
            "validated"
        );
        let mut results = Vec::with_capacity(descendants.len() + 1);
        results.push(result);
        results.extend(descendants);
        results
    }

    fn run_target(
        &self,
        reference: &str,
        modes: &ModeSet,
        descendants: &mut Vec<ValidationResult>,
    ) -> ValidationResult {
        let result = ValidationResult::new(reference);
        let ordered = modes.ordered();
        if ordered.is_empty() {
            let err = StacError::UnsupportedMode("no validation mode requested".to_string());
            return failed(reference, result, None, &err);
        }

        let href = Href::parse(reference).absolute();
        enter(reference, RunState::Fetching);
        let doc = match self.fetcher.fetch(&href) {
            Ok(doc) => doc,
            Err(err) => return failed(reference, result, None, &err),
        };

        enter(reference, RunState::Identifying);
        let (result, kind, version) = match identified(result, &doc) {
            Ok(identified) => identified,
            Err((result, err)) => return failed(reference, result, None, &err),
        };

        let mut result = result;
        for mode in ordered {
            match self.run_mode(&mode, &href, &doc, kind, &version, descendants) {
                Ok(outcome) => result = result.merge(outcome),
                Err(err) => return failed(reference, result, Some(mode), &err),
            }
        }
        enter(reference, RunState::Done);
        result
    }

    fn run_mode(
        &self,
        mode: &ValidationMode,
        href: &Href,
        doc: &Value,
        kind: ObjectKind,
        version: &SpecVersion,
        descendants: &mut Vec<ValidationResult>,
    ) -> Result<ModeOutcome, StacError> {
        if matches!(mode, ValidationMode::Recursive) {
            if kind == ObjectKind::Item {
                return Err(StacError::RecursionNotApplicable(kind.to_string()));
            }
            if !kind.has_children() {
                // No core schema to check the root against.
                self.selector.core(kind, version)?;
            }
            let walk = self.walk(href, doc, kind, version);
            tracing::info!(root = %href, nodes = walk.descendants.len() + 1, valid = walk.valid(), "recursive walk");
            descendants.extend(walk.descendants);
            return walk.root;
        }

        enter(&href.to_string(), RunState::Selecting);
        let schemas = self.selector.select(kind, version, mode, doc)?;
        self.check_schemas(mode.clone(), doc, &schemas)
    }

    /// Check `doc` against `schemas` in order, stopping at the first schema
    /// that reports violations.
    pub(crate) fn check_schemas(
        &self,
        mode: ValidationMode,
        doc: &Value,
        schemas: &[SchemaReference],
    ) -> Result<ModeOutcome, StacError> {
        let mut outcome = ModeOutcome::new(mode);
        for schema in schemas {
            tracing::debug!(state = %RunState::Checking, %schema, "checking");
            outcome.schemas.push(schema.to_string());
            let violations = self.engine.check(doc, schema)?;
            if !violations.is_empty() {
                outcome.failure = Some((schema.to_string(), violations));
                break;
            }
        }
        Ok(outcome)
    }
}

/// Record kind and version, keeping whatever was found if identification
/// stops part way.
pub(crate) fn identified(
    result: ValidationResult,
    doc: &Value,
) -> Result<(ValidationResult, ObjectKind, SpecVersion), (ValidationResult, StacError)> {
    let kind = match identify_kind(doc) {
        Ok(kind) => kind,
        Err(err) => return Err((result, err)),
    };
    let result = result.with_kind(kind);
    match read_version(doc) {
        Ok(version) => Ok((result.with_version(version.clone()), kind, version)),
        Err(err) => Err((result, err)),
    }
}

pub(crate) fn failed(
    target: &str,
    result: ValidationResult,
    mode: Option<ValidationMode>,
    err: &StacError,
) -> ValidationResult {
    enter(target, RunState::Failed(err.kind()));
    result.fail(mode, err)
}

pub(crate) fn enter(target: &str, state: RunState) {
    tracing::debug!(target_ref = target, %state, "run state");
}
