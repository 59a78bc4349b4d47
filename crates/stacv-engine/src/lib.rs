//! # stacv-engine — Validation Orchestration
//!
//! Drives fetch, identification, schema selection and schema checks for
//! one target document and, in recursive mode, for every object reachable
//! through its `child` and `item` links.
//!
//! ## Run lifecycle
//!
//! FETCHING → IDENTIFYING → SELECTING → CHECKING → DONE, or FAILED from any
//! state. Each mode yields an immutable [`ModeOutcome`] that the
//! [`Orchestrator`] merges into the target's [`ValidationResult`]; a record
//! is valid only if every attempted mode passed.
//!
//! ## Crate Policy
//!
//! - Every failure becomes part of a result record; nothing escapes a run.
//! - Results keep run order: the target first, then walk order.

pub mod report;
pub mod result;
pub mod run;
pub mod walk;

pub use report::{all_valid, report};
pub use result::{ModeOutcome, ValidationResult};
pub use run::{Orchestrator, RunState};
pub use walk::child_links;
