//! # stacv-core — Foundational Types for stac-validator
//!
//! Every other crate in the workspace depends on `stacv-core`; it depends on
//! nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **One closed error taxonomy.** Every failure the validator can report
//!    is a [`StacError`], and every `StacError` maps to exactly one
//!    [`ErrorKind`] through [`StacError::kind`]. Reports never carry an
//!    uncategorized failure.
//!
//! 2. **Syntactic reference disambiguation.** A [`Href`] is a URL iff its
//!    scheme is `http` or `https`. Everything else is a filesystem path.
//!
//! 3. **Identify once.** [`identify`] produces an [`ObjectKind`] and a
//!    [`SpecVersion`] a single time per document; downstream code matches
//!    on the kind and never re-derives it from strings.
//!
//! 4. **One fetch seam.** Documents, schemas and `$ref` targets all go
//!    through the [`Fetch`] trait, so tests swap in [`mock::MockFetcher`].
//!
//! ## Crate Policy
//!
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod config;
pub mod error;
pub mod fetch;
pub mod href;
pub mod identify;
pub mod mock;

// Re-export primary types for ergonomic imports.
pub use config::{ConfigError, ValidatorConfig};
pub use error::{ErrorKind, StacError, Violation, ROOT_MARKER};
pub use fetch::{Fetch, Fetcher};
pub use href::Href;
pub use identify::{identify, identify_kind, read_version, ObjectKind, SpecVersion};
