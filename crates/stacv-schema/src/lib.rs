//! # stacv-schema — Schema Selection & Validation
//!
//! ## Selection (`select`)
//!
//! [`SchemaSelector::select`] turns an object kind, a STAC version and a
//! [`ValidationMode`] into the ordered list of [`SchemaReference`]s to
//! check: the pinned core schema, the declared extensions, a caller-supplied
//! custom schema, or a legacy override.
//!
//! ## Validation (`validate`)
//!
//! [`SchemaEngine`] compiles schemas with the `jsonschema` crate and checks
//! documents against them. Every `$ref` is retrieved through the same
//! [`stacv_core::Fetch`] implementation as the documents, relative to the
//! base URI carried by the reference.
//!
//! ## Crate Policy
//!
//! - Depends only on `stacv-core` internally.
//! - The base URI is always passed explicitly; nothing resolves against
//!   the process working directory.

pub mod mode;
pub mod select;
pub mod validate;

pub use mode::{ModeSet, ValidationMode};
pub use select::{declared_extensions, homegrown_override, SchemaReference, SchemaSelector};
pub use validate::SchemaEngine;
