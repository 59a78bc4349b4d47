//! # stacv-cli — Command-Line Interface for stac-validator
//!
//! ```bash
//! stac-validator catalog.json --recursive
//! stac-validator item.json --core --custom ./schemas/strict.json
//! ```
//!
//! Argument parsing lives here; validation is delegated to `stacv-engine`.
//! The JSON report goes to stdout and logs go to stderr, so the report can
//! be piped into other tools.

pub mod validate;
