//! JSON report of accumulated results. Pure: the same records always
//! serialize to the same bytes, in the order they were produced.

use crate::result::ValidationResult;

/// Serialize `results` as a pretty-printed JSON array.
pub fn report(results: &[ValidationResult]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(results)
}

/// Overall verdict of an invocation: true iff there is at least one record
/// and every record is valid.
pub fn all_valid(results: &[ValidationResult]) -> bool {
    !results.is_empty() && results.iter().all(|r| r.valid_stac)
}
