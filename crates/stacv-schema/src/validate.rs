//! # Schema Validation
//!
//! Checks documents against JSON Schemas with the `jsonschema` crate. The
//! draft is taken from each schema's `$schema` keyword (STAC schemas are
//! draft-07).
//!
//! ## Schema Resolution
//!
//! Every schema document, and every `$ref` target inside it, is retrieved
//! through the shared [`Fetch`] implementation: `http(s)` URIs over the
//! network, `file://` URIs from disk. Relative `$ref`s resolve against the
//! base URI carried by the [`SchemaReference`], installed as the schema's
//! `$id` when it declares none; there is no fallback to the process working
//! directory.
//!
//! Compiled validators are cached per reference for the lifetime of the
//! engine, so a recursive walk fetches and compiles each schema once.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use jsonschema::{Retrieve, Uri, Validator};
use parking_lot::Mutex;
use serde_json::Value;
use stacv_core::{Fetch, Href, StacError, Violation};
use url::Url;

use crate::select::SchemaReference;

/// Resolves `$ref` URIs through the shared fetcher.
struct FetchRetriever {
    fetcher: Arc<dyn Fetch>,
}

impl Retrieve for FetchRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let uri_str = uri.as_str();
        let document = uri_str.split('#').next().unwrap_or(uri_str);
        tracing::debug!(uri = document, "retrieving referenced schema");
        Ok(self.fetcher.fetch(&Href::parse(document))?)
    }
}

/// A schema validation engine backed by the `jsonschema` crate.
pub struct SchemaEngine {
    fetcher: Arc<dyn Fetch>,
    compiled: Mutex<HashMap<SchemaReference, Arc<Validator>>>,
}

impl fmt::Debug for SchemaEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaEngine")
            .field("compiled", &self.compiled.lock().len())
            .finish_non_exhaustive()
    }
}

impl SchemaEngine {
    pub fn new(fetcher: Arc<dyn Fetch>) -> Self {
        Self {
            fetcher,
            compiled: Mutex::new(HashMap::new()),
        }
    }

    /// Number of schemas compiled so far.
    pub fn compiled_count(&self) -> usize {
        self.compiled.lock().len()
    }

    /// Fetch and compile the schema at `schema`, or return the cached
    /// validator.
    ///
    /// # Errors
    ///
    /// Fetch errors for the schema document itself keep their kind
    /// (`Network`, `NotFound`, `Parse`). A schema that fails to compile,
    /// including one whose `$ref`s cannot be resolved, is a `SchemaLookup`
    /// error.
    pub fn build_validator(&self, schema: &SchemaReference) -> Result<Arc<Validator>, StacError> {
        if let Some(validator) = self.compiled.lock().get(schema) {
            return Ok(Arc::clone(validator));
        }

        let mut value = self.fetcher.fetch(&schema.location)?;
        if let Some(base) = &schema.base_uri {
            anchor(&mut value, base);
        }
        let mut options = jsonschema::options();
        options.with_retriever(FetchRetriever {
            fetcher: Arc::clone(&self.fetcher),
        });
        let validator = Arc::new(options.build(&value).map_err(|e| {
            StacError::SchemaLookup(format!("cannot compile schema {schema}: {e}"))
        })?);

        tracing::debug!(%schema, "compiled schema");
        self.compiled
            .lock()
            .insert(schema.clone(), Arc::clone(&validator));
        Ok(validator)
    }

    /// Check `instance` against `schema`, returning every violation.
    ///
    /// An empty list means the document conforms.
    pub fn check(&self, instance: &Value, schema: &SchemaReference) -> Result<Vec<Violation>, StacError> {
        let validator = self.build_validator(schema)?;
        Ok(validator
            .iter_errors(instance)
            .map(|e| Violation::new(e.instance_path.to_string(), e.schema_path.to_string(), e.to_string()))
            .collect())
    }
}

/// Give a schema without an identifier `base` as its id, so its relative
/// `$ref`s resolve against `base`. A schema's own id always wins.
fn anchor(schema: &mut Value, base: &Url) {
    let keyword = if declares_draft4(schema) { "id" } else { "$id" };
    if let Some(object) = schema.as_object_mut() {
        object
            .entry(keyword)
            .or_insert_with(|| Value::String(base.to_string()));
    }
}

fn declares_draft4(schema: &Value) -> bool {
    schema
        .get("$schema")
        .and_then(Value::as_str)
        .is_some_and(|uri| uri.contains("draft-04"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use stacv_core::mock::MockFetcher;
    use stacv_core::ErrorKind;

    const MAIN: &str = "https://schemas.example.com/v1/main.json";
    const DEFS: &str = "https://schemas.example.com/v1/defs.json";

    fn engine() -> (Arc<MockFetcher>, SchemaEngine) {
        let fetcher = Arc::new(
            MockFetcher::new()
                .with(
                    MAIN,
                    json!({
                        "$schema": "http://json-schema.org/draft-07/schema#",
                        "type": "object",
                        "required": ["id", "stac_version"],
                        "properties": {
                            "id": {"$ref": "defs.json#/definitions/id"}
                        }
                    }),
                )
                .with(
                    DEFS,
                    json!({
                        "$schema": "http://json-schema.org/draft-07/schema#",
                        "definitions": {
                            "id": {"type": "string", "minLength": 1}
                        }
                    }),
                ),
        );
        let engine = SchemaEngine::new(fetcher.clone());
        (fetcher, engine)
    }

    fn main_ref() -> SchemaReference {
        SchemaReference::remote(Url::parse(MAIN).unwrap())
    }

    #[test]
    fn test_conforming_document_has_no_violations() {
        let (_, engine) = engine();
        let violations = engine
            .check(&json!({"id": "a", "stac_version": "1.0.0"}), &main_ref())
            .unwrap();
        assert!(violations.is_empty(), "{violations:?}");
    }

    #[test]
    fn test_relative_ref_resolves_against_base() {
        let (fetcher, engine) = engine();
        let violations = engine
            .check(&json!({"id": "", "stac_version": "1.0.0"}), &main_ref())
            .unwrap();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].path, "/id");
        assert_eq!(fetcher.request_count(DEFS), 1);
    }

    #[test]
    fn test_relative_ref_follows_explicit_base_not_location() {
        let mirror_defs = "https://mirror.example.com/stac/defs.json";
        let fetcher = Arc::new(
            MockFetcher::new()
                .with(MAIN, json!({"properties": {"id": {"$ref": "defs.json"}}}))
                .with(mirror_defs, json!({"type": "string"})),
        );
        let engine = SchemaEngine::new(fetcher.clone());
        let schema = SchemaReference {
            location: Href::parse(MAIN),
            base_uri: Some(Url::parse("https://mirror.example.com/stac/").unwrap()),
        };

        let violations = engine.check(&json!({"id": 5}), &schema).unwrap();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].path, "/id");
        assert_eq!(fetcher.request_count(mirror_defs), 1);
        assert_eq!(fetcher.request_count(DEFS), 0);
    }

    #[test]
    fn test_declared_id_takes_precedence_over_base() {
        let mut schema = json!({"$id": "https://schemas.example.com/own.json", "type": "object"});
        anchor(&mut schema, &Url::parse("file:///tmp/schemas/").unwrap());
        assert_eq!(schema["$id"], "https://schemas.example.com/own.json");

        let mut bare = json!({"type": "object"});
        anchor(&mut bare, &Url::parse("file:///tmp/schemas/").unwrap());
        assert_eq!(bare["$id"], "file:///tmp/schemas/");

        let mut draft4 = json!({"$schema": "http://json-schema.org/draft-04/schema#"});
        anchor(&mut draft4, &Url::parse("https://example.com/").unwrap());
        assert_eq!(draft4["id"], "https://example.com/");
        assert!(draft4.get("$id").is_none());
    }

    #[test]
    fn test_root_violation_uses_marker() {
        let (_, engine) = engine();
        let violations = engine.check(&json!({"id": "a"}), &main_ref()).unwrap();
        assert_eq!(violations.len(), 1);
        assert!(violations[0].is_root());
        assert!(violations[0].message.contains("stac_version"));
    }

    #[test]
    fn test_validators_are_cached() {
        let (fetcher, engine) = engine();
        for _ in 0..3 {
            engine.check(&json!({"id": "a", "stac_version": "1.0.0"}), &main_ref()).unwrap();
        }
        assert_eq!(fetcher.request_count(MAIN), 1);
        assert_eq!(engine.compiled_count(), 1);
    }

    #[test]
    fn test_missing_schema_keeps_fetch_kind() {
        let engine = SchemaEngine::new(Arc::new(MockFetcher::new()));
        let err = engine
            .check(&json!({}), &SchemaReference::remote(Url::parse(MAIN).unwrap()))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NetworkError);
    }

    #[test]
    fn test_unresolvable_ref_is_lookup_error() {
        let fetcher = MockFetcher::new().with(MAIN, json!({"$ref": "missing.json"}));
        let engine = SchemaEngine::new(Arc::new(fetcher));
        let err = engine.build_validator(&main_ref()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SchemaLookupError);
    }

    #[test]
    fn test_invalid_schema_is_lookup_error() {
        let fetcher = MockFetcher::new().with(MAIN, json!({"type": 12}));
        let engine = SchemaEngine::new(Arc::new(fetcher));
        let err = engine.build_validator(&main_ref()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SchemaLookupError);
        assert!(err.to_string().contains(MAIN));
    }
}
