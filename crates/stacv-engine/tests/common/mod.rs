//! Shared fixtures: minimal core schemas served at their published URLs.

#![allow(dead_code)]

use std::sync::Arc;

use serde_json::{json, Value};
use stacv_core::mock::MockFetcher;
use stacv_core::ValidatorConfig;
use stacv_engine::Orchestrator;

pub const ITEM_SCHEMA: &str = "https://schemas.stacspec.org/v1.0.0/item-spec/json-schema/item.json";
pub const CATALOG_SCHEMA: &str =
    "https://schemas.stacspec.org/v1.0.0/catalog-spec/json-schema/catalog.json";
pub const COLLECTION_SCHEMA: &str =
    "https://schemas.stacspec.org/v1.0.0/collection-spec/json-schema/collection.json";
pub const EO_SCHEMA: &str = "https://stac-extensions.github.io/eo/v1.0.0/schema.json";
pub const HOMEGROWN_SCHEMA: &str = "https://cdn.staclint.com/v0.9.0/collection.json";

pub fn item_schema() -> Value {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "required": ["type", "stac_version", "id", "geometry", "properties", "links", "assets"],
        "properties": {
            "type": {"const": "Feature"},
            "id": {"type": "string", "minLength": 1},
            "properties": {"type": "object", "required": ["datetime"]}
        }
    })
}

pub fn catalog_schema() -> Value {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "required": ["type", "stac_version", "id", "description", "links"],
        "properties": {"type": {"const": "Catalog"}}
    })
}

pub fn collection_schema() -> Value {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "required": ["type", "stac_version", "id", "description", "license", "extent", "links"],
        "properties": {"type": {"const": "Collection"}}
    })
}

pub fn eo_schema() -> Value {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "required": ["properties"],
        "properties": {
            "properties": {"type": "object", "required": ["eo:cloud_cover"]}
        }
    })
}

/// A fetcher serving every fixture schema.
pub fn schemas() -> MockFetcher {
    MockFetcher::new()
        .with(ITEM_SCHEMA, item_schema())
        .with(CATALOG_SCHEMA, catalog_schema())
        .with(COLLECTION_SCHEMA, collection_schema())
        .with(EO_SCHEMA, eo_schema())
}

pub fn item(id: &str) -> Value {
    json!({
        "type": "Feature",
        "stac_version": "1.0.0",
        "id": id,
        "geometry": {"type": "Point", "coordinates": [0.0, 0.0]},
        "bbox": [0.0, 0.0, 0.0, 0.0],
        "properties": {"datetime": "2020-01-01T00:00:00Z"},
        "links": [],
        "assets": {}
    })
}

pub fn catalog(id: &str, children: &[&str]) -> Value {
    let links: Vec<Value> = children
        .iter()
        .map(|href| json!({"rel": "child", "href": href}))
        .collect();
    json!({
        "type": "Catalog",
        "stac_version": "1.0.0",
        "id": id,
        "description": "test catalog",
        "links": links
    })
}

pub fn collection(id: &str) -> Value {
    json!({
        "type": "Collection",
        "stac_version": "1.0.0",
        "id": id,
        "description": "test collection",
        "license": "CC-BY-4.0",
        "extent": {
            "spatial": {"bbox": [[-180.0, -90.0, 180.0, 90.0]]},
            "temporal": {"interval": [["2020-01-01T00:00:00Z", null]]}
        },
        "links": []
    })
}

pub fn orchestrator(fetcher: &Arc<MockFetcher>) -> Orchestrator {
    Orchestrator::new(fetcher.clone(), ValidatorConfig::public().unwrap())
}
