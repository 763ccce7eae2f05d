//! Embedded JSON Schema documents.

/// JSON Schema for application manifests.
pub const MANIFEST_SCHEMA: &str = include_str!("../schemas/manifest.schema.json");

/// JSON Schema for the generated master catalog.
pub const CATALOG_SCHEMA: &str = include_str!("../schemas/catalog.schema.json");

/// Get the manifest schema as a parsed JSON value.
pub fn manifest_schema() -> serde_json::Value {
    serde_json::from_str(MANIFEST_SCHEMA).expect("Invalid manifest schema")
}

/// Get the catalog schema as a parsed JSON value.
pub fn catalog_schema() -> serde_json::Value {
    serde_json::from_str(CATALOG_SCHEMA).expect("Invalid catalog schema")
}
