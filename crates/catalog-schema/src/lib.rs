//! Catalog schema types and validation.
//!
//! This crate defines the serde data model for application manifests and the
//! generated master catalog, the JSON Schema documents both are validated
//! against, and a validator that reports every violation in one pass.

pub mod catalog;
pub mod manifest;
pub mod schema;
pub mod validation;

pub use catalog::{Catalog, CatalogEntry};
pub use manifest::{AppManifest, Image, Link, Provider, ScanRef, SeverityCounts, VersionEntry};
pub use validation::{SchemaError, SchemaStore, SchemaValidator, ValidationReport, Violation};

/// Schema version stamped into generated catalogs.
pub const CATALOG_SCHEMA_VERSION: &str = "1.0.0";
