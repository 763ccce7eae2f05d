//! Catalog generation pipeline.
//!
//! Orchestrates the full refresh cycle over a catalog tree: discover
//! applications, recompute severity aggregates, validate manifests, and
//! rebuild the sorted master catalog. Also provides the read-only validate
//! pass used by CI.

pub mod config;
pub mod discover;
pub mod entry;
pub mod refresh;
pub mod validate;
pub mod version;

pub use config::GeneratorConfig;
pub use refresh::{refresh_catalog, RefreshSummary};
pub use validate::{validate_catalog_tree, AppViolations, ValidateReport};
