//! Pipeline configuration.

use catforge_catalog_schema::{SchemaError, SchemaStore};
use std::path::{Path, PathBuf};

/// Configuration for a catalog run, constructed once at startup and passed
/// into every component.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Directory holding one subdirectory per application.
    pub catalog_root: PathBuf,
    /// Where the master catalog is written.
    pub output_path: PathBuf,
    /// Directory with replacement schema documents; the embedded schemas
    /// are used when unset.
    pub schema_dir: Option<PathBuf>,
}

impl GeneratorConfig {
    /// Standard layout: `apps.json` next to the application directories.
    pub fn new(catalog_root: impl Into<PathBuf>) -> Self {
        let catalog_root = catalog_root.into();
        let output_path = catalog_root.join("apps.json");
        Self {
            catalog_root,
            output_path,
            schema_dir: None,
        }
    }

    /// Path to an application directory's manifest.
    pub fn manifest_path(&self, app_dir: &Path) -> PathBuf {
        app_dir.join("manifest.json")
    }

    /// Resolve the schema store for this run.
    pub fn schema_store(&self) -> Result<SchemaStore, SchemaError> {
        match &self.schema_dir {
            Some(dir) => SchemaStore::from_dir(dir),
            None => SchemaStore::embedded(),
        }
    }
}
