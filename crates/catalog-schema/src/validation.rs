//! Schema validation for manifests and the master catalog.

use crate::schema;
use jsonschema::JSONSchema;
use serde_json::Value;
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Failure modes of the validation machinery itself, as opposed to schema
/// violations found in a document.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Schema compilation failed: {0}")]
    Compile(String),

    #[error("Schema document is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A single schema violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON pointer into the validated document.
    pub path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Result of validating one document: every violation, not just the first.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn add(&mut self, path: String, message: String) {
        self.violations.push(Violation { path, message });
    }
}

/// A compiled schema that validates documents without mutating them.
pub struct SchemaValidator {
    compiled: JSONSchema,
}

impl SchemaValidator {
    /// Compile a validator from a schema document.
    pub fn new(schema: &Value) -> Result<Self, SchemaError> {
        let compiled =
            JSONSchema::compile(schema).map_err(|e| SchemaError::Compile(e.to_string()))?;
        Ok(Self { compiled })
    }

    /// Validate a document, collecting every violation.
    pub fn validate(&self, document: &Value) -> ValidationReport {
        let mut report = ValidationReport::default();
        if let Err(errors) = self.compiled.validate(document) {
            for error in errors {
                report.add(error.instance_path.to_string(), error.to_string());
            }
        }
        report
    }
}

/// The manifest and catalog validators, resolved once at process start.
pub struct SchemaStore {
    manifest: SchemaValidator,
    catalog: SchemaValidator,
}

impl SchemaStore {
    /// Build the store from the embedded schema documents.
    pub fn embedded() -> Result<Self, SchemaError> {
        Ok(Self {
            manifest: SchemaValidator::new(&schema::manifest_schema())?,
            catalog: SchemaValidator::new(&schema::catalog_schema())?,
        })
    }

    /// Build the store from `manifest.schema.json` and `catalog.schema.json`
    /// inside `dir`.
    pub fn from_dir(dir: &Path) -> Result<Self, SchemaError> {
        Ok(Self {
            manifest: SchemaValidator::new(&load_schema(&dir.join("manifest.schema.json"))?)?,
            catalog: SchemaValidator::new(&load_schema(&dir.join("catalog.schema.json"))?)?,
        })
    }

    /// Validate an application manifest document.
    pub fn validate_manifest(&self, document: &Value) -> ValidationReport {
        self.manifest.validate(document)
    }

    /// Validate a master catalog document.
    pub fn validate_catalog(&self, document: &Value) -> ValidationReport {
        self.catalog.validate(document)
    }
}

fn load_schema(path: &Path) -> Result<Value, SchemaError> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_manifest() -> Value {
        serde_json::json!({
            "id": "demo-app",
            "name": "Demo App",
            "summary": "A demo application",
            "description": "A long enough description of the demo application.",
            "providers": {
                "vendor": {
                    "tier": "community",
                    "versions": []
                }
            }
        })
    }

    #[test]
    fn test_validate_manifest_minimal() {
        let store = SchemaStore::embedded().unwrap();
        let report = store.validate_manifest(&minimal_manifest());
        assert!(report.is_valid(), "violations: {:?}", report.violations);
    }

    #[test]
    fn test_validate_manifest_missing_summary() {
        let store = SchemaStore::embedded().unwrap();
        let mut manifest = minimal_manifest();
        manifest.as_object_mut().unwrap().remove("summary");

        let report = store.validate_manifest(&manifest);
        assert!(!report.is_valid());
        assert!(
            report.violations.iter().any(|v| v.message.contains("summary")),
            "expected a violation naming the summary field: {:?}",
            report.violations
        );
    }

    #[test]
    fn test_validate_manifest_reports_every_violation() {
        let store = SchemaStore::embedded().unwrap();
        let manifest = serde_json::json!({
            "id": "Not Valid",
            "name": "Demo"
        });

        let report = store.validate_manifest(&manifest);
        // Bad id pattern plus three missing required fields.
        assert!(report.violations.len() >= 2, "got {:?}", report.violations);
    }

    #[test]
    fn test_validate_manifest_bad_tier_enum() {
        let store = SchemaStore::embedded().unwrap();
        let mut manifest = minimal_manifest();
        manifest["providers"]["vendor"]["tier"] = "gold".into();

        let report = store.validate_manifest(&manifest);
        assert!(!report.is_valid());
        let violation = &report.violations[0];
        assert!(violation.path.contains("tier"), "path: {}", violation.path);
    }

    #[test]
    fn test_validate_catalog_minimal() {
        let store = SchemaStore::embedded().unwrap();
        let catalog = serde_json::json!({
            "schemaVersion": "1.0.0",
            "lastUpdated": "2026-01-15T00:00:00.000Z",
            "apps": []
        });
        let report = store.validate_catalog(&catalog);
        assert!(report.is_valid(), "violations: {:?}", report.violations);
    }

    #[test]
    fn test_validate_catalog_rejects_bad_entry() {
        let store = SchemaStore::embedded().unwrap();
        let catalog = serde_json::json!({
            "schemaVersion": "1.0.0",
            "lastUpdated": "2026-01-15T00:00:00.000Z",
            "apps": [{ "id": "demo" }]
        });
        let report = store.validate_catalog(&catalog);
        assert!(!report.is_valid());
        assert!(report.violations[0].path.starts_with("/apps/0"));
    }

    #[test]
    fn test_validation_does_not_mutate_input() {
        let store = SchemaStore::embedded().unwrap();
        let manifest = minimal_manifest();
        let before = manifest.clone();
        let _ = store.validate_manifest(&manifest);
        assert_eq!(manifest, before);
    }
}
