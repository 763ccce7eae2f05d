//! Read-only validation of every manifest under the catalog root.

use anyhow::{Context, Result};
use catforge_catalog_schema::Violation;
use std::path::PathBuf;
use tracing::warn;

use crate::config::GeneratorConfig;
use crate::discover::discover_apps;

/// All violations found for one application.
#[derive(Debug)]
pub struct AppViolations {
    pub manifest_path: PathBuf,
    pub violations: Vec<Violation>,
}

/// Result of a validate pass over the whole catalog tree.
#[derive(Debug, Default)]
pub struct ValidateReport {
    /// Manifests checked.
    pub checked: usize,
    /// Directories skipped for lack of a manifest.
    pub skipped: usize,
    /// Applications with at least one violation.
    pub failures: Vec<AppViolations>,
}

impl ValidateReport {
    pub fn is_valid(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Validate every manifest found under the catalog root without mutating or
/// persisting anything.
///
/// A malformed manifest never stops the pass: its failure is recorded and
/// the remaining applications are still checked, so one invocation reports
/// every problem in the tree.
pub fn validate_catalog_tree(config: &GeneratorConfig) -> Result<ValidateReport> {
    let schemas = config.schema_store().context("failed to load schemas")?;
    let app_dirs = discover_apps(&config.catalog_root)?;

    let mut report = ValidateReport::default();

    for app_dir in &app_dirs {
        let manifest_path = config.manifest_path(app_dir);
        if !manifest_path.exists() {
            warn!("no manifest.json in {}, skipping", app_dir.display());
            report.skipped += 1;
            continue;
        }
        report.checked += 1;

        let content = match std::fs::read_to_string(&manifest_path) {
            Ok(content) => content,
            Err(err) => {
                report.failures.push(AppViolations {
                    manifest_path: manifest_path.clone(),
                    violations: vec![Violation {
                        path: String::new(),
                        message: format!("unreadable manifest: {}", err),
                    }],
                });
                continue;
            }
        };

        let document: serde_json::Value = match serde_json::from_str(&content) {
            Ok(document) => document,
            Err(err) => {
                report.failures.push(AppViolations {
                    manifest_path: manifest_path.clone(),
                    violations: vec![Violation {
                        path: String::new(),
                        message: format!("invalid JSON: {}", err),
                    }],
                });
                continue;
            }
        };

        let result = schemas.validate_manifest(&document);
        if !result.is_valid() {
            report.failures.push(AppViolations {
                manifest_path: manifest_path.clone(),
                violations: result.violations,
            });
        }
    }

    Ok(report)
}
