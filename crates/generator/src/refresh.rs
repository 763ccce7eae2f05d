//! The refresh cycle: recompute aggregates, rewrite manifests, and rebuild
//! the master catalog.

use anyhow::{bail, Context, Result};
use catforge_aggregator::aggregate_version;
use catforge_catalog_schema::{
    AppManifest, Catalog, CatalogEntry, SchemaStore, CATALOG_SCHEMA_VERSION,
};
use catforge_common::{fsio, Timestamp};
use std::path::Path;
use tracing::{debug, error, info, warn};

use crate::config::GeneratorConfig;
use crate::discover::discover_apps;
use crate::entry::build_entry;

/// Outcome counters for one refresh run.
#[derive(Debug, Default)]
pub struct RefreshSummary {
    /// Applications whose manifests were processed.
    pub processed: usize,
    /// Directories skipped for lack of a manifest.
    pub skipped: usize,
    /// Manifests whose serialized form changed and were rewritten.
    pub manifests_rewritten: usize,
}

/// Run the full refresh cycle over every application under the catalog root.
///
/// Any schema violation in a manifest or in the generated catalog aborts
/// the run before the master catalog is written; a single malformed
/// manifest must not silently corrupt the published index.
pub fn refresh_catalog(config: &GeneratorConfig) -> Result<RefreshSummary> {
    let schemas = config.schema_store().context("failed to load schemas")?;
    let app_dirs = discover_apps(&config.catalog_root)?;

    let mut summary = RefreshSummary::default();
    let mut entries: Vec<CatalogEntry> = Vec::new();

    for app_dir in &app_dirs {
        let manifest_path = config.manifest_path(app_dir);
        if !manifest_path.exists() {
            warn!("no manifest.json in {}, skipping", app_dir.display());
            summary.skipped += 1;
            continue;
        }

        let entry = refresh_app(&manifest_path, app_dir, &schemas, &mut summary)?;
        entries.push(entry);
        summary.processed += 1;
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));

    let catalog = Catalog {
        schema_version: CATALOG_SCHEMA_VERSION.to_string(),
        last_updated: Timestamp::now(),
        apps: entries,
    };

    let catalog_value = serde_json::to_value(&catalog)?;
    let report = schemas.validate_catalog(&catalog_value);
    if !report.is_valid() {
        for violation in &report.violations {
            error!("catalog: {}", violation);
        }
        bail!(
            "generated catalog failed schema validation ({} violations), not writing {}",
            report.violations.len(),
            config.output_path.display()
        );
    }

    fsio::write_json_pretty(&config.output_path, &catalog)
        .with_context(|| format!("failed to write {}", config.output_path.display()))?;
    info!(
        "catalog written to {} ({} apps, {} skipped)",
        config.output_path.display(),
        summary.processed,
        summary.skipped
    );

    Ok(summary)
}

/// Refresh a single application: recompute aggregates, stamp the scan time,
/// re-validate, persist if changed, and build its catalog entry.
fn refresh_app(
    manifest_path: &Path,
    app_dir: &Path,
    schemas: &SchemaStore,
    summary: &mut RefreshSummary,
) -> Result<CatalogEntry> {
    let original = std::fs::read_to_string(manifest_path)
        .with_context(|| format!("failed to read {}", manifest_path.display()))?;
    let mut manifest: AppManifest = serde_json::from_str(&original)
        .with_context(|| format!("failed to parse {}", manifest_path.display()))?;

    manifest.last_scanned = Some(Timestamp::now());

    for (provider_name, provider) in manifest.providers.iter_mut() {
        for version in provider.versions.iter_mut() {
            // Versions without images keep whatever aggregate they carry.
            if version.images.is_empty() {
                continue;
            }
            let recomputed = aggregate_version(&version.images, app_dir);

            // Byte comparison of the serialized aggregate, so an equal
            // recomputation never registers as a change.
            let before = serde_json::to_string(&version.aggregates)?;
            let after = serde_json::to_string(&recomputed)?;
            if before == after {
                debug!(
                    "{}: {}/{} aggregate unchanged",
                    manifest.id, provider_name, version.version
                );
            } else {
                info!(
                    "{}: {}/{} aggregate {} -> {}",
                    manifest.id, provider_name, version.version, before, after
                );
                version.aggregates = recomputed;
            }
        }
    }

    let manifest_value = serde_json::to_value(&manifest)?;
    let report = schemas.validate_manifest(&manifest_value);
    if !report.is_valid() {
        for violation in &report.violations {
            error!("{}: {}", manifest_path.display(), violation);
        }
        bail!(
            "manifest {} failed schema validation ({} violations)",
            manifest_path.display(),
            report.violations.len()
        );
    }

    let mut serialized = serde_json::to_string_pretty(&manifest)?;
    serialized.push('\n');
    if serialized != original {
        fsio::write_atomic(manifest_path, serialized.as_bytes())
            .with_context(|| format!("failed to write {}", manifest_path.display()))?;
        summary.manifests_rewritten += 1;
    }

    Ok(build_entry(&manifest))
}
