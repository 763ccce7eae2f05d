//! Catalog entry construction.

use catforge_catalog_schema::catalog::{HARDENED_VENDOR_PROVIDER, PLATFORM_HARDENED_PROVIDER};
use catforge_catalog_schema::{AppManifest, CatalogEntry, SeverityCounts};

use crate::version::VersionKey;

/// Build the denormalized catalog entry for one application.
///
/// Totals are summed over every provider and version, using the aggregates
/// already recomputed for this refresh. The latest version is the maximum
/// `VersionKey` observed anywhere in the manifest; ties keep the first
/// provider in name order, and its registry reference travels with it.
pub fn build_entry(manifest: &AppManifest) -> CatalogEntry {
    let mut aggregates = SeverityCounts::default();
    let mut image_count: u64 = 0;
    let mut latest: Option<(VersionKey, String)> = None;

    for provider in manifest.providers.values() {
        for version in &provider.versions {
            aggregates += version.aggregates;
            image_count += version.images.len() as u64;

            let key = VersionKey::parse(&version.version);
            let newer = match &latest {
                Some((current, _)) => key > *current,
                None => true,
            };
            if newer {
                latest = Some((key, version.registry.clone()));
            }
        }
    }

    let (latest_version, registry) = match latest {
        Some((key, registry)) => (Some(key.as_str().to_string()), Some(registry)),
        None => (None, None),
    };

    CatalogEntry {
        id: manifest.id.clone(),
        name: manifest.name.clone(),
        summary: manifest.summary.clone(),
        labels: manifest.labels.clone(),
        providers: manifest.providers.keys().cloned().collect(),
        has_hardened_vendor: manifest.providers.contains_key(HARDENED_VENDOR_PROVIDER),
        has_platform_hardened: manifest.providers.contains_key(PLATFORM_HARDENED_PROVIDER),
        image_count,
        aggregates,
        latest_version,
        registry,
        links: manifest.links.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catforge_catalog_schema::{Image, Provider, VersionEntry};
    use catforge_common::Timestamp;
    use std::collections::BTreeMap;

    fn version(version: &str, registry: &str, images: usize, counts: SeverityCounts) -> VersionEntry {
        VersionEntry {
            version: version.to_string(),
            released: Timestamp::parse("2026-01-01T00:00:00.000Z").unwrap(),
            registry: registry.to_string(),
            images: (0..images)
                .map(|i| Image {
                    name: format!("img-{i}"),
                    digest: format!("sha256:{}", "0".repeat(64)),
                    size: 1,
                    role: "main".to_string(),
                    platforms: vec![],
                    base_image: None,
                    sbom: None,
                    scan: None,
                })
                .collect(),
            aggregates: counts,
        }
    }

    fn manifest(providers: BTreeMap<String, Provider>) -> AppManifest {
        AppManifest {
            id: "demo".to_string(),
            name: "Demo".to_string(),
            summary: "A demo application".to_string(),
            description: "A long enough description of the demo application.".to_string(),
            links: vec![],
            labels: vec!["web".to_string()],
            providers,
            last_scanned: None,
        }
    }

    #[test]
    fn test_totals_and_flags() {
        let mut providers = BTreeMap::new();
        providers.insert(
            "vendor".to_string(),
            Provider {
                tier: "community".to_string(),
                notes: String::new(),
                versions: vec![version(
                    "1.0.0",
                    "oci://registry.example/vendor/demo:1.0.0",
                    2,
                    SeverityCounts {
                        critical: 1,
                        high: 2,
                        medium: 0,
                        low: 4,
                    },
                )],
            },
        );
        providers.insert(
            "hardened-vendor".to_string(),
            Provider {
                tier: "enterprise".to_string(),
                notes: String::new(),
                versions: vec![version(
                    "1.0.0",
                    "oci://registry.example/hardened/demo:1.0.0",
                    1,
                    SeverityCounts::default(),
                )],
            },
        );

        let entry = build_entry(&manifest(providers));
        assert_eq!(entry.providers, vec!["hardened-vendor", "vendor"]);
        assert!(entry.has_hardened_vendor);
        assert!(!entry.has_platform_hardened);
        assert_eq!(entry.image_count, 3);
        assert_eq!(entry.aggregates.critical, 1);
        assert_eq!(entry.aggregates.low, 4);
    }

    #[test]
    fn test_latest_version_is_numeric_not_lexicographic() {
        let mut providers = BTreeMap::new();
        providers.insert(
            "vendor".to_string(),
            Provider {
                tier: "community".to_string(),
                notes: String::new(),
                versions: vec![
                    version("1.9.0", "oci://r/demo:1.9.0", 0, SeverityCounts::default()),
                    version("1.10.0", "oci://r/demo:1.10.0", 0, SeverityCounts::default()),
                ],
            },
        );

        let entry = build_entry(&manifest(providers));
        assert_eq!(entry.latest_version.as_deref(), Some("1.10.0"));
        assert_eq!(entry.registry.as_deref(), Some("oci://r/demo:1.10.0"));
    }

    #[test]
    fn test_no_versions_yields_no_latest() {
        let mut providers = BTreeMap::new();
        providers.insert(
            "vendor".to_string(),
            Provider {
                tier: "community".to_string(),
                notes: String::new(),
                versions: vec![],
            },
        );

        let entry = build_entry(&manifest(providers));
        assert_eq!(entry.latest_version, None);
        assert_eq!(entry.registry, None);
        assert_eq!(entry.image_count, 0);
    }
}
