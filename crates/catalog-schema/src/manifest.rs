//! Manifest types for catalog applications.

use catforge_common::Timestamp;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::AddAssign;

/// Vulnerability totals bucketed by severity.
///
/// These are the only four buckets the catalog tracks; records with any
/// other severity label are dropped during aggregation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    #[serde(default)]
    pub critical: u64,
    #[serde(default)]
    pub high: u64,
    #[serde(default)]
    pub medium: u64,
    #[serde(default)]
    pub low: u64,
}

impl SeverityCounts {
    /// Sum across all four buckets.
    pub fn total(&self) -> u64 {
        self.critical + self.high + self.medium + self.low
    }

    /// True when every bucket is zero.
    pub fn is_zero(&self) -> bool {
        self.total() == 0
    }
}

impl AddAssign for SeverityCounts {
    fn add_assign(&mut self, rhs: Self) {
        self.critical = self.critical.saturating_add(rhs.critical);
        self.high = self.high.saturating_add(rhs.high);
        self.medium = self.medium.saturating_add(rhs.medium);
        self.low = self.low.saturating_add(rhs.low);
    }
}

/// Reference to the scan artifact(s) for an image.
///
/// Single-platform images point at one report; multi-platform images map
/// each platform name to its own report. Both forms appear in authored
/// manifests, so the distinction is resolved here at deserialization time
/// instead of being probed downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScanRef {
    /// One report covering the whole image.
    Path(String),
    /// Platform name to report path, every entry counted.
    PerPlatform(BTreeMap<String, String>),
}

/// A container image shipped by a version.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub name: String,
    /// Content digest, computed by the packaging pipeline.
    pub digest: String,
    /// Compressed size in bytes.
    pub size: u64,
    /// Role within the release (e.g. "main", "init", "sidecar").
    pub role: String,
    /// Supported platforms, in declaration order.
    #[serde(default)]
    pub platforms: Vec<String>,
    /// Base image reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_image: Option<String>,
    /// SBOM artifact path, relative to the application directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sbom: Option<String>,
    /// Scan artifact reference(s), relative to the application directory.
    /// An image without one contributes zero to aggregates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scan: Option<ScanRef>,
}

/// A released version of a provider's build.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionEntry {
    /// Version string as published by the provider.
    pub version: String,
    /// Release timestamp.
    pub released: Timestamp,
    /// Package registry reference for this release.
    pub registry: String,
    /// Images shipped by this release, in declaration order.
    #[serde(default)]
    pub images: Vec<Image>,
    /// Severity totals over every image scan. Owned by the generator:
    /// recomputed on refresh, never trusted from disk.
    #[serde(default)]
    pub aggregates: SeverityCounts,
}

/// A named source of an application's images.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    /// Support tier (community, supported, enterprise).
    pub tier: String,
    /// Free-text notes about this provider's builds.
    #[serde(default)]
    pub notes: String,
    /// Published versions, in declaration order.
    #[serde(default)]
    pub versions: Vec<VersionEntry>,
}

/// An upstream link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub name: String,
    pub url: String,
}

/// The manifest.json document for one catalog application.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppManifest {
    /// Unique application id (lowercase alphanumeric plus hyphens).
    pub id: String,
    /// Display name.
    pub name: String,
    /// One-line summary.
    pub summary: String,
    /// Long-form description.
    pub description: String,
    /// Upstream links.
    #[serde(default)]
    pub links: Vec<Link>,
    /// Free-form labels.
    #[serde(default)]
    pub labels: Vec<String>,
    /// Providers keyed by name.
    pub providers: BTreeMap<String, Provider>,
    /// When the generator last recomputed aggregates. Owned by the
    /// generator; absent in freshly authored manifests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_scanned: Option<Timestamp>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_counts_default_is_zero() {
        let counts = SeverityCounts::default();
        assert!(counts.is_zero());

        let parsed: SeverityCounts = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, counts);
    }

    #[test]
    fn test_severity_counts_add_assign() {
        let mut total = SeverityCounts {
            critical: 1,
            high: 0,
            medium: 2,
            low: 0,
        };
        total += SeverityCounts {
            critical: 0,
            high: 3,
            medium: 1,
            low: 5,
        };
        assert_eq!(total.critical, 1);
        assert_eq!(total.high, 3);
        assert_eq!(total.medium, 3);
        assert_eq!(total.low, 5);
        assert_eq!(total.total(), 12);
    }

    #[test]
    fn test_scan_ref_single_path() {
        let parsed: ScanRef = serde_json::from_str("\"scans/vendor/1.0.0/app.json\"").unwrap();
        assert_eq!(parsed, ScanRef::Path("scans/vendor/1.0.0/app.json".into()));
    }

    #[test]
    fn test_scan_ref_per_platform() {
        let parsed: ScanRef = serde_json::from_str(
            r#"{"linux/amd64": "scans/a.json", "linux/arm64": "scans/b.json"}"#,
        )
        .unwrap();
        match parsed {
            ScanRef::PerPlatform(map) => {
                assert_eq!(map.len(), 2);
                assert_eq!(map["linux/amd64"], "scans/a.json");
            }
            ScanRef::Path(_) => panic!("expected per-platform mapping"),
        }
    }

    #[test]
    fn test_manifest_optional_fields_stay_absent() {
        let manifest = AppManifest {
            id: "demo".into(),
            name: "Demo".into(),
            summary: "A demo".into(),
            description: "x".repeat(40),
            links: vec![],
            labels: vec![],
            providers: BTreeMap::new(),
            last_scanned: None,
        };
        let json = serde_json::to_string(&manifest).unwrap();
        assert!(!json.contains("lastScanned"));
    }
}
