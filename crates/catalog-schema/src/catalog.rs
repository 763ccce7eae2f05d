//! Master catalog types.

use catforge_common::Timestamp;
use serde::{Deserialize, Serialize};

use crate::manifest::{Link, SeverityCounts};

/// Provider name surfaced as the `hasHardenedVendor` flag.
pub const HARDENED_VENDOR_PROVIDER: &str = "hardened-vendor";

/// Provider name surfaced as the `hasPlatformHardened` flag.
pub const PLATFORM_HARDENED_PROVIDER: &str = "platform-hardened";

/// A denormalized catalog row for one application.
///
/// Entirely recomputed on every refresh; never hand-edited.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
    pub summary: String,
    #[serde(default)]
    pub labels: Vec<String>,
    /// Names of the providers offering this application.
    pub providers: Vec<String>,
    pub has_hardened_vendor: bool,
    pub has_platform_hardened: bool,
    /// Total images across every provider and version.
    pub image_count: u64,
    /// Severity totals across every provider and version.
    pub aggregates: SeverityCounts,
    /// Highest version observed across providers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_version: Option<String>,
    /// Registry reference of the latest version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry: Option<String>,
    #[serde(default)]
    pub links: Vec<Link>,
}

/// The generated master catalog (`catalog/apps.json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    /// Schema version tag for downstream consumers.
    pub schema_version: String,
    /// When this catalog was generated.
    pub last_updated: Timestamp,
    /// Entries sorted by display name.
    pub apps: Vec<CatalogEntry>,
}
