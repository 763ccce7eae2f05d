//! Per-version severity aggregation.

use catforge_catalog_schema::{Image, ScanRef, SeverityCounts};
use std::path::Path;
use tracing::debug;

use crate::scan_report::parse_scan_file;

/// Sum severity counts over every scan artifact referenced by `images`.
///
/// Scan references are resolved relative to `base_dir`, the application
/// directory the manifest lives in. Multi-platform images contribute every
/// platform's report to the total; images without a scan reference
/// contribute nothing. The result is the authoritative aggregate for the
/// version and replaces whatever was stored before.
pub fn aggregate_version(images: &[Image], base_dir: &Path) -> SeverityCounts {
    let mut total = SeverityCounts::default();

    for image in images {
        match &image.scan {
            Some(ScanRef::Path(path)) => {
                total += parse_scan_file(&base_dir.join(path));
            }
            Some(ScanRef::PerPlatform(scans)) => {
                for (platform, path) in scans {
                    debug!("parsing {} scan for image {}", platform, image.name);
                    total += parse_scan_file(&base_dir.join(path));
                }
            }
            None => {}
        }
    }

    total
}
