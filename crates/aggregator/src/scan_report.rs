//! Parsing of vulnerability-scan artifacts into severity counts.

use catforge_catalog_schema::SeverityCounts;
use serde::Deserialize;
use std::path::Path;
use tracing::{error, warn};

/// One match record from raw scanner output; the severity lives on the
/// nested vulnerability object.
#[derive(Debug, Deserialize)]
struct MatchRecord {
    #[serde(default)]
    vulnerability: Option<VulnerabilityRecord>,
}

/// One record from the normalized vulnerability list.
#[derive(Debug, Deserialize)]
struct VulnerabilityRecord {
    #[serde(default)]
    severity: Option<String>,
}

/// A scan artifact with its vulnerability list resolved to one shape.
///
/// Raw scanner output carries `matches`; the normalized form carries
/// `vulnerabilities`. When both appear, `matches` wins; a report with
/// neither is an empty report.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ScanReport {
    Matches { matches: Vec<MatchRecord> },
    Normalized { vulnerabilities: Vec<VulnerabilityRecord> },
    Empty {},
}

/// Parse one scan artifact into severity counts.
///
/// Absent scans must not block catalog generation: a missing file logs a
/// warning and counts as zero, and a malformed file logs an error and
/// counts as zero.
pub fn parse_scan_file(path: &Path) -> SeverityCounts {
    if !path.exists() {
        warn!("scan report not found: {}", path.display());
        return SeverityCounts::default();
    }

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            error!("failed to read scan report {}: {}", path.display(), err);
            return SeverityCounts::default();
        }
    };

    let report: ScanReport = match serde_json::from_str(&content) {
        Ok(report) => report,
        Err(err) => {
            error!("failed to parse scan report {}: {}", path.display(), err);
            return SeverityCounts::default();
        }
    };

    let mut counts = SeverityCounts::default();
    match report {
        ScanReport::Matches { matches } => {
            for record in matches.iter().filter_map(|m| m.vulnerability.as_ref()) {
                if let Some(ref severity) = record.severity {
                    bump(&mut counts, severity);
                }
            }
        }
        ScanReport::Normalized { vulnerabilities } => {
            for record in &vulnerabilities {
                if let Some(ref severity) = record.severity {
                    bump(&mut counts, severity);
                }
            }
        }
        ScanReport::Empty {} => {}
    }

    counts
}

/// Increment the bucket for a known severity label. Unknown labels,
/// including "unknown" and "negligible", are dropped rather than counted.
fn bump(counts: &mut SeverityCounts, label: &str) {
    match label.to_ascii_lowercase().as_str() {
        "critical" => counts.critical += 1,
        "high" => counts.high += 1,
        "medium" => counts.medium += 1,
        "low" => counts.low += 1,
        _ => {}
    }
}
