//! Scan-report parsing and severity aggregation.
//!
//! Reads the vulnerability-scan artifacts referenced by application
//! manifests and reduces them to per-version severity totals.

pub mod aggregate;
pub mod scan_report;

pub use aggregate::aggregate_version;
pub use scan_report::parse_scan_file;
