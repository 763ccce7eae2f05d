//! Version ordering for latest-version selection.
//!
//! Version strings are compared as parsed semantic versions when they parse.
//! A parsed version always outranks an unparsable one, and two unparsable
//! strings fall back to plain string comparison, so the order stays total
//! and never panics on odd input.

use std::cmp::Ordering;

/// A version string with a total order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionKey {
    raw: String,
    parsed: Option<semver::Version>,
}

impl VersionKey {
    /// Parse a version string, tolerating a leading `v`.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let bare = trimmed.strip_prefix('v').unwrap_or(trimmed);
        Self {
            raw: raw.to_string(),
            parsed: semver::Version::parse(bare).ok(),
        }
    }

    /// The original version string.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether the string parsed as a semantic version.
    pub fn is_semver(&self) -> bool {
        self.parsed.is_some()
    }
}

impl Ord for VersionKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (&self.parsed, &other.parsed) {
            (Some(a), Some(b)) => a.cmp(b).then_with(|| self.raw.cmp(&other.raw)),
            (Some(_), None) => Ordering::Greater,
            (None, Some(_)) => Ordering::Less,
            (None, None) => self.raw.cmp(&other.raw),
        }
    }
}

impl PartialOrd for VersionKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_components_compare_numerically() {
        // Plain string ordering gets this backwards ("1.10.0" < "1.9.0");
        // the parsed order does not.
        assert!("1.10.0" < "1.9.0");
        assert!(VersionKey::parse("1.10.0") > VersionKey::parse("1.9.0"));
    }

    #[test]
    fn test_basic_ordering() {
        assert!(VersionKey::parse("2.0.0") > VersionKey::parse("1.99.99"));
        assert!(VersionKey::parse("1.2.3") > VersionKey::parse("1.2.2"));
        assert!(VersionKey::parse("0.10.0") > VersionKey::parse("0.9.9"));
    }

    #[test]
    fn test_prerelease_sorts_below_release() {
        assert!(VersionKey::parse("1.0.0-rc.1") < VersionKey::parse("1.0.0"));
        assert!(VersionKey::parse("1.0.0-alpha") < VersionKey::parse("1.0.0-beta"));
    }

    #[test]
    fn test_v_prefix_is_tolerated() {
        let key = VersionKey::parse("v1.2.3");
        assert!(key.is_semver());
        assert!(key > VersionKey::parse("1.2.2"));
        assert_eq!(key.as_str(), "v1.2.3");
    }

    #[test]
    fn test_parsed_outranks_unparsable() {
        assert!(VersionKey::parse("0.0.1") > VersionKey::parse("latest"));
        assert!(VersionKey::parse("1.0.0") > VersionKey::parse("2024-05"));
    }

    #[test]
    fn test_unparsable_fall_back_to_string_order() {
        let a = VersionKey::parse("edge");
        let b = VersionKey::parse("latest");
        assert!(!a.is_semver());
        assert!(a < b);
    }
}
