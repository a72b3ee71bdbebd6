//! Semantic version parsing and comparison
//!
//! Versions are `MAJOR.MINOR.PATCH` triples with an optional leading `v` and
//! optional surrounding quotes. Comparison never fails: when either side does not
//! parse, it degrades to plain string ordering.

use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{RegistryError, Result};

#[allow(clippy::expect_used)]
static SEMVER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\.(\d+)\.(\d+)$").expect("valid version pattern"));

/// A parsed `major.minor.patch` version
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Normalize a version string: trim whitespace, strip quotes and a leading `v`.
pub fn format_version(version: &str) -> String {
    version
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .trim_start_matches('v')
        .to_string()
}

/// Parse a version string like `1.2.3`, `v1.2.3` or `"1.2.3"`.
pub fn parse_version(version: &str) -> Result<Version> {
    let normalized = format_version(version);
    let invalid = || RegistryError::VersionParse {
        version: version.to_string(),
    };

    let caps = SEMVER.captures(&normalized).ok_or_else(invalid)?;
    let part = |i: usize| -> Result<u64> { caps[i].parse::<u64>().map_err(|_| invalid()) };

    Ok(Version {
        major: part(1)?,
        minor: part(2)?,
        patch: part(3)?,
    })
}

/// Compare two version strings.
///
/// Falls back to lexicographic string comparison of the raw inputs when either
/// side is not a valid version.
pub fn compare_versions(left: &str, right: &str) -> Ordering {
    match (parse_version(left), parse_version(right)) {
        (Ok(l), Ok(r)) => l.cmp(&r),
        _ => left.cmp(right),
    }
}

/// True when `available` is strictly newer than `installed`
pub fn is_newer_version(available: &str, installed: &str) -> bool {
    compare_versions(available, installed) == Ordering::Greater
}
