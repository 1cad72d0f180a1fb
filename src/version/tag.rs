use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::version::error::VersionError;

/// A release version `major.minor.patch`.
///
/// Ordering is the plain tuple ordering of the three components, so
/// `v10.0.0` sorts after `v2.0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse `vX.Y.Z` or `X.Y.Z`.
    ///
    /// Any `-` in the input is rejected with [`VersionError::SuffixNotSupported`]
    /// before the prefix is stripped.
    pub fn parse(input: &str) -> Result<Self, VersionError> {
        if input.contains('-') {
            return Err(VersionError::SuffixNotSupported(input.to_string()));
        }

        let stripped = input.strip_prefix('v').unwrap_or(input);
        let parts: Vec<&str> = stripped.split('.').collect();
        let [major, minor, patch] = parts.as_slice() else {
            return Err(VersionError::Malformed(stripped.to_string()));
        };

        Ok(Self {
            major: parse_component(stripped, major)?,
            minor: parse_component(stripped, minor)?,
            patch: parse_component(stripped, patch)?,
        })
    }

    /// Render as a git tag, e.g. `v11.0.0`.
    pub fn tag(&self) -> String {
        format!("v{self}")
    }
}

fn parse_component(version: &str, component: &str) -> Result<u64, VersionError> {
    let non_integer = || VersionError::NonIntegerComponent {
        version: version.to_string(),
        component: component.to_string(),
    };

    // u64::from_str accepts a leading '+'
    if component.is_empty() || !component.bytes().all(|b| b.is_ascii_digit()) {
        return Err(non_integer());
    }
    component.parse().map_err(|_| non_integer())
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Compare two version strings.
///
/// A parse failure on either side is wrapped in [`VersionError::Comparison`]
/// naming both inputs.
pub fn compare_versions(left: &str, right: &str) -> Result<Ordering, VersionError> {
    let wrap = |source: VersionError| VersionError::Comparison {
        left: left.to_string(),
        right: right.to_string(),
        source: Box::new(source),
    };

    let l = Version::parse(left).map_err(wrap)?;
    let r = Version::parse(right).map_err(wrap)?;

    Ok(l.cmp(&r))
}
