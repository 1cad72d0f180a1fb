//! Upgrades table parser
//!
//! Finds the newest release listed in the mainnet upgrades document.
//! Releases are written as markdown links whose label is a code span:
//!
//! ```text
//! | [`v11.0.0`](https://github.com/noble-assets/noble/releases/tag/v11.0.0) | ... |
//! ```

use std::path::{Path, PathBuf};

use regex::Regex;
use thiserror::Error;
use tracing::{debug, warn};

use crate::version::{Version, VersionError};

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to read {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("no versions found in the upgrades table")]
    NoVersionsFound,

    /// Every suffixed tag in document order.
    #[error(
        "found versions with suffixes in the upgrades table: {} (update the documentation to list release versions only)",
        tags.join(", ")
    )]
    UnsupportedSuffix { tags: Vec<String> },

    #[error(transparent)]
    Version(#[from] VersionError),
}

/// Parser for the upgrades table document
pub struct UpgradesParser {
    /// Matches [`vX.Y.Z`] and [`vX.Y.Z-suffix`]
    tag_re: Regex,
}

impl UpgradesParser {
    pub fn new() -> Self {
        Self {
            tag_re: Regex::new(r"\[`(v\d+\.\d+\.\d+(?:-[a-zA-Z0-9]+)?)`\]")
                .expect("upgrade tag pattern is valid"),
        }
    }

    /// All tags in document order, suffixed ones included.
    pub fn tags<'a>(&self, content: &'a str) -> Vec<&'a str> {
        self.tag_re
            .captures_iter(content)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str())
            .collect()
    }

    /// Newest release in the document.
    ///
    /// One suffixed tag anywhere invalidates the whole table; the remaining
    /// tags are not ranked without it.
    pub fn latest_version(&self, content: &str) -> Result<Version, DocumentError> {
        let tags = self.tags(content);
        debug!("Found {} version tags in upgrades table", tags.len());

        let Some((first, rest)) = tags.split_first() else {
            return Err(DocumentError::NoVersionsFound);
        };

        let suffixed: Vec<String> = tags
            .iter()
            .filter(|tag| tag.contains('-'))
            .map(|tag| tag.to_string())
            .collect();
        if !suffixed.is_empty() {
            warn!("Upgrades table contains suffixed versions: {:?}", suffixed);
            return Err(DocumentError::UnsupportedSuffix { tags: suffixed });
        }

        rest.iter().try_fold(Version::parse(first)?, |latest, tag| -> Result<_, DocumentError> {
            let candidate = Version::parse(tag)?;
            Ok(if candidate > latest { candidate } else { latest })
        })
    }

    /// Read `path` and return its newest release.
    pub fn latest_version_from_file(&self, path: &Path) -> Result<Version, DocumentError> {
        let content = std::fs::read_to_string(path).map_err(|source| DocumentError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        self.latest_version(&content)
    }
}

impl Default for UpgradesParser {
    fn default() -> Self {
        Self::new()
    }
}
