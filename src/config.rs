use serde::Deserialize;
use std::path::{Path, PathBuf};

// =============================================================================
// Time-related constants
// =============================================================================

/// Timeout for fetch operations in milliseconds (30 seconds)
pub const FETCH_TIMEOUT_MS: u64 = 30_000;

// =============================================================================
// Remote endpoints
// =============================================================================

/// Default base URL for GitHub API
pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

/// Default base URL for raw file content
pub const DEFAULT_RAW_BASE_URL: &str = "https://raw.githubusercontent.com";

/// Default base URL for human-facing comparison pages
pub const DEFAULT_WEB_BASE_URL: &str = "https://github.com";

/// Repository whose releases are tracked
pub const DEFAULT_REPOSITORY: &str = "noble-assets/noble";

// =============================================================================
// Repository layout
// =============================================================================

/// Mainnet upgrades table, relative to the documentation root
pub const DEFAULT_DOCS_PATH: &str = "docs/build/chain-upgrades/mainnet.mdx";

/// Tracker record, relative to the documentation root
pub const DEFAULT_TRACKER_PATH: &str = ".noble_version_tracker.json";

/// Tracker configuration structure
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct TrackerConfig {
    /// Upgrades table document. Relative paths resolve against the root.
    pub docs_path: PathBuf,
    /// Tracker JSON file. Relative paths resolve against the root.
    pub tracker_path: PathBuf,
    /// Repository in `owner/name` form
    pub repository: String,
    pub api_base_url: String,
    pub raw_base_url: String,
    pub web_base_url: String,
    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            docs_path: PathBuf::from(DEFAULT_DOCS_PATH),
            tracker_path: PathBuf::from(DEFAULT_TRACKER_PATH),
            repository: DEFAULT_REPOSITORY.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            raw_base_url: DEFAULT_RAW_BASE_URL.to_string(),
            web_base_url: DEFAULT_WEB_BASE_URL.to_string(),
            timeout_ms: FETCH_TIMEOUT_MS,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl TrackerConfig {
    /// Load a JSON config file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolve the relative document and tracker paths against `root`.
    pub fn rooted_at(mut self, root: &Path) -> Self {
        self.docs_path = root.join(&self.docs_path);
        self.tracker_path = root.join(&self.tracker_path);
        self
    }

    /// Manual comparison page for when the API call fails.
    pub fn compare_page_url(&self, base_tag: &str, head_tag: &str) -> String {
        format!(
            "{}/{}/compare/{}...{}",
            self.web_base_url, self.repository, base_tag, head_tag
        )
    }
}

/// Returns the path to the data directory for noble-version-tracker.
/// Uses $XDG_DATA_HOME/noble-version-tracker if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/noble-version-tracker,
/// or ./noble-version-tracker if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the default config file.
pub fn config_path() -> PathBuf {
    data_dir().join("config.json")
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("noble-version-tracker")
}
