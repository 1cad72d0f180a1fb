//! Persisted "last tracked version" record
//!
//! The record is a single flat JSON object that is rewritten wholesale:
//!
//! ```json
//! {
//!   "last_tracked_version": "v11.0.0",
//!   "last_checked": "2026-10-18T09:30:00.000000+00:00"
//! }
//! ```

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("failed to serialize tracker record: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write tracker file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerRecord {
    pub last_tracked_version: Option<String>,
    /// RFC 3339 timestamp in UTC
    pub last_checked: Option<String>,
}

pub struct TrackerStore {
    path: PathBuf,
}

impl TrackerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the record, falling back to the empty record when the file is
    /// missing, unreadable or not valid JSON.
    pub fn load(&self) -> TrackerRecord {
        if !self.path.exists() {
            debug!("No tracker file at {:?}", self.path);
            return TrackerRecord::default();
        }

        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to read tracker file {:?}: {}", self.path, e);
                return TrackerRecord::default();
            }
        };

        serde_json::from_str::<TrackerRecord>(&content)
            .inspect(|record| debug!("Loaded tracker record {:?}", record))
            .unwrap_or_else(|e| {
                warn!("Invalid JSON in tracker file {:?}: {}", self.path, e);
                TrackerRecord::default()
            })
    }

    /// Overwrite the record with `version`, stamped with the current time.
    pub fn save(&self, version: &str) -> Result<TrackerRecord, TrackerError> {
        let record = TrackerRecord {
            last_tracked_version: Some(version.to_string()),
            last_checked: Some(Utc::now().to_rfc3339()),
        };

        let mut json = serde_json::to_string_pretty(&record)?;
        json.push('\n');

        std::fs::write(&self.path, json).map_err(|source| TrackerError::Write {
            path: self.path.clone(),
            source,
        })?;

        info!("Saved tracked version {} to {:?}", version, self.path);
        Ok(record)
    }
}
