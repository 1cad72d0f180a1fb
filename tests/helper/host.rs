//! Repository host test utilities

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use noble_version_tracker::remote::{ComparisonResult, RemoteError, RepositoryHost};

/// In-memory repository host. Unknown comparisons and manifests answer 404.
#[derive(Default)]
pub struct StubHost {
    comparisons: HashMap<(String, String), ComparisonResult>,
    manifests: HashMap<String, String>,
    calls: Mutex<Vec<String>>,
}

impl StubHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_comparison(mut self, base: &str, head: &str, payload: serde_json::Value) -> Self {
        let comparison = serde_json::from_value(payload).expect("valid comparison payload");
        self.comparisons
            .insert((base.to_string(), head.to_string()), comparison);
        self
    }

    pub fn with_manifest(mut self, tag: &str, content: &str) -> Self {
        self.manifests.insert(tag.to_string(), content.to_string());
        self
    }

    /// Requests made so far, e.g. `compare v10.0.0...v11.0.0`
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn not_found() -> RemoteError {
        RemoteError::Api {
            status: 404,
            message: Some("Not Found".to_string()),
        }
    }
}

#[async_trait]
impl RepositoryHost for StubHost {
    async fn compare(
        &self,
        _repo: &str,
        base_tag: &str,
        head_tag: &str,
    ) -> Result<ComparisonResult, RemoteError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("compare {}...{}", base_tag, head_tag));
        self.comparisons
            .get(&(base_tag.to_string(), head_tag.to_string()))
            .cloned()
            .ok_or_else(Self::not_found)
    }

    async fn fetch_manifest(&self, _repo: &str, tag: &str) -> Result<String, RemoteError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("manifest {}", tag));
        self.manifests.get(tag).cloned().ok_or_else(Self::not_found)
    }
}
