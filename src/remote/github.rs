//! GitHub implementation of [`RepositoryHost`]
//!
//! Comparisons come from the REST API; go.mod files come from the raw
//! content host.

use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::TrackerConfig;
use crate::remote::error::RemoteError;
use crate::remote::host::RepositoryHost;
use crate::remote::types::ComparisonResult;

/// Manifest file fetched at each tag
const MANIFEST_FILE: &str = "go.mod";

/// Error body returned by the GitHub API
#[derive(Debug, Deserialize)]
struct ApiMessage {
    message: String,
}

/// Repository host backed by GitHub
pub struct GitHubClient {
    client: reqwest::Client,
    api_base_url: String,
    raw_base_url: String,
}

impl GitHubClient {
    /// Creates a new GitHubClient with custom base URLs
    pub fn new(
        api_base_url: &str,
        raw_base_url: &str,
        timeout: Duration,
    ) -> Result<Self, RemoteError> {
        let client = reqwest::Client::builder()
            .user_agent("noble-version-tracker")
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            raw_base_url: raw_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &TrackerConfig) -> Result<Self, RemoteError> {
        Self::new(
            &config.api_base_url,
            &config.raw_base_url,
            Duration::from_millis(config.timeout_ms),
        )
    }

    async fn error_for_status(response: reqwest::Response, url: &str) -> RemoteError {
        let status = response.status();
        warn!("GitHub returned status {}: {}", status, url);

        let message = response
            .text()
            .await
            .ok()
            .and_then(|body| serde_json::from_str::<ApiMessage>(&body).ok())
            .map(|body| body.message);

        RemoteError::Api {
            status: status.as_u16(),
            message,
        }
    }
}

#[async_trait::async_trait]
impl RepositoryHost for GitHubClient {
    async fn compare(
        &self,
        repo: &str,
        base_tag: &str,
        head_tag: &str,
    ) -> Result<ComparisonResult, RemoteError> {
        let url = format!(
            "{}/repos/{}/compare/{}...{}",
            self.api_base_url, repo, base_tag, head_tag
        );
        debug!("Fetching comparison: {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/vnd.github+json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_for_status(response, &url).await);
        }

        response.json().await.map_err(|e| {
            warn!("Failed to parse GitHub comparison response: {}", e);
            RemoteError::InvalidResponse(e.to_string())
        })
    }

    async fn fetch_manifest(&self, repo: &str, tag: &str) -> Result<String, RemoteError> {
        let url = format!("{}/{}/{}/{}", self.raw_base_url, repo, tag, MANIFEST_FILE);
        debug!("Fetching manifest: {}", url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(Self::error_for_status(response, &url).await);
        }

        response.text().await.map_err(|e| {
            warn!("Failed to read manifest response: {}", e);
            RemoteError::InvalidResponse(e.to_string())
        })
    }
}
