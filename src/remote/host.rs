//! Repository host trait for fetching comparisons and manifests

#[cfg(test)]
use mockall::automock;

use crate::remote::error::RemoteError;
use crate::remote::types::ComparisonResult;

/// Trait for reading a hosted source repository
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait RepositoryHost: Send + Sync {
    /// Fetches the commit and file comparison between two tags
    ///
    /// # Arguments
    /// * `repo` - Repository in `owner/name` form (e.g., "noble-assets/noble")
    /// * `base_tag` - Older tag (e.g., "v10.0.0")
    /// * `head_tag` - Newer tag (e.g., "v11.0.0")
    async fn compare(
        &self,
        repo: &str,
        base_tag: &str,
        head_tag: &str,
    ) -> Result<ComparisonResult, RemoteError>;

    /// Fetches the raw go.mod content at `tag`
    async fn fetch_manifest(&self, repo: &str, tag: &str) -> Result<String, RemoteError>;
}
