//! Remote repository access
//!
//! # Modules
//!
//! - [`host`]: `RepositoryHost` trait for comparisons and manifest fetches
//! - [`github`]: GitHub implementation of `RepositoryHost`
//! - [`types`]: Comparison payload types
//! - [`summary`]: Console rendering of a comparison
//! - [`error`]: Error type for remote calls

pub mod error;
pub mod github;
pub mod host;
pub mod summary;
pub mod types;

pub use error::RemoteError;
pub use github::GitHubClient;
pub use host::RepositoryHost;
pub use summary::summarize;
pub use types::{ChangeKind, ChangedFile, CommitEntry, ComparisonResult};
