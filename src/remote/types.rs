//! Comparison payload returned by `GET /repos/{owner}/{repo}/compare/{base}...{head}`
//!
//! Only the fields the report uses are modelled; everything else in the
//! response is ignored. Missing fields fall back to their defaults.

use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ComparisonResult {
    pub status: Option<String>,
    pub ahead_by: u64,
    pub behind_by: u64,
    pub total_commits: u64,
    pub files: Vec<ChangedFile>,
    pub commits: Vec<CommitEntry>,
    pub html_url: Option<String>,
}

impl ComparisonResult {
    /// True when the payload carried none of the modelled fields.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn files_with_kind(&self, kind: ChangeKind) -> Vec<&ChangedFile> {
        self.files.iter().filter(|f| f.status == kind).collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Added,
    Removed,
    Modified,
    Renamed,
    /// copied, changed, unchanged
    #[default]
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ChangedFile {
    pub filename: String,
    pub status: ChangeKind,
    pub additions: u64,
    pub deletions: u64,
    pub changes: u64,
    pub previous_filename: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CommitEntry {
    pub sha: String,
    pub commit: CommitDetail,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CommitDetail {
    pub message: String,
    pub author: Option<CommitAuthor>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CommitAuthor {
    pub name: String,
}

impl CommitEntry {
    pub fn short_sha(&self) -> &str {
        self.sha.get(..7).unwrap_or(&self.sha)
    }

    /// First line of the commit message.
    pub fn title(&self) -> &str {
        self.commit.message.lines().next().unwrap_or_default()
    }

    pub fn author_name(&self) -> &str {
        self.commit
            .author
            .as_ref()
            .map(|a| a.name.as_str())
            .unwrap_or("unknown")
    }
}
