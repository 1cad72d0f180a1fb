//! Version check workflow
//!
//! ```text
//! read upgrades table ──▶ load tracker ──▶ no record: seed, done
//!                                      └─▶ compare tracked vs latest
//!                                            ├─ equal:  refresh timestamp
//!                                            ├─ behind: report diff (tracker untouched)
//!                                            └─ ahead:  warn
//! ```
//!
//! Everything the user sees is written to the `out` and `err` streams passed
//! in; only document and version-comparison failures end the run with an
//! error.

pub mod report;

use std::cmp::Ordering;
use std::io::Write;

use thiserror::Error;
use tracing::{error, info, warn};

use crate::config::TrackerConfig;
use crate::modules::attribution::{
    module_diffs_for_comparison, module_manifest_for_tag, module_versions_for_tag,
};
use crate::modules::registry::ModuleRegistry;
use crate::parser::upgrades::{DocumentError, UpgradesParser};
use crate::remote::error::RemoteError;
use crate::remote::host::RepositoryHost;
use crate::remote::summary::summarize;
use crate::tracker::{TrackerError, TrackerStore};
use crate::version::{VersionError, compare_versions};

#[derive(Debug, Error)]
pub enum CheckError {
    #[error("could not determine latest version from upgrades table: {0}")]
    NoLatestVersion(#[source] DocumentError),

    #[error(transparent)]
    Compare(#[from] VersionError),

    #[error(transparent)]
    Tracker(#[from] TrackerError),

    #[error("failed to write report: {0}")]
    Output(#[from] std::io::Error),
}

/// How a successful check ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// No version was tracked yet; `version` is now tracked
    Seeded { version: String },
    /// Tracked version matches the document
    UpToDate { version: String },
    /// The document lists a newer release than the tracker
    NewVersion {
        tracked: String,
        latest: String,
        diff_fetched: bool,
    },
    /// The tracker is ahead of the document
    AheadOfDocs { tracked: String, latest: String },
}

pub struct Checker<'a, H: RepositoryHost + ?Sized> {
    config: &'a TrackerConfig,
    host: &'a H,
    registry: ModuleRegistry,
    parser: UpgradesParser,
}

impl<'a, H: RepositoryHost + ?Sized> Checker<'a, H> {
    pub fn new(config: &'a TrackerConfig, host: &'a H) -> Self {
        Self {
            config,
            host,
            registry: ModuleRegistry::default(),
            parser: UpgradesParser::new(),
        }
    }

    pub fn with_registry(mut self, registry: ModuleRegistry) -> Self {
        self.registry = registry;
        self
    }

    fn store(&self) -> TrackerStore {
        TrackerStore::new(&self.config.tracker_path)
    }

    fn read_latest(
        &self,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> Result<String, CheckError> {
        writeln!(
            out,
            "\nReading upgrades from: {}",
            self.config.docs_path.display()
        )?;

        match self.parser.latest_version_from_file(&self.config.docs_path) {
            Ok(version) => {
                let latest = version.tag();
                writeln!(out, "Latest version in upgrades table: {}", latest)?;
                Ok(latest)
            }
            Err(e) => {
                error!("Failed to read latest version: {}", e);
                writeln!(err, "Error: {}", e)?;
                writeln!(
                    err,
                    "Error: Could not determine latest version from upgrades table"
                )?;
                Err(CheckError::NoLatestVersion(e))
            }
        }
    }

    /// Save `version`, reporting a failure on `err` without failing the run.
    fn persist(&self, version: &str, err: &mut dyn Write) -> Result<bool, CheckError> {
        match self.store().save(version) {
            Ok(_) => Ok(true),
            Err(e) => {
                warn!("Tracker write failed: {}", e);
                writeln!(err, "Error writing tracker file: {}", e)?;
                Ok(false)
            }
        }
    }

    /// Run the check and print the report.
    pub async fn check(
        &self,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> Result<Outcome, CheckError> {
        writeln!(out, "Noble Documentation Version Tracker")?;
        writeln!(out, "{}", report::rule())?;

        let latest = self.read_latest(out, err)?;

        let record = self.store().load();
        let Some(tracked) = record.last_tracked_version.filter(|v| !v.is_empty()) else {
            writeln!(out, "\nNo previous version tracked (first run)")?;
            writeln!(out, "Setting initial tracked version to: {}", latest)?;
            if self.persist(&latest, err)? {
                writeln!(out, "\n✓ Tracker initialized. Run again to check for updates.")?;
            }
            info!("Seeded tracker with {}", latest);
            writeln!(out, "\n{}", report::rule())?;
            return Ok(Outcome::Seeded { version: latest });
        };

        writeln!(out, "Last tracked version: {}", tracked)?;

        let ordering = match compare_versions(&tracked, &latest) {
            Ok(ordering) => ordering,
            Err(e) => {
                error!("Version comparison failed: {}", e);
                writeln!(err, "\nError: {}", e)?;
                writeln!(
                    err,
                    "\nPlease ensure both versions are in the format 'vX.Y.Z' without suffixes."
                )?;
                return Err(CheckError::Compare(e));
            }
        };

        let outcome = match ordering {
            Ordering::Equal => {
                writeln!(out, "\n✓ Versions match! Documentation is up to date.")?;
                self.persist(&latest, err)?;
                Outcome::UpToDate { version: latest }
            }
            Ordering::Less => {
                let diff_fetched = self.report_new_version(&tracked, &latest, out, err).await?;
                Outcome::NewVersion {
                    tracked,
                    latest,
                    diff_fetched,
                }
            }
            Ordering::Greater => {
                warn!("Tracked version {} is ahead of docs {}", tracked, latest);
                writeln!(
                    out,
                    "\n⚠ Warning: Last tracked version ({}) is newer than latest in docs ({})",
                    tracked, latest
                )?;
                writeln!(out, "  The docs may have been reverted. No action taken.")?;
                Outcome::AheadOfDocs { tracked, latest }
            }
        };

        writeln!(out, "\n{}", report::rule())?;
        Ok(outcome)
    }

    /// Print the diff between `tracked` and `latest`. Returns whether the
    /// comparison could be fetched.
    async fn report_new_version(
        &self,
        tracked: &str,
        latest: &str,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> Result<bool, CheckError> {
        let repo = self.config.repository.as_str();

        writeln!(out, "\n⚠ Version mismatch detected!")?;
        writeln!(out, "  Last tracked: {}", tracked)?;
        writeln!(out, "  Latest in docs: {}", latest)?;
        writeln!(
            out,
            "\n  The documentation has been updated with a new version."
        )?;
        writeln!(
            out,
            "\n  Generating diff between {} and {}...",
            tracked, latest
        )?;

        let comparison = match self.host.compare(repo, tracked, latest).await {
            Ok(comparison) => comparison,
            Err(e) => {
                warn!("Comparison {}...{} failed: {}", tracked, latest, e);
                writeln!(err, "Error fetching diff from GitHub API: {}", e)?;
                if let RemoteError::Api {
                    message: Some(message),
                    ..
                } = &e
                {
                    writeln!(err, "GitHub API error: {}", message)?;
                }
                writeln!(out, "\n  ⚠ Could not fetch diff from GitHub API.")?;
                writeln!(out, "  You can view the comparison manually at:")?;
                writeln!(out, "  {}", self.config.compare_page_url(tracked, latest))?;
                return Ok(false);
            }
        };

        writeln!(out, "{}", report::section("DIFF SUMMARY"))?;
        writeln!(out, "{}", summarize(Some(&comparison)))?;

        let base_versions = module_versions_for_tag(self.host, repo, tracked, &self.registry).await;
        let head_manifest = module_manifest_for_tag(self.host, repo, latest, &self.registry).await;
        if base_versions.is_none() || head_manifest.is_none() {
            writeln!(err, "Error fetching go.mod from GitHub for module versions")?;
        }

        writeln!(out, "{}", report::section("MODULE VERSIONS"))?;
        for line in report::module_version_lines(
            tracked,
            base_versions.as_ref(),
            latest,
            head_manifest.as_ref().map(|manifest| &manifest.versions),
        ) {
            writeln!(out, "{}", line)?;
        }

        let overrides = head_manifest
            .map(|manifest| manifest.overrides)
            .unwrap_or_default();
        let diffs = module_diffs_for_comparison(&comparison, &overrides, &self.registry);

        writeln!(out, "{}", report::section("MODULE DIFFS"))?;
        for line in report::module_diff_lines(&diffs) {
            writeln!(out, "{}", line)?;
        }
        writeln!(out, "{}", report::rule())?;

        Ok(true)
    }

    /// Record the document's latest version as acknowledged.
    pub fn acknowledge(
        &self,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> Result<String, CheckError> {
        let latest = self.read_latest(out, err)?;
        let previous = self.store().load().last_tracked_version;

        if let Err(e) = self.store().save(&latest) {
            writeln!(err, "Error writing tracker file: {}", e)?;
            return Err(e.into());
        }

        match previous {
            Some(previous) if previous != latest => {
                writeln!(out, "\n✓ Tracked version advanced: {} -> {}", previous, latest)?
            }
            _ => writeln!(out, "\n✓ Tracked version set to: {}", latest)?,
        }
        Ok(latest)
    }

    /// Print the module registry.
    pub fn list_modules(&self, out: &mut dyn Write) -> Result<(), CheckError> {
        for line in report::registry_lines(&self.registry) {
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }
}
