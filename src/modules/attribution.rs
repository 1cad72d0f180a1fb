//! Per-module view of a release
//!
//! Module versions come from the go.mod at each tag with `replace`
//! directives applied. Module diffs split the file-level comparison by the
//! directory each module lives in, and note which fork a module was
//! replaced by at the newer tag.

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::modules::registry::ModuleRegistry;
use crate::parser::go_mod::{GoModParser, Overrides, Requirements, apply_overrides};
use crate::remote::host::RepositoryHost;
use crate::remote::types::{ChangedFile, ComparisonResult};

/// Files of one module that changed between two tags
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleDiff {
    pub directory: String,
    /// Paths the module is replaced by in the head go.mod
    pub replaced_by: Vec<String>,
    pub files: Vec<ChangedFile>,
    pub additions: u64,
    pub deletions: u64,
    pub changes: u64,
}

impl ModuleDiff {
    fn new(owner: &ModuleDirectory) -> Self {
        Self {
            directory: owner.directory.to_string(),
            replaced_by: owner.replaced_by.clone(),
            ..Self::default()
        }
    }

    fn push(&mut self, file: &ChangedFile) {
        self.additions += file.additions;
        self.deletions += file.deletions;
        self.changes += file.changes;
        self.files.push(file.clone());
    }
}

/// Directory owned by a module, with the replacement paths of its identifiers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDirectory {
    pub module: &'static str,
    pub directory: &'static str,
    pub replaced_by: Vec<String>,
}

/// Tracked module versions and the raw `replace` directives of one go.mod
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleManifest {
    pub versions: Requirements,
    pub overrides: Overrides,
}

impl ModuleManifest {
    pub fn parse(content: &str, registry: &ModuleRegistry) -> Self {
        let parser = GoModParser::new();
        let requirements = parser.parse_requirements(content);
        let overrides = parser.parse_overrides(content);
        let resolved = apply_overrides(&requirements, &overrides);

        Self {
            versions: relevant_subset(&resolved, &overrides, registry),
            overrides,
        }
    }
}

/// Known identifiers plus the replacement of any known identifier.
fn tracked_identifiers(registry: &ModuleRegistry, overrides: &Overrides) -> Vec<String> {
    let mut tracked: Vec<String> = registry.identifiers().map(str::to_string).collect();
    for (original, replacement) in overrides {
        if registry.is_known(original) && !tracked.contains(replacement) {
            tracked.push(replacement.clone());
        }
    }
    tracked
}

fn matches_identifier(path: &str, identifier: &str) -> bool {
    path.strip_prefix(identifier)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

/// Keep the requirements that belong to a registry module.
///
/// `resolved` must already have `overrides` applied; a known module replaced
/// by a fork is kept under the fork's path.
pub fn relevant_subset(
    resolved: &Requirements,
    overrides: &Overrides,
    registry: &ModuleRegistry,
) -> Requirements {
    let tracked = tracked_identifiers(registry, overrides);

    resolved
        .iter()
        .filter(|(path, _)| tracked.iter().any(|id| matches_identifier(path, id)))
        .map(|(path, version)| (path.clone(), version.clone()))
        .collect()
}

/// Parsed go.mod at `tag`, or `None` when the manifest can't be fetched.
pub async fn module_manifest_for_tag<H: RepositoryHost + ?Sized>(
    host: &H,
    repo: &str,
    tag: &str,
    registry: &ModuleRegistry,
) -> Option<ModuleManifest> {
    match host.fetch_manifest(repo, tag).await {
        Ok(content) => {
            let manifest = ModuleManifest::parse(&content, registry);
            debug!("Found {} module versions at {}", manifest.versions.len(), tag);
            Some(manifest)
        }
        Err(e) => {
            warn!("Failed to fetch go.mod for {}@{}: {}", repo, tag, e);
            None
        }
    }
}

/// Module versions at `tag`, or `None` when the manifest can't be fetched.
pub async fn module_versions_for_tag<H: RepositoryHost + ?Sized>(
    host: &H,
    repo: &str,
    tag: &str,
    registry: &ModuleRegistry,
) -> Option<Requirements> {
    module_manifest_for_tag(host, repo, tag, registry)
        .await
        .map(|manifest| manifest.versions)
}

/// Registry directories, each annotated with what its identifiers are
/// replaced by. Overrides of unknown paths are ignored.
pub fn directory_map(registry: &ModuleRegistry, overrides: &Overrides) -> Vec<ModuleDirectory> {
    let mut directories: Vec<ModuleDirectory> = registry
        .entries()
        .iter()
        .map(|entry| ModuleDirectory {
            module: entry.name,
            directory: entry.directory,
            replaced_by: Vec::new(),
        })
        .collect();

    for (original, replacement) in overrides {
        let Some(entry) = registry.entry_for_identifier(original) else {
            continue;
        };
        if let Some(dir) = directories.iter_mut().find(|d| d.module == entry.name) {
            if !dir.replaced_by.contains(replacement) {
                dir.replaced_by.push(replacement.clone());
            }
        }
    }

    directories
}

/// Group changed files under the first module whose directory contains them.
/// Files outside every module directory are dropped.
pub fn attribute_files(
    comparison: &ComparisonResult,
    directories: &[ModuleDirectory],
) -> IndexMap<String, ModuleDiff> {
    let mut diffs: IndexMap<String, ModuleDiff> = IndexMap::new();

    for file in &comparison.files {
        let owner = directories.iter().find(|d| {
            file.filename
                .strip_prefix(d.directory)
                .is_some_and(|rest| rest.starts_with('/'))
        });

        if let Some(owner) = owner {
            diffs
                .entry(owner.module.to_string())
                .or_insert_with(|| ModuleDiff::new(owner))
                .push(file);
        }
    }

    diffs
}

/// Module diffs for an already fetched comparison, with `overrides` taken
/// from the go.mod at the head tag.
pub fn module_diffs_for_comparison(
    comparison: &ComparisonResult,
    overrides: &Overrides,
    registry: &ModuleRegistry,
) -> IndexMap<String, ModuleDiff> {
    attribute_files(comparison, &directory_map(registry, overrides))
}

/// Fetch the comparison between two tags and split it by module.
/// Returns an empty map when the comparison can't be fetched.
pub async fn module_diffs<H: RepositoryHost + ?Sized>(
    host: &H,
    repo: &str,
    base_tag: &str,
    head_tag: &str,
    registry: &ModuleRegistry,
) -> IndexMap<String, ModuleDiff> {
    let comparison = match host.compare(repo, base_tag, head_tag).await {
        Ok(comparison) => comparison,
        Err(e) => {
            warn!(
                "Failed to fetch comparison {}...{}: {}",
                base_tag, head_tag, e
            );
            return IndexMap::new();
        }
    };

    let overrides = module_manifest_for_tag(host, repo, head_tag, registry)
        .await
        .map(|manifest| manifest.overrides)
        .unwrap_or_default();
    module_diffs_for_comparison(&comparison, &overrides, registry)
}
