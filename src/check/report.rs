//! Console rendering of module versions and module diffs

use indexmap::IndexMap;

use crate::modules::attribution::ModuleDiff;
use crate::modules::registry::ModuleRegistry;
use crate::parser::go_mod::Requirements;

/// Module listings longer than this are cut down to `FILES_SHOWN_WHEN_TRUNCATED`
const MODULE_FILE_LIMIT: usize = 10;
const FILES_SHOWN_WHEN_TRUNCATED: usize = 5;

/// Width of the section rules
pub const RULE_WIDTH: usize = 50;

pub fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

pub fn section(title: &str) -> String {
    format!("\n{}\n{}\n{}", rule(), title, rule())
}

/// Lines comparing module versions between the tracked and latest tags.
///
/// Modules present at both tags are shown as changed or unchanged; modules
/// present at only one tag are marked added or removed. When one side is
/// missing the other is listed as-is.
pub fn module_version_lines(
    base_tag: &str,
    base: Option<&Requirements>,
    head_tag: &str,
    head: Option<&Requirements>,
) -> Vec<String> {
    match (base, head) {
        (Some(base), Some(head)) => {
            let mut lines: Vec<String> = head
                .iter()
                .map(|(path, new)| match base.get(path) {
                    Some(old) if old == new => format!("  {}: {} (unchanged)", path, new),
                    Some(old) => format!("  {}: {} -> {}", path, old, new),
                    None => format!("  {}: {} (added in {})", path, new, head_tag),
                })
                .collect();
            lines.extend(
                base.iter()
                    .filter(|(path, _)| !head.contains_key(*path))
                    .map(|(path, old)| format!("  {}: {} (removed in {})", path, old, head_tag)),
            );
            if lines.is_empty() {
                lines.push("  No tracked modules found in go.mod".to_string());
            }
            lines
        }
        (Some(only), None) => listing(base_tag, only),
        (None, Some(only)) => listing(head_tag, only),
        (None, None) => vec!["  Could not fetch go.mod for either tag.".to_string()],
    }
}

fn listing(tag: &str, versions: &Requirements) -> Vec<String> {
    let mut lines = vec![format!("  Module versions at {} only:", tag)];
    lines.extend(
        versions
            .iter()
            .map(|(path, version)| format!("    {}: {}", path, version)),
    );
    lines
}

/// Lines summarising the per-module diffs.
pub fn module_diff_lines(diffs: &IndexMap<String, ModuleDiff>) -> Vec<String> {
    if diffs.is_empty() {
        return vec!["  No changes in tracked module directories.".to_string()];
    }

    let mut lines = Vec::new();
    for (name, diff) in diffs {
        let location = if diff.replaced_by.is_empty() {
            diff.directory.clone()
        } else {
            format!("{}, via {}", diff.directory, diff.replaced_by.join(", "))
        };
        lines.push(format!(
            "  {} ({}): {} files changed (+{}, -{}, {} total)",
            name,
            location,
            diff.files.len(),
            diff.additions,
            diff.deletions,
            diff.changes
        ));

        let shown = if diff.files.len() > MODULE_FILE_LIMIT {
            FILES_SHOWN_WHEN_TRUNCATED
        } else {
            diff.files.len()
        };
        lines.extend(diff.files.iter().take(shown).map(|f| {
            format!("    {} (+{}, -{})", f.filename, f.additions, f.deletions)
        }));
        if diff.files.len() > shown {
            lines.push(format!("    ... and {} more files", diff.files.len() - shown));
        }
    }
    lines
}

/// Lines describing the registry table.
pub fn registry_lines(registry: &ModuleRegistry) -> Vec<String> {
    registry
        .entries()
        .iter()
        .map(|entry| {
            format!(
                "{:<18} {:<20} {}",
                entry.name,
                entry.directory,
                entry.identifiers.join(", ")
            )
        })
        .collect()
}
