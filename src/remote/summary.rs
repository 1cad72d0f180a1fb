//! Plain-text rendering of a comparison

use crate::remote::types::{ChangeKind, ChangedFile, ComparisonResult};

/// Paths containing any of these (case-insensitive) are called out as
/// likely to need a documentation update
pub const RELEVANT_KEYWORDS: &[&str] = &[
    "module",
    "x/",
    "proto",
    "upgrade",
    "migration",
    "changelog",
    "release",
];

const GROUP_LIMIT: usize = 10;
const MODIFIED_LIMIT: usize = 20;
const RELEVANT_LIMIT: usize = 15;
const COMMIT_LIMIT: usize = 5;

pub fn is_relevant(path: &str) -> bool {
    let lower = path.to_lowercase();
    RELEVANT_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
}

/// Render `result` for the console. `None` and empty payloads produce a
/// single line.
pub fn summarize(result: Option<&ComparisonResult>) -> String {
    let Some(result) = result.filter(|r| !r.is_empty()) else {
        return "No diff data available.".to_string();
    };

    let mut lines = vec![
        format!(
            "Comparison Status: {}",
            result.status.as_deref().unwrap_or("unknown")
        ),
        format!(
            "Commits ahead: {}, behind: {}, total: {}",
            result.ahead_by, result.behind_by, result.total_commits
        ),
        String::new(),
    ];

    if !result.files.is_empty() {
        lines.push(format!("Files changed: {}", result.files.len()));
        lines.push(String::new());

        push_group(
            &mut lines,
            "Added files",
            &result.files_with_kind(ChangeKind::Added),
            GROUP_LIMIT,
            |f| format!("  + {}", f.filename),
        );
        push_group(
            &mut lines,
            "Removed files",
            &result.files_with_kind(ChangeKind::Removed),
            GROUP_LIMIT,
            |f| format!("  - {}", f.filename),
        );
        push_group(
            &mut lines,
            "Modified files",
            &result.files_with_kind(ChangeKind::Modified),
            MODIFIED_LIMIT,
            |f| {
                format!(
                    "  ~ {} (+{}, -{}, {} total)",
                    f.filename, f.additions, f.deletions, f.changes
                )
            },
        );
        push_group(
            &mut lines,
            "Renamed files",
            &result.files_with_kind(ChangeKind::Renamed),
            GROUP_LIMIT,
            |f| {
                format!(
                    "  > {} -> {}",
                    f.previous_filename.as_deref().unwrap_or("unknown"),
                    f.filename
                )
            },
        );

        let relevant: Vec<&ChangedFile> = result
            .files
            .iter()
            .filter(|f| is_relevant(&f.filename))
            .collect();
        if !relevant.is_empty() {
            lines.push("Potentially relevant files for documentation:".to_string());
            lines.extend(
                relevant
                    .iter()
                    .take(RELEVANT_LIMIT)
                    .map(|f| format!("  * {}", f.filename)),
            );
            push_remainder(&mut lines, relevant.len(), RELEVANT_LIMIT, "");
            lines.push(String::new());
        }
    }

    if !result.commits.is_empty() {
        let shown = result.commits.len().min(COMMIT_LIMIT);
        lines.push(format!(
            "Recent commits ({} of {}):",
            shown,
            result.commits.len()
        ));
        lines.extend(result.commits.iter().take(COMMIT_LIMIT).map(|c| {
            format!("  [{}] {} ({})", c.short_sha(), c.title(), c.author_name())
        }));
        push_remainder(&mut lines, result.commits.len(), COMMIT_LIMIT, " commits");
        lines.push(String::new());
    }

    if let Some(url) = result.html_url.as_deref().filter(|u| !u.is_empty()) {
        lines.push(format!("Full comparison: {}", url));
    }

    lines.join("\n")
}

fn push_group(
    lines: &mut Vec<String>,
    title: &str,
    files: &[&ChangedFile],
    limit: usize,
    render: impl Fn(&ChangedFile) -> String,
) {
    if files.is_empty() {
        return;
    }
    lines.push(format!("{} ({}):", title, files.len()));
    lines.extend(files.iter().take(limit).map(|&f| render(f)));
    push_remainder(lines, files.len(), limit, "");
    lines.push(String::new());
}

fn push_remainder(lines: &mut Vec<String>, total: usize, limit: usize, noun: &str) {
    if total > limit {
        lines.push(format!("  ... and {} more{}", total - limit, noun));
    }
}
