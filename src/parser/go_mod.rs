//! go.mod parser
//!
//! Extracts `require` and `replace` directives from a go.mod manifest.
//! Both directives may be written on a single line or grouped in a block.
//!
//! Format examples:
//! - Single: `require golang.org/x/text v0.14.0`
//! - Block:
//!   ```text
//!   require (
//!       golang.org/x/text v0.14.0
//!       golang.org/x/net v0.20.0 // indirect
//!   )
//!   ```
//! - Replace: `replace old/path v1.0.0 => new/path v1.0.1`

use indexmap::IndexMap;
use regex::Regex;

/// Module path -> version, in manifest order
pub type Requirements = IndexMap<String, String>;

/// Original module path -> replacement path, in manifest order
pub type Overrides = IndexMap<String, String>;

/// Parser for go.mod files
pub struct GoModParser {
    /// Regex for block start: `require (`, `replace (`, `exclude (`, ...
    block_start_re: Regex,
    /// Regex for require spec: `module/path v1.2.3`
    require_spec_re: Regex,
    /// Regex for replace spec: `old/path [v1.2.3] => new/path [v1.2.3]`
    replace_spec_re: Regex,
}

impl GoModParser {
    pub fn new() -> Self {
        Self {
            block_start_re: Regex::new(r"^([a-z]+)\s*\($").expect("block pattern is valid"),
            require_spec_re: Regex::new(r"^(\S+)\s+(v\S+)$").expect("require pattern is valid"),
            replace_spec_re: Regex::new(r"^(\S+)(?:\s+\S+)?\s+=>\s+(\S+)(?:\s+\S+)?$")
                .expect("replace pattern is valid"),
        }
    }

    /// Collect the `require` declarations. A module declared twice keeps the
    /// last version seen.
    pub fn parse_requirements(&self, content: &str) -> Requirements {
        let mut requirements = Requirements::new();
        for spec in self.directive_specs(content, "require") {
            if let Some(caps) = self.require_spec_re.captures(spec) {
                requirements.insert(caps[1].to_string(), caps[2].to_string());
            }
        }
        requirements
    }

    /// Collect the `replace` directives, keeping only the module paths.
    pub fn parse_overrides(&self, content: &str) -> Overrides {
        let mut overrides = Overrides::new();
        for spec in self.directive_specs(content, "replace") {
            if let Some(caps) = self.replace_spec_re.captures(spec) {
                overrides.insert(caps[1].to_string(), caps[2].to_string());
            }
        }
        overrides
    }

    /// Bodies of every `keyword` directive, comments removed.
    ///
    /// Lines inside a block belonging to another directive are skipped, so a
    /// `replace (` block never yields requirements.
    fn directive_specs<'a>(&self, content: &'a str, keyword: &str) -> Vec<&'a str> {
        let mut specs = Vec::new();
        let mut current_block: Option<&str> = None;

        for line in content.lines() {
            let trimmed = strip_comment(line).trim();
            if trimmed.is_empty() {
                continue;
            }

            if let Some(block) = current_block {
                if trimmed == ")" {
                    current_block = None;
                } else if block == keyword {
                    specs.push(trimmed);
                }
                continue;
            }

            if let Some(caps) = self.block_start_re.captures(trimmed) {
                current_block = caps.get(1).map(|m| m.as_str());
                continue;
            }

            if let Some(rest) = trimmed.strip_prefix(keyword) {
                if rest.starts_with(char::is_whitespace) {
                    specs.push(rest.trim_start());
                }
            }
        }

        specs
    }
}

impl Default for GoModParser {
    fn default() -> Self {
        Self::new()
    }
}

fn strip_comment(line: &str) -> &str {
    match line.find("//") {
        Some(pos) => &line[..pos],
        None => line,
    }
}

/// Rewrite requirements through their `replace` directives.
///
/// A replaced module is reported under its replacement path with the version
/// it was required at; the original path is dropped.
pub fn apply_overrides(requirements: &Requirements, overrides: &Overrides) -> Requirements {
    requirements
        .iter()
        .map(|(path, version)| {
            let resolved = overrides.get(path).unwrap_or(path);
            (resolved.clone(), version.clone())
        })
        .collect()
}
