use crate::parser::NotePatterns;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Common interface for list flattening strategies
///
/// Each strategy rewrites the kept section lines of one note into the flatter
/// list shape the target editor prefers. Implementations are total: every
/// line sequence produces some output.
pub trait Flattener: Send + Sync {
    /// Rewrite `lines`, using `patterns` to recognise list items
    fn flatten(&self, patterns: &NotePatterns, lines: &[String]) -> Vec<String>;

    /// Get the name of this strategy for display purposes
    fn name(&self) -> &'static str;
}

/// Selectable flattening strategy
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum FlattenMode {
    /// Leave lines unchanged
    None,
    /// Replace list items with their bare content
    Unwrap,
    /// Normalize every list item to a top-level `- ` bullet
    Bullets,
    /// Top-level bullets, trimmed lines, squeezed blank runs
    Heuristic,
    /// Keep one level of nesting, lift label lines, squeeze blank runs
    #[default]
    #[serde(alias = "smartlists")]
    #[value(alias = "smartlists")]
    SmartList,
}

impl FlattenMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlattenMode::None => "none",
            FlattenMode::Unwrap => "unwrap",
            FlattenMode::Bullets => "bullets",
            FlattenMode::Heuristic => "heuristic",
            FlattenMode::SmartList => "smart-list",
        }
    }
}

impl fmt::Display for FlattenMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Collapse every run of whitespace-only lines into a single empty line
pub fn squeeze_blanks(lines: Vec<String>) -> Vec<String> {
    let mut out = Vec::with_capacity(lines.len());
    let mut in_blank_run = false;

    for line in lines {
        if line.trim().is_empty() {
            if !in_blank_run {
                out.push(String::new());
            }
            in_blank_run = true;
        } else {
            out.push(line);
            in_blank_run = false;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_squeeze_collapses_runs() {
        let squeezed = squeeze_blanks(strings(&["a", "", "  ", "\t", "b", "", "c"]));
        assert_eq!(squeezed, strings(&["a", "", "b", "", "c"]));
    }

    #[test]
    fn test_squeeze_keeps_single_blank() {
        let squeezed = squeeze_blanks(strings(&["", "a", " "]));
        assert_eq!(squeezed, strings(&["", "a", ""]));
    }

    #[test]
    fn test_squeeze_idempotent() {
        let once = squeeze_blanks(strings(&["", "", "x", "", "", "", "y", "  "]));
        let twice = squeeze_blanks(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_mode_names() {
        assert_eq!(FlattenMode::SmartList.to_string(), "smart-list");
        assert_eq!(FlattenMode::default(), FlattenMode::SmartList);
    }
}
