//! Line-local strategies: `none`, `unwrap` and `bullets`.
//!
//! None of these squeeze blank lines.

use crate::flatten::strategy::Flattener;
use crate::parser::NotePatterns;

/// Identity
pub struct NoneFlattener;

impl Flattener for NoneFlattener {
    fn flatten(&self, _patterns: &NotePatterns, lines: &[String]) -> Vec<String> {
        lines.to_vec()
    }

    fn name(&self) -> &'static str {
        "none"
    }
}

/// `  - item` -> `item`
pub struct UnwrapFlattener;

impl Flattener for UnwrapFlattener {
    fn flatten(&self, patterns: &NotePatterns, lines: &[String]) -> Vec<String> {
        lines
            .iter()
            .map(|line| match patterns.list_item(line) {
                Some(item) => item.content.to_string(),
                None => line.clone(),
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "unwrap"
    }
}

/// `  * item` -> `- item`
pub struct BulletsFlattener;

impl Flattener for BulletsFlattener {
    fn flatten(&self, patterns: &NotePatterns, lines: &[String]) -> Vec<String> {
        lines
            .iter()
            .map(|line| match patterns.list_item(line) {
                Some(item) => format!("- {}", item.content),
                None => line.clone(),
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "bullets"
    }
}
