use crate::flatten::strategy::{squeeze_blanks, Flattener};
use crate::parser::NotePatterns;

/// Indentation (in characters) at which a list item becomes nested
const NESTED_INDENT: usize = 4;

/// Keeps a single level of nesting and lifts label lines to the top level
///
/// - block quotes, images (`!`) and code fences are indented two spaces
/// - list items containing `:` are treated as labels and stay top-level
/// - other list items indented 4+ characters become `  - item`
/// - everything else is trimmed; blank runs are squeezed
pub struct SmartListFlattener;

impl SmartListFlattener {
    fn rewrite(&self, patterns: &NotePatterns, line: &str) -> String {
        if line.trim_start().starts_with(['>', '!', '`']) {
            return format!("  {}", line.trim());
        }

        let Some(item) = patterns.list_item(line) else {
            return line.trim().to_string();
        };

        let content = item.content.trim();
        if content.contains(':') {
            format!("- {}", content)
        } else if item.indent_width() >= NESTED_INDENT {
            format!("  - {}", content)
        } else {
            format!("- {}", content)
        }
    }
}

impl Flattener for SmartListFlattener {
    fn flatten(&self, patterns: &NotePatterns, lines: &[String]) -> Vec<String> {
        let rewritten = lines
            .iter()
            .map(|line| self.rewrite(patterns, line))
            .collect();
        squeeze_blanks(rewritten)
    }

    fn name(&self) -> &'static str {
        "smart-list"
    }
}
