use crate::flatten::strategy::{squeeze_blanks, Flattener};
use crate::parser::NotePatterns;

/// Flattens every list item to a top-level bullet
///
/// Block quotes are kept (trimmed), everything else is trimmed, and blank
/// runs are squeezed.
pub struct HeuristicFlattener;

impl Flattener for HeuristicFlattener {
    fn flatten(&self, patterns: &NotePatterns, lines: &[String]) -> Vec<String> {
        let rewritten = lines
            .iter()
            .map(|line| {
                if line.trim_start().starts_with('>') {
                    return line.trim().to_string();
                }
                match patterns.list_item(line) {
                    Some(item) => format!("- {}", item.content.trim()),
                    None => line.trim().to_string(),
                }
            })
            .collect();

        squeeze_blanks(rewritten)
    }

    fn name(&self) -> &'static str {
        "heuristic"
    }
}
