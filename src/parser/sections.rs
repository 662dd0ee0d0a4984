//! Section Extractor
//!
//! Keeps only the allow-listed sections of a note. A kept section starts at a
//! matching heading and runs until the next heading at the same or a
//! shallower level. Heading detection uses the preprocessed line; kept body
//! lines are emitted in their raw form so flatteners see real indentation.

use crate::models::{HeadingCase, NoteLine};
use crate::parser::patterns::NotePatterns;

/// Section titles kept when no allow-list is configured
pub const DEFAULT_KEEP_TITLES: &[&str] = &["description", "methods context"];

pub struct SectionExtractor<'a> {
    patterns: &'a NotePatterns,
    /// Lowercased, trimmed titles
    keep_titles: Vec<String>,
    heading_case: HeadingCase,
}

impl<'a> SectionExtractor<'a> {
    pub fn new(patterns: &'a NotePatterns) -> Self {
        Self {
            patterns,
            keep_titles: DEFAULT_KEEP_TITLES.iter().map(|s| s.to_string()).collect(),
            heading_case: HeadingCase::default(),
        }
    }

    /// Replace the allow-list. Titles are expected already normalized.
    pub fn with_keep_titles(mut self, keep_titles: Vec<String>) -> Self {
        self.keep_titles = keep_titles;
        self
    }

    pub fn with_heading_case(mut self, heading_case: HeadingCase) -> Self {
        self.heading_case = heading_case;
        self
    }

    fn is_kept_title(&self, normalized: &str) -> bool {
        self.keep_titles.iter().any(|t| t == normalized)
    }

    /// Extract kept lines, each section preceded by its re-emitted heading
    pub fn extract(&self, lines: &[NoteLine]) -> Vec<String> {
        let mut kept = Vec::new();
        let mut keep_level: Option<usize> = None;

        for line in lines {
            let heading = self.patterns.heading(&line.clean);
            if let Some(heading) = &heading {
                let title = self.patterns.strip_title_annotations(heading.title);

                if self.is_kept_title(&title.to_lowercase()) {
                    keep_level = Some(heading.level);
                    kept.push(format!(
                        "{} {}",
                        "#".repeat(heading.level),
                        self.heading_case.apply(&title)
                    ));
                    continue;
                }

                if keep_level.is_some_and(|level| heading.level <= level) {
                    keep_level = None;
                }
            }

            // Sub-headings keep their clean form so flattening leaves them headings
            if keep_level.is_some() {
                let text = if heading.is_some() { &line.clean } else { &line.raw };
                kept.push(self.patterns.strip_block_refs(text));
            }
        }

        kept
    }
}
