//! Line Pattern Set
//!
//! The fixed regexes every pipeline stage matches against. They are compiled
//! once into a [`NotePatterns`] value and handed to each stage by reference,
//! so there is no mutable global state.
//!
//! Each pattern is exposed as a matcher method that takes one line and
//! returns a structured match (or `None`).

use anyhow::{Context, Result};
use regex::Regex;

/// Marker that opens a property block (compared against lowercased lines).
pub const PROPERTIES_MARKER: &str = "#.properties";

/// A markdown ATX heading: `## Title`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingMatch<'a> {
    /// Number of `#` characters (1-6)
    pub level: usize,
    /// Heading text after the hashes, trimmed
    pub title: &'a str,
}

/// A `key:: value` property line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyMatch<'a> {
    pub key: &'a str,
    pub value: &'a str,
}

/// A bulleted list item: indentation, bullet character and content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItemMatch<'a> {
    /// Leading whitespace before the bullet
    pub indent: &'a str,
    /// One of `-`, `*`, `+`
    pub bullet: char,
    /// Everything after the bullet and its separating whitespace (untrimmed)
    pub content: &'a str,
}

impl ListItemMatch<'_> {
    /// Indentation width in characters (a tab counts as one)
    pub fn indent_width(&self) -> usize {
        self.indent.chars().count()
    }
}

/// Compiled pattern set shared by the conversion stages
#[derive(Debug, Clone)]
pub struct NotePatterns {
    heading: Regex,
    property: Regex,
    block_ref: Regex,
    list_line: Regex,
    title_annotation: Regex,
    leading_bullet: Regex,
}

impl NotePatterns {
    pub fn new() -> Result<Self> {
        Ok(Self {
            heading: Regex::new(r"^(#{1,6})\s+(.+)$").context("Failed to compile heading regex")?,
            property: Regex::new(r"^\s*([A-Za-z0-9 _\-/]+?)::\s*(.+?)\s*$")
                .context("Failed to compile property regex")?,
            block_ref: Regex::new(r"\(\([^)]+\)\)").context("Failed to compile block-ref regex")?,
            list_line: Regex::new(r"^(\s*)([-*+])\s+(.*)$")
                .context("Failed to compile list regex")?,
            title_annotation: Regex::new(r"\s*\[.*?\]\s*")
                .context("Failed to compile annotation regex")?,
            leading_bullet: Regex::new(r"^\s*[-*+]\s+").context("Failed to compile bullet regex")?,
        })
    }

    /// Match a heading line (`#` to `######` followed by whitespace)
    pub fn heading<'a>(&self, line: &'a str) -> Option<HeadingMatch<'a>> {
        let caps = self.heading.captures(line)?;
        let level = caps.get(1)?.as_str().len();
        let title = caps.get(2)?.as_str().trim();
        Some(HeadingMatch { level, title })
    }

    /// Match a `key:: value` line; both sides come back trimmed
    pub fn property<'a>(&self, line: &'a str) -> Option<PropertyMatch<'a>> {
        let caps = self.property.captures(line)?;
        Some(PropertyMatch {
            key: caps.get(1)?.as_str().trim(),
            value: caps.get(2)?.as_str().trim(),
        })
    }

    /// Match a bulleted list item
    pub fn list_item<'a>(&self, line: &'a str) -> Option<ListItemMatch<'a>> {
        let caps = self.list_line.captures(line)?;
        Some(ListItemMatch {
            indent: caps.get(1)?.as_str(),
            bullet: caps.get(2)?.as_str().chars().next()?,
            content: caps.get(3)?.as_str(),
        })
    }

    /// Remove every `((block-ref))` token from a line
    pub fn strip_block_refs(&self, line: &str) -> String {
        self.block_ref.replace_all(line, "").into_owned()
    }

    /// Remove bracketed annotations such as `[ℹ]` from a heading title
    pub fn strip_title_annotations(&self, title: &str) -> String {
        self.title_annotation.replace_all(title, "").trim().to_string()
    }

    /// Remove one leading `-`/`*`/`+` bullet and the whitespace after it
    pub fn strip_leading_bullet<'a>(&self, line: &'a str) -> &'a str {
        match self.leading_bullet.find(line) {
            Some(m) => &line[m.end()..],
            None => line,
        }
    }

    /// Whether a line opens a property block
    pub fn is_properties_marker(&self, line: &str) -> bool {
        line.trim().to_lowercase().starts_with(PROPERTIES_MARKER)
    }
}
