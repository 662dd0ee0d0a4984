//! Note data models
//!
//! A [`SourceNote`] is one exported outline note as read from disk. The
//! pipeline derives a [`PropertyMap`] and a body from it and produces a
//! [`ConvertedNote`].

use serde::Serialize;
use std::path::Path;

/// One line of a source note in both its raw and preprocessed forms
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteLine {
    /// The line exactly as exported (indentation and bullet intact)
    pub raw: String,
    /// Bullet/emoji-stripped, trimmed form used for pattern detection
    pub clean: String,
}

/// An exported note, immutable once read
#[derive(Debug, Clone)]
pub struct SourceNote {
    /// File stem, used as the backlink target
    pub identifier: String,
    pub lines: Vec<NoteLine>,
}

impl SourceNote {
    /// Build a note from already-decoded text.
    ///
    /// `clean` holds the preprocessed form of each raw line; both vectors are
    /// zipped index by index.
    pub fn new(identifier: impl Into<String>, raw: Vec<String>, clean: Vec<String>) -> Self {
        let lines = raw
            .into_iter()
            .zip(clean)
            .map(|(raw, clean)| NoteLine { raw, clean })
            .collect();
        Self {
            identifier: identifier.into(),
            lines,
        }
    }

    /// Backlink target for a source path: the file name without extension
    pub fn identifier_for(path: &Path) -> String {
        path.file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default()
    }
}

/// Ordered `key -> value` mapping parsed from a property block.
///
/// Insertion order is the order keys first appear. Setting an existing key
/// replaces its value but keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PropertyMap {
    entries: Vec<(String, String)>,
}

impl PropertyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Result of converting one note
#[derive(Debug, Clone)]
pub struct ConvertedNote {
    pub identifier: String,
    pub properties: PropertyMap,
    /// Number of lines kept from allow-listed sections (before flattening)
    pub kept_lines: usize,
    /// Final document text, ending in exactly one newline
    pub content: String,
}
