//! Line preprocessing
//!
//! Exported outlines decorate every block with a bullet and sometimes a tag
//! emoji. Stripping them lets heading and property patterns match no matter
//! how deeply the source block was nested.

use crate::parser::patterns::NotePatterns;

/// Characters dropped from the start of a line after the bullet: the tag
/// emoji, its variation selector, and spaces
const LEADING_TAG_CHARS: &[char] = &['\u{1F3F7}', '\u{FE0F}', ' '];

/// Clean one raw line: drop a leading bullet, a leading tag-emoji run, and
/// surrounding whitespace. Interior content is untouched.
pub fn preprocess_line(patterns: &NotePatterns, line: &str) -> String {
    let without_bullet = patterns.strip_leading_bullet(line);
    without_bullet
        .trim_start_matches(LEADING_TAG_CHARS)
        .trim()
        .to_string()
}

pub fn preprocess_lines(patterns: &NotePatterns, lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .map(|line| preprocess_line(patterns, line))
        .collect()
}
