//! YAML Frontmatter Writer
//!
//! Renders a note's property mapping as a YAML frontmatter block, and reads
//! it back for a sanity check:
//! - BOM (Byte Order Mark) stripping and line ending normalization on input
//! - Scalar escaping that leaves `[[wiki links]]` untouched
//! - Re-parsing the emitted block with `serde_yaml`

use crate::models::PropertyMap;
use anyhow::{bail, Context, Result};
use regex::Regex;

/// Characters that force a value to be double-quoted
const YAML_SPECIAL_CHARS: &[char] = &[
    ':', '{', '}', '[', ']', ',', '#', '&', '*', '!', '|', '>', '\'', '"', '%', '@', '`',
];

/// Normalize content: strip BOM, normalize line endings
///
/// Handles:
/// - UTF-8 BOM (EF BB BF / U+FEFF)
/// - CRLF → LF
/// - CR → LF (old Mac style)
pub fn normalize_content(content: &str) -> String {
    let s = content.strip_prefix('\u{FEFF}').unwrap_or(content);
    s.replace("\r\n", "\n").replace('\r', "\n")
}

/// Characters that end a line, besides `\n` and `\r`
const EXTRA_LINE_BREAKS: &[char] = &[
    '\u{0B}', '\u{0C}', '\u{1C}', '\u{1D}', '\u{1E}', '\u{85}', '\u{2028}', '\u{2029}',
];

/// Split normalized content into lines
///
/// Breaks on `\n` and on the vertical tab, form feed, file/group/record
/// separators, NEL and the Unicode line and paragraph separators. A trailing
/// break does not produce a final empty line.
pub fn split_lines(content: &str) -> impl Iterator<Item = &str> {
    let empty = content.is_empty();
    let content = content
        .strip_suffix(|c: char| c == '\n' || EXTRA_LINE_BREAKS.contains(&c))
        .unwrap_or(content);
    content
        .split(|c: char| c == '\n' || EXTRA_LINE_BREAKS.contains(&c))
        .filter(move |_| !empty)
}

/// Frontmatter key: trimmed, inner spaces replaced with underscores
pub fn normalize_key(key: &str) -> String {
    key.trim().replace(' ', "_")
}

/// Escape a property value for use as a YAML scalar
///
/// - `[[Page]]` links are emitted verbatim
/// - values containing YAML indicator characters are double-quoted with
///   inner `"` escaped
/// - anything else is emitted trimmed and unquoted
pub fn yaml_escape(value: &str) -> String {
    let v = value.trim();
    if v.starts_with("[[") && v.ends_with("]]") {
        return v.to_string();
    }
    if v.contains(YAML_SPECIAL_CHARS) {
        return format!("\"{}\"", v.replace('"', "\\\""));
    }
    v.to_string()
}

/// Render the frontmatter block: `---`, one line per property, `---`
///
/// Returns `None` for an empty mapping.
pub fn build_frontmatter(properties: &PropertyMap) -> Option<String> {
    if properties.is_empty() {
        return None;
    }

    let mut lines = vec!["---".to_string()];
    for (key, value) in properties.iter() {
        lines.push(format!("{}: {}", normalize_key(key), yaml_escape(value)));
    }
    lines.push("---".to_string());

    Some(lines.join("\n"))
}

/// Split frontmatter from body
///
/// Frontmatter requirements:
/// - Must start with `---` at line 1, column 0
/// - Must end with `---` at column 0
/// - Closing `---` can have trailing whitespace
///
/// # Returns
/// * `(frontmatter_string, body_string)` tuple
pub fn split_frontmatter(content: &str) -> Result<(String, String)> {
    let Some(content_after_open) = content.strip_prefix("---\n") else {
        bail!("Document must start with YAML frontmatter (---)")
    };

    // Closing --- at the start of a line, followed by newline or EOF
    let re = Regex::new(r"(?:^|\n)---[ \t]*(?:\n|$)")?;

    let Some(m) = re.find(content_after_open) else {
        bail!("Frontmatter not properly closed (--- must be at line start)")
    };

    let frontmatter = content_after_open[..m.start()].to_string();
    let body = content_after_open[m.end()..].to_string();
    Ok((frontmatter, body))
}

/// Check that a converted document's frontmatter (if any) parses as YAML
///
/// Documents without frontmatter pass.
pub fn validate_frontmatter(content: &str) -> Result<()> {
    if !content.starts_with("---\n") {
        return Ok(());
    }
    let (frontmatter, _) = split_frontmatter(content)?;
    serde_yaml::from_str::<serde_yaml::Value>(&frontmatter)
        .context("Frontmatter is not valid YAML")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_bom() {
        let with_bom = "\u{FEFF}#.properties\n";
        assert_eq!(normalize_content(with_bom), "#.properties\n");
    }

    #[test]
    fn test_normalize_crlf() {
        let crlf = "a\r\nb\rc\n";
        assert_eq!(normalize_content(crlf), "a\nb\nc\n");
    }

    #[test]
    fn test_split_lines() {
        let lines: Vec<_> = split_lines("a\nb\u{0B}c\u{1E}d\u{2029}e\n").collect();
        assert_eq!(lines, vec!["a", "b", "c", "d", "e"]);

        let lines: Vec<_> = split_lines("a\n\nb").collect();
        assert_eq!(lines, vec!["a", "", "b"]);

        assert_eq!(split_lines("").count(), 0);
        assert_eq!(split_lines("\n").collect::<Vec<_>>(), vec![""]);
    }

    #[test]
    fn test_escape_link_verbatim() {
        assert_eq!(yaml_escape("[[Some Page]]"), "[[Some Page]]");
        assert_eq!(yaml_escape("  [[Some Page]] "), "[[Some Page]]");
    }

    #[test]
    fn test_escape_quotes_special() {
        assert_eq!(yaml_escape("a, b"), "\"a, b\"");
        assert_eq!(yaml_escape("He said \"hi\""), "\"He said \\\"hi\\\"\"");
        assert_eq!(yaml_escape("50%"), "\"50%\"");
        assert_eq!(yaml_escape("[[a]] and [[b"), "\"[[a]] and [[b\"");
    }

    #[test]
    fn test_escape_plain() {
        assert_eq!(yaml_escape("plain text"), "plain text");
        assert_eq!(yaml_escape("  padded  "), "padded");
    }

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key(" Due Date "), "Due_Date");
    }

    #[test]
    fn test_build_frontmatter() {
        let mut props = PropertyMap::new();
        props.insert("Status", "Done");
        props.insert("Related to", "[[Other]]");

        let fm = build_frontmatter(&props).unwrap();
        assert_eq!(fm, "---\nStatus: Done\nRelated_to: [[Other]]\n---");
    }

    #[test]
    fn test_build_frontmatter_empty() {
        assert!(build_frontmatter(&PropertyMap::new()).is_none());
    }

    #[test]
    fn test_split_frontmatter_basic() {
        let (fm, body) = split_frontmatter("---\nkey: value\n---\n\nBody content").unwrap();
        assert_eq!(fm, "key: value");
        assert_eq!(body.trim(), "Body content");
    }

    #[test]
    fn test_split_frontmatter_missing_closing() {
        assert!(split_frontmatter("---\nkey: value\n").is_err());
        assert!(split_frontmatter("key: value\n---\n").is_err());
    }

    #[test]
    fn test_validate_frontmatter() {
        assert!(validate_frontmatter("---\nStatus: \"a, b\"\n---\n\n> backlink: [[x]]\n").is_ok());
        assert!(validate_frontmatter("> backlink: [[x]]\n").is_ok());
        assert!(validate_frontmatter("---\nkey: [unclosed\n---\n").is_err());
    }
}
