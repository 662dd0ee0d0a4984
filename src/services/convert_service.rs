//! Convert service - Business logic for turning outline exports into flat notes
//!
//! One [`Converter`] owns the compiled patterns and settings for a run and
//! converts notes one at a time. Files are independent: a failure on one is
//! recorded in the [`BatchReport`] and the batch moves on.

use crate::flatten::{FlattenMode, Flattener, FlattenerFactory};
use crate::models::{ConvertConfig, ConvertedNote, HeadingCase, SourceNote};
use crate::parser::frontmatter::{
    build_frontmatter, normalize_content, split_lines, validate_frontmatter,
};
use crate::parser::preprocess::preprocess_lines;
use crate::parser::properties::parse_properties_block;
use crate::parser::sections::SectionExtractor;
use crate::parser::NotePatterns;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Errors that can occur while converting notes
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("Input directory not found: {0}")]
    InputDirNotFound(PathBuf),

    #[error("Failed to read '{0}': {1}")]
    Read(PathBuf, std::io::Error),

    #[error("Failed to write '{0}': {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to scan '{0}': {1}")]
    Scan(PathBuf, walkdir::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Outcome for one source file
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub source: PathBuf,
    /// Written (or, on a dry run, would-be) output path
    pub output: Option<PathBuf>,
    pub properties: usize,
    pub kept_lines: usize,
    /// Non-fatal problem with the converted note
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Outcome of a whole run
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub flatten: FlattenMode,
    pub dry_run: bool,
    pub files: Vec<FileReport>,
    /// Entries the scan could not read
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedEntry>,
}

impl BatchReport {
    pub fn converted(&self) -> usize {
        self.files.iter().filter(|f| f.error.is_none()).count()
    }

    pub fn failed(&self) -> usize {
        self.files.iter().filter(|f| f.error.is_some()).count()
    }
}

/// Converts outline notes with one fixed set of patterns and settings
pub struct Converter {
    patterns: NotePatterns,
    flattener: Box<dyn Flattener>,
    keep_titles: Vec<String>,
    heading_case: HeadingCase,
}

impl Converter {
    pub fn new(config: &ConvertConfig) -> Result<Self, ConvertError> {
        Ok(Self {
            patterns: NotePatterns::new()?,
            flattener: FlattenerFactory::create(config.flatten),
            keep_titles: config.normalized_sections(),
            heading_case: config.heading_case,
        })
    }

    pub fn flattener_name(&self) -> &'static str {
        self.flattener.name()
    }

    /// Split decoded text into a [`SourceNote`]
    pub fn parse_note(&self, identifier: &str, text: &str) -> SourceNote {
        let normalized = normalize_content(text);
        let raw: Vec<String> = split_lines(&normalized).map(String::from).collect();
        let clean = preprocess_lines(&self.patterns, &raw);
        SourceNote::new(identifier, raw, clean)
    }

    /// Run the full pipeline over one note
    pub fn convert_note(&self, note: &SourceNote) -> ConvertedNote {
        let block = parse_properties_block(&self.patterns, &note.lines);

        let kept = SectionExtractor::new(&self.patterns)
            .with_keep_titles(self.keep_titles.clone())
            .with_heading_case(self.heading_case)
            .extract(&note.lines[block.consumed..]);

        let body = if kept.is_empty() {
            Vec::new()
        } else {
            self.flattener.flatten(&self.patterns, &kept)
        };

        ConvertedNote {
            identifier: note.identifier.clone(),
            kept_lines: kept.len(),
            content: assemble(
                build_frontmatter(&block.properties).as_deref(),
                &body,
                &note.identifier,
            ),
            properties: block.properties,
        }
    }

    /// Convert markdown text with `backlink` as the source identifier
    pub fn convert_markdown(&self, text: &str, backlink: &str) -> ConvertedNote {
        self.convert_note(&self.parse_note(backlink, text))
    }

    /// Read and convert one file without writing anything
    pub fn convert_file(&self, src: &Path) -> Result<ConvertedNote, ConvertError> {
        let text = read_lossy(src)?;
        Ok(self.convert_markdown(&text, &SourceNote::identifier_for(src)))
    }

    /// Convert `src` and write it under `out_root` with the same file name
    pub fn process_file(
        &self,
        src: &Path,
        out_root: &Path,
        dry_run: bool,
    ) -> Result<(ConvertedNote, PathBuf), ConvertError> {
        let converted = self.convert_file(src)?;
        let out_path = out_root.join(src.file_name().unwrap_or(src.as_os_str()));

        if !dry_run {
            fs::write(&out_path, &converted.content)
                .map_err(|e| ConvertError::Write(out_path.clone(), e))?;
        }

        Ok((converted, out_path))
    }

    /// Convert every markdown file under `config.input_dir`
    ///
    /// A missing input directory is fatal. No markdown files is an empty,
    /// successful report, and the output directory is not created. Entries
    /// the scan could not read land in [`BatchReport::skipped`].
    pub fn run_batch(
        &self,
        config: &ConvertConfig,
        dry_run: bool,
    ) -> Result<BatchReport, ConvertError> {
        let in_dir = &config.input_dir;
        if !in_dir.exists() {
            return Err(ConvertError::InputDirNotFound(in_dir.clone()));
        }

        let scan = find_markdown_files(in_dir)?;
        let mut report = BatchReport {
            input_dir: in_dir.clone(),
            output_dir: config.output_dir.clone(),
            flatten: config.flatten,
            dry_run,
            files: Vec::with_capacity(scan.files.len()),
            skipped: scan.skipped,
        };

        if scan.files.is_empty() {
            return Ok(report);
        }

        if !dry_run {
            fs::create_dir_all(&config.output_dir)
                .map_err(|e| ConvertError::Write(config.output_dir.clone(), e))?;
        }

        for src in scan.files {
            report.files.push(self.report_file(&src, &config.output_dir, dry_run));
        }

        Ok(report)
    }

    fn report_file(&self, src: &Path, out_root: &Path, dry_run: bool) -> FileReport {
        match self.process_file(src, out_root, dry_run) {
            Ok((converted, out_path)) => FileReport {
                source: src.to_path_buf(),
                output: Some(out_path),
                properties: converted.properties.len(),
                kept_lines: converted.kept_lines,
                warning: validate_frontmatter(&converted.content)
                    .err()
                    .map(|e| format!("{:#}", e)),
                error: None,
            },
            Err(e) => FileReport {
                source: src.to_path_buf(),
                output: None,
                properties: 0,
                kept_lines: 0,
                warning: None,
                error: Some(e.to_string()),
            },
        }
    }
}

/// Join frontmatter, backlink and body into the final document text
///
/// The result has no trailing whitespace and ends in exactly one newline.
pub fn assemble(frontmatter: Option<&str>, body: &[String], backlink: &str) -> String {
    let mut out: Vec<String> = Vec::with_capacity(body.len() + 4);

    if let Some(fm) = frontmatter {
        out.push(fm.to_string());
        out.push(String::new());
    }
    out.push(format!("> backlink: [[{}]]", backlink));
    out.push(String::new());
    out.extend(body.iter().cloned());

    let mut text = out.join("\n").trim_end().to_string();
    text.push('\n');
    text
}

/// Read a file as UTF-8, replacing malformed bytes with U+FFFD
pub fn read_lossy(path: &Path) -> Result<String, ConvertError> {
    let bytes = fs::read(path).map_err(|e| ConvertError::Read(path.to_path_buf(), e))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Result of scanning an input tree
#[derive(Debug, Default)]
pub struct MarkdownScan {
    /// `.md` files in sorted path order
    pub files: Vec<PathBuf>,
    /// Entries below the root that could not be read
    pub skipped: Vec<SkippedEntry>,
}

/// A directory entry the scan could not read
#[derive(Debug, Clone, Serialize)]
pub struct SkippedEntry {
    pub path: PathBuf,
    pub reason: String,
}

/// All `.md` files under `dir`, recursively, in sorted path order
///
/// Symlinks are followed. An unreadable root is fatal; an unreadable entry
/// below it is recorded in [`MarkdownScan::skipped`] and the walk goes on.
pub fn find_markdown_files(dir: &Path) -> Result<MarkdownScan, ConvertError> {
    let mut scan = MarkdownScan::default();
    for entry in WalkDir::new(dir).follow_links(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => return Err(ConvertError::Scan(dir.to_path_buf(), e)),
            Err(e) => {
                scan.skipped.push(SkippedEntry {
                    path: e.path().unwrap_or(dir).to_path_buf(),
                    reason: e.to_string(),
                });
                continue;
            }
        };
        let path = entry.path();
        if entry.file_type().is_file() && path.extension().is_some_and(|ext| ext == "md") {
            scan.files.push(path.to_path_buf());
        }
    }
    scan.files.sort();
    scan.skipped.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(scan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn converter(flatten: FlattenMode) -> Converter {
        Converter::new(&ConvertConfig {
            flatten,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_end_to_end_default() {
        let md = "#.properties\nStatus:: Done\n## Description\n- did the thing\n";
        let converted = converter(FlattenMode::default()).convert_markdown(md, "my-note");
        assert_eq!(
            converted.content,
            "---\nStatus: Done\n---\n\n> backlink: [[my-note]]\n\n## Description\n- did the thing\n"
        );
    }

    #[test]
    fn test_roam_style_bulleted_export() {
        let md = "- 🏷️ #.properties\n    - Status:: Active\n    - Owner:: Jane\n- ## Description\n    - Goal: ship it\n    - step one ((ref123))\n        - detail\n- ## Other\n    - dropped\n";
        let converted = converter(FlattenMode::SmartList).convert_markdown(md, "note");
        assert_eq!(
            converted.content,
            "---\nStatus: Active\nOwner: Jane\n---\n\n> backlink: [[note]]\n\n## Description\n- Goal: ship it\n  - step one\n  - detail\n"
        );
    }

    #[test]
    fn test_no_properties_no_sections() {
        let converted = converter(FlattenMode::Heuristic).convert_markdown("just text\n", "x");
        assert_eq!(converted.content, "> backlink: [[x]]\n");
        assert!(converted.properties.is_empty());
        assert_eq!(converted.kept_lines, 0);
    }

    #[test]
    fn test_assemble_trailing_newline() {
        let body = vec!["line".to_string(), "".to_string(), "   ".to_string()];
        let text = assemble(None, &body, "b");
        assert_eq!(text, "> backlink: [[b]]\n\nline\n");
        assert!(text.ends_with('\n') && !text.ends_with("\n\n"));
    }

    #[test]
    fn test_assemble_always_single_newline() {
        let bodies: Vec<Vec<String>> = vec![
            vec![],
            vec!["".to_string()],
            vec!["text   ".to_string(), "\t".to_string()],
            vec!["- a".to_string(), "".to_string(), "- b".to_string()],
        ];
        for body in &bodies {
            for fm in [None, Some("---\nk: v\n---")] {
                let text = assemble(fm, body, "note");
                assert!(text.ends_with('\n'));
                assert!(!text.ends_with("\n\n"));
                let last = text.trim_end_matches('\n').lines().last().unwrap();
                assert_eq!(last, last.trim_end());
            }
        }
    }

    #[test]
    fn test_crlf_and_bom_input() {
        let md = "\u{FEFF}#.properties\r\nStatus:: Done\r\n## Description\r\n- x\r\n";
        let converted = converter(FlattenMode::None).convert_markdown(md, "n");
        assert!(converted.content.starts_with("---\nStatus: Done\n---"));
        assert!(converted.content.ends_with("## Description\n- x\n"));
    }

    #[test]
    fn test_read_lossy_replaces_bad_bytes() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.md");
        fs::write(&path, b"ok \xff\xfe end").unwrap();

        let text = read_lossy(&path).unwrap();
        assert!(text.contains('\u{FFFD}'));
        assert!(text.starts_with("ok "));
    }

    #[test]
    fn test_find_markdown_files_sorted_recursive() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("sub")).unwrap();
        fs::write(root.join("b.md"), "").unwrap();
        fs::write(root.join("a.md"), "").unwrap();
        fs::write(root.join("sub/c.md"), "").unwrap();
        fs::write(root.join("notes.txt"), "").unwrap();

        let scan = find_markdown_files(root).unwrap();
        assert!(scan.skipped.is_empty());
        let names: Vec<_> = scan
            .files
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.md", "b.md", "sub/c.md"]);
    }

    #[test]
    fn test_missing_input_dir() {
        let temp_dir = TempDir::new().unwrap();
        let config = ConvertConfig {
            input_dir: temp_dir.path().join("missing"),
            output_dir: temp_dir.path().join("out"),
            ..Default::default()
        };
        let result = Converter::new(&config).unwrap().run_batch(&config, false);
        assert!(matches!(result, Err(ConvertError::InputDirNotFound(_))));
    }

    #[test]
    fn test_warning_for_unparseable_frontmatter() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("in");
        fs::create_dir_all(&input).unwrap();
        fs::write(input.join("n.md"), "#.properties\nKind:: - listy\n").unwrap();

        let config = ConvertConfig {
            input_dir: input,
            output_dir: temp_dir.path().join("out"),
            ..Default::default()
        };
        let report = Converter::new(&config).unwrap().run_batch(&config, false).unwrap();
        assert_eq!(report.converted(), 1);
        assert!(report.files[0].warning.is_some());
    }

    #[cfg(unix)]
    #[test]
    fn test_find_markdown_files_follows_symlinks() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("in");
        let elsewhere = temp_dir.path().join("elsewhere");
        fs::create_dir_all(&root).unwrap();
        fs::create_dir_all(elsewhere.join("folder")).unwrap();
        fs::write(elsewhere.join("real.md"), "").unwrap();
        fs::write(elsewhere.join("folder/inner.md"), "").unwrap();
        std::os::unix::fs::symlink(elsewhere.join("real.md"), root.join("linked.md")).unwrap();
        std::os::unix::fs::symlink(elsewhere.join("folder"), root.join("folder")).unwrap();

        let scan = find_markdown_files(&root).unwrap();
        assert_eq!(
            scan.files,
            vec![root.join("folder/inner.md"), root.join("linked.md")]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_find_markdown_files_records_unreadable_entries() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("a.md"), "").unwrap();
        std::os::unix::fs::symlink(root.join("gone.md"), root.join("dangling.md")).unwrap();
        fs::write(root.join("z.md"), "").unwrap();

        let scan = find_markdown_files(root).unwrap();
        assert_eq!(scan.files, vec![root.join("a.md"), root.join("z.md")]);
        assert_eq!(scan.skipped.len(), 1);
        assert_eq!(scan.skipped[0].path, root.join("dangling.md"));
        assert!(!scan.skipped[0].reason.is_empty());
    }

    #[test]
    fn test_find_markdown_files_missing_root_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let result = find_markdown_files(&temp_dir.path().join("missing"));
        assert!(matches!(result, Err(ConvertError::Scan(_, _))));
    }

    #[test]
    fn test_unicode_line_separators() {
        let md = "#.properties\u{2028}Status:: Done\u{0c}## Description\u{85}- x\n";
        let note = converter(FlattenMode::None).parse_note("n", md);
        let raw: Vec<_> = note.lines.iter().map(|l| l.raw.as_str()).collect();
        assert_eq!(raw, vec!["#.properties", "Status:: Done", "## Description", "- x"]);

        let converted = converter(FlattenMode::None).convert_markdown(md, "n");
        assert!(converted.content.starts_with("---\nStatus: Done\n---"));
        assert!(converted.content.ends_with("## Description\n- x\n"));
    }

    #[test]
    fn test_bulleted_sub_heading_stays_heading() {
        let md = "- ## Description\n    - ### Detail\n        - deep item\n- ## Other\n";
        let converted = converter(FlattenMode::SmartList).convert_markdown(md, "n");
        assert_eq!(
            converted.content,
            "> backlink: [[n]]\n\n## Description\n### Detail\n  - deep item\n"
        );
    }
}
