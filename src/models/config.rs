//! Conversion configuration
//!
//! Settings come from three layers: built-in defaults, an optional
//! `notebridge.toml`, and command-line overrides applied by the CLI.

use crate::flatten::FlattenMode;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "notebridge.toml";

/// How emitted section headings are cased
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum HeadingCase {
    /// Keep the heading text as written (annotations removed)
    #[default]
    Preserve,
    /// Title-case every word (`methods context` -> `Methods Context`)
    Title,
}

impl HeadingCase {
    pub fn apply(&self, title: &str) -> String {
        match self {
            HeadingCase::Preserve => title.to_string(),
            HeadingCase::Title => title_case(title),
        }
    }
}

/// Uppercase the first letter of every alphabetic run, lowercase the rest
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }
    out
}

/// Conversion settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// Directory scanned recursively for `.md` exports
    pub input_dir: PathBuf,

    /// Directory converted notes are written into
    pub output_dir: PathBuf,

    /// List flattening strategy
    pub flatten: FlattenMode,

    /// Casing of emitted section headings
    pub heading_case: HeadingCase,

    /// Section titles to keep (matched case-insensitively)
    pub keep_sections: Vec<String>,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("content/NodeInbox"),
            output_dir: PathBuf::from("content/NodesToConvert"),
            flatten: FlattenMode::default(),
            heading_case: HeadingCase::default(),
            keep_sections: vec!["description".to_string(), "methods context".to_string()],
        }
    }
}

impl ConvertConfig {
    /// Load config from an explicit file, which must exist
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: ConvertConfig = toml::from_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        Ok(config)
    }

    /// Load `--config` if given, else `notebridge.toml` in `project_root`,
    /// else defaults
    pub fn load(explicit: Option<&Path>, project_root: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let config_path = project_root.join(CONFIG_FILE_NAME);
        if !config_path.exists() {
            return Ok(Self::default());
        }
        Self::from_file(&config_path)
    }

    /// Allow-list entries, trimmed and lowercased for title comparison
    pub fn normalized_sections(&self) -> Vec<String> {
        self.keep_sections
            .iter()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect()
    }
}
