pub mod convert;
pub mod preview;

use crate::flatten::FlattenMode;
use crate::models::{ConvertConfig, HeadingCase};
use crate::Result;
use clap::Args;
use std::path::{Path, PathBuf};

/// Settings shared by every command that converts notes
#[derive(Args, Debug, Clone, Default)]
pub struct ConversionOptions {
    /// List flattening strategy (default: smart-list)
    #[arg(short, long, value_enum)]
    pub flatten: Option<FlattenMode>,

    /// Casing of emitted section headings (default: preserve)
    #[arg(long, value_enum)]
    pub heading_case: Option<HeadingCase>,

    /// Config file (default: ./notebridge.toml if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl ConversionOptions {
    /// Load the config file and apply command-line overrides on top
    pub fn resolve(&self, project_root: &Path) -> Result<ConvertConfig> {
        let mut config = ConvertConfig::load(self.config.as_deref(), project_root)?;
        if let Some(flatten) = self.flatten {
            config.flatten = flatten;
        }
        if let Some(heading_case) = self.heading_case {
            config.heading_case = heading_case;
        }
        Ok(config)
    }
}

/// Display `path` relative to `root` when it lives underneath it
pub(crate) fn display_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}
