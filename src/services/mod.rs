//! Service layer
//!
//! Filesystem-facing operations shared by the CLI commands.

pub mod convert_service;

pub use convert_service::{
    assemble, find_markdown_files, read_lossy, BatchReport, ConvertError, Converter, FileReport,
    MarkdownScan, SkippedEntry,
};
