// Notebridge - Outline export converter
// Turns block-based note exports into flat, linked-notes friendly markdown

pub mod cli;
pub mod flatten;
pub mod models;
pub mod parser;
pub mod services;

pub use anyhow::{Context, Result};
pub use colored::Colorize;

// Re-export commonly used types
pub use flatten::FlattenMode;
pub use models::{ConvertConfig, ConvertedNote, HeadingCase, PropertyMap};
pub use services::{BatchReport, ConvertError, Converter};
