//! Preview CLI Command
//!
//! Converts a single note and prints the result instead of writing it.

use crate::cli::ConversionOptions;
use crate::parser::validate_frontmatter;
use crate::services::Converter;
use crate::Result;
use clap::Args;
use colored::Colorize;
use std::env;
use std::path::PathBuf;

#[derive(Args)]
pub struct PreviewArgs {
    /// Exported note to convert
    file: PathBuf,

    #[command(flatten)]
    options: ConversionOptions,
}

pub fn run(args: PreviewArgs) -> Result<()> {
    let project_root = env::current_dir()?;

    if !args.file.is_file() {
        anyhow::bail!("File not found: {}", args.file.display());
    }

    let config = args.options.resolve(&project_root)?;
    let converter = Converter::new(&config)?;
    let converted = converter.convert_file(&args.file)?;

    print!("{}", converted.content);

    if let Err(e) = validate_frontmatter(&converted.content) {
        eprintln!("{}", format!("⚠️  {:#}", e).yellow());
    }

    Ok(())
}
