//! Convert CLI Command
//!
//! Converts every markdown export under the input directory and writes the
//! flattened notes into the output directory.

use crate::cli::{display_path, ConversionOptions};
use crate::services::{BatchReport, Converter};
use crate::Result;
use clap::Args;
use colored::Colorize;
use std::env;
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct ConvertArgs {
    /// Directory of exported notes (default: content/NodeInbox)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Directory to write converted notes to (default: content/NodesToConvert)
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[command(flatten)]
    options: ConversionOptions,

    /// Convert and report without writing any files
    #[arg(long)]
    dry_run: bool,

    /// Print the batch report as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: ConvertArgs) -> Result<()> {
    let project_root = env::current_dir()?;

    let mut config = args.options.resolve(&project_root)?;
    if let Some(input) = args.input {
        config.input_dir = input;
    }
    if let Some(output) = args.output {
        config.output_dir = output;
    }
    config.input_dir = project_root.join(&config.input_dir);
    config.output_dir = project_root.join(&config.output_dir);

    let converter = Converter::new(&config)?;

    if !args.json {
        println!("{}", "Notebridge Convert".cyan().bold());
        println!(
            "{}",
            format!("Source: {}", display_path(&config.input_dir, &project_root)).bright_black()
        );
        if args.dry_run {
            println!("{}", "Dry run: no files will be written".yellow());
        }
        println!();
    }

    let report = converter.run_batch(&config, args.dry_run)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, converter.flattener_name(), &project_root);
    }

    if report.failed() > 0 {
        anyhow::bail!("{} of {} files failed to convert", report.failed(), report.files.len());
    }

    Ok(())
}

fn print_report(report: &BatchReport, flatten: &str, project_root: &Path) {
    for skipped in &report.skipped {
        println!(
            "{}",
            format!(
                "⚠️  skipped {}: {}",
                display_path(&skipped.path, project_root),
                skipped.reason
            )
            .yellow()
        );
    }

    if report.files.is_empty() {
        println!("{}", "No markdown files found.".yellow());
        return;
    }

    let verb = if report.dry_run { "would write" } else { "wrote" };

    for file in &report.files {
        match (&file.output, &file.error) {
            (Some(out), None) => {
                println!("{} {}", format!("{}:", verb).green(), display_path(out, project_root));
            }
            (_, Some(err)) => {
                eprintln!(
                    "{}",
                    format!("✗ {}: {}", display_path(&file.source, project_root), err).red()
                );
            }
            (None, None) => {}
        }
        if let Some(warning) = &file.warning {
            println!(
                "{}",
                format!("⚠️  {}: {}", display_path(&file.source, project_root), warning).yellow()
            );
        }
    }

    println!();
    println!(
        "{}",
        format!(
            "converted {} files → {} (flatten={})",
            report.converted(),
            display_path(&report.output_dir, project_root),
            flatten
        )
        .green()
        .bold()
    );
}
