use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use colored::Colorize;
use notebridge::Result;
use std::io;

#[derive(Parser)]
#[command(name = "notebridge")]
#[command(author = "Chris Cheng <chris.cheng@shopee.com>")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Convert outline note exports into flat linked-notes markdown", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert every exported note in a directory
    Convert(notebridge::cli::convert::ConvertArgs),

    /// Convert a single note and print the result
    Preview(notebridge::cli::preview::PreviewArgs),

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}", format!("Error: {:#}", e).red());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Convert(args) => {
            notebridge::cli::convert::run(args)?;
        }

        Commands::Preview(args) => {
            notebridge::cli::preview::run(args)?;
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "notebridge", &mut io::stdout());
        }
    }

    Ok(())
}
