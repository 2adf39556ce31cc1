use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

/// HTRE terrain tile extraction tool
#[derive(Parser)]
#[command(name = "htre")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode tiles and write their sidecar artifacts
    Extract {
        /// Input .htre files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Directory for the extracted artifacts (defaults to the current directory)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Display the parameter block of a tile
    Info {
        /// Path to a .htre file
        file: PathBuf,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Extract { files, output_dir } => commands::extract::run(files, output_dir),
        Commands::Info { file, json } => commands::info::run(file, json),
    }
}
