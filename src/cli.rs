use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// Simple, file-backed task dashboard CLI.
/// Storage defaults to ./tasks.csv or a path passed via --file.
#[derive(Parser)]
#[command(name = "td", version, about = "Project-task dashboard CLI")]
pub struct Cli {
    /// Path to the CSV table file.
    #[arg(long, global = true)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}
