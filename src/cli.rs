use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// Simple, file-backed task tracker.
/// Collections live under ~/.tasktrack or a directory passed via --dir.
#[derive(Parser)]
#[command(name = "tt", version, about = "Task tracking CLI with categories, priorities and reminders")]
pub struct Cli {
    /// Directory holding the JSON collection files.
    #[arg(long, global = true)]
    pub dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}
