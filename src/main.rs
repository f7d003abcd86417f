//! # tt - Task Tracking CLI
//!
//! A file-backed task tracker with categories, priorities and date-driven
//! reminders.
//!
//! ## Quick start
//!
//! ```bash
//! tt add "Write report" --category General --due 20/12/2025
//! tt reminder add "Write report" --kind one-week-before
//! tt list
//! tt complete "Write report"
//! ```
//!
//! Data is stored in `~/.tasktrack/` (override with `--dir`) as four JSON
//! files — tasks, reminders, categories, priorities — rewritten whole on
//! every change.

use std::path::PathBuf;

use chrono::Local;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tasktrack::cli::Cli;
use tasktrack::cmd::{self, Commands};
use tasktrack::store::Storage;
use tasktrack::tasks;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tasktrack=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Completions need no data directory.
    if let Commands::Completions { shell } = &cli.command {
        cmd::cmd_completions(*shell);
        return;
    }

    let dir = cli.dir.unwrap_or_else(|| {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".tasktrack")
    });
    let storage = Storage::new(dir);

    let mut ws = match storage.load() {
        Ok(ws) => ws,
        Err(e) => {
            eprintln!("Failed to load collections: {e}");
            std::process::exit(1);
        }
    };

    // Derive statuses once per load cycle, and persist when anything moved.
    let today = Local::now().date_naive();
    if tasks::recompute_statuses(&mut ws, today) {
        if let Err(e) = storage.save(&ws) {
            eprintln!("Failed to save collections: {e}");
            std::process::exit(1);
        }
    }

    match cli.command {
        Commands::Completions { .. } => unreachable!("handled above"),

        Commands::Add {
            title,
            desc,
            category,
            priority,
            due,
            status,
        } => cmd::cmd_add(&storage, &mut ws, today, title, desc, category, priority, due, status),

        Commands::List {
            title,
            category,
            priority,
        } => cmd::cmd_list(&ws, title, category, priority),

        Commands::View { title } => cmd::cmd_view(&ws, today, title),

        Commands::Edit {
            title,
            new_title,
            desc,
            category,
            priority,
            due,
            status,
            force,
        } => cmd::cmd_edit(
            &storage, &mut ws, today, title, new_title, desc, category, priority, due, status,
            force,
        ),

        Commands::Complete { title } => cmd::cmd_complete(&storage, &mut ws, today, title),

        Commands::Delete { title } => cmd::cmd_delete(&storage, &mut ws, title),

        Commands::Stats => cmd::cmd_stats(&ws, today),

        Commands::Category { action } => cmd::cmd_category(&storage, &mut ws, action),

        Commands::Priority { action } => cmd::cmd_priority(&storage, &mut ws, action),

        Commands::Reminder { action } => cmd::cmd_reminder(&storage, &mut ws, today, action),
    }
}
