//! Command implementations for the CLI interface.
//!
//! Each handler is a thin shell over one core operation: parse user input,
//! invoke the operation against the loaded workspace, persist, and render
//! the result. All validation and cascading lives in the core modules.

use std::io;

use chrono::{Duration, NaiveDate};
use clap::{CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use crate::cli::Cli;
use crate::dates::{format_date, format_relative, parse_date};
use crate::error::Error;
use crate::fields::{format_reminder_kind, format_status, ReminderKind, Status};
use crate::store::{Storage, Workspace};
use crate::task::Task;
use crate::{categories, priorities, reminders, tasks};

#[derive(Subcommand)]
pub enum Commands {
    /// Add a new task.
    Add {
        /// Task title (unique, case-insensitive).
        title: String,
        /// Longer description.
        #[arg(long, default_value = "")]
        desc: String,
        /// Category name (must exist).
        #[arg(long, default_value_t = categories::GENERAL.to_string())]
        category: String,
        /// Priority name (must exist).
        #[arg(long, default_value_t = priorities::DEFAULT.to_string())]
        priority: String,
        /// Due date, dd/MM/yyyy.
        #[arg(long)]
        due: String,
        /// Initial status.
        #[arg(long, value_enum, default_value_t = Status::Open)]
        status: Status,
    },

    /// List tasks grouped by category, with optional filters.
    List {
        /// Case-insensitive title substring.
        #[arg(long)]
        title: Option<String>,
        /// Exact category name; "All" disables the filter.
        #[arg(long)]
        category: Option<String>,
        /// Exact priority name; "All" disables the filter.
        #[arg(long)]
        priority: Option<String>,
    },

    /// View a single task and its reminders.
    View {
        /// Task title.
        title: String,
    },

    /// Edit fields on a task.
    Edit {
        /// Task title to edit.
        title: String,
        /// New title.
        #[arg(long = "title")]
        new_title: Option<String>,
        #[arg(long)]
        desc: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        /// New due date, dd/MM/yyyy.
        #[arg(long)]
        due: Option<String>,
        #[arg(long, value_enum)]
        status: Option<Status>,
        /// Commit even when a custom reminder falls after the new due date.
        #[arg(long)]
        force: bool,
    },

    /// Mark a task completed. Its reminders are removed.
    Complete {
        /// Task title.
        title: String,
    },

    /// Delete a task and all of its reminders.
    Delete {
        /// Task title.
        title: String,
    },

    /// Show task totals.
    Stats,

    /// Manage categories.
    Category {
        #[command(subcommand)]
        action: RegistryAction,
    },

    /// Manage priorities.
    Priority {
        #[command(subcommand)]
        action: RegistryAction,
    },

    /// Manage reminders.
    Reminder {
        #[command(subcommand)]
        action: ReminderAction,
    },

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for.
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum RegistryAction {
    /// Add a name.
    Add { name: String },
    /// Rename a name. Tasks referencing it follow.
    Rename { old: String, new: String },
    /// Delete a name and cascade into tasks.
    Delete { name: String },
    /// List names.
    List,
}

#[derive(Subcommand)]
pub enum ReminderAction {
    /// Set a reminder on a task.
    Add {
        /// Task title.
        task: String,
        /// Reminder kind.
        #[arg(long, value_enum, default_value_t = ReminderKind::OneDayBefore)]
        kind: ReminderKind,
        /// Date for custom reminders, dd/MM/yyyy.
        #[arg(long)]
        date: Option<String>,
        /// Message shown with the reminder.
        #[arg(long, default_value = "")]
        message: String,
    },
    /// List reminders with their numbers.
    List {
        /// Only reminders for this task.
        #[arg(long)]
        task: Option<String>,
    },
    /// Edit a reminder by its list number.
    Edit {
        /// Number from `reminder list`.
        number: usize,
        /// New date, dd/MM/yyyy. Converts a relative reminder to custom.
        #[arg(long)]
        date: Option<String>,
        /// New message.
        #[arg(long)]
        message: Option<String>,
    },
    /// Delete a reminder by its list number.
    Delete {
        /// Number from `reminder list`.
        number: usize,
    },
}

fn bail(e: Error) -> ! {
    eprintln!("Error: {e}");
    std::process::exit(1);
}

fn persist(storage: &Storage, ws: &Workspace) {
    if let Err(e) = storage.save(ws) {
        eprintln!("Failed to save collections: {e}");
        std::process::exit(1);
    }
}

fn parse_date_or_bail(s: &str) -> NaiveDate {
    match parse_date(s) {
        Ok(d) => d,
        Err(e) => bail(e),
    }
}

/// Truncate a string to a maximum width, adding ellipsis if needed.
fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out = String::new();
        for (i, ch) in s.chars().enumerate() {
            if i + 1 >= width {
                out.push('…');
                break;
            }
            out.push(ch);
        }
        out
    }
}

fn print_task_table(rows: &[&Task]) {
    println!(
        "{:<28} {:<14} {:<12} {:<12} {:<12} {}",
        "Title", "Category", "Priority", "Due", "Status", "Description"
    );
    for t in rows {
        println!(
            "{:<28} {:<14} {:<12} {:<12} {:<12} {}",
            truncate(&t.title, 28),
            truncate(&t.category, 14),
            truncate(&t.priority, 12),
            format_date(t.due_date),
            format_status(t.status),
            truncate(&t.description, 40),
        );
    }
}

/// Add a new task.
#[allow(clippy::too_many_arguments)]
pub fn cmd_add(
    storage: &Storage,
    ws: &mut Workspace,
    today: NaiveDate,
    title: String,
    desc: String,
    category: String,
    priority: String,
    due: String,
    status: Status,
) {
    let due_date = parse_date_or_bail(&due);
    let task = Task {
        title: title.trim().to_string(),
        description: desc,
        category,
        priority,
        due_date,
        status,
    };
    let shown = task.title.clone();
    if let Err(e) = tasks::add(ws, task, today) {
        bail(e);
    }
    persist(storage, ws);
    println!("Added task '{shown}'");
}

/// List tasks in category order, after applying the optional filters.
pub fn cmd_list(
    ws: &Workspace,
    title: Option<String>,
    category: Option<String>,
    priority: Option<String>,
) {
    let rows = tasks::in_category_order(tasks::filter(
        ws,
        title.as_deref(),
        category.as_deref(),
        priority.as_deref(),
    ));
    if rows.is_empty() {
        println!("No tasks.");
        return;
    }
    print_task_table(&rows);

    let delayed: Vec<&Task> = ws
        .tasks
        .iter()
        .filter(|t| t.status == Status::Delayed)
        .collect();
    if !delayed.is_empty() {
        println!("\n{} task(s) delayed:", delayed.len());
        for t in delayed {
            println!("  • {} (due {})", t.title, format_date(t.due_date));
        }
    }
}

/// View a single task with its reminders.
pub fn cmd_view(ws: &Workspace, today: NaiveDate, title: String) {
    let Some(task) = tasks::find(ws, &title) else {
        bail(Error::NotFound(format!("task '{title}'")));
    };
    println!("Title:        {}", task.title);
    println!("Category:     {}", task.category);
    println!("Priority:     {}", task.priority);
    println!(
        "Due:          {} ({})",
        format_date(task.due_date),
        format_relative(task.due_date, today)
    );
    println!("Status:       {}", format_status(task.status));
    println!(
        "Description:  {}",
        if task.description.is_empty() { "-" } else { task.description.as_str() }
    );

    let owned = reminders::for_task(&ws.reminders, &task.title);
    if owned.is_empty() {
        println!("Reminders:    -");
    } else {
        println!("Reminders:");
        for r in owned {
            println!(
                "  {} [{}] {}",
                format_date(r.date),
                format_reminder_kind(r.kind),
                r.message
            );
        }
    }
}

/// Edit a task's fields, warning when custom reminders outlive the due date.
#[allow(clippy::too_many_arguments)]
pub fn cmd_edit(
    storage: &Storage,
    ws: &mut Workspace,
    today: NaiveDate,
    title: String,
    new_title: Option<String>,
    desc: Option<String>,
    category: Option<String>,
    priority: Option<String>,
    due: Option<String>,
    status: Option<Status>,
    force: bool,
) {
    let due_date = due.map(|d| parse_date_or_bail(&d));

    // The core never blocks on this; the shell asks for an explicit --force.
    if let Some(new_due) = due_date {
        if !force && reminders::custom_past_due(&ws.reminders, &title, new_due) {
            eprintln!(
                "A custom reminder for '{title}' falls after {}. \
                 Update the reminder first, or rerun with --force.",
                format_date(new_due)
            );
            std::process::exit(1);
        }
    }

    let patch = tasks::TaskPatch {
        title: new_title,
        description: desc,
        category,
        priority,
        due_date,
        status,
    };
    if let Err(e) = tasks::edit(ws, &title, patch, today) {
        bail(e);
    }
    persist(storage, ws);
    println!("Updated task '{title}'");
}

/// Mark a task completed.
pub fn cmd_complete(storage: &Storage, ws: &mut Workspace, today: NaiveDate, title: String) {
    let patch = tasks::TaskPatch {
        status: Some(Status::Completed),
        ..Default::default()
    };
    if let Err(e) = tasks::edit(ws, &title, patch, today) {
        bail(e);
    }
    persist(storage, ws);
    println!("Completed '{title}'");
}

/// Delete a task.
pub fn cmd_delete(storage: &Storage, ws: &mut Workspace, title: String) {
    if let Err(e) = tasks::delete(ws, &title) {
        bail(e);
    }
    persist(storage, ws);
    println!("Deleted '{title}' and its reminders");
}

/// Print task totals, mirroring the summary shown on the list banner.
pub fn cmd_stats(ws: &Workspace, today: NaiveDate) {
    let total = ws.tasks.len();
    let completed = ws.tasks.iter().filter(|t| t.status == Status::Completed).count();
    let delayed = ws.tasks.iter().filter(|t| t.status == Status::Delayed).count();
    let week = today + Duration::days(7);
    let upcoming = ws
        .tasks
        .iter()
        .filter(|t| t.due_date >= today && t.due_date <= week)
        .count();
    println!("Total tasks:          {total}");
    println!("Completed tasks:      {completed}");
    println!("Delayed tasks:        {delayed}");
    println!("Due within 7 days:    {upcoming}");
}

/// Category management subcommands.
pub fn cmd_category(storage: &Storage, ws: &mut Workspace, action: RegistryAction) {
    match action {
        RegistryAction::Add { name } => {
            if let Err(e) = categories::add(ws, &name) {
                bail(e);
            }
            persist(storage, ws);
            println!("Added category '{}'", name.trim());
        }
        RegistryAction::Rename { old, new } => {
            if let Err(e) = categories::rename(ws, &old, &new) {
                bail(e);
            }
            persist(storage, ws);
            println!("Renamed category '{old}' to '{}'", new.trim());
        }
        RegistryAction::Delete { name } => {
            if let Err(e) = categories::delete(ws, &name) {
                bail(e);
            }
            persist(storage, ws);
            println!("Deleted category '{name}' and its tasks");
        }
        RegistryAction::List => {
            for c in &ws.categories {
                println!("{c}");
            }
        }
    }
}

/// Priority management subcommands.
pub fn cmd_priority(storage: &Storage, ws: &mut Workspace, action: RegistryAction) {
    match action {
        RegistryAction::Add { name } => {
            if let Err(e) = priorities::add(ws, &name) {
                bail(e);
            }
            persist(storage, ws);
            println!("Added priority '{}'", name.trim());
        }
        RegistryAction::Rename { old, new } => {
            if let Err(e) = priorities::rename(ws, &old, &new) {
                bail(e);
            }
            persist(storage, ws);
            println!("Renamed priority '{old}' to '{}'", new.trim());
        }
        RegistryAction::Delete { name } => {
            if let Err(e) = priorities::delete(ws, &name) {
                bail(e);
            }
            persist(storage, ws);
            println!("Deleted priority '{name}'; its tasks fall back to '{}'", priorities::DEFAULT);
        }
        RegistryAction::List => {
            for p in &ws.priorities {
                println!("{p}");
            }
        }
    }
}

/// Reminder management subcommands.
pub fn cmd_reminder(
    storage: &Storage,
    ws: &mut Workspace,
    today: NaiveDate,
    action: ReminderAction,
) {
    match action {
        ReminderAction::Add {
            task,
            kind,
            date,
            message,
        } => {
            let custom = date.map(|d| parse_date_or_bail(&d));
            match reminders::create(ws, &task, kind, custom, message, today) {
                Ok(reminders::Outcome::Added) => {
                    persist(storage, ws);
                    let stored = ws.reminders.last().expect("just pushed");
                    println!("Reminder set for '{}' on {}", stored.task_title, format_date(stored.date));
                }
                Ok(reminders::Outcome::Duplicate) => {
                    println!("An identical reminder already exists; nothing added.");
                }
                Err(e) => bail(e),
            }
        }
        ReminderAction::List { task } => {
            let rows: Vec<(usize, &crate::reminder::Reminder)> = ws
                .reminders
                .iter()
                .enumerate()
                .filter(|(_, r)| task.as_deref().map_or(true, |t| r.is_for(t)))
                .collect();
            if rows.is_empty() {
                println!("No reminders.");
                return;
            }
            println!("{:<4} {:<12} {:<18} {:<28} {}", "#", "Date", "Kind", "Task", "Message");
            for (i, r) in rows {
                println!(
                    "{:<4} {:<12} {:<18} {:<28} {}",
                    i + 1,
                    format_date(r.date),
                    format_reminder_kind(r.kind),
                    truncate(&r.task_title, 28),
                    r.message
                );
            }
        }
        ReminderAction::Edit {
            number,
            date,
            message,
        } => {
            if number == 0 {
                bail(Error::NotFound("reminder #0".into()));
            }
            let new_date = date.map(|d| parse_date_or_bail(&d));
            if let Err(e) = reminders::modify(ws, number - 1, new_date, message, today) {
                bail(e);
            }
            persist(storage, ws);
            println!("Updated reminder #{number}");
        }
        ReminderAction::Delete { number } => {
            if number == 0 {
                bail(Error::NotFound("reminder #0".into()));
            }
            match reminders::delete_at(ws, number - 1) {
                Ok(removed) => {
                    persist(storage, ws);
                    println!(
                        "Deleted reminder for '{}' on {}",
                        removed.task_title,
                        format_date(removed.date)
                    );
                }
                Err(e) => bail(e),
            }
        }
    }
}

/// Generate shell completion scripts on stdout.
pub fn cmd_completions(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "tt", &mut io::stdout());
}
