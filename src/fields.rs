//! Closed enumerations for task status and reminder kinds.
//!
//! Both enums serialize as their PascalCase variant names; the aliases
//! accept the spellings older collection files used, so reading stays
//! tolerant while writing is canonical.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Task lifecycle status.
///
/// `Delayed` is derived, never chosen: the Task Store promotes overdue tasks
/// to it and reverts it to `Open` when the due date moves back into range.
/// `Completed` is terminal for automatic recomputation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
pub enum Status {
    Open,
    #[serde(alias = "In Progress")]
    InProgress,
    Postponed,
    Completed,
    Delayed,
}

/// How a reminder's date relates to its task's due date.
///
/// The three relative kinds derive their date from the due date (1, 7, and
/// 30 days before); `Custom` dates are chosen by the user and never
/// auto-shifted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
pub enum ReminderKind {
    #[serde(alias = "One day before deadline")]
    OneDayBefore,
    #[serde(alias = "One week before deadline")]
    OneWeekBefore,
    #[serde(alias = "One month before deadline")]
    OneMonthBefore,
    #[serde(alias = "Custom date")]
    Custom,
}

impl ReminderKind {
    /// Days subtracted from the due date, or `None` for custom reminders.
    pub fn offset_days(self) -> Option<i64> {
        match self {
            ReminderKind::OneDayBefore => Some(1),
            ReminderKind::OneWeekBefore => Some(7),
            ReminderKind::OneMonthBefore => Some(30),
            ReminderKind::Custom => None,
        }
    }
}

/// Format a status for display.
pub fn format_status(s: Status) -> &'static str {
    match s {
        Status::Open => "Open",
        Status::InProgress => "In Progress",
        Status::Postponed => "Postponed",
        Status::Completed => "Completed",
        Status::Delayed => "Delayed",
    }
}

/// Format a reminder kind for display.
pub fn format_reminder_kind(k: ReminderKind) -> &'static str {
    match k {
        ReminderKind::OneDayBefore => "One day before",
        ReminderKind::OneWeekBefore => "One week before",
        ReminderKind::OneMonthBefore => "One month before",
        ReminderKind::Custom => "Custom",
    }
}
