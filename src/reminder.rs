//! Reminder record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dates;
use crate::fields::ReminderKind;

/// A date-driven reminder attached to a task by title.
///
/// For the three relative kinds the Reminder Engine owns `date` and
/// recomputes it whenever the task's due date moves. Custom dates belong to
/// the user and are never auto-shifted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reminder {
    #[serde(rename = "taskTitle")]
    pub task_title: String,
    #[serde(with = "dates::as_ddmmyyyy")]
    pub date: NaiveDate,
    #[serde(default)]
    pub message: String,
    #[serde(rename = "reminderType")]
    pub kind: ReminderKind,
}

impl Reminder {
    /// Whether this reminder belongs to the given task title.
    pub fn is_for(&self, title: &str) -> bool {
        self.task_title.to_lowercase() == title.to_lowercase()
    }

    /// Duplicate detection key: reminders are unique per
    /// (task title, date, message, kind) tuple.
    pub fn same_tuple(&self, other: &Reminder) -> bool {
        self.task_title == other.task_title
            && self.date == other.date
            && self.message == other.message
            && self.kind == other.kind
    }
}
