//! Task record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dates;
use crate::fields::Status;

/// A tracked task.
///
/// The title is the primary key: unique case-insensitively and the foreign
/// key reminders point at. `category` and `priority` name entries in their
/// registries; the registries cascade renames and deletions into these
/// fields through the coordinator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    pub priority: String,
    #[serde(rename = "dueDate", with = "dates::as_ddmmyyyy")]
    pub due_date: NaiveDate,
    pub status: Status,
}

impl Task {
    /// Case-insensitive primary-key comparison.
    pub fn is_titled(&self, title: &str) -> bool {
        self.title.to_lowercase() == title.to_lowercase()
    }
}
