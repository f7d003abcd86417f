//! Shared fixtures for the unit tests.

use chrono::{Duration, NaiveDate};

use crate::categories::GENERAL;
use crate::fields::{ReminderKind, Status};
use crate::priorities::DEFAULT;
use crate::reminder::Reminder;
use crate::store::Workspace;
use crate::task::Task;

/// Fixed clock for deterministic date arithmetic.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 12, 10).unwrap()
}

/// Parse a `dd/MM/yyyy` literal.
pub fn date(s: &str) -> NaiveDate {
    crate::dates::parse_date(s).unwrap()
}

/// A task in the default category/priority, due five days from [`today`].
pub fn task_named(title: &str) -> Task {
    Task {
        title: title.into(),
        description: String::new(),
        category: GENERAL.into(),
        priority: DEFAULT.into(),
        due_date: today() + Duration::days(5),
        status: Status::Open,
    }
}

/// A default workspace holding one task per given title.
pub fn ws_with_tasks(titles: &[&str]) -> Workspace {
    let mut ws = Workspace::default();
    for t in titles {
        ws.tasks.push(task_named(t));
    }
    ws
}

/// A reminder for `title` dated the day before [`today`]'s + 5 due date.
pub fn reminder_for(title: &str, kind: ReminderKind) -> Reminder {
    Reminder {
        task_title: title.into(),
        date: today() + Duration::days(4),
        message: String::new(),
        kind,
    }
}
