//! Reminder Engine.
//!
//! Computes reminder dates relative to a task's due date, validates the
//! [today, due date] window, and owns every reminder mutation. The
//! `*_for_task` functions are the cascade primitives invoked by the
//! coordinator when tasks are renamed, rescheduled, completed, or deleted.

use chrono::{Duration, NaiveDate};
use tracing::debug;

use crate::error::{Error, Result};
use crate::fields::{ReminderKind, Status};
use crate::reminder::Reminder;
use crate::store::Workspace;
use crate::tasks;

/// Result of a create request. Duplicates are a no-op, not an error; the
/// shell reports them without failing.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Added,
    Duplicate,
}

fn check_window(date: NaiveDate, today: NaiveDate, due: NaiveDate) -> Result<()> {
    if date < today || date > due {
        return Err(Error::validation(format!(
            "reminder date {} must lie between today and the task's due date {}",
            date.format(crate::dates::DATE_FMT),
            due.format(crate::dates::DATE_FMT),
        )));
    }
    Ok(())
}

/// Create a reminder for a task.
///
/// The date is derived from the task's due date for the relative kinds and
/// taken verbatim for `Custom`. The computed date must fall inside
/// [today, due date].
pub fn create(
    ws: &mut Workspace,
    task_title: &str,
    kind: ReminderKind,
    custom_date: Option<NaiveDate>,
    message: String,
    today: NaiveDate,
) -> Result<Outcome> {
    let task = tasks::find(ws, task_title)
        .ok_or_else(|| Error::NotFound(format!("task '{task_title}'")))?;
    if task.status == Status::Completed {
        return Err(Error::validation(
            "completed tasks cannot take new reminders",
        ));
    }
    let due = task.due_date;
    let date = match kind.offset_days() {
        Some(days) => due - Duration::days(days),
        None => custom_date.ok_or_else(|| Error::validation("a custom reminder needs a date"))?,
    };
    check_window(date, today, due)?;

    let reminder = Reminder {
        task_title: task.title.clone(),
        date,
        message,
        kind,
    };
    if ws.reminders.iter().any(|r| r.same_tuple(&reminder)) {
        debug!(task = %reminder.task_title, "duplicate reminder ignored");
        return Ok(Outcome::Duplicate);
    }
    debug!(task = %reminder.task_title, date = %reminder.date, "reminder created");
    ws.reminders.push(reminder);
    Ok(Outcome::Added)
}

/// Modify a reminder's date and/or message, addressed by list position.
///
/// Changing the date of a relative reminder converts it to `Custom`: its
/// date no longer derives from the due date, so the engine stops shifting
/// it. The new date is window-validated against the owning task.
pub fn modify(
    ws: &mut Workspace,
    index: usize,
    new_date: Option<NaiveDate>,
    new_message: Option<String>,
    today: NaiveDate,
) -> Result<()> {
    let Some(current) = ws.reminders.get(index) else {
        return Err(Error::NotFound(format!("reminder #{}", index + 1)));
    };
    let task = tasks::find(ws, &current.task_title)
        .ok_or_else(|| Error::NotFound(format!("task '{}'", current.task_title)))?;
    let due = task.due_date;

    let mut updated = current.clone();
    if let Some(date) = new_date {
        if date != updated.date {
            updated.kind = ReminderKind::Custom;
        }
        updated.date = date;
    }
    if let Some(message) = new_message {
        updated.message = message;
    }
    check_window(updated.date, today, due)?;

    let clash = ws
        .reminders
        .iter()
        .enumerate()
        .any(|(i, r)| i != index && r.same_tuple(&updated));
    if clash {
        return Err(Error::validation("an identical reminder already exists"));
    }
    ws.reminders[index] = updated;
    Ok(())
}

/// Delete a reminder by list position, returning it for display.
pub fn delete_at(ws: &mut Workspace, index: usize) -> Result<Reminder> {
    if index >= ws.reminders.len() {
        return Err(Error::NotFound(format!("reminder #{}", index + 1)));
    }
    Ok(ws.reminders.remove(index))
}

/// All reminders belonging to a task.
pub fn for_task<'a>(reminders: &'a [Reminder], title: &str) -> Vec<&'a Reminder> {
    reminders.iter().filter(|r| r.is_for(title)).collect()
}

/// Cascade primitive: recompute relative reminder dates against a new due
/// date. Custom reminders are left untouched.
pub(crate) fn reschedule_for_task(reminders: &mut [Reminder], title: &str, new_due: NaiveDate) {
    for r in reminders.iter_mut().filter(|r| r.is_for(title)) {
        if let Some(days) = r.kind.offset_days() {
            r.date = new_due - Duration::days(days);
            debug!(task = %r.task_title, date = %r.date, "reminder rescheduled");
        }
    }
}

/// Cascade primitive: follow a task rename.
pub(crate) fn rename_for_task(reminders: &mut [Reminder], old: &str, new: &str) {
    for r in reminders.iter_mut().filter(|r| r.is_for(old)) {
        r.task_title = new.to_string();
    }
}

/// Cascade primitive: drop every reminder a task owns.
pub(crate) fn delete_for_task(reminders: &mut Vec<Reminder>, title: &str) {
    let before = reminders.len();
    reminders.retain(|r| !r.is_for(title));
    let dropped = before - reminders.len();
    if dropped > 0 {
        debug!(task = title, dropped, "reminders deleted");
    }
}

/// True if any Custom reminder for the task lands after the prospective due
/// date. The shell uses this to warn before committing an edit; the core
/// never blocks the edit itself.
pub fn custom_past_due(reminders: &[Reminder], title: &str, new_due: NaiveDate) -> bool {
    reminders
        .iter()
        .any(|r| r.is_for(title) && r.kind == ReminderKind::Custom && r.date > new_due)
}
