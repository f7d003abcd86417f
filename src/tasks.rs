//! Task Store: operations owning the task collection.
//!
//! The store is the sole writer of `Task.status`. Registry changes reach
//! tasks only through the cascade coordinator, which calls the `reassign_*`
//! and `remove_by_category` primitives at the bottom of this module.

use chrono::NaiveDate;
use tracing::debug;

use crate::cascade::{self, Event};
use crate::error::{Error, Result};
use crate::fields::Status;
use crate::store::Workspace;
use crate::task::Task;

/// Field changes applied by [`edit`]. `None` leaves the field alone.
#[derive(Debug, Default, Clone)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub status: Option<Status>,
}

fn position(ws: &Workspace, title: &str) -> Option<usize> {
    ws.tasks.iter().position(|t| t.is_titled(title))
}

/// Look a task up by title, case-insensitively.
pub fn find<'a>(ws: &'a Workspace, title: &str) -> Option<&'a Task> {
    ws.tasks.iter().find(|t| t.is_titled(title))
}

fn validate_title(ws: &Workspace, title: &str, keep: Option<usize>) -> Result<()> {
    if title.trim().is_empty() {
        return Err(Error::validation("task title cannot be empty"));
    }
    let clash = ws
        .tasks
        .iter()
        .enumerate()
        .any(|(i, t)| Some(i) != keep && t.is_titled(title));
    if clash {
        return Err(Error::validation(format!(
            "a task titled '{title}' already exists"
        )));
    }
    Ok(())
}

/// Resolve category/priority foreign keys to their registered spellings.
fn resolve_refs(ws: &Workspace, category: &str, priority: &str) -> Result<(String, String)> {
    let category = ws
        .canonical_category(category)
        .ok_or_else(|| Error::validation(format!("unknown category '{category}'")))?;
    let priority = ws
        .canonical_priority(priority)
        .ok_or_else(|| Error::validation(format!("unknown priority '{priority}'")))?;
    Ok((category.to_string(), priority.to_string()))
}

/// Add a new task.
///
/// Fails on an empty or duplicate title, a past due date, or a category or
/// priority that is not registered.
pub fn add(ws: &mut Workspace, mut task: Task, today: NaiveDate) -> Result<()> {
    validate_title(ws, &task.title, None)?;
    if task.due_date < today {
        return Err(Error::validation("due date cannot be in the past"));
    }
    (task.category, task.priority) = resolve_refs(ws, &task.category, &task.priority)?;
    debug!(title = %task.title, "task added");
    ws.tasks.push(task);
    Ok(())
}

/// Edit an existing task, cascading into its reminders.
///
/// Cascade order: a title change is propagated first, keyed by the original
/// title; then a transition into `Completed` drops the task's reminders, or
/// a due-date change reschedules the relative ones.
pub fn edit(ws: &mut Workspace, title: &str, patch: TaskPatch, today: NaiveDate) -> Result<()> {
    let idx = position(ws, title).ok_or_else(|| Error::NotFound(format!("task '{title}'")))?;
    let old = ws.tasks[idx].clone();

    let new_title = match patch.title {
        Some(t) => {
            let t = t.trim().to_string();
            validate_title(ws, &t, Some(idx))?;
            t
        }
        None => old.title.clone(),
    };
    if let Some(d) = patch.due_date {
        if d < today {
            return Err(Error::validation("due date cannot be in the past"));
        }
    }
    let new_category = patch.category.unwrap_or_else(|| old.category.clone());
    let new_priority = patch.priority.unwrap_or_else(|| old.priority.clone());
    let (new_category, new_priority) = resolve_refs(ws, &new_category, &new_priority)?;

    let new_due = patch.due_date.unwrap_or(old.due_date);
    let new_status = patch.status.unwrap_or(old.status);

    let task = &mut ws.tasks[idx];
    task.title = new_title.clone();
    if let Some(d) = patch.description {
        task.description = d;
    }
    task.category = new_category;
    task.priority = new_priority;
    task.due_date = new_due;
    task.status = new_status;

    let mut events = Vec::new();
    if old.title != new_title {
        events.push(Event::TaskRenamed {
            old: old.title.clone(),
            new: new_title.clone(),
        });
    }
    if new_status == Status::Completed && old.status != Status::Completed {
        events.push(Event::TaskCompleted { title: new_title });
    } else if new_due != old.due_date {
        events.push(Event::TaskRescheduled {
            title: new_title,
            due: new_due,
        });
    }
    cascade::apply(ws, events);
    Ok(())
}

/// Delete a task and all of its reminders.
pub fn delete(ws: &mut Workspace, title: &str) -> Result<()> {
    let idx = position(ws, title).ok_or_else(|| Error::NotFound(format!("task '{title}'")))?;
    let removed = ws.tasks.remove(idx);
    debug!(title = %removed.title, "task deleted");
    cascade::apply(ws, vec![Event::TaskDeleted { title: removed.title }]);
    Ok(())
}

/// Derive statuses from due dates. Runs once per load cycle.
///
/// Overdue non-Completed tasks become Delayed; a Delayed task whose due date
/// is today or later reverts to Open. InProgress and Postponed are only ever
/// promoted, never reverted. Returns whether anything changed so the caller
/// knows to persist.
pub fn recompute_statuses(ws: &mut Workspace, today: NaiveDate) -> bool {
    let mut changed = false;
    for task in &mut ws.tasks {
        if task.status == Status::Completed {
            continue;
        }
        if task.due_date < today {
            if task.status != Status::Delayed {
                debug!(title = %task.title, "task is overdue, marking Delayed");
                task.status = Status::Delayed;
                changed = true;
            }
        } else if task.status == Status::Delayed {
            debug!(title = %task.title, "due date back in range, reverting to Open");
            task.status = Status::Open;
            changed = true;
        }
    }
    changed
}

/// Stable category ordering applied to a set of task refs: ties keep their
/// incoming (insertion) order.
pub fn in_category_order(mut rows: Vec<&Task>) -> Vec<&Task> {
    rows.sort_by(|a, b| a.category.cmp(&b.category));
    rows
}

/// All tasks in stable category order.
pub fn sorted_by_category(ws: &Workspace) -> Vec<&Task> {
    in_category_order(ws.tasks.iter().collect())
}

/// A filter field is active unless absent, empty, or the "All" sentinel.
fn active(field: Option<&str>) -> Option<&str> {
    field.filter(|v| !v.is_empty() && *v != "All")
}

/// Filter tasks by title substring (case-insensitive) and exact category /
/// priority. `None`, an empty string, or `"All"` disables a field's filter.
pub fn filter<'a>(
    ws: &'a Workspace,
    title: Option<&str>,
    category: Option<&str>,
    priority: Option<&str>,
) -> Vec<&'a Task> {
    let title = active(title).map(str::to_lowercase);
    let category = active(category);
    let priority = active(priority);
    ws.tasks
        .iter()
        .filter(|t| {
            title
                .as_deref()
                .map_or(true, |s| t.title.to_lowercase().contains(s))
        })
        .filter(|t| category.map_or(true, |c| t.category == c))
        .filter(|t| priority.map_or(true, |p| t.priority == p))
        .collect()
}

/// Cascade primitive: move tasks from one category name to another.
pub(crate) fn reassign_category(tasks: &mut [Task], old: &str, new: &str) {
    for t in tasks {
        if t.category.to_lowercase() == old.to_lowercase() {
            t.category = new.to_string();
        }
    }
}

/// Cascade primitive: move tasks from one priority name to another.
pub(crate) fn reassign_priority(tasks: &mut [Task], old: &str, new: &str) {
    for t in tasks {
        if t.priority.to_lowercase() == old.to_lowercase() {
            t.priority = new.to_string();
        }
    }
}

/// Cascade primitive: drop every task in a category, returning their titles
/// so the coordinator can cascade reminder cleanup per task.
pub(crate) fn remove_by_category(tasks: &mut Vec<Task>, name: &str) -> Vec<String> {
    let mut removed = Vec::new();
    tasks.retain(|t| {
        if t.category.to_lowercase() == name.to_lowercase() {
            removed.push(t.title.clone());
            false
        } else {
            true
        }
    });
    removed
}
