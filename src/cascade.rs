//! Domain events and the coordinator that applies their cascades.
//!
//! Registries and the Task Store never reach into each other's collections;
//! they emit events and this module performs every cross-collection write.
//! Events are drained FIFO, and an event may enqueue follow-ups: deleting a
//! category enqueues one `TaskDeleted` per affected task, so reminder
//! cleanup always flows through the same path as a direct task deletion.

use std::collections::VecDeque;

use chrono::NaiveDate;
use tracing::debug;

use crate::priorities::DEFAULT;
use crate::reminders;
use crate::store::Workspace;
use crate::tasks;

/// A change to a referenced record that dependent records must follow.
#[derive(Debug, Clone)]
pub enum Event {
    TaskRenamed { old: String, new: String },
    TaskRescheduled { title: String, due: NaiveDate },
    TaskCompleted { title: String },
    TaskDeleted { title: String },
    CategoryRenamed { old: String, new: String },
    CategoryDeleted { name: String },
    PriorityRenamed { old: String, new: String },
    PriorityDeleted { name: String },
}

/// Apply a batch of events and everything they cascade into.
pub fn apply(ws: &mut Workspace, events: Vec<Event>) {
    let mut queue: VecDeque<Event> = events.into();
    while let Some(event) = queue.pop_front() {
        debug!(?event, "applying cascade");
        match event {
            Event::TaskRenamed { old, new } => {
                reminders::rename_for_task(&mut ws.reminders, &old, &new);
            }
            Event::TaskRescheduled { title, due } => {
                reminders::reschedule_for_task(&mut ws.reminders, &title, due);
            }
            Event::TaskCompleted { title } => {
                reminders::delete_for_task(&mut ws.reminders, &title);
            }
            Event::TaskDeleted { title } => {
                reminders::delete_for_task(&mut ws.reminders, &title);
            }
            Event::CategoryRenamed { old, new } => {
                tasks::reassign_category(&mut ws.tasks, &old, &new);
            }
            Event::CategoryDeleted { name } => {
                for title in tasks::remove_by_category(&mut ws.tasks, &name) {
                    queue.push_back(Event::TaskDeleted { title });
                }
            }
            Event::PriorityRenamed { old, new } => {
                tasks::reassign_priority(&mut ws.tasks, &old, &new);
            }
            Event::PriorityDeleted { name } => {
                tasks::reassign_priority(&mut ws.tasks, &name, DEFAULT);
            }
        }
    }
}
