//! File-backed task tracker with categories, priorities and date-driven
//! reminders, stored as flat JSON collections for a single local user.
//!
//! The core of the crate is the referential model: tasks reference
//! categories and priorities by name, reminders reference tasks by title,
//! and every rename, reschedule, completion or deletion cascades so the
//! collections stay mutually consistent. Cascades travel as explicit
//! [`cascade::Event`] values through a single coordinator.
//!
//! State is explicit: operations take a loaded [`store::Workspace`], mutate
//! it, and the caller persists through [`store::Storage`]. Every mutation is
//! "read all, change, write all" — there is no caching layer and no partial
//! update.

pub mod cascade;
pub mod categories;
pub mod cli;
pub mod cmd;
pub mod dates;
pub mod error;
pub mod fields;
pub mod priorities;
pub mod reminder;
pub mod reminders;
pub mod store;
pub mod task;
pub mod tasks;

#[cfg(test)]
mod testutil;
