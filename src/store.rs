//! Persistence gateway and the in-memory workspace it loads.
//!
//! The four collections live in independent JSON files under one data
//! directory. Every read pulls a whole collection, every write replaces it
//! via a temp file + rename. There is no partial update protocol: a crash
//! between read and write loses only the in-flight edit.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::categories::GENERAL;
use crate::error::Result;
use crate::priorities::DEFAULT;
use crate::reminder::Reminder;
use crate::task::Task;

/// All collections, held in memory between one load and the next save.
///
/// State is always passed explicitly; nothing in the crate keeps a global
/// copy of it.
#[derive(Debug, Clone)]
pub struct Workspace {
    pub tasks: Vec<Task>,
    pub reminders: Vec<Reminder>,
    pub categories: Vec<String>,
    pub priorities: Vec<String>,
}

impl Default for Workspace {
    fn default() -> Self {
        Workspace {
            tasks: Vec::new(),
            reminders: Vec::new(),
            categories: vec![GENERAL.to_string()],
            priorities: vec![DEFAULT.to_string()],
        }
    }
}

impl Workspace {
    pub fn has_category(&self, name: &str) -> bool {
        self.canonical_category(name).is_some()
    }

    pub fn has_priority(&self, name: &str) -> bool {
        self.canonical_priority(name).is_some()
    }

    /// The registered spelling of a category name, looked up
    /// case-insensitively.
    pub fn canonical_category(&self, name: &str) -> Option<&str> {
        self.categories
            .iter()
            .find(|c| c.to_lowercase() == name.to_lowercase())
            .map(String::as_str)
    }

    /// The registered spelling of a priority name, looked up
    /// case-insensitively.
    pub fn canonical_priority(&self, name: &str) -> Option<&str> {
        self.priorities
            .iter()
            .find(|p| p.to_lowercase() == name.to_lowercase())
            .map(String::as_str)
    }
}

/// File-backed storage for the four collections.
#[derive(Debug, Clone)]
pub struct Storage {
    dir: PathBuf,
}

impl Storage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Storage { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    /// Read a whole collection, treating a missing file as empty.
    fn read_collection<T: DeserializeOwned>(&self, file: &str) -> Result<Vec<T>> {
        let path = self.path(file);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let mut buf = String::new();
        File::open(&path)?.read_to_string(&mut buf)?;
        if buf.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&buf)?)
    }

    /// Replace a whole collection on disk. Atomic-ish write via temp + rename.
    fn write_collection<T: Serialize>(&self, file: &str, items: &[T]) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path(file);
        let tmp = path.with_extension("json.tmp");
        let data = serde_json::to_string_pretty(items)?;
        let mut f = File::create(&tmp)?;
        f.write_all(data.as_bytes())?;
        f.flush()?;
        fs::rename(tmp, &path)?;
        debug!(file, count = items.len(), "collection written");
        Ok(())
    }

    pub fn load_tasks(&self) -> Result<Vec<Task>> {
        self.read_collection("tasks.json")
    }

    pub fn save_tasks(&self, tasks: &[Task]) -> Result<()> {
        self.write_collection("tasks.json", tasks)
    }

    pub fn load_reminders(&self) -> Result<Vec<Reminder>> {
        self.read_collection("reminders.json")
    }

    pub fn save_reminders(&self, reminders: &[Reminder]) -> Result<()> {
        self.write_collection("reminders.json", reminders)
    }

    pub fn load_categories(&self) -> Result<Vec<String>> {
        self.read_collection("categories.json")
    }

    pub fn save_categories(&self, categories: &[String]) -> Result<()> {
        self.write_collection("categories.json", categories)
    }

    pub fn load_priorities(&self) -> Result<Vec<String>> {
        self.read_collection("priorities.json")
    }

    pub fn save_priorities(&self, priorities: &[String]) -> Result<()> {
        self.write_collection("priorities.json", priorities)
    }

    /// Load every collection, injecting the protected registry defaults.
    pub fn load(&self) -> Result<Workspace> {
        let mut ws = Workspace {
            tasks: self.load_tasks()?,
            reminders: self.load_reminders()?,
            categories: self.load_categories()?,
            priorities: self.load_priorities()?,
        };
        if !ws.has_category(GENERAL) {
            ws.categories.insert(0, GENERAL.to_string());
        }
        if !ws.has_priority(DEFAULT) {
            ws.priorities.insert(0, DEFAULT.to_string());
        }
        debug!(
            tasks = ws.tasks.len(),
            reminders = ws.reminders.len(),
            categories = ws.categories.len(),
            priorities = ws.priorities.len(),
            "workspace loaded"
        );
        Ok(ws)
    }

    /// Write every collection back.
    pub fn save(&self, ws: &Workspace) -> Result<()> {
        self.save_tasks(&ws.tasks)?;
        self.save_reminders(&ws.reminders)?;
        self.save_categories(&ws.categories)?;
        self.save_priorities(&ws.priorities)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use tempfile::tempdir;

    use super::*;
    use crate::fields::{ReminderKind, Status};

    fn task(title: &str) -> Task {
        Task {
            title: title.into(),
            description: String::new(),
            category: GENERAL.into(),
            priority: DEFAULT.into(),
            due_date: NaiveDate::from_ymd_opt(2030, 1, 15).unwrap(),
            status: Status::Open,
        }
    }

    #[test]
    fn missing_files_load_as_defaults() {
        let dir = tempdir().unwrap();
        let ws = Storage::new(dir.path()).load().unwrap();
        assert!(ws.tasks.is_empty());
        assert!(ws.reminders.is_empty());
        assert_eq!(ws.categories, vec![GENERAL.to_string()]);
        assert_eq!(ws.priorities, vec![DEFAULT.to_string()]);
    }

    #[test]
    fn round_trips_all_collections() {
        let dir = tempdir().unwrap();
        let storage = Storage::new(dir.path());
        let mut ws = Workspace::default();
        ws.tasks.push(task("Report"));
        ws.reminders.push(Reminder {
            task_title: "Report".into(),
            date: NaiveDate::from_ymd_opt(2030, 1, 14).unwrap(),
            message: "due soon".into(),
            kind: ReminderKind::OneDayBefore,
        });
        ws.categories.push("Work".into());
        storage.save(&ws).unwrap();

        let back = storage.load().unwrap();
        assert_eq!(back.tasks.len(), 1);
        assert_eq!(back.tasks[0].title, "Report");
        assert_eq!(back.reminders.len(), 1);
        assert_eq!(back.categories, vec!["General".to_string(), "Work".to_string()]);
    }

    #[test]
    fn due_date_is_stored_in_fixed_pattern() {
        let dir = tempdir().unwrap();
        let storage = Storage::new(dir.path());
        storage.save_tasks(&[task("Report")]).unwrap();
        let raw = fs::read_to_string(dir.path().join("tasks.json")).unwrap();
        assert!(raw.contains("\"dueDate\": \"15/01/2030\""));
    }

    #[test]
    fn unknown_fields_are_ignored_on_read() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("tasks.json"),
            r#"[{"title":"Report","description":"","category":"General",
                 "priority":"Default","dueDate":"15/01/2030","status":"Open",
                 "colour":"red"}]"#,
        )
        .unwrap();
        let tasks = Storage::new(dir.path()).load_tasks().unwrap();
        assert_eq!(tasks.len(), 1);
    }

    #[test]
    fn legacy_enum_spellings_are_accepted() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("reminders.json"),
            r#"[{"taskTitle":"Report","date":"14/01/2030","message":"",
                 "reminderType":"One day before deadline"}]"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("tasks.json"),
            r#"[{"title":"Report","description":"","category":"General",
                 "priority":"Default","dueDate":"15/01/2030","status":"In Progress"}]"#,
        )
        .unwrap();
        let storage = Storage::new(dir.path());
        assert_eq!(storage.load_reminders().unwrap()[0].kind, ReminderKind::OneDayBefore);
        assert_eq!(storage.load_tasks().unwrap()[0].status, Status::InProgress);
    }

    #[test]
    fn malformed_file_surfaces_an_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("tasks.json"), "not json").unwrap();
        assert!(Storage::new(dir.path()).load_tasks().is_err());
    }
}
