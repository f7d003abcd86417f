//! Category Registry.
//!
//! Owns the category name set. "General" is protected: it always exists and
//! can neither be renamed nor deleted. Renames and deletions reach tasks
//! (and, transitively, reminders) only through cascade events.

use tracing::debug;

use crate::cascade::{self, Event};
use crate::error::{Error, Result};
use crate::store::Workspace;

/// The protected category every workspace carries.
pub const GENERAL: &str = "General";

fn position(ws: &Workspace, name: &str) -> Option<usize> {
    ws.categories
        .iter()
        .position(|c| c.to_lowercase() == name.to_lowercase())
}

fn validate_new_name(ws: &Workspace, name: &str, keep: Option<usize>) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::validation("category name cannot be empty"));
    }
    let clash = ws
        .categories
        .iter()
        .enumerate()
        .any(|(i, c)| Some(i) != keep && c.to_lowercase() == name.to_lowercase());
    if clash {
        return Err(Error::validation(format!(
            "a category named '{name}' already exists"
        )));
    }
    Ok(())
}

/// Register a new category name.
pub fn add(ws: &mut Workspace, name: &str) -> Result<()> {
    let name = name.trim();
    validate_new_name(ws, name, None)?;
    ws.categories.push(name.to_string());
    Ok(())
}

/// Rename a category, retagging every task that referenced the old name.
pub fn rename(ws: &mut Workspace, old: &str, new: &str) -> Result<()> {
    let idx = position(ws, old).ok_or_else(|| Error::NotFound(format!("category '{old}'")))?;
    if ws.categories[idx].to_lowercase() == GENERAL.to_lowercase() {
        return Err(Error::Protected(GENERAL.to_string()));
    }
    let new = new.trim();
    validate_new_name(ws, new, Some(idx))?;
    let old_name = std::mem::replace(&mut ws.categories[idx], new.to_string());
    debug!(%old_name, new_name = %new, "category renamed");
    cascade::apply(
        ws,
        vec![Event::CategoryRenamed {
            old: old_name,
            new: new.to_string(),
        }],
    );
    Ok(())
}

/// Delete a category. Every task in it is deleted, each deletion cascading
/// into reminder cleanup, then the name itself is dropped.
pub fn delete(ws: &mut Workspace, name: &str) -> Result<()> {
    let idx = position(ws, name).ok_or_else(|| Error::NotFound(format!("category '{name}'")))?;
    if ws.categories[idx].to_lowercase() == GENERAL.to_lowercase() {
        return Err(Error::Protected(GENERAL.to_string()));
    }
    let removed = ws.categories[idx].clone();
    cascade::apply(ws, vec![Event::CategoryDeleted { name: removed.clone() }]);
    ws.categories.remove(idx);
    debug!(name = %removed, "category deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::ws_with_tasks;

    #[test]
    fn general_cannot_be_renamed_or_deleted() {
        let mut ws = ws_with_tasks(&[]);
        assert!(matches!(
            rename(&mut ws, "General", "Misc"),
            Err(Error::Protected(_))
        ));
        assert!(matches!(delete(&mut ws, "general"), Err(Error::Protected(_))));
        assert_eq!(ws.categories, vec![GENERAL.to_string()]);
    }

    #[test]
    fn add_rejects_empty_and_duplicates() {
        let mut ws = ws_with_tasks(&[]);
        assert!(matches!(add(&mut ws, "  "), Err(Error::Validation(_))));
        add(&mut ws, "Work").unwrap();
        assert!(matches!(add(&mut ws, "work"), Err(Error::Validation(_))));
    }

    #[test]
    fn rename_cascades_into_tasks() {
        let mut ws = ws_with_tasks(&["Report", "Memo"]);
        ws.categories.push("Work".into());
        ws.tasks[0].category = "Work".into();

        rename(&mut ws, "Work", "Office").unwrap();

        assert!(ws.categories.iter().any(|c| c == "Office"));
        assert_eq!(ws.tasks[0].category, "Office");
        assert_eq!(ws.tasks[1].category, GENERAL);
    }

    #[test]
    fn rename_to_existing_name_fails() {
        let mut ws = ws_with_tasks(&[]);
        add(&mut ws, "Work").unwrap();
        add(&mut ws, "Home").unwrap();
        assert!(matches!(
            rename(&mut ws, "Work", "home"),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn delete_removes_tasks_and_name() {
        let mut ws = ws_with_tasks(&["Report", "Memo"]);
        ws.categories.push("Work".into());
        ws.tasks[0].category = "Work".into();

        delete(&mut ws, "Work").unwrap();

        assert!(!ws.categories.iter().any(|c| c == "Work"));
        assert_eq!(ws.tasks.len(), 1);
        assert_eq!(ws.tasks[0].title, "Memo");
    }

    #[test]
    fn missing_names_are_not_found() {
        let mut ws = ws_with_tasks(&[]);
        assert!(matches!(
            rename(&mut ws, "Ghost", "X"),
            Err(Error::NotFound(_))
        ));
        assert!(matches!(delete(&mut ws, "Ghost"), Err(Error::NotFound(_))));
    }
}
