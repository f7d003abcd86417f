//! Priority Registry.
//!
//! Same shape as the Category Registry with one difference in the delete
//! cascade: tasks holding a deleted priority are reassigned to "Default"
//! rather than deleted.

use tracing::debug;

use crate::cascade::{self, Event};
use crate::error::{Error, Result};
use crate::store::Workspace;

/// The protected priority every workspace carries.
pub const DEFAULT: &str = "Default";

fn position(ws: &Workspace, name: &str) -> Option<usize> {
    ws.priorities
        .iter()
        .position(|p| p.to_lowercase() == name.to_lowercase())
}

fn validate_new_name(ws: &Workspace, name: &str, keep: Option<usize>) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::validation("priority name cannot be empty"));
    }
    let clash = ws
        .priorities
        .iter()
        .enumerate()
        .any(|(i, p)| Some(i) != keep && p.to_lowercase() == name.to_lowercase());
    if clash {
        return Err(Error::validation(format!(
            "a priority named '{name}' already exists"
        )));
    }
    Ok(())
}

/// Register a new priority name.
pub fn add(ws: &mut Workspace, name: &str) -> Result<()> {
    let name = name.trim();
    validate_new_name(ws, name, None)?;
    ws.priorities.push(name.to_string());
    Ok(())
}

/// Rename a priority, retagging every task that referenced the old name.
pub fn rename(ws: &mut Workspace, old: &str, new: &str) -> Result<()> {
    let idx = position(ws, old).ok_or_else(|| Error::NotFound(format!("priority '{old}'")))?;
    if ws.priorities[idx].to_lowercase() == DEFAULT.to_lowercase() {
        return Err(Error::Protected(DEFAULT.to_string()));
    }
    let new = new.trim();
    validate_new_name(ws, new, Some(idx))?;
    let old_name = std::mem::replace(&mut ws.priorities[idx], new.to_string());
    debug!(%old_name, new_name = %new, "priority renamed");
    cascade::apply(
        ws,
        vec![Event::PriorityRenamed {
            old: old_name,
            new: new.to_string(),
        }],
    );
    Ok(())
}

/// Delete a priority. Affected tasks fall back to "Default".
pub fn delete(ws: &mut Workspace, name: &str) -> Result<()> {
    let idx = position(ws, name).ok_or_else(|| Error::NotFound(format!("priority '{name}'")))?;
    if ws.priorities[idx].to_lowercase() == DEFAULT.to_lowercase() {
        return Err(Error::Protected(DEFAULT.to_string()));
    }
    let removed = ws.priorities.remove(idx);
    cascade::apply(ws, vec![Event::PriorityDeleted { name: removed.clone() }]);
    debug!(name = %removed, "priority deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::ws_with_tasks;

    #[test]
    fn default_cannot_be_renamed_or_deleted() {
        let mut ws = ws_with_tasks(&[]);
        assert!(matches!(
            rename(&mut ws, "default", "P0"),
            Err(Error::Protected(_))
        ));
        assert!(matches!(delete(&mut ws, "Default"), Err(Error::Protected(_))));
        assert_eq!(ws.priorities, vec![DEFAULT.to_string()]);
    }

    #[test]
    fn delete_reassigns_tasks_instead_of_deleting_them() {
        let mut ws = ws_with_tasks(&["Report", "Memo"]);
        ws.priorities.push("High".into());
        ws.tasks[0].priority = "High".into();

        delete(&mut ws, "High").unwrap();

        assert_eq!(ws.tasks.len(), 2);
        assert_eq!(ws.tasks[0].priority, DEFAULT);
        assert_eq!(ws.tasks[1].priority, DEFAULT);
        assert!(!ws.priorities.iter().any(|p| p == "High"));
    }

    #[test]
    fn rename_cascades_into_tasks() {
        let mut ws = ws_with_tasks(&["Report"]);
        ws.priorities.push("High".into());
        ws.tasks[0].priority = "High".into();

        rename(&mut ws, "high", "Urgent").unwrap();

        assert_eq!(ws.tasks[0].priority, "Urgent");
        assert!(ws.priorities.iter().any(|p| p == "Urgent"));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut ws = ws_with_tasks(&[]);
        add(&mut ws, "High").unwrap();
        assert!(matches!(add(&mut ws, "HIGH"), Err(Error::Validation(_))));
    }
}
