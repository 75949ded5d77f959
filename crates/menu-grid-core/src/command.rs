// ============================================================================
// Menu Grid Core - Store Commands
// File: crates/menu-grid-core/src/command.rs
// Description: Whole-list mutations applied to the stored menu
// ============================================================================

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::DomainError;
use crate::layout::{MAX_COLS, MAX_ROWS};
use crate::model::MenuEntry;

/// One write against the store. Every variant produces the full new list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "data", rename_all = "snake_case")]
pub enum MenuCommand {
    /// Replace the whole list
    Replace(Vec<MenuEntry>),
    /// Replace the record with the same `menuId`, in place
    Merge(MenuEntry),
    /// Remove the record with this `menuId`
    Delete(String),
}

impl MenuCommand {
    pub fn name(&self) -> &'static str {
        match self {
            MenuCommand::Replace(_) => "replace",
            MenuCommand::Merge(_) => "merge",
            MenuCommand::Delete(_) => "delete",
        }
    }

    pub fn apply(self, current: Vec<MenuEntry>) -> Result<Vec<MenuEntry>, DomainError> {
        match self {
            MenuCommand::Replace(entries) => {
                entries.iter().try_for_each(check_placement)?;
                debug!("Replacing menu list ({} -> {} entries)", current.len(), entries.len());
                Ok(entries)
            }
            MenuCommand::Merge(entry) => {
                check_placement(&entry)?;
                if !current.iter().any(|e| e.menu_id == entry.menu_id) {
                    warn!("Merge for unknown menu {}, list left unchanged", entry.menu_id);
                    return Ok(current);
                }
                Ok(current
                    .into_iter()
                    .map(|e| if e.menu_id == entry.menu_id { entry.clone() } else { e })
                    .collect())
            }
            MenuCommand::Delete(menu_id) => {
                let before = current.len();
                let remaining: Vec<MenuEntry> =
                    current.into_iter().filter(|e| e.menu_id != menu_id).collect();
                if remaining.len() == before {
                    return Err(DomainError::NotFound(menu_id));
                }
                Ok(remaining)
            }
        }
    }
}

/// A stored placement must fit the layout engine's bounds.
fn check_placement(entry: &MenuEntry) -> Result<(), DomainError> {
    let Some(grid) = &entry.grid else {
        return Ok(());
    };
    if grid.cols > MAX_COLS {
        return Err(DomainError::InvalidPayload(format!(
            "menu {}: cols {} exceeds {}",
            entry.menu_id, grid.cols, MAX_COLS
        )));
    }
    if grid.y.saturating_add(grid.h) > MAX_ROWS {
        return Err(DomainError::InvalidPayload(format!(
            "menu {}: placement ends past row {}",
            entry.menu_id, MAX_ROWS
        )));
    }
    Ok(())
}

/// Bodies accepted by the save endpoint. Checked in declaration order.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SaveBody {
    Command(MenuCommand),
    Merge { menu: MenuEntry },
    Replace(Vec<MenuEntry>),
    Single(MenuEntry),
}

impl SaveBody {
    pub fn from_value(value: serde_json::Value) -> Result<Self, DomainError> {
        serde_json::from_value(value)
            .map_err(|_| DomainError::InvalidPayload("body is not a menu list, entry or command".into()))
    }
}

impl From<SaveBody> for MenuCommand {
    fn from(body: SaveBody) -> Self {
        match body {
            SaveBody::Command(command) => command,
            SaveBody::Merge { menu } => MenuCommand::Merge(menu),
            SaveBody::Replace(entries) => MenuCommand::Replace(entries),
            SaveBody::Single(entry) => MenuCommand::Replace(vec![entry]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GridPlacement;
    use serde_json::json;

    fn named(id: &str, name: &str) -> MenuEntry {
        let mut entry = MenuEntry::new(id);
        entry.menu_name = name.to_string();
        entry
    }

    fn store() -> Vec<MenuEntry> {
        vec![named("a", "A"), named("x", "X"), named("b", "B")]
    }

    #[test]
    fn test_merge_replaces_only_matching_record() {
        let result = MenuCommand::Merge(named("x", "X2")).apply(store()).unwrap();
        assert_eq!(result, vec![named("a", "A"), named("x", "X2"), named("b", "B")]);
    }

    #[test]
    fn test_merge_unknown_id_leaves_list() {
        let result = MenuCommand::Merge(named("zz", "Z")).apply(store()).unwrap();
        assert_eq!(result, store());
    }

    #[test]
    fn test_delete_removes_exactly_one() {
        let result = MenuCommand::Delete("x".into()).apply(store()).unwrap();
        assert_eq!(result, vec![named("a", "A"), named("b", "B")]);
    }

    #[test]
    fn test_delete_unknown_id_is_not_found() {
        let err = MenuCommand::Delete("nope".into()).apply(store()).unwrap_err();
        assert!(matches!(err, DomainError::NotFound(id) if id == "nope"));
    }

    #[test]
    fn test_out_of_range_placements_are_rejected() {
        let mut deep = named("deep", "Deep");
        deep.grid = Some(GridPlacement::default_for("deep", u32::MAX, 6, 0));
        let err = MenuCommand::Replace(vec![named("a", "A"), deep]).apply(vec![]).unwrap_err();
        assert!(matches!(err, DomainError::InvalidPayload(_)));

        let mut wide = named("x", "X");
        wide.grid = Some(GridPlacement::default_for("x", 0, 100_000, 0));
        let err = MenuCommand::Merge(wide).apply(store()).unwrap_err();
        assert!(matches!(err, DomainError::InvalidPayload(_)));
    }

    #[test]
    fn test_last_row_is_accepted() {
        let mut bottom = named("bottom", "Bottom");
        bottom.grid = Some(GridPlacement::default_for("bottom", MAX_ROWS - 1, MAX_COLS, 0));
        assert!(MenuCommand::Replace(vec![bottom]).apply(vec![]).is_ok());
    }

    #[test]
    fn test_save_body_shapes() {
        let merge = SaveBody::from_value(json!({ "menu": { "menuId": "x" } })).unwrap();
        assert!(matches!(MenuCommand::from(merge), MenuCommand::Merge(e) if e.menu_id == "x"));

        let list = SaveBody::from_value(json!([{ "menuId": "a" }, { "menuId": "b" }])).unwrap();
        assert!(matches!(MenuCommand::from(list), MenuCommand::Replace(v) if v.len() == 2));

        let single = SaveBody::from_value(json!({ "menuId": "solo" })).unwrap();
        assert!(matches!(MenuCommand::from(single), MenuCommand::Replace(v) if v[0].menu_id == "solo"));

        let delete = SaveBody::from_value(json!({ "op": "delete", "data": "x" })).unwrap();
        assert_eq!(MenuCommand::from(delete), MenuCommand::Delete("x".into()));
    }

    #[test]
    fn test_save_body_rejects_other_shapes() {
        assert!(SaveBody::from_value(json!({ "hello": "world" })).is_err());
        assert!(SaveBody::from_value(json!(42)).is_err());
    }
}
