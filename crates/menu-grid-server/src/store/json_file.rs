// ============================================================================
// Menu Grid Server - JSON File Store
// File: crates/menu-grid-server/src/store/json_file.rs
// Description: Whole-document menu store on a single pretty-printed JSON file
// ============================================================================

use async_trait::async_trait;
use menu_grid_core::{DomainError, MenuEntry, MenuRepository};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Reads and writes the full menu list. Writes go straight to the target
/// file, so a crash mid-write can leave it truncated.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the document with an empty list if it does not exist yet.
    /// Returns true when a file was created.
    pub async fn ensure_exists(&self) -> Result<bool, DomainError> {
        if fs::try_exists(&self.path)
            .await
            .map_err(|e| DomainError::StoreRead(format!("{}: {}", self.path.display(), e)))?
        {
            return Ok(false);
        }

        info!("Menu store {} missing, creating empty list", self.path.display());
        self.save(&[]).await?;
        Ok(true)
    }
}

#[async_trait]
impl MenuRepository for JsonFileStore {
    async fn load(&self) -> Result<Vec<MenuEntry>, DomainError> {
        let raw = fs::read_to_string(&self.path)
            .await
            .map_err(|e| DomainError::StoreRead(format!("{}: {}", self.path.display(), e)))?;

        let entries: Vec<MenuEntry> = serde_json::from_str(&raw)?;
        debug!("Loaded {} menu entries from {}", entries.len(), self.path.display());
        Ok(entries)
    }

    async fn save(&self, entries: &[MenuEntry]) -> Result<(), DomainError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| DomainError::StoreWrite(format!("{}: {}", parent.display(), e)))?;
        }

        let body = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, body)
            .await
            .map_err(|e| DomainError::StoreWrite(format!("{}: {}", self.path.display(), e)))?;

        debug!("Wrote {} menu entries to {}", entries.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn entry(id: &str) -> MenuEntry {
        let mut entry = MenuEntry::new(id);
        entry.menu_name = format!("Menu {}", id);
        entry
    }

    #[tokio::test]
    async fn test_save_then_load_keeps_order() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("data.json"));

        store.save(&[entry("b"), entry("a")]).await.unwrap();
        let loaded = store.load().await.unwrap();

        let ids: Vec<&str> = loaded.iter().map(|e| e.menu_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[tokio::test]
    async fn test_file_is_pretty_printed_array() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested/data.json"));

        store.save(&[entry("a")]).await.unwrap();
        let raw = std::fs::read_to_string(store.path()).unwrap();

        assert!(raw.starts_with("[\n  {"));
        assert!(raw.contains("\"menuId\": \"a\""));
    }

    #[tokio::test]
    async fn test_missing_file_is_read_error() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("absent.json"));
        assert!(matches!(store.load().await, Err(DomainError::StoreRead(_))));
    }

    #[tokio::test]
    async fn test_corrupt_file_is_serialization_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, "[{\"menuId\": ").unwrap();

        let store = JsonFileStore::new(path);
        assert!(matches!(store.load().await, Err(DomainError::Serialization(_))));
    }

    #[tokio::test]
    async fn test_ensure_exists_creates_once() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("data.json"));

        assert!(store.ensure_exists().await.unwrap());
        assert!(!store.ensure_exists().await.unwrap());
        assert!(store.load().await.unwrap().is_empty());
    }
}
