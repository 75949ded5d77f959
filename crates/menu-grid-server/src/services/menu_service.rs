use menu_grid_core::{DomainError, MenuCommand, MenuEntry, MenuRepository};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use super::event_bus::{MenuEvent, MenuEventBus};

/// Applies store commands and announces the result.
pub struct MenuService {
    repository: Arc<dyn MenuRepository>,
    event_bus: Arc<MenuEventBus>,
    // Serializes read-modify-write cycles inside this process only
    write_lock: Mutex<()>,
}

impl MenuService {
    pub fn new(repository: Arc<dyn MenuRepository>, event_bus: Arc<MenuEventBus>) -> Self {
        Self {
            repository,
            event_bus,
            write_lock: Mutex::new(()),
        }
    }

    pub async fn list(&self) -> Result<Vec<MenuEntry>, DomainError> {
        self.repository.load().await
    }

    /// Load, apply, write back the whole list, then publish it. Nothing is
    /// published when any step fails.
    pub async fn apply(&self, command: MenuCommand) -> Result<Vec<MenuEntry>, DomainError> {
        let _guard = self.write_lock.lock().await;
        let op = command.name();

        let current = match &command {
            // Replace does not depend on what is stored
            MenuCommand::Replace(_) => Vec::new(),
            _ => self.repository.load().await?,
        };

        let updated = command.apply(current)?;
        self.repository.save(&updated).await?;

        info!("Menu {} applied, {} entries stored", op, updated.len());

        self.event_bus.publish(MenuEvent::MenuUpdated {
            updated_menu_items: updated.clone(),
        });

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mockall::mock;

    mock! {
        pub Repo {}

        #[async_trait]
        impl MenuRepository for Repo {
            async fn load(&self) -> Result<Vec<MenuEntry>, DomainError>;
            async fn save(&self, entries: &[MenuEntry]) -> Result<(), DomainError>;
        }
    }

    fn named(id: &str, name: &str) -> MenuEntry {
        let mut entry = MenuEntry::new(id);
        entry.menu_name = name.to_string();
        entry
    }

    #[tokio::test]
    async fn test_merge_saves_and_publishes() {
        let mut repo = MockRepo::new();
        repo.expect_load()
            .returning(|| Ok(vec![named("a", "A"), named("x", "X"), named("b", "B")]));
        repo.expect_save()
            .withf(|entries| entries.len() == 3 && entries[1].menu_name == "X2")
            .times(1)
            .returning(|_| Ok(()));

        let bus = Arc::new(MenuEventBus::new(4));
        let mut rx = bus.subscribe();
        let service = MenuService::new(Arc::new(repo), bus);

        let result = service.apply(MenuCommand::Merge(named("x", "X2"))).await.unwrap();
        assert_eq!(result[0].menu_name, "A");
        assert_eq!(result[2].menu_name, "B");

        let MenuEvent::MenuUpdated { updated_menu_items } = rx.recv().await.unwrap();
        assert_eq!(updated_menu_items, result);
    }

    #[tokio::test]
    async fn test_replace_does_not_read_store() {
        let mut repo = MockRepo::new();
        repo.expect_load().never();
        repo.expect_save().times(1).returning(|_| Ok(()));

        let service = MenuService::new(Arc::new(repo), Arc::new(MenuEventBus::new(4)));
        let result = service
            .apply(MenuCommand::Replace(vec![named("only", "Only")]))
            .await
            .unwrap();
        assert_eq!(result.len(), 1);
    }

    #[tokio::test]
    async fn test_list_without_entry_removes_it_and_publishes() {
        let mut repo = MockRepo::new();
        repo.expect_save()
            .withf(|entries| entries.iter().all(|e| e.menu_id != "x"))
            .times(1)
            .returning(|_| Ok(()));

        let bus = Arc::new(MenuEventBus::new(4));
        let mut rx = bus.subscribe();
        let service = MenuService::new(Arc::new(repo), bus);

        service
            .apply(MenuCommand::Replace(vec![named("a", "A"), named("b", "B")]))
            .await
            .unwrap();

        let MenuEvent::MenuUpdated { updated_menu_items } = rx.recv().await.unwrap();
        let ids: Vec<&str> = updated_menu_items.iter().map(|e| e.menu_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_failed_write_publishes_nothing() {
        let mut repo = MockRepo::new();
        repo.expect_load().returning(|| Ok(vec![named("x", "X")]));
        repo.expect_save()
            .returning(|_| Err(DomainError::StoreWrite("disk full".into())));

        let bus = Arc::new(MenuEventBus::new(4));
        let mut rx = bus.subscribe();
        let service = MenuService::new(Arc::new(repo), bus);

        let err = service.apply(MenuCommand::Delete("x".into())).await.unwrap_err();
        assert!(matches!(err, DomainError::StoreWrite(_)));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_delete_unknown_id_skips_write() {
        let mut repo = MockRepo::new();
        repo.expect_load().returning(|| Ok(vec![named("x", "X")]));
        repo.expect_save().never();

        let service = MenuService::new(Arc::new(repo), Arc::new(MenuEventBus::new(4)));
        let err = service.apply(MenuCommand::Delete("y".into())).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }
}
