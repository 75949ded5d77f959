use menu_grid_core::{MenuEntry, MenuRepository, NavigationLayout};
use std::sync::Arc;
use tokio::sync::{broadcast::error::RecvError, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::event_bus::{MenuEvent, MenuEventBus};

/// Latest menu list as seen by the public navigation.
pub struct NavigationView {
    entries: RwLock<Vec<MenuEntry>>,
    default_cols: u32,
}

impl NavigationView {
    pub fn new(entries: Vec<MenuEntry>, default_cols: u32) -> Self {
        Self {
            entries: RwLock::new(entries),
            default_cols,
        }
    }

    /// Start from what is stored. An unreadable store leaves the view empty
    /// until the next update arrives.
    pub async fn prime(repository: &dyn MenuRepository, default_cols: u32) -> Self {
        let entries = match repository.load().await {
            Ok(entries) => {
                info!("Navigation primed with {} entries", entries.len());
                entries
            }
            Err(e) => {
                warn!("Navigation starts empty, store unreadable: {}", e);
                Vec::new()
            }
        };
        Self::new(entries, default_cols)
    }

    /// Follow store updates. Events carry the whole list, so nothing is
    /// re-fetched.
    pub fn listen(self: &Arc<Self>, event_bus: &MenuEventBus) -> JoinHandle<()> {
        let view = Arc::clone(self);
        let mut rx = event_bus.subscribe();

        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(MenuEvent::MenuUpdated { updated_menu_items }) => {
                        debug!("Navigation refreshed ({} entries)", updated_menu_items.len());
                        view.replace(updated_menu_items).await;
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!("Navigation listener lagged, {} updates skipped", skipped);
                    }
                    Err(RecvError::Closed) => {
                        debug!("Menu event bus closed, navigation listener stopping");
                        break;
                    }
                }
            }
        })
    }

    pub async fn replace(&self, entries: Vec<MenuEntry>) {
        *self.entries.write().await = entries;
    }

    pub async fn snapshot(&self) -> Vec<MenuEntry> {
        self.entries.read().await.clone()
    }

    pub async fn layout(&self) -> NavigationLayout {
        let entries = self.entries.read().await;
        NavigationLayout::project(&entries, self.default_cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use menu_grid_core::{DomainError, GridPlacement};
    use mockall::mock;

    mock! {
        pub Repo {}

        #[async_trait]
        impl MenuRepository for Repo {
            async fn load(&self) -> Result<Vec<MenuEntry>, DomainError>;
            async fn save(&self, entries: &[MenuEntry]) -> Result<(), DomainError>;
        }
    }

    fn placed(id: &str) -> MenuEntry {
        let mut entry = MenuEntry::new(id);
        entry.grid = Some(GridPlacement::default_for(id, 0, 4, 0));
        entry
    }

    #[tokio::test]
    async fn test_prime_from_store() {
        let mut repo = MockRepo::new();
        repo.expect_load().returning(|| Ok(vec![placed("home")]));

        let view = NavigationView::prime(&repo, 6).await;
        assert_eq!(view.snapshot().await.len(), 1);
        assert_eq!(view.layout().await.cols, 4);
    }

    #[tokio::test]
    async fn test_prime_with_broken_store_starts_empty() {
        let mut repo = MockRepo::new();
        repo.expect_load()
            .returning(|| Err(DomainError::StoreRead("gone".into())));

        let view = NavigationView::prime(&repo, 6).await;
        assert!(view.snapshot().await.is_empty());
        assert_eq!(view.layout().await.template_columns, "repeat(6, 1fr)");
    }

    #[tokio::test]
    async fn test_listener_applies_published_list() {
        let bus = MenuEventBus::new(4);
        let view = Arc::new(NavigationView::new(vec![placed("old")], 6));
        let handle = view.listen(&bus);

        bus.publish(MenuEvent::MenuUpdated {
            updated_menu_items: vec![placed("new_a"), placed("new_b")],
        });

        for _ in 0..100 {
            if view.snapshot().await.len() == 2 {
                break;
            }
            tokio::task::yield_now().await;
        }

        let ids: Vec<String> = view.snapshot().await.into_iter().map(|e| e.menu_id).collect();
        assert_eq!(ids, vec!["new_a", "new_b"]);

        drop(bus);
        handle.await.unwrap();
    }
}
