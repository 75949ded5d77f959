use menu_grid_core::MenuEntry;
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{debug, warn};

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "payload")]
#[serde(rename_all = "snake_case")]
pub enum MenuEvent {
    /// The stored list changed; carries the full new list
    MenuUpdated {
        #[serde(rename = "updatedMenuItems")]
        updated_menu_items: Vec<MenuEntry>,
    },
}

impl MenuEvent {
    pub fn name(&self) -> &'static str {
        match self {
            MenuEvent::MenuUpdated { .. } => "menu_updated",
        }
    }
}

/// In-process broadcast of store changes to open render views
pub struct MenuEventBus {
    tx: broadcast::Sender<MenuEvent>,
}

impl MenuEventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn publish(&self, event: MenuEvent) {
        match self.tx.send(event) {
            Ok(receivers) => debug!("Published menu event to {} subscribers", receivers),
            Err(e) => warn!("Failed to publish menu event (maybe no subscribers): {}", e),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<MenuEvent> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscribers_receive_full_list() {
        let bus = MenuEventBus::new(8);
        let mut rx = bus.subscribe();

        bus.publish(MenuEvent::MenuUpdated {
            updated_menu_items: vec![MenuEntry::new("a")],
        });

        let MenuEvent::MenuUpdated { updated_menu_items } = rx.recv().await.unwrap();
        assert_eq!(updated_menu_items[0].menu_id, "a");
    }

    #[test]
    fn test_publish_without_subscribers_is_ignored() {
        let bus = MenuEventBus::new(8);
        bus.publish(MenuEvent::MenuUpdated { updated_menu_items: vec![] });
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn test_event_wire_shape() {
        let event = MenuEvent::MenuUpdated {
            updated_menu_items: vec![MenuEntry::new("a")],
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "menu_updated");
        assert_eq!(value["payload"]["updatedMenuItems"][0]["menuId"], "a");
    }
}
