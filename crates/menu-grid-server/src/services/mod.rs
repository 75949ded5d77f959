pub mod event_bus;
pub mod menu_service;
pub mod navigation;

pub use event_bus::{MenuEvent, MenuEventBus};
pub use menu_service::MenuService;
pub use navigation::NavigationView;
