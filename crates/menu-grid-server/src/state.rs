use axum::extract::FromRef;
use menu_grid_core::MenuRepository;
use std::sync::Arc;

use crate::config::Settings;
use crate::services::{MenuEventBus, MenuService, NavigationView};
use crate::views::NavRenderer;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub repository: Arc<dyn MenuRepository>,
    pub menu_service: Arc<MenuService>,
    pub navigation: Arc<NavigationView>,
    pub event_bus: Arc<MenuEventBus>,
    pub renderer: Arc<NavRenderer>,
}

impl AppState {
    /// Wire services around one repository. The navigation listener is
    /// started here, so this must run inside a tokio runtime.
    pub async fn build(settings: Settings, repository: Arc<dyn MenuRepository>) -> anyhow::Result<Self> {
        let event_bus = Arc::new(MenuEventBus::new(settings.events.capacity));
        let menu_service = Arc::new(MenuService::new(repository.clone(), event_bus.clone()));

        let navigation = Arc::new(
            NavigationView::prime(repository.as_ref(), settings.grid.default_cols).await,
        );
        navigation.listen(&event_bus);

        let renderer = Arc::new(NavRenderer::new()?);

        Ok(Self {
            settings: Arc::new(settings),
            repository,
            menu_service,
            navigation,
            event_bus,
            renderer,
        })
    }
}

impl FromRef<AppState> for Arc<Settings> {
    fn from_ref(state: &AppState) -> Self {
        state.settings.clone()
    }
}

impl FromRef<AppState> for Arc<dyn MenuRepository> {
    fn from_ref(state: &AppState) -> Self {
        state.repository.clone()
    }
}

impl FromRef<AppState> for Arc<MenuService> {
    fn from_ref(state: &AppState) -> Self {
        state.menu_service.clone()
    }
}

impl FromRef<AppState> for Arc<NavigationView> {
    fn from_ref(state: &AppState) -> Self {
        state.navigation.clone()
    }
}

impl FromRef<AppState> for Arc<MenuEventBus> {
    fn from_ref(state: &AppState) -> Self {
        state.event_bus.clone()
    }
}

impl FromRef<AppState> for Arc<NavRenderer> {
    fn from_ref(state: &AppState) -> Self {
        state.renderer.clone()
    }
}
