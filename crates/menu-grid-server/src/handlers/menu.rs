use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use futures::stream::Stream;
use menu_grid_core::editor::{MAX_COLS, MIN_COLS};
use menu_grid_core::{MenuCommand, MenuEntry, NavigationLayout, SaveBody};
use serde::Serialize;
use serde_json::Value;
use std::convert::Infallible;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::services::{MenuEventBus, MenuService, NavigationView};
use crate::utils::error::ApiError;

/// Starting values for an editor session
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorDefaults {
    pub cols: u32,
    pub gap: u32,
    pub min_cols: u32,
    pub max_cols: u32,
    pub debounce_ms: u64,
}

pub async fn get_menu(
    State(service): State<Arc<MenuService>>,
) -> Result<Json<Vec<MenuEntry>>, ApiError> {
    let entries = service.list().await.map_err(ApiError::on_load)?;
    debug!("Serving {} menu entries", entries.len());
    Ok(Json(entries))
}

/// Accepts `{menu}` (merge), a list or single entry (replace), or an
/// explicit `{op, data}` command.
pub async fn save_menu(
    State(service): State<Arc<MenuService>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Vec<MenuEntry>>, ApiError> {
    let Json(value) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let command = MenuCommand::from(SaveBody::from_value(value).map_err(ApiError::on_save)?);
    info!("Saving menu ({})", command.name());

    let entries = service.apply(command).await.map_err(ApiError::on_save)?;
    Ok(Json(entries))
}

pub async fn delete_menu(
    State(service): State<Arc<MenuService>>,
    Path(menu_id): Path<String>,
) -> Result<Json<Vec<MenuEntry>>, ApiError> {
    info!("Deleting menu {}", menu_id);
    let entries = service
        .apply(MenuCommand::Delete(menu_id))
        .await
        .map_err(ApiError::on_save)?;
    Ok(Json(entries))
}

pub async fn get_editor_defaults(State(settings): State<Arc<Settings>>) -> Json<EditorDefaults> {
    let grid = settings.grid_settings();
    Json(EditorDefaults {
        cols: grid.cols.clamp(MIN_COLS, MAX_COLS),
        gap: grid.gap,
        min_cols: MIN_COLS,
        max_cols: MAX_COLS,
        debounce_ms: settings.grid.debounce_ms,
    })
}

pub async fn get_layout(State(navigation): State<Arc<NavigationView>>) -> Json<NavigationLayout> {
    Json(navigation.layout().await)
}

/// One `menu_updated` event per successful write, for as long as the client
/// stays connected.
pub async fn menu_events(
    State(event_bus): State<Arc<MenuEventBus>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let mut rx = event_bus.subscribe();
    debug!("Menu event subscriber connected");

    let stream = async_stream::stream! {
        loop {
            match rx.recv().await {
                Ok(event) => yield Ok(create_sse_event(event.name(), &event)),
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Menu event subscriber lagged, {} events skipped", skipped);
                }
                Err(RecvError::Closed) => break,
            }
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::default())
}

// Helper: Create SSE event
fn create_sse_event<T: serde::Serialize>(event_type: &str, data: &T) -> Event {
    Event::default()
        .event(event_type)
        .data(serde_json::to_string(data).unwrap_or_else(|_| "{}".to_string()))
}
