use axum::{extract::State, response::Html};
use std::sync::Arc;

use crate::services::NavigationView;
use crate::utils::error::ApiError;
use crate::views::NavRenderer;

const PAGE_TITLE: &str = "Navigation";

/// Public navigation page, built from the cached list.
pub async fn navigation_page(
    State(navigation): State<Arc<NavigationView>>,
    State(renderer): State<Arc<NavRenderer>>,
) -> Result<Html<String>, ApiError> {
    let layout = navigation.layout().await;
    renderer
        .render(PAGE_TITLE, &layout)
        .map(Html)
        .map_err(|e| ApiError::InternalError(format!("render failed: {}", e)))
}
