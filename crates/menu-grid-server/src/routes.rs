use axum::{
    routing::{delete, get},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    // Public routes
    let public_routes = Router::new()
        .route("/", get(handlers::render::navigation_page))
        .route("/health", get(handlers::health::health_check))
        .route("/health/ready", get(handlers::health::readiness_check));

    // Menu store API
    let api_routes = Router::new()
        .route(
            "/api/menu",
            get(handlers::menu::get_menu).post(handlers::menu::save_menu),
        )
        .route("/api/menu/layout", get(handlers::menu::get_layout))
        .route("/api/menu/settings", get(handlers::menu::get_editor_defaults))
        .route("/api/menu/events", get(handlers::menu::menu_events))
        .route("/api/menu/{menu_id}", delete(handlers::menu::delete_menu));

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .with_state(state)
        // CORS
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        // Tracing
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
}
