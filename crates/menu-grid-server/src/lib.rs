//! # Menu Grid Server
//!
//! HTTP surface for the navigation menu store: the JSON menu API, the
//! change stream, and the rendered public navigation.

pub mod config;
pub mod handlers;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
pub mod telemetry;
pub mod utils;
pub mod views;

pub use routes::build_router;
pub use state::AppState;
