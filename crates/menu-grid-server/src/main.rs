use anyhow::Result;
use menu_grid_core::MenuRepository;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};

use menu_grid_server::config::Settings;
use menu_grid_server::store::JsonFileStore;
use menu_grid_server::telemetry::init_telemetry;
use menu_grid_server::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let settings = Settings::load()?;

    // Initialize logging; the guard flushes the file writer on exit
    let _log_guard = init_telemetry(&settings.logging);

    info!("🚀 Starting Menu Grid Server...");
    info!("✅ Configuration loaded");

    // Initialize store
    let store = JsonFileStore::new(settings.store_path());
    if settings.store.create_if_missing {
        if store.ensure_exists().await? {
            info!("✅ Created empty menu store at {}", store.path().display());
        }
    } else if !store.path().exists() {
        warn!("Menu store {} does not exist yet", store.path().display());
    }
    let repository: Arc<dyn MenuRepository> = Arc::new(store);

    // Initialize services
    let state = AppState::build(settings.clone(), repository).await?;
    info!("✅ Services initialized");

    let app = build_router(state);

    // Server address
    let addr = SocketAddr::from((
        settings.server.host.parse::<std::net::IpAddr>()?,
        settings.server.port,
    ));

    info!("🎯 Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
    }
}
