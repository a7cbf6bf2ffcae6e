//! BEACON API Server Entry Point
//!
//! Bootstraps configuration, opens the document store from its snapshot, and
//! starts the Axum HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use beacon_api::{create_api_router, ApiConfig, ApiError, ApiResult, AppState};
use beacon_storage::{FileSnapshotBackend, StatusStore};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ApiResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = ApiConfig::from_env();

    let backend = FileSnapshotBackend::new(config.snapshot_path.clone());
    tracing::info!(path = %config.snapshot_path.display(), "Opening document store");
    let store = Arc::new(StatusStore::open(backend, config.event_capacity).await);

    let state = AppState::new(store);
    let app: Router = create_api_router(state, &config)?;

    let addr = resolve_bind_addr(&config)?;
    tracing::info!(%addr, "Starting BEACON API server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ApiError::internal_error(format!("Failed to bind {}: {}", addr, e)))?;

    let server = axum::serve(listener, app);
    tokio::select! {
        result = server => {
            result.map_err(|e| ApiError::internal_error(format!("Server error: {}", e)))?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}

fn resolve_bind_addr(config: &ApiConfig) -> ApiResult<SocketAddr> {
    let addr = format!("{}:{}", config.bind_host, config.port);
    addr.parse::<SocketAddr>()
        .map_err(|e| ApiError::invalid_input(format!("Invalid bind address {}: {}", addr, e)))
}
