//! REST API Routes Module
//!
//! Route handlers organized by entity, plus:
//! - Health check endpoint
//! - WebSocket subscription endpoint
//! - OpenAPI document endpoint
//! - CORS support for browser-based dashboards

pub mod agent;
pub mod health;
pub mod proposal;
pub mod research;
pub mod status;
pub mod task;

use axum::{
    http::{header, HeaderValue, Method},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::openapi::ApiDoc;
use crate::state::AppState;
use crate::ws;

/// Handler for /openapi.json endpoint.
async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

/// Build the CORS layer from configuration. An empty origin list is dev mode
/// and allows any origin.
fn cors_layer(config: &ApiConfig) -> ApiResult<CorsLayer> {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    if config.cors_origins.is_empty() {
        return Ok(layer.allow_origin(Any));
    }

    let mut origins = Vec::with_capacity(config.cors_origins.len());
    for origin in &config.cors_origins {
        let value = origin.parse::<HeaderValue>().map_err(|_| {
            ApiError::invalid_input(format!("Invalid CORS origin: {}", origin))
        })?;
        origins.push(value);
    }
    Ok(layer.allow_origin(AllowOrigin::list(origins)))
}

/// Assemble the full application router: REST gateway, WebSocket
/// subscription endpoint, health, and the OpenAPI document.
pub fn create_api_router(state: AppState, config: &ApiConfig) -> ApiResult<Router> {
    let api = Router::new()
        .merge(status::create_router(state.clone()))
        .merge(agent::create_router(state.clone()))
        .merge(task::create_router(state.clone()))
        .merge(research::create_router(state.clone()))
        .merge(proposal::create_router(state.clone()));

    let router = Router::new()
        .nest("/api", api)
        .route("/ws", get(ws::ws_handler).with_state(state.clone()))
        .merge(health::create_router(state))
        .route("/openapi.json", get(openapi_json))
        .layer(cors_layer(config)?)
        .layer(TraceLayer::new_for_http());

    Ok(router)
}
