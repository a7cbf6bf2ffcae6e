//! Full-Document REST Route
//!
//! `GET /api/status` returns the complete shared document. Dashboards that
//! cannot hold a WebSocket open can still converge by re-fetching it.

use axum::{extract::State, response::IntoResponse, Json};

use crate::state::AppState;
use beacon_core::Document;

/// GET /api/status - Get the full shared document
#[utoipa::path(
    get,
    path = "/api/status",
    tag = "Status",
    responses(
        (status = 200, description = "The full shared document", body = Document),
    )
)]
pub async fn get_status(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.store.read().await)
}

/// Create the status route router.
pub fn create_router(state: AppState) -> axum::Router {
    axum::Router::new()
        .route("/status", axum::routing::get(get_status))
        .with_state(state)
}
