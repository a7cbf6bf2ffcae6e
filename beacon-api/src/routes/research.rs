//! Research REST API Routes

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
    types::CreateResearchRequest,
};
use beacon_core::ResearchItem;
use beacon_storage::NewResearchItem;

/// GET /api/research - List research items, newest first
#[utoipa::path(
    get,
    path = "/api/research",
    tag = "Research",
    responses(
        (status = 200, description = "Research list, newest first", body = Vec<ResearchItem>),
    )
)]
pub async fn list_research(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.store.research().await)
}

/// POST /api/research - Report a research finding
#[utoipa::path(
    post,
    path = "/api/research",
    tag = "Research",
    request_body = CreateResearchRequest,
    responses(
        (status = 201, description = "Research item created", body = ResearchItem),
        (status = 400, description = "Invalid request", body = ApiError),
    )
)]
pub async fn create_research(
    State(state): State<AppState>,
    Json(req): Json<CreateResearchRequest>,
) -> ApiResult<impl IntoResponse> {
    if req.agent_id.trim().is_empty() {
        return Err(ApiError::missing_field("agentId"));
    }
    if req.topic.trim().is_empty() {
        return Err(ApiError::missing_field("topic"));
    }

    let item = state
        .store
        .append_research(NewResearchItem {
            agent_id: req.agent_id,
            topic: req.topic,
            findings: req.findings,
            sources: req.sources,
            status: req.status,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(item)))
}

/// Create the research routes router.
pub fn create_router(state: AppState) -> axum::Router {
    axum::Router::new()
        .route(
            "/research",
            axum::routing::get(list_research).post(create_research),
        )
        .with_state(state)
}
