//! Agent REST API Routes
//!
//! Agents are provisioned outside this service; the mutation surface can only
//! update the status record of an id that already exists.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
    types::UpdateAgentStatusRequest,
};
use beacon_core::Agent;
use beacon_storage::AgentStatusUpdate;

/// GET /api/agents - Get the agents map
#[utoipa::path(
    get,
    path = "/api/agents",
    tag = "Agents",
    responses(
        (status = 200, description = "Mapping of agent id to agent record", body = HashMap<String, Agent>),
    )
)]
pub async fn list_agents(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.store.agents().await)
}

/// POST /api/agent/{id}/status - Update an agent's status record
#[utoipa::path(
    post,
    path = "/api/agent/{id}/status",
    tag = "Agents",
    params(
        ("id" = String, Path, description = "Agent ID")
    ),
    request_body = UpdateAgentStatusRequest,
    responses(
        (status = 200, description = "Updated agent record", body = Agent),
        (status = 404, description = "Agent not found", body = ApiError),
    )
)]
pub async fn update_agent_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateAgentStatusRequest>,
) -> ApiResult<impl IntoResponse> {
    let agent = state
        .store
        .update_agent_status(
            &id,
            AgentStatusUpdate {
                current: req.current,
                blocked: req.blocked,
                status: req.status,
            },
        )
        .await?;

    Ok(Json(agent))
}

/// Create the agent routes router.
pub fn create_router(state: AppState) -> axum::Router {
    axum::Router::new()
        .route("/agents", axum::routing::get(list_agents))
        .route("/agent/:id/status", axum::routing::post(update_agent_status))
        .with_state(state)
}
