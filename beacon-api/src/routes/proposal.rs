//! Proposal REST API Routes
//!
//! Proposals are append-only except for voting. A vote replaces any earlier
//! vote by the same agent; the response and the broadcast event both carry
//! the full updated proposal so observers never diff vote sets.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
    types::{CreateProposalRequest, VoteRequest},
};
use beacon_core::Proposal;
use beacon_storage::NewProposal;

/// GET /api/proposals - List proposals, newest first
#[utoipa::path(
    get,
    path = "/api/proposals",
    tag = "Proposals",
    responses(
        (status = 200, description = "Proposal list, newest first", body = Vec<Proposal>),
    )
)]
pub async fn list_proposals(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.store.proposals().await)
}

/// POST /api/proposals - Submit an improvement proposal
#[utoipa::path(
    post,
    path = "/api/proposals",
    tag = "Proposals",
    request_body = CreateProposalRequest,
    responses(
        (status = 201, description = "Proposal created with pending status and no votes", body = Proposal),
        (status = 400, description = "Invalid request", body = ApiError),
    )
)]
pub async fn create_proposal(
    State(state): State<AppState>,
    Json(req): Json<CreateProposalRequest>,
) -> ApiResult<impl IntoResponse> {
    if req.agent_id.trim().is_empty() {
        return Err(ApiError::missing_field("agentId"));
    }
    if req.title.trim().is_empty() {
        return Err(ApiError::missing_field("title"));
    }

    let proposal = state
        .store
        .append_proposal(NewProposal {
            agent_id: req.agent_id,
            title: req.title,
            description: req.description,
            kind: req.kind,
            priority: req.priority,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(proposal)))
}

/// POST /api/proposals/{id}/vote - Vote on a proposal
#[utoipa::path(
    post,
    path = "/api/proposals/{id}/vote",
    tag = "Proposals",
    params(
        ("id" = Uuid, Path, description = "Proposal ID")
    ),
    request_body = VoteRequest,
    responses(
        (status = 200, description = "Updated proposal with the full vote set", body = Proposal),
        (status = 400, description = "Invalid request", body = ApiError),
        (status = 404, description = "Proposal not found", body = ApiError),
    )
)]
pub async fn vote_proposal(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<VoteRequest>,
) -> ApiResult<impl IntoResponse> {
    if req.agent_id.trim().is_empty() {
        return Err(ApiError::missing_field("agentId"));
    }

    let proposal = state.store.vote_proposal(id, &req.agent_id, req.vote).await?;

    Ok(Json(proposal))
}

/// Create the proposal routes router.
pub fn create_router(state: AppState) -> axum::Router {
    axum::Router::new()
        .route(
            "/proposals",
            axum::routing::get(list_proposals).post(create_proposal),
        )
        .route("/proposals/:id/vote", axum::routing::post(vote_proposal))
        .with_state(state)
}
