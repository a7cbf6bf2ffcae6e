//! Task REST API Routes
//!
//! Tasks are append-only: agents report completed work, the store keeps the
//! most recent 100 entries.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
    types::CreateTaskRequest,
};
use beacon_core::Task;
use beacon_storage::NewTask;

/// GET /api/tasks - List completed tasks, newest first
#[utoipa::path(
    get,
    path = "/api/tasks",
    tag = "Tasks",
    responses(
        (status = 200, description = "Task list, newest first, at most 100 entries", body = Vec<Task>),
    )
)]
pub async fn list_tasks(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.store.tasks().await)
}

/// POST /api/tasks - Report a completed task
#[utoipa::path(
    post,
    path = "/api/tasks",
    tag = "Tasks",
    request_body = CreateTaskRequest,
    responses(
        (status = 201, description = "Task created", body = Task),
        (status = 400, description = "Invalid request", body = ApiError),
    )
)]
pub async fn create_task(
    State(state): State<AppState>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<impl IntoResponse> {
    if req.agent_id.trim().is_empty() {
        return Err(ApiError::missing_field("agentId"));
    }
    if req.title.trim().is_empty() {
        return Err(ApiError::missing_field("title"));
    }

    let task = state
        .store
        .append_task(NewTask {
            agent_id: req.agent_id,
            title: req.title,
            outcome: req.outcome,
            link: req.link,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(task)))
}

/// Create the task routes router.
pub fn create_router(state: AppState) -> axum::Router {
    axum::Router::new()
        .route(
            "/tasks",
            axum::routing::get(list_tasks).post(create_task),
        )
        .with_state(state)
}
