//! OpenAPI Documentation
//!
//! Aggregates the route annotations and schemas into the document served at
//! `/openapi.json`.

use utoipa::OpenApi;

use crate::error::{ApiError, ErrorCode};
use crate::types::{
    CreateProposalRequest, CreateResearchRequest, CreateTaskRequest, HealthResponse,
    UpdateAgentStatusRequest, VoteRequest,
};
use beacon_core::{
    Agent, AgentStatus, Document, Proposal, ProposalKind, ProposalPriority, ProposalStatus,
    ResearchItem, ResearchStatus, Task, Vote, VoteChoice,
};

/// OpenAPI document for the BEACON API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "BEACON API",
        description = "Shared status board for multi-agent teams: agents report status, \
                       completed work, research, and proposals; observers subscribe to \
                       live change events over WebSocket.",
    ),
    paths(
        crate::routes::status::get_status,
        crate::routes::agent::list_agents,
        crate::routes::agent::update_agent_status,
        crate::routes::task::list_tasks,
        crate::routes::task::create_task,
        crate::routes::research::list_research,
        crate::routes::research::create_research,
        crate::routes::proposal::list_proposals,
        crate::routes::proposal::create_proposal,
        crate::routes::proposal::vote_proposal,
        crate::routes::health::health,
    ),
    components(schemas(
        Document,
        Agent,
        AgentStatus,
        Task,
        ResearchItem,
        ResearchStatus,
        Proposal,
        ProposalKind,
        ProposalPriority,
        ProposalStatus,
        Vote,
        VoteChoice,
        UpdateAgentStatusRequest,
        CreateTaskRequest,
        CreateResearchRequest,
        CreateProposalRequest,
        VoteRequest,
        HealthResponse,
        ApiError,
        ErrorCode,
    ))
)]
pub struct ApiDoc;
