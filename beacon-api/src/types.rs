//! Request and response types for the REST surface.
//!
//! The document entities themselves (`Agent`, `Task`, `ResearchItem`,
//! `Proposal`) are the response bodies - they are already wire types in
//! beacon-core. This module holds the inbound request shapes, which use the
//! protocol's camelCase field names.

use beacon_core::{AgentStatus, ProposalKind, ProposalPriority, ResearchStatus, VoteChoice};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/agent/{id}/status`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct UpdateAgentStatusRequest {
    /// Free-form description of in-progress work.
    #[serde(default)]
    pub current: Option<String>,
    /// Free-form blocking reason.
    #[serde(default)]
    pub blocked: Option<String>,
    /// Defaults to `active` when omitted.
    #[serde(default)]
    pub status: Option<AgentStatus>,
}

/// Body of `POST /api/tasks`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    /// Validated by the handler so an omitted field reports MISSING_FIELD
    /// instead of a deserialization rejection.
    #[serde(default)]
    pub agent_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub outcome: String,
    #[serde(default)]
    pub link: String,
}

/// Body of `POST /api/research`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CreateResearchRequest {
    #[serde(default)]
    pub agent_id: String,
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub findings: String,
    #[serde(default)]
    pub sources: Vec<String>,
    /// Defaults to `ongoing` when omitted.
    #[serde(default)]
    pub status: Option<ResearchStatus>,
}

/// Body of `POST /api/proposals`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CreateProposalRequest {
    #[serde(default)]
    pub agent_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub kind: ProposalKind,
    pub priority: ProposalPriority,
}

/// Body of `POST /api/proposals/{id}/vote`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    #[serde(default)]
    pub agent_id: String,
    pub vote: VoteChoice,
}

/// Response of `GET /health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub uptime_seconds: u64,
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agent_status_request_accepts_nulls() -> Result<(), serde_json::Error> {
        let req: UpdateAgentStatusRequest =
            serde_json::from_str(r#"{"current": "researching", "blocked": null}"#)?;
        assert_eq!(req.current.as_deref(), Some("researching"));
        assert!(req.blocked.is_none());
        assert!(req.status.is_none());
        Ok(())
    }

    #[test]
    fn create_proposal_request_reads_type_field() -> Result<(), serde_json::Error> {
        let req: CreateProposalRequest = serde_json::from_str(
            r#"{"agentId": "a1", "title": "Add memory tool", "type": "tool", "priority": "high"}"#,
        )?;
        assert_eq!(req.kind, ProposalKind::Tool);
        assert_eq!(req.priority, ProposalPriority::High);
        assert!(req.description.is_empty());
        Ok(())
    }

    #[test]
    fn create_task_request_defaults_optional_strings() -> Result<(), serde_json::Error> {
        let req: CreateTaskRequest =
            serde_json::from_str(r#"{"agentId": "a1", "title": "ship it"}"#)?;
        assert!(req.outcome.is_empty());
        assert!(req.link.is_empty());
        Ok(())
    }

    #[test]
    fn vote_request_roundtrip() -> Result<(), serde_json::Error> {
        let req: VoteRequest = serde_json::from_str(r#"{"agentId": "a2", "vote": "up"}"#)?;
        assert_eq!(req.vote, VoteChoice::Up);
        assert_eq!(req.agent_id, "a2");
        Ok(())
    }
}
