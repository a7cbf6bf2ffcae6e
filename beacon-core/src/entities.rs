//! Entity records that make up the shared status document.

use crate::enums::{
    AgentStatus, ProposalKind, ProposalPriority, ProposalStatus, ResearchStatus, VoteChoice,
};
use crate::{AgentId, EntityId, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Completed tasks retained in the document. Oldest entries are evicted
/// silently once the list exceeds this bound.
pub const MAX_TASK_HISTORY: usize = 100;

// ============================================================================
// DOCUMENT (root aggregate)
// ============================================================================

/// The single authoritative aggregate of agents, tasks, research items,
/// and proposals. Lists are ordered newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Document {
    #[serde(default)]
    pub agents: HashMap<AgentId, Agent>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub research: Vec<ResearchItem>,
    #[serde(default)]
    pub proposals: Vec<Proposal>,
}

impl Document {
    /// Empty document: no agents, all lists empty. The initial state when no
    /// well-formed snapshot exists.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Find a proposal by id, mutably.
    pub fn proposal_mut(&mut self, id: EntityId) -> Option<&mut Proposal> {
        self.proposals.iter_mut().find(|p| p.id == id)
    }
}

// ============================================================================
// AGENT
// ============================================================================

/// A provisioned worker agent. Records are never created through the mutation
/// surface - only pre-existing ids may be updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    /// Immutable, assigned at provisioning time.
    pub id: AgentId,
    pub name: String,
    pub role: String,
    /// Display-only, not interpreted by the core.
    pub emoji: String,
    /// Free-form description of in-progress work.
    pub current: Option<String>,
    /// Free-form blocking reason.
    pub blocked: Option<String>,
    #[serde(default)]
    pub status: AgentStatus,
    /// Set by the store on every status mutation.
    #[cfg_attr(feature = "openapi", schema(value_type = chrono::DateTime<chrono::Utc>))]
    pub last_updated: Timestamp,
}

// ============================================================================
// TASK
// ============================================================================

/// A completed unit of work. Immutable once created; removed only by the
/// bounded-history eviction rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Server-assigned, unique, time-ordered.
    #[cfg_attr(feature = "openapi", schema(value_type = uuid::Uuid))]
    pub id: EntityId,
    /// Free reference - not validated against the agents map.
    pub agent_id: AgentId,
    pub title: String,
    pub outcome: String,
    pub link: String,
    /// Server-assigned creation timestamp.
    #[cfg_attr(feature = "openapi", schema(value_type = chrono::DateTime<chrono::Utc>))]
    pub completed_at: Timestamp,
}

// ============================================================================
// RESEARCH ITEM
// ============================================================================

/// A research finding reported by an agent. Immutable on this write surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ResearchItem {
    #[cfg_attr(feature = "openapi", schema(value_type = uuid::Uuid))]
    pub id: EntityId,
    pub agent_id: AgentId,
    pub topic: String,
    pub findings: String,
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default)]
    pub status: ResearchStatus,
    #[cfg_attr(feature = "openapi", schema(value_type = chrono::DateTime<chrono::Utc>))]
    pub created_at: Timestamp,
}

// ============================================================================
// PROPOSAL
// ============================================================================

/// An improvement proposal. Mutable via the vote operation only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    #[cfg_attr(feature = "openapi", schema(value_type = uuid::Uuid))]
    pub id: EntityId,
    pub agent_id: AgentId,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: ProposalKind,
    pub priority: ProposalPriority,
    #[serde(default)]
    pub status: ProposalStatus,
    /// At most one vote per agent id at any time.
    #[serde(default)]
    pub votes: Vec<Vote>,
    #[cfg_attr(feature = "openapi", schema(value_type = chrono::DateTime<chrono::Utc>))]
    pub created_at: Timestamp,
}

impl Proposal {
    /// Record a vote, replacing any existing vote by the same agent.
    pub fn record_vote(&mut self, vote: Vote) {
        self.votes.retain(|v| v.agent_id != vote.agent_id);
        self.votes.push(vote);
    }

    /// Look up the current vote by an agent, if any.
    pub fn vote_of(&self, agent_id: &str) -> Option<&Vote> {
        self.votes.iter().find(|v| v.agent_id == agent_id)
    }
}

/// A single agent's vote on a proposal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    pub agent_id: AgentId,
    pub vote: VoteChoice,
    #[cfg_attr(feature = "openapi", schema(value_type = chrono::DateTime<chrono::Utc>))]
    pub at: Timestamp,
}
