//! Test utilities, fixtures, and generators for BEACON.
//!
//! Shared by the crate test suites so every test starts from the same
//! well-known document shapes.

use beacon_core::{
    Agent, AgentStatus, Document, ProposalKind, ProposalPriority, VoteChoice,
};
use beacon_storage::{InMemorySnapshotBackend, NewProposal, NewTask, StatusStore};
use chrono::Utc;
use proptest::prelude::*;
use std::sync::Arc;

// ============================================================================
// FIXTURES
// ============================================================================

/// A provisioned agent record with the given id, idle and unblocked.
pub fn agent_fixture(id: &str) -> Agent {
    Agent {
        id: id.to_string(),
        name: capitalize(id),
        role: "researcher".to_string(),
        emoji: "🛰️".to_string(),
        current: None,
        blocked: None,
        status: AgentStatus::Idle,
        last_updated: Utc::now(),
    }
}

/// A document seeded with the given provisioned agents and empty lists.
pub fn seeded_document(agent_ids: &[&str]) -> Document {
    let mut doc = Document::empty();
    for id in agent_ids {
        doc.agents.insert((*id).to_string(), agent_fixture(id));
    }
    doc
}

/// A store opened over an in-memory backend seeded with the given agents.
/// Returns the backend too so tests can inspect or fail persistence.
pub async fn seeded_store(agent_ids: &[&str]) -> (Arc<StatusStore>, Arc<InMemorySnapshotBackend>) {
    let backend = Arc::new(InMemorySnapshotBackend::with_document(seeded_document(
        agent_ids,
    )));
    let store = Arc::new(StatusStore::open(backend.clone(), 64).await);
    (store, backend)
}

/// Task payload with defaulted outcome/link.
pub fn task_fixture(agent_id: &str, title: &str) -> NewTask {
    NewTask {
        agent_id: agent_id.to_string(),
        title: title.to_string(),
        outcome: "done".to_string(),
        link: String::new(),
    }
}

/// Proposal payload with tool/high defaults.
pub fn proposal_fixture(agent_id: &str, title: &str) -> NewProposal {
    NewProposal {
        agent_id: agent_id.to_string(),
        title: title.to_string(),
        description: "fixture proposal".to_string(),
        kind: ProposalKind::Tool,
        priority: ProposalPriority::High,
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

// ============================================================================
// PROPTEST STRATEGIES
// ============================================================================

/// Strategy for generating agent ids in the style teams actually use.
pub fn agent_id_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("lucy".to_string()),
        Just("max".to_string()),
        Just("nova".to_string()),
        "[a-z]{3,10}".prop_map(|s| s),
    ]
}

/// Strategy for generating vote choices.
pub fn vote_strategy() -> impl Strategy<Value = VoteChoice> {
    prop_oneof![Just(VoteChoice::Up), Just(VoteChoice::Down)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_document_contains_requested_agents() {
        let doc = seeded_document(&["lucy", "max"]);
        assert_eq!(doc.agents.len(), 2);
        assert_eq!(doc.agents["lucy"].name, "Lucy");
        assert!(doc.tasks.is_empty());
    }
}
