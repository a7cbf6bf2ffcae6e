//! The serialized document store.
//!
//! One `StatusStore` instance owns the authoritative document for the whole
//! process. Mutations run under an exclusive write lock; the snapshot is
//! persisted before the in-memory document advances, so persisted and
//! in-memory state never diverge. Change events are published while the
//! write lock is still held, which makes per-subscriber event order equal to
//! commit order.

use crate::snapshot::{SnapshotBackend, SnapshotError};
use beacon_core::{
    new_entity_id, Agent, AgentStatus, CoreError, Document, EntityId, Proposal, ProposalKind,
    ProposalPriority, ProposalStatus, ResearchItem, ResearchStatus, StateEvent, Task, Vote,
    VoteChoice, MAX_TASK_HISTORY,
};
use chrono::Utc;
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, warn};

/// Default broadcast buffer per subscriber before a slow observer lags.
pub const DEFAULT_EVENT_CAPACITY: usize = 1000;

// ============================================================================
// ERRORS
// ============================================================================

/// Errors returned by store mutations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The mutation was rejected before any state change.
    #[error(transparent)]
    Rejected(#[from] CoreError),

    /// The snapshot write failed; the mutation did not take effect.
    #[error("Persistence failed: {0}")]
    Persistence(#[from] SnapshotError),
}

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// ============================================================================
// MUTATION PAYLOADS
// ============================================================================

/// Update payload for an agent's status record.
#[derive(Debug, Clone, Default)]
pub struct AgentStatusUpdate {
    pub current: Option<String>,
    pub blocked: Option<String>,
    /// Defaults to `active` when omitted.
    pub status: Option<AgentStatus>,
}

/// Payload for appending a completed task.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub agent_id: String,
    pub title: String,
    pub outcome: String,
    pub link: String,
}

/// Payload for appending a research item.
#[derive(Debug, Clone)]
pub struct NewResearchItem {
    pub agent_id: String,
    pub topic: String,
    pub findings: String,
    pub sources: Vec<String>,
    /// Defaults to `ongoing` when omitted.
    pub status: Option<ResearchStatus>,
}

/// Payload for appending a proposal.
#[derive(Debug, Clone)]
pub struct NewProposal {
    pub agent_id: String,
    pub title: String,
    pub description: String,
    pub kind: ProposalKind,
    pub priority: ProposalPriority,
}

// ============================================================================
// STATUS STORE
// ============================================================================

/// Owner of the single authoritative status document.
///
/// Constructed once at startup and handed to every handler by `Arc`; there is
/// no ambient global. Reads run concurrently; mutations are serialized.
pub struct StatusStore {
    document: RwLock<Document>,
    backend: Box<dyn SnapshotBackend>,
    events: broadcast::Sender<StateEvent>,
}

impl StatusStore {
    /// Open the store, loading the persisted snapshot if one exists.
    ///
    /// A missing, unreadable, or malformed snapshot initializes an empty
    /// document rather than failing startup; the next successful mutation
    /// overwrites whatever was on disk.
    pub async fn open(backend: impl SnapshotBackend + 'static, event_capacity: usize) -> Self {
        let document = match backend.load().await {
            Ok(Some(document)) => document,
            Ok(None) => Document::empty(),
            Err(e) => {
                warn!(error = %e, "Snapshot unusable, starting from an empty document");
                Document::empty()
            }
        };

        let (events, _rx) = broadcast::channel(event_capacity);
        Self {
            document: RwLock::new(document),
            backend: Box::new(backend),
            events,
        }
    }

    // ========================================================================
    // READ PATH
    // ========================================================================

    /// Full copy of the current document. The caller owns the copy; mutating
    /// it cannot corrupt authoritative state.
    pub async fn read(&self) -> Document {
        self.document.read().await.clone()
    }

    /// Current agents map.
    pub async fn agents(&self) -> HashMap<String, Agent> {
        self.document.read().await.agents.clone()
    }

    /// Current task list, newest first.
    pub async fn tasks(&self) -> Vec<Task> {
        self.document.read().await.tasks.clone()
    }

    /// Current research list, newest first.
    pub async fn research(&self) -> Vec<ResearchItem> {
        self.document.read().await.research.clone()
    }

    /// Current proposal list, newest first.
    pub async fn proposals(&self) -> Vec<Proposal> {
        self.document.read().await.proposals.clone()
    }

    /// Atomically take a full snapshot plus a receiver for subsequent events.
    ///
    /// Events are published under the write lock and this method holds the
    /// read lock across both steps, so the snapshot reflects every committed
    /// mutation and the receiver sees exactly the events committed after it.
    /// A new observer therefore converges from the snapshot with no gap and
    /// no event older than its snapshot.
    pub async fn subscribe(&self) -> (Document, broadcast::Receiver<StateEvent>) {
        let guard = self.document.read().await;
        let rx = self.events.subscribe();
        (guard.clone(), rx)
    }

    // ========================================================================
    // MUTATION PATH
    // ========================================================================

    /// Serialized read-modify-write. The closure edits a draft; the draft is
    /// persisted and only then committed, so a rejected or unpersistable
    /// mutation leaves no trace.
    async fn commit<T, F>(&self, apply: F) -> StoreResult<T>
    where
        F: FnOnce(&mut Document) -> Result<(T, StateEvent), CoreError>,
    {
        let mut guard = self.document.write().await;
        let mut draft = guard.clone();
        let (value, event) = apply(&mut draft)?;
        self.backend.persist(&draft).await?;
        *guard = draft;

        let event_type = event.event_type();
        match self.events.send(event) {
            Ok(receivers) => {
                debug!(event_type, receivers, "Broadcast event");
            }
            Err(_) => {
                // No observers connected - nothing to deliver.
                debug!(event_type, "No receivers for event");
            }
        }

        Ok(value)
    }

    /// Overwrite an agent's status fields and stamp `last_updated`.
    ///
    /// Rejects with `AgentNotFound` if the id has not been provisioned.
    pub async fn update_agent_status(
        &self,
        agent_id: &str,
        update: AgentStatusUpdate,
    ) -> StoreResult<Agent> {
        let agent_id = agent_id.to_string();
        self.commit(move |doc| {
            let agent = doc
                .agents
                .get_mut(&agent_id)
                .ok_or_else(|| CoreError::AgentNotFound(agent_id.clone()))?;

            agent.current = update.current;
            agent.blocked = update.blocked;
            agent.status = update.status.unwrap_or_default();
            agent.last_updated = Utc::now();

            let agent = agent.clone();
            Ok((agent.clone(), StateEvent::AgentUpdate { agent }))
        })
        .await
    }

    /// Prepend a completed task, evicting the oldest beyond the history
    /// bound. Eviction is silent - never an error.
    pub async fn append_task(&self, new: NewTask) -> StoreResult<Task> {
        self.commit(move |doc| {
            let task = Task {
                id: new_entity_id(),
                agent_id: new.agent_id,
                title: new.title,
                outcome: new.outcome,
                link: new.link,
                completed_at: Utc::now(),
            };
            doc.tasks.insert(0, task.clone());
            doc.tasks.truncate(MAX_TASK_HISTORY);
            Ok((task.clone(), StateEvent::TaskAdded { task }))
        })
        .await
    }

    /// Prepend a research item.
    pub async fn append_research(&self, new: NewResearchItem) -> StoreResult<ResearchItem> {
        self.commit(move |doc| {
            let item = ResearchItem {
                id: new_entity_id(),
                agent_id: new.agent_id,
                topic: new.topic,
                findings: new.findings,
                sources: new.sources,
                status: new.status.unwrap_or_default(),
                created_at: Utc::now(),
            };
            doc.research.insert(0, item.clone());
            Ok((item.clone(), StateEvent::ResearchAdded { item }))
        })
        .await
    }

    /// Prepend a proposal with pending status and an empty vote set.
    pub async fn append_proposal(&self, new: NewProposal) -> StoreResult<Proposal> {
        self.commit(move |doc| {
            let proposal = Proposal {
                id: new_entity_id(),
                agent_id: new.agent_id,
                title: new.title,
                description: new.description,
                kind: new.kind,
                priority: new.priority,
                status: ProposalStatus::Pending,
                votes: Vec::new(),
                created_at: Utc::now(),
            };
            doc.proposals.insert(0, proposal.clone());
            Ok((proposal.clone(), StateEvent::ProposalAdded { proposal }))
        })
        .await
    }

    /// Record a vote on a proposal, replacing any earlier vote by the same
    /// agent. Rejects with `ProposalNotFound` for an unknown id.
    pub async fn vote_proposal(
        &self,
        proposal_id: EntityId,
        agent_id: &str,
        vote: VoteChoice,
    ) -> StoreResult<Proposal> {
        let agent_id = agent_id.to_string();
        self.commit(move |doc| {
            let proposal = doc
                .proposal_mut(proposal_id)
                .ok_or(CoreError::ProposalNotFound(proposal_id))?;

            proposal.record_vote(Vote {
                agent_id,
                vote,
                at: Utc::now(),
            });

            let proposal = proposal.clone();
            Ok((proposal.clone(), StateEvent::ProposalVoted { proposal }))
        })
        .await
    }
}
