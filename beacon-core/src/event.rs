//! Change Event Types
//!
//! This module defines the typed events broadcast to connected observers
//! whenever the shared document changes. Each incremental event carries only
//! the affected entity; `Connected` carries the full document snapshot sent
//! to a newly registered observer.

use crate::entities::{Agent, Document, Proposal, ResearchItem, Task};
use serde::{Deserialize, Serialize};

/// Events pushed to observers over the subscription channel.
///
/// The `type` discriminators match the wire protocol consumed by existing
/// dashboards, so they are snake_case on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StateEvent {
    /// Sent once to every newly connected observer, before any incremental
    /// event. This is the convergence mechanism for late joiners.
    Connected {
        /// Full snapshot of the current document.
        data: Document,
    },

    /// An agent's status record was overwritten.
    AgentUpdate {
        /// The full updated agent record.
        agent: Agent,
    },

    /// A completed task was appended.
    TaskAdded {
        /// The created task.
        task: Task,
    },

    /// A research item was appended.
    ResearchAdded {
        /// The created research item.
        item: ResearchItem,
    },

    /// A proposal was appended.
    ProposalAdded {
        /// The created proposal.
        proposal: Proposal,
    },

    /// A vote was recorded on a proposal.
    ProposalVoted {
        /// The full updated proposal, including the complete vote set, so
        /// observers never have to diff.
        proposal: Proposal,
    },
}

impl StateEvent {
    /// Get the event type as a string for logging/debugging.
    pub fn event_type(&self) -> &'static str {
        match self {
            StateEvent::Connected { .. } => "connected",
            StateEvent::AgentUpdate { .. } => "agent_update",
            StateEvent::TaskAdded { .. } => "task_added",
            StateEvent::ResearchAdded { .. } => "research_added",
            StateEvent::ProposalAdded { .. } => "proposal_added",
            StateEvent::ProposalVoted { .. } => "proposal_voted",
        }
    }

    /// Whether this event is the full-snapshot event rather than an
    /// incremental change.
    pub fn is_snapshot(&self) -> bool {
        matches!(self, StateEvent::Connected { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Document;

    #[test]
    fn event_type_names_match_wire_protocol() {
        let event = StateEvent::Connected {
            data: Document::empty(),
        };
        assert_eq!(event.event_type(), "connected");
        assert!(event.is_snapshot());
    }

    #[test]
    fn events_tag_with_type_field() -> Result<(), serde_json::Error> {
        let event = StateEvent::Connected {
            data: Document::empty(),
        };
        let json = serde_json::to_value(&event)?;
        assert_eq!(json["type"], "connected");
        assert!(json["data"]["agents"].is_object());
        Ok(())
    }

    #[test]
    fn event_serialization_roundtrip() -> Result<(), serde_json::Error> {
        let event = StateEvent::Connected {
            data: Document::empty(),
        };
        let json = serde_json::to_string(&event)?;
        let back: StateEvent = serde_json::from_str(&json)?;
        assert_eq!(back, event);
        Ok(())
    }
}
