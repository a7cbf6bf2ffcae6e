//! Core error taxonomy.
//!
//! Rejections that the mutation surface can return to a caller. Infrastructure
//! failures (persistence, delivery) live with the components that produce
//! them.

use crate::EntityId;
use thiserror::Error;

/// Rejections raised by mutation operations against the document.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// The referenced agent id is not in the agents map. Agents are
    /// provisioned externally and never created by a mutation request.
    #[error("Agent {0} not found")]
    AgentNotFound(String),

    /// The referenced proposal does not exist.
    #[error("Proposal {0} not found")]
    ProposalNotFound(EntityId),
}

/// Result type alias for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::new_entity_id;

    #[test]
    fn error_messages_name_the_missing_entity() {
        let err = CoreError::AgentNotFound("lucy".to_string());
        assert_eq!(err.to_string(), "Agent lucy not found");

        let id = new_entity_id();
        let err = CoreError::ProposalNotFound(id);
        assert!(err.to_string().contains(&id.to_string()));
    }
}
