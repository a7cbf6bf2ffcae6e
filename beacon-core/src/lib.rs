//! BEACON Core - Entity Types
//!
//! Pure data structures with no behavior. All other crates depend on this.
//! This crate contains ONLY data types - no business logic.

pub mod entities;
pub mod enums;
pub mod error;
pub mod event;

pub use entities::{Agent, Document, Proposal, ResearchItem, Task, Vote, MAX_TASK_HISTORY};
pub use enums::{AgentStatus, ProposalKind, ProposalPriority, ProposalStatus, ResearchStatus, VoteChoice};
pub use error::{CoreError, CoreResult};
pub use event::StateEvent;

use chrono::{DateTime, Utc};
use uuid::Uuid;

// ============================================================================
// IDENTITY TYPES
// ============================================================================

/// Entity identifier using UUIDv7 for timestamp-sortable IDs.
/// UUIDv7 embeds a Unix timestamp, making IDs naturally sortable by creation
/// time, so "newest first" ordering never depends on clock resolution.
pub type EntityId = Uuid;

/// Agent identifier. Agents are provisioned outside this core, so their ids
/// are opaque strings rather than server-assigned UUIDs.
pub type AgentId = String;

/// Timestamp type using UTC timezone.
pub type Timestamp = DateTime<Utc>;

/// Generate a new UUIDv7 EntityId (timestamp-sortable).
pub fn new_entity_id() -> EntityId {
    Uuid::now_v7()
}
