//! BEACON Storage - Document Store and Snapshot Persistence
//!
//! Owns the single authoritative status document. All mutations go through
//! the serialized read-modify-write path in [`StatusStore`]; every successful
//! mutation is persisted in full through a [`SnapshotBackend`] before it is
//! committed in memory, and its change event is published in commit order.

pub mod snapshot;
pub mod store;

pub use snapshot::{FileSnapshotBackend, InMemorySnapshotBackend, SnapshotBackend, SnapshotError};
pub use store::{
    AgentStatusUpdate, NewProposal, NewResearchItem, NewTask, StatusStore, StoreError, StoreResult,
};
