//! Shared application state for Axum routers.

use beacon_storage::StatusStore;
use std::sync::Arc;
use std::time::Instant;

/// Application-wide state shared across all routes.
///
/// The store is the single authoritative state holder for the process,
/// constructed at startup and handed to every handler through Axum state -
/// no ambient global.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<StatusStore>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(store: Arc<StatusStore>) -> Self {
        Self {
            store,
            start_time: Instant::now(),
        }
    }
}
