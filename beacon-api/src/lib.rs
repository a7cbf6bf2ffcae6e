//! BEACON API - REST/WebSocket API Layer
//!
//! This crate is the request gateway of the BEACON shared status board. It
//! exposes REST endpoints (Axum) for agents to report into the shared
//! document and a WebSocket endpoint over which observers receive a full
//! snapshot followed by live change events.
//!
//! The gateway owns no state: every handler goes through the single
//! `StatusStore` instance in [`state::AppState`].

pub mod config;
pub mod error;
pub mod openapi;
pub mod routes;
pub mod state;
pub mod types;
pub mod ws;

// Re-export commonly used types
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult, ErrorCode};
pub use openapi::ApiDoc;
pub use routes::create_api_router;
pub use state::AppState;
pub use types::*;
