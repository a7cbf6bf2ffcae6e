//! Error Types for the BEACON API
//!
//! This module defines error handling for the API layer, including:
//! - ApiError struct for structured error responses
//! - ErrorCode enum for categorizing errors
//! - IntoResponse implementation for Axum HTTP responses
//!
//! All errors are serialized as JSON with appropriate HTTP status codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use beacon_core::CoreError;
use beacon_storage::StoreError;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// ERROR CODE ENUM
// ============================================================================

/// Error codes for API responses.
///
/// Each error code maps to a specific HTTP status code and represents
/// a category of error that can occur during API operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // ========================================================================
    // Validation Errors (400)
    // ========================================================================
    /// Request validation failed
    ValidationFailed,

    /// Request contains invalid input data
    InvalidInput,

    /// Required field is missing from request
    MissingField,

    // ========================================================================
    // Not Found Errors (404)
    // ========================================================================
    /// Referenced agent does not exist
    AgentNotFound,

    /// Referenced proposal does not exist
    ProposalNotFound,

    // ========================================================================
    // Server Errors (500)
    // ========================================================================
    /// Snapshot persistence failed; the mutation did not take effect
    PersistenceFailed,

    /// Internal server error
    InternalError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::ValidationFailed
            | ErrorCode::InvalidInput
            | ErrorCode::MissingField => StatusCode::BAD_REQUEST,

            ErrorCode::AgentNotFound | ErrorCode::ProposalNotFound => StatusCode::NOT_FOUND,

            ErrorCode::PersistenceFailed | ErrorCode::InternalError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get a default message for this error code.
    pub fn default_message(&self) -> &'static str {
        match self {
            ErrorCode::ValidationFailed => "Request validation failed",
            ErrorCode::InvalidInput => "Invalid input data",
            ErrorCode::MissingField => "Required field is missing",
            ErrorCode::AgentNotFound => "Agent not found",
            ErrorCode::ProposalNotFound => "Proposal not found",
            ErrorCode::PersistenceFailed => "State could not be persisted",
            ErrorCode::InternalError => "Internal server error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

// ============================================================================
// API ERROR STRUCT
// ============================================================================

/// Structured error response for API operations.
///
/// This type is returned by all API endpoints when an error occurs.
/// It provides a consistent error format across REST and WebSocket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ApiError {
    /// Error code categorizing the error
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,

    /// Optional additional details (field errors, etc.)
    #[serde(skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<Object>))]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Create a new API error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Create a new API error with the given code, using the default message.
    pub fn from_code(code: ErrorCode) -> Self {
        Self {
            code,
            message: code.default_message().to_string(),
            details: None,
        }
    }

    /// Add additional details to the error.
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        self.code.status_code()
    }

    // ========================================================================
    // Convenience constructors for common errors
    // ========================================================================

    /// Create a ValidationFailed error.
    pub fn validation_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message)
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Create a MissingField error.
    pub fn missing_field(field: &str) -> Self {
        Self::new(
            ErrorCode::MissingField,
            format!("Required field '{}' is missing", field),
        )
    }

    /// Create an AgentNotFound error.
    pub fn agent_not_found(agent_id: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::AgentNotFound,
            format!("Agent {} not found", agent_id),
        )
    }

    /// Create a ProposalNotFound error.
    pub fn proposal_not_found(proposal_id: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::ProposalNotFound,
            format!("Proposal {} not found", proposal_id),
        )
    }

    /// Create a PersistenceFailed error.
    pub fn persistence_failed() -> Self {
        Self::from_code(ErrorCode::PersistenceFailed)
    }

    /// Create an InternalError.
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// ============================================================================
// AXUM INTEGRATION
// ============================================================================

/// Implement IntoResponse for ApiError to enable automatic error handling in
/// Axum. This allows ApiError to be returned directly from route handlers.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self);
        (status, body).into_response()
    }
}

// ============================================================================
// CONVERSIONS FROM STORE ERRORS
// ============================================================================

/// Convert store mutation failures into API errors.
///
/// Rejections map to their 404 codes; a persistence failure is logged and
/// reported as a 500 without leaking backend details.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Rejected(CoreError::AgentNotFound(id)) => ApiError::agent_not_found(id),
            StoreError::Rejected(CoreError::ProposalNotFound(id)) => {
                ApiError::proposal_not_found(id)
            }
            StoreError::Persistence(e) => {
                tracing::error!(error = %e, "Snapshot persistence failed");
                ApiError::persistence_failed()
            }
        }
    }
}

/// Convert from serde_json::Error to ApiError.
impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("JSON serialization error: {:?}", err);
        ApiError::invalid_input(format!("Invalid JSON: {}", err))
    }
}

// ============================================================================
// RESULT TYPE ALIAS
// ============================================================================

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use beacon_core::new_entity_id;
    use beacon_storage::SnapshotError;

    #[test]
    fn test_error_code_status_mapping() {
        assert_eq!(
            ErrorCode::ValidationFailed.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ErrorCode::MissingField.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::AgentNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorCode::ProposalNotFound.status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ErrorCode::PersistenceFailed.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_api_error_constructors() {
        let err = ApiError::agent_not_found("lucy");
        assert_eq!(err.code, ErrorCode::AgentNotFound);
        assert!(err.message.contains("lucy"));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);

        let err = ApiError::missing_field("title");
        assert_eq!(err.code, ErrorCode::MissingField);
        assert!(err.message.contains("title"));
    }

    #[test]
    fn test_store_error_conversion() {
        let id = new_entity_id();
        let err: ApiError = StoreError::Rejected(CoreError::ProposalNotFound(id)).into();
        assert_eq!(err.code, ErrorCode::ProposalNotFound);
        assert!(err.message.contains(&id.to_string()));

        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let err: ApiError = StoreError::Persistence(SnapshotError::Io(io)).into();
        assert_eq!(err.code, ErrorCode::PersistenceFailed);
    }

    #[test]
    fn test_error_serialization() -> Result<(), serde_json::Error> {
        let err = ApiError::validation_failed("title cannot be empty");
        let json = serde_json::to_string(&err)?;

        assert!(json.contains("VALIDATION_FAILED"));
        assert!(json.contains("title cannot be empty"));

        let deserialized: ApiError = serde_json::from_str(&json)?;
        assert_eq!(deserialized, err);
        Ok(())
    }
}
