//! Hub error types with HTTP status code mapping.
//!
//! [`HubError`] is the central error type for the service. Each variant
//! maps to a specific HTTP status code and structured JSON error response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 4002,
///     "message": "event quota exhausted",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code (see code ranges on [`HubError`]).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category          | HTTP Status                |
/// |-----------|-------------------|----------------------------|
/// | 1000–1999 | Validation        | 400 Bad Request            |
/// | 2000–2999 | Not Found         | 404 Not Found              |
/// | 3000–3999 | Server/Transient  | 500 / 503                  |
/// | 4000–4099 | Conflict          | 409 Conflict               |
/// | 4100      | Authorization     | 403 Forbidden              |
#[derive(Debug, thiserror::Error)]
pub enum HubError {
    /// Request validation failed (malformed or out-of-range input).
    #[error("invalid request: {0}")]
    Validation(String),

    /// Unknown role string in the identity context.
    #[error("invalid role: {0}")]
    InvalidRole(String),

    /// Event with the given ID was not found.
    #[error("event not found: {0}")]
    EventNotFound(uuid::Uuid),

    /// Registration with the given ID was not found.
    #[error("registration not found: {0}")]
    RegistrationNotFound(uuid::Uuid),

    /// No feedback exists for the given (event, user) pair.
    #[error("feedback not found for event {0}")]
    FeedbackNotFound(uuid::Uuid),

    /// A registration for this (event, user) pair already exists.
    #[error("user already registered for event {0}")]
    AlreadyRegistered(uuid::Uuid),

    /// The event's confirmed-participant quota is exhausted.
    #[error("event quota exhausted ({confirmed}/{quota})")]
    QuotaExceeded {
        /// Confirmed participants at the moment of the attempt.
        confirmed: u32,
        /// The event's declared quota.
        quota: u32,
    },

    /// Illegal state transition (terminal state reached with a different target).
    #[error("invalid transition from {from} to {to}")]
    InvalidTransition {
        /// Current state.
        from: String,
        /// Requested state.
        to: String,
    },

    /// Actor lacks the role or ownership required for the action.
    ///
    /// Deliberately carries no resource information: callers receive the
    /// same error whether the underlying resource exists or not.
    #[error("forbidden")]
    Forbidden,

    /// The per-event critical section could not be acquired in time.
    ///
    /// Nothing was committed; safe for the caller to retry with backoff.
    #[error("event is busy, retry later")]
    Busy,

    /// Storage layer failure, bubbled unmodified. Considered transient.
    #[error("storage error: {0}")]
    Storage(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl HubError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::Validation(_) => 1001,
            Self::InvalidRole(_) => 1002,
            Self::EventNotFound(_) => 2001,
            Self::RegistrationNotFound(_) => 2002,
            Self::FeedbackNotFound(_) => 2003,
            Self::AlreadyRegistered(_) => 4001,
            Self::QuotaExceeded { .. } => 4002,
            Self::InvalidTransition { .. } => 4003,
            Self::Forbidden => 4100,
            Self::Busy => 3002,
            Self::Storage(_) => 3001,
            Self::Internal(_) => 3000,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidRole(_) => StatusCode::BAD_REQUEST,
            Self::EventNotFound(_) | Self::RegistrationNotFound(_) | Self::FeedbackNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            Self::AlreadyRegistered(_)
            | Self::QuotaExceeded { .. }
            | Self::InvalidTransition { .. } => StatusCode::CONFLICT,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Busy => StatusCode::SERVICE_UNAVAILABLE,
            Self::Storage(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for HubError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn conflict_variants_map_to_409() {
        let quota = HubError::QuotaExceeded {
            confirmed: 5,
            quota: 5,
        };
        assert_eq!(quota.status_code(), StatusCode::CONFLICT);
        assert_eq!(quota.error_code(), 4002);

        let dup = HubError::AlreadyRegistered(uuid::Uuid::new_v4());
        assert_eq!(dup.status_code(), StatusCode::CONFLICT);
        assert_eq!(dup.error_code(), 4001);
    }

    #[test]
    fn forbidden_message_carries_no_resource_info() {
        let err = HubError::Forbidden;
        assert_eq!(err.to_string(), "forbidden");
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn busy_is_service_unavailable() {
        assert_eq!(
            HubError::Busy.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
