//! Room Controller error types.
//!
//! All errors map to appropriate HTTP status codes via the `IntoResponse`
//! impl. `HostRequired` and `NotAuthorized` both map to 403 but carry
//! distinct codes: callers (and tests) must be able to tell "not in this
//! meeting" apart from "in the meeting but not host". Internal failures are
//! never reported as authorization failures.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Room Controller error type.
///
/// Maps to appropriate HTTP status codes:
/// - Unauthenticated: 401 Unauthorized
/// - NotAuthorized, HostRequired: 403 Forbidden
/// - NotFound: 404 Not Found
/// - Conflict: 409 Conflict
/// - BadRequest: 400 Bad Request
/// - Internal: 500 Internal Server Error
#[derive(Debug, Error)]
pub enum RcError {
    /// Missing, malformed, expired, or badly signed credential.
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    /// Caller is not a participant of the target meeting.
    #[error("Not authorized: {0}")]
    NotAuthorized(String),

    /// Caller is a participant but the action needs the host flag.
    #[error("Host required: {0}")]
    HostRequired(String),

    /// Meeting or participant id does not resolve.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Duplicate registration or similar collision.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Invalid request payload.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Generic internal error.
    #[error("Internal server error")]
    Internal,
}

impl RcError {
    /// Returns the HTTP status code for this error (for metrics recording).
    pub fn status_code(&self) -> u16 {
        match self {
            RcError::Unauthenticated(_) => 401,
            RcError::NotAuthorized(_) | RcError::HostRequired(_) => 403,
            RcError::NotFound(_) => 404,
            RcError::Conflict(_) => 409,
            RcError::BadRequest(_) => 400,
            RcError::Internal => 500,
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

impl IntoResponse for RcError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            RcError::Unauthenticated(reason) => {
                (StatusCode::UNAUTHORIZED, "UNAUTHENTICATED", reason.clone())
            }
            RcError::NotAuthorized(reason) => {
                (StatusCode::FORBIDDEN, "NOT_AUTHORIZED", reason.clone())
            }
            RcError::HostRequired(reason) => {
                (StatusCode::FORBIDDEN, "HOST_REQUIRED", reason.clone())
            }
            RcError::NotFound(resource) => (StatusCode::NOT_FOUND, "NOT_FOUND", resource.clone()),
            RcError::Conflict(reason) => (StatusCode::CONFLICT, "CONFLICT", reason.clone()),
            RcError::BadRequest(reason) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", reason.clone()),
            RcError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            ),
        };

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        let mut response = (status, Json(error_response)).into_response();

        // Add WWW-Authenticate header for 401 responses
        if status == StatusCode::UNAUTHORIZED {
            if let Ok(header_value) = "Bearer realm=\"parley-api\", error=\"invalid_token\"".parse()
            {
                response
                    .headers_mut()
                    .insert("WWW-Authenticate", header_value);
            }
        }

        response
    }
}
