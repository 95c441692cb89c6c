//! Authentication middleware for protected routes.
//!
//! Extracts the bearer token from the Authorization header, verifies it,
//! and injects the caller's [`Identity`] into request extensions. Absent or
//! malformed headers are rejected here, before any business logic runs.

use crate::auth::TokenService;
use crate::errors::RcError;
use crate::models::Identity;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::IntoResponse,
};
use common::jwt::extract_bearer;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

/// State for the authentication middleware.
#[derive(Clone)]
pub struct AuthState {
    /// Token service used to verify bearer credentials.
    pub tokens: TokenService,
}

/// Authentication middleware that validates bearer tokens.
///
/// # Authorization Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// # Response
///
/// - Returns 401 Unauthorized with WWW-Authenticate header if the token is
///   missing or invalid
/// - Continues to the next handler with [`Identity`] in extensions if the
///   token is valid
#[instrument(skip(state, req, next), name = "rc.middleware.auth")]
pub async fn require_auth(
    State(state): State<Arc<AuthState>>,
    mut req: Request,
    next: Next,
) -> Result<impl IntoResponse, RcError> {
    // Extract Authorization header
    let auth_header = req
        .headers()
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            tracing::debug!(target: "rc.middleware.auth", "Missing Authorization header");
            RcError::Unauthenticated("Missing Authorization header".to_string())
        })?;

    // Extract bearer token
    let token = extract_bearer(auth_header).ok_or_else(|| {
        tracing::debug!(target: "rc.middleware.auth", "Invalid Authorization header format");
        RcError::Unauthenticated("Invalid Authorization header format".to_string())
    })?;

    // Verify the credential and resolve the caller identity
    let claims = state.tokens.verify(token)?;

    let user_id = Uuid::parse_str(&claims.sub).map_err(|_| {
        tracing::debug!(target: "rc.middleware.auth", "Invalid subject in verified token");
        RcError::Unauthenticated("Invalid or expired token".to_string())
    })?;

    // Store the identity in request extensions for downstream handlers
    req.extensions_mut().insert(Identity {
        user_id,
        email: claims.email,
    });

    // Continue to next handler
    Ok(next.run(req).await)
}
