//! Registration and login handlers.
//!
//! - `POST /v1/auth/register` - Create an account, returns a credential
//! - `POST /v1/auth/login` - Verify a password, returns a credential
//!
//! Both endpoints are public; everything else on the meeting surface
//! requires the credential these issue.

use crate::errors::RcError;
use crate::models::{AuthResponse, LoginRequest, RegisterRequest, UserSummary};
use crate::routes::AppState;
use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::instrument;

/// Handler for POST /v1/auth/register
///
/// # Response
///
/// - 200 OK: Credential and user summary
/// - 400 Bad Request: Invalid email, password, or name
/// - 409 Conflict: Email already registered
#[instrument(skip(state, request), name = "rc.handlers.register")]
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, RcError> {
    request
        .validate()
        .map_err(RcError::BadRequest)?;

    let user = state
        .users
        .register(request.email.trim(), &request.password, request.name.trim())
        .await?;

    let token = state.tokens.issue(user.id, &user.email)?;

    tracing::info!(
        target: "rc.handlers.auth",
        user_id = %user.id,
        "User registered and credential issued"
    );

    Ok(Json(AuthResponse {
        token,
        user: UserSummary::from(&user),
    }))
}

/// Handler for POST /v1/auth/login
///
/// # Response
///
/// - 200 OK: Credential and user summary
/// - 401 Unauthorized: Unknown email or wrong password
#[instrument(skip(state, request), name = "rc.handlers.login")]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, RcError> {
    let user = state
        .users
        .authenticate(request.email.trim(), &request.password)
        .await?;

    let token = state.tokens.issue(user.id, &user.email)?;

    tracing::info!(
        target: "rc.handlers.auth",
        user_id = %user.id,
        "User logged in"
    );

    Ok(Json(AuthResponse {
        token,
        user: UserSummary::from(&user),
    }))
}
