//! JWT utilities shared across Parley services.
//!
//! Provides the access-token claims structure, bearer header extraction,
//! and the token size limit applied before any parsing.
//!
//! # Security
//!
//! - Tokens are size-checked BEFORE parsing (DoS prevention)
//! - Generic error messages prevent information leakage: the caller never
//!   learns whether a token was malformed, expired, or badly signed
//! - The `sub` and `email` fields in [`AccessClaims`] are redacted in
//!   Debug output

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// Constants
// =============================================================================

/// Maximum allowed JWT size in bytes (8KB).
///
/// Typical access tokens are 200-500 bytes. Anything larger is rejected
/// before base64 decoding or signature verification runs, so an oversized
/// token costs almost nothing to refuse.
pub const MAX_JWT_SIZE_BYTES: usize = 8192;

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur during token pre-validation.
///
/// All variants render the same message; detail is logged at debug level.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JwtValidationError {
    /// Token size exceeds maximum allowed.
    #[error("The access token is invalid or expired")]
    TokenTooLarge,

    /// Token format is invalid (not a valid JWT structure).
    #[error("The access token is invalid or expired")]
    MalformedToken,
}

// =============================================================================
// Claims
// =============================================================================

/// Access-token claims structure.
///
/// Issued on registration and login, presented as a bearer credential on
/// every authenticated call.
///
/// # Fields
///
/// - `sub`: Subject (user identifier)
/// - `email`: Email address of the authenticated user
/// - `iat`: Issued-at timestamp (Unix epoch seconds)
/// - `exp`: Expiration timestamp (Unix epoch seconds)
///
/// # Security
///
/// `sub` and `email` are redacted in Debug output so claims can appear in
/// tracing spans without leaking identifiers.
#[derive(Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject (user identifier) - redacted in Debug output.
    pub sub: String,

    /// Email of the authenticated user - redacted in Debug output.
    pub email: String,

    /// Issued-at timestamp (Unix epoch seconds).
    pub iat: i64,

    /// Expiration timestamp (Unix epoch seconds).
    pub exp: i64,
}

impl fmt::Debug for AccessClaims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessClaims")
            .field("sub", &"[REDACTED]")
            .field("email", &"[REDACTED]")
            .field("iat", &self.iat)
            .field("exp", &self.exp)
            .finish()
    }
}

impl AccessClaims {
    /// Creates a new `AccessClaims` instance.
    #[must_use]
    pub fn new(sub: String, email: String, iat: i64, exp: i64) -> Self {
        Self {
            sub,
            email,
            iat,
            exp,
        }
    }

}

// =============================================================================
// Functions
// =============================================================================

/// Extract the bearer token from an `Authorization` header value.
///
/// Returns `None` when the header does not use the `Bearer` scheme or the
/// token portion is empty. The scheme is matched exactly; `bearer` and
/// `BEARER` are rejected.
///
/// # Example
///
/// ```rust
/// use common::jwt::extract_bearer;
///
/// assert_eq!(extract_bearer("Bearer abc.def.ghi"), Some("abc.def.ghi"));
/// assert_eq!(extract_bearer("Basic dXNlcjpwYXNz"), None);
/// ```
#[must_use]
pub fn extract_bearer(header_value: &str) -> Option<&str> {
    header_value
        .strip_prefix("Bearer ")
        .filter(|token| !token.is_empty())
}

/// Pre-validate a token's shape before any cryptographic work.
///
/// Checks the size limit and the three-part `header.payload.signature`
/// structure. This does NOT validate the signature; the token must still be
/// verified afterwards.
///
/// # Errors
///
/// - `TokenTooLarge` - Token exceeds [`MAX_JWT_SIZE_BYTES`]
/// - `MalformedToken` - Token is not in three-part JWT form
pub fn check_token_shape(token: &str) -> Result<(), JwtValidationError> {
    if token.len() > MAX_JWT_SIZE_BYTES {
        tracing::debug!(
            target: "common.jwt",
            token_size = token.len(),
            max_size = MAX_JWT_SIZE_BYTES,
            "Token rejected: size exceeds maximum allowed"
        );
        return Err(JwtValidationError::TokenTooLarge);
    }

    let parts = token.split('.').count();
    if parts != 3 {
        tracing::debug!(
            target: "common.jwt",
            parts = parts,
            "Token rejected: invalid JWT format"
        );
        return Err(JwtValidationError::MalformedToken);
    }

    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
