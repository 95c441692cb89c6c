//! HS256 access-token service.
//!
//! Issues and verifies the bearer credentials used by every authenticated
//! endpoint. Verification is pure: no shared state, no I/O.
//!
//! # Security
//!
//! - Token shape and size are checked before any cryptographic work
//! - Only HS256 is accepted during verification
//! - Every verification failure collapses into the same
//!   [`RcError::Unauthenticated`] message, so callers cannot distinguish
//!   malformed, expired, and badly signed tokens

use crate::errors::RcError;
use chrono::Utc;
use common::jwt::{check_token_shape, AccessClaims};
use common::secret::{ExposeSecret, SecretString};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

/// Credential validity window: 24 hours from issuance.
pub const TOKEN_VALIDITY_SECONDS: i64 = 24 * 60 * 60;

/// Message returned for every rejected credential, regardless of cause.
const REJECTION_MESSAGE: &str = "Invalid or expired token";

/// Issues and verifies HS256 access tokens.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenService {
    /// Build a token service from the configured signing secret.
    #[must_use]
    pub fn new(secret: &SecretString) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding_key: EncodingKey::from_secret(bytes),
            decoding_key: DecodingKey::from_secret(bytes),
        }
    }

    /// Issue a credential for a verified account.
    ///
    /// The validity window is fixed at [`TOKEN_VALIDITY_SECONDS`] from
    /// issuance time.
    ///
    /// # Errors
    ///
    /// Returns `RcError::Internal` if encoding fails.
    pub fn issue(&self, user_id: Uuid, email: &str) -> Result<String, RcError> {
        self.issue_at(user_id, email, Utc::now().timestamp())
    }

    /// Issue a credential with an explicit issuance time.
    ///
    /// Prefer [`TokenService::issue`] in production code. This variant
    /// exists so expiry boundaries can be unit-tested without wall-clock
    /// dependence.
    pub(crate) fn issue_at(
        &self,
        user_id: Uuid,
        email: &str,
        iat: i64,
    ) -> Result<String, RcError> {
        let claims = AccessClaims::new(
            user_id.to_string(),
            email.to_string(),
            iat,
            iat + TOKEN_VALIDITY_SECONDS,
        );

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!(target: "rc.auth", error = %e, "Failed to encode access token");
            RcError::Internal
        })
    }

    /// Verify a credential and extract its claims.
    ///
    /// # Errors
    ///
    /// Returns `RcError::Unauthenticated` with a uniform message for every
    /// failure cause: oversized, malformed, expired, or badly signed.
    pub fn verify(&self, token: &str) -> Result<AccessClaims, RcError> {
        check_token_shape(token).map_err(|e| {
            tracing::debug!(target: "rc.auth", error = %e, "Token failed shape pre-check");
            RcError::Unauthenticated(REJECTION_MESSAGE.to_string())
        })?;

        let validation = Validation::new(Algorithm::HS256);

        let data = decode::<AccessClaims>(token, &self.decoding_key, &validation).map_err(|e| {
            tracing::debug!(target: "rc.auth", error = %e, "Token verification failed");
            RcError::Unauthenticated(REJECTION_MESSAGE.to_string())
        })?;

        Ok(data.claims)
    }
}
