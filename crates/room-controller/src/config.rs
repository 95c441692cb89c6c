//! Room Controller configuration.
//!
//! Configuration is loaded from environment variables. The JWT signing
//! secret is held in a `SecretString` and redacted in Debug output.

use common::secret::SecretString;
use std::collections::HashMap;
use std::env;
use std::fmt;
use thiserror::Error;

/// Minimum accepted JWT secret length in bytes.
///
/// HS256 secrets shorter than the hash output weaken the MAC, so short
/// values are rejected at startup rather than silently accepted.
pub const MIN_JWT_SECRET_BYTES: usize = 32;

/// Default request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;

/// Room Controller configuration.
///
/// Loaded from environment variables with sensible defaults.
#[derive(Clone)]
pub struct Config {
    /// Server bind address (default: "0.0.0.0:8080").
    pub bind_address: String,

    /// HS256 signing secret for access tokens.
    pub jwt_secret: SecretString,

    /// Per-request timeout applied at the HTTP layer.
    pub request_timeout_seconds: u64,
}

/// Custom Debug implementation that redacts the signing secret.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("bind_address", &self.bind_address)
            .field("jwt_secret", &"[REDACTED]")
            .field("request_timeout_seconds", &self.request_timeout_seconds)
            .finish()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid JWT secret configuration: {0}")]
    InvalidJwtSecret(String),

    #[error("Invalid request timeout configuration: {0}")]
    InvalidRequestTimeout(String),
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when `RC_JWT_SECRET` is missing or too short,
    /// or when an override value fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a HashMap (for testing).
    ///
    /// # Errors
    ///
    /// Same conditions as [`Config::from_env`].
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let bind_address = vars
            .get("RC_BIND_ADDRESS")
            .cloned()
            .unwrap_or_else(|| "0.0.0.0:8080".to_string());

        let jwt_secret = vars
            .get("RC_JWT_SECRET")
            .ok_or_else(|| ConfigError::MissingEnvVar("RC_JWT_SECRET".to_string()))?;

        if jwt_secret.len() < MIN_JWT_SECRET_BYTES {
            return Err(ConfigError::InvalidJwtSecret(format!(
                "RC_JWT_SECRET must be at least {} bytes, got {}",
                MIN_JWT_SECRET_BYTES,
                jwt_secret.len()
            )));
        }

        let request_timeout_seconds =
            if let Some(value_str) = vars.get("RC_REQUEST_TIMEOUT_SECONDS") {
                let value: u64 = value_str.parse().map_err(|e| {
                    ConfigError::InvalidRequestTimeout(format!(
                        "RC_REQUEST_TIMEOUT_SECONDS must be a valid positive integer, got '{}': {}",
                        value_str, e
                    ))
                })?;

                if value == 0 {
                    return Err(ConfigError::InvalidRequestTimeout(
                        "RC_REQUEST_TIMEOUT_SECONDS must be greater than 0".to_string(),
                    ));
                }

                value
            } else {
                DEFAULT_REQUEST_TIMEOUT_SECONDS
            };

        Ok(Config {
            bind_address,
            jwt_secret: SecretString::from(jwt_secret.clone()),
            request_timeout_seconds,
        })
    }
}
