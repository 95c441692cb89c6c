//! Secret types for protecting sensitive values from accidental logging.
//!
//! Re-exports from the [`secrecy`] crate. Use [`SecretString`] for every
//! sensitive value that passes through the service: the JWT signing secret,
//! user passwords arriving in request bodies, and issued bearer tokens.
//!
//! `SecretString` implements `Debug` with redaction, so any struct that
//! derives `Debug` while holding one gets safe logging for free, and the
//! inner value is zeroized on drop. Reading the value requires an explicit
//! `expose_secret()` call, which keeps accesses easy to audit.
//!
//! # Example
//!
//! ```rust
//! use common::secret::SecretString;
//! use secrecy::ExposeSecret;
//!
//! #[derive(Debug)]
//! struct LoginRequest {
//!     email: String,
//!     password: SecretString,
//! }
//!
//! let req = LoginRequest {
//!     email: "alice@example.com".to_string(),
//!     password: SecretString::from("hunter2"),
//! };
//!
//! // Safe: password renders as [REDACTED]
//! println!("{:?}", req);
//!
//! let password: &str = req.password.expose_secret();
//! ```

// Re-export the main types from secrecy
pub use secrecy::{ExposeSecret, SecretBox, SecretString};

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[test]
    fn test_debug_is_redacted() {
        let secret = SecretString::from("hunter2");
        let debug_str = format!("{secret:?}");

        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains("hunter2"));
    }

    #[test]
    fn test_expose_secret_returns_inner_value() {
        let secret = SecretString::from("password123");
        assert_eq!(secret.expose_secret(), "password123");
    }

    #[test]
    fn test_deserialized_secret_is_redacted() {
        #[derive(Debug, Deserialize)]
        struct Credentials {
            email: String,
            password: SecretString,
        }

        let json = r#"{"email": "alice@example.com", "password": "super-secret"}"#;
        let creds: Credentials =
            serde_json::from_str(json).unwrap_or_else(|_| unreachable!("valid fixture"));

        let debug_str = format!("{creds:?}");
        assert!(debug_str.contains("alice@example.com"));
        assert!(!debug_str.contains("super-secret"));
    }
}
