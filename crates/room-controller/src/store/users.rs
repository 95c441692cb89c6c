//! In-memory user directory.
//!
//! Accounts are keyed by id with a secondary email index. Passwords are
//! stored only as bcrypt hashes; the plaintext is read once at
//! registration/login and never retained.

use crate::errors::RcError;
use crate::models::User;
use chrono::Utc;
use common::secret::{ExposeSecret, SecretString};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
struct UserTable {
    by_id: HashMap<Uuid, User>,
    id_by_email: HashMap<String, Uuid>,
}

/// In-memory account registry supporting registration and login.
#[derive(Default)]
pub struct UserDirectory {
    inner: RwLock<UserTable>,
}

impl UserDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an account.
    ///
    /// # Errors
    ///
    /// - `RcError::Conflict` if the email is already registered
    /// - `RcError::Internal` if password hashing fails
    pub async fn register(
        &self,
        email: &str,
        password: &SecretString,
        name: &str,
    ) -> Result<User, RcError> {
        let password_hash =
            bcrypt::hash(password.expose_secret(), bcrypt::DEFAULT_COST).map_err(|e| {
                tracing::error!(target: "rc.store.users", error = %e, "Password hashing failed");
                RcError::Internal
            })?;

        let mut table = self.inner.write().await;

        if table.id_by_email.contains_key(email) {
            return Err(RcError::Conflict("User already exists".to_string()));
        }

        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            name: name.to_string(),
            password_hash,
            created_at: Utc::now(),
        };

        table.id_by_email.insert(user.email.clone(), user.id);
        table.by_id.insert(user.id, user.clone());

        tracing::info!(
            target: "rc.store.users",
            user_id = %user.id,
            "User registered"
        );

        Ok(user)
    }

    /// Verify a login attempt and return the account.
    ///
    /// # Errors
    ///
    /// - `RcError::Unauthenticated` when the email is unknown or the
    ///   password does not match the stored hash
    /// - `RcError::Internal` if hash verification itself fails
    pub async fn authenticate(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<User, RcError> {
        let user = {
            let table = self.inner.read().await;
            let id = table
                .id_by_email
                .get(email)
                .ok_or_else(|| RcError::Unauthenticated("User not found".to_string()))?;
            table
                .by_id
                .get(id)
                .cloned()
                .ok_or(RcError::Internal)?
        };

        let valid =
            bcrypt::verify(password.expose_secret(), &user.password_hash).map_err(|e| {
                tracing::error!(target: "rc.store.users", error = %e, "Password verification failed");
                RcError::Internal
            })?;

        if !valid {
            return Err(RcError::Unauthenticated("Invalid password".to_string()));
        }

        Ok(user)
    }
}
