//! Session identity and role gating.
//!
//! Mutating catalog operations require an admin role. Roles live in the
//! `user_roles` table and are checked per operation rather than cached,
//! so a revocation takes effect immediately.

use sqlx::Row;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::db::Database;

/// The role required for catalog mutations.
pub const ADMIN_ROLE: &str = "admin";

/// An authenticated caller. `None` models a signed-out session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Opaque identity of the signed-in user.
    pub user_id: String,
}

impl Session {
    /// Creates a session for the given user id.
    #[must_use]
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}

/// Authorization failures.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No session is present.
    #[error("not signed in\n  Suggestion: Sign in with an admin account and retry")]
    NotSignedIn,

    /// The session exists but lacks the admin role.
    #[error("user {user_id} does not have the admin role")]
    NotAdmin {
        /// The user that was refused.
        user_id: String,
    },

    /// The role lookup itself failed.
    #[error("role lookup failed: {message}")]
    Database {
        /// Driver error text.
        message: String,
    },
}

impl From<sqlx::Error> for AuthError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database {
            message: err.to_string(),
        }
    }
}

/// Role queries and grants over the `user_roles` table.
pub struct RoleStore {
    db: Database,
}

impl RoleStore {
    /// Creates a role store over the given database.
    #[must_use]
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Whether the user holds the given role.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Database`] if the lookup fails.
    #[instrument(skip(self))]
    pub async fn has_role(&self, user_id: &str, role: &str) -> Result<bool, AuthError> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM user_roles WHERE user_id = ? AND role = ?")
            .bind(user_id)
            .bind(role)
            .fetch_one(self.db.pool())
            .await?;
        let count: i64 = row.try_get("count")?;
        Ok(count > 0)
    }

    /// Grants a role to a user. Granting an already-held role is a
    /// no-op, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Database`] if the insert fails.
    #[instrument(skip(self))]
    pub async fn grant_role(&self, user_id: &str, role: &str) -> Result<(), AuthError> {
        sqlx::query("INSERT OR IGNORE INTO user_roles (user_id, role) VALUES (?, ?)")
            .bind(user_id)
            .bind(role)
            .execute(self.db.pool())
            .await?;
        debug!(user_id, role, "role granted");
        Ok(())
    }

    /// Requires an admin session, returning the verified session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NotSignedIn`] for an absent session and
    /// [`AuthError::NotAdmin`] when the user lacks the role.
    pub async fn ensure_admin(&self, session: Option<&Session>) -> Result<Session, AuthError> {
        let session = session.ok_or(AuthError::NotSignedIn)?;
        if self.has_role(&session.user_id, ADMIN_ROLE).await? {
            Ok(session.clone())
        } else {
            Err(AuthError::NotAdmin {
                user_id: session.user_id.clone(),
            })
        }
    }
}
