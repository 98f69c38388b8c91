//! Repository trait for API token authentication.

use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;

/// Access level attached to an API token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenRole {
    /// Full access: read and write.
    Admin,
    /// Read-only access: GET endpoints only.
    ReadOnly,
}

impl TokenRole {
    /// Stored representation of the role.
    pub const fn as_str(&self) -> &'static str {
        match self {
            TokenRole::Admin => "admin",
            TokenRole::ReadOnly => "readonly",
        }
    }

    /// Parses a stored representation into a role.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for any value other than `admin`
    /// or `readonly`.
    pub fn parse(value: &str) -> Result<Self, AppError> {
        match value {
            "admin" => Ok(TokenRole::Admin),
            "readonly" => Ok(TokenRole::ReadOnly),
            other => Err(AppError::bad_request(
                "Role must be admin or readonly",
                json!({ "role": other }),
            )),
        }
    }

    /// Returns true if this role permits mutating operations.
    pub fn can_write(&self) -> bool {
        matches!(self, TokenRole::Admin)
    }
}

impl std::fmt::Display for TokenRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// API token entity with metadata.
///
/// Only the HMAC-SHA256 hash of a token is stored; raw tokens are never
/// persisted.
#[derive(Debug, Clone)]
pub struct ApiToken {
    pub id: i64,
    pub name: String,
    pub token_hash: String,
    pub role: TokenRole,
    pub created_at: DateTime<Utc>,
    pub last_used_at: Option<DateTime<Utc>>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl ApiToken {
    /// Returns true if the token has been revoked.
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }
}

/// Repository interface for API token management.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgTokenRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryTokenRepository`] - in-process map
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Finds a non-revoked token by its hash.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(ApiToken))` if the hash matches a live token
    /// - `Ok(None)` if no match exists or the token is revoked
    async fn find_valid(&self, token_hash: &str) -> Result<Option<ApiToken>, AppError>;

    /// Updates the `last_used_at` timestamp for a token.
    ///
    /// Called after successful authentication for monitoring and audit.
    async fn update_last_used(&self, token_hash: &str) -> Result<(), AppError>;

    /// Creates a new API token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if a token with the same name or hash
    /// already exists.
    async fn create_token(
        &self,
        name: &str,
        token_hash: &str,
        role: TokenRole,
    ) -> Result<ApiToken, AppError>;

    /// Lists all tokens, newest first.
    async fn list_tokens(&self) -> Result<Vec<ApiToken>, AppError>;

    /// Finds a token by its database id.
    async fn find_by_id(&self, id: i64) -> Result<Option<ApiToken>, AppError>;

    /// Finds a token by its name.
    async fn find_by_name(&self, name: &str) -> Result<Option<ApiToken>, AppError>;

    /// Revokes a token, preventing further authentication.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the token does not exist or is
    /// already revoked.
    async fn revoke_token(&self, id: i64) -> Result<(), AppError>;
}
