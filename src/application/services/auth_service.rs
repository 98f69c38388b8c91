//! Authentication service for API token validation.

use std::sync::Arc;

use serde_json::json;

use crate::domain::repositories::{TokenRepository, TokenRole};
use crate::error::AppError;
use crate::utils::token::hash_token;

/// Identity of an authenticated caller, attached to the request after the
/// auth middleware runs.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub token_name: String,
    pub role: TokenRole,
}

impl AuthContext {
    /// Ensures the caller is allowed to mutate the inventory.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Forbidden`] for read-only tokens.
    pub fn require_write(&self) -> Result<(), AppError> {
        if self.role.can_write() {
            Ok(())
        } else {
            Err(AppError::forbidden(
                "This token does not permit write operations",
                json!({ "role": self.role.as_str() }),
            ))
        }
    }
}

/// Service for authenticating API requests via Bearer tokens.
///
/// Tokens are hashed with HMAC-SHA256 (keyed by `signing_secret`) before
/// storage and comparison, so raw tokens never touch the database.
pub struct AuthService {
    repository: Arc<dyn TokenRepository>,
    signing_secret: String,
}

impl AuthService {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `repository` - token repository for lookups
    /// - `signing_secret` - HMAC key; must match the value used when tokens were created
    pub fn new(repository: Arc<dyn TokenRepository>, signing_secret: String) -> Self {
        Self {
            repository,
            signing_secret,
        }
    }

    /// Authenticates a raw token against stored credentials.
    ///
    /// On success, updates the token's `last_used_at` timestamp (best
    /// effort) and returns the caller's identity.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token hash does not match
    /// any live credentials, or the token has been revoked.
    pub async fn authenticate(&self, token: &str) -> Result<AuthContext, AppError> {
        let token_hash = hash_token(&self.signing_secret, token);

        let api_token = self
            .repository
            .find_valid(&token_hash)
            .await?
            .ok_or_else(|| {
                AppError::unauthorized(
                    "Unauthorized",
                    json!({ "reason": "Invalid or revoked token" }),
                )
            })?;

        if let Err(err) = self.repository.update_last_used(&token_hash).await {
            tracing::warn!(error = %err, token = %api_token.name, "Failed to update last_used_at");
        }

        Ok(AuthContext {
            token_name: api_token.name,
            role: api_token.role,
        })
    }
}
