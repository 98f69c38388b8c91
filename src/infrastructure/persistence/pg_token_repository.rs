//! PostgreSQL implementation of the token repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::repositories::{ApiToken, TokenRepository, TokenRole};
use crate::error::AppError;
use serde_json::json;

#[derive(sqlx::FromRow)]
struct TokenRow {
    id: i64,
    name: String,
    token_hash: String,
    role: String,
    created_at: DateTime<Utc>,
    last_used_at: Option<DateTime<Utc>>,
    revoked_at: Option<DateTime<Utc>>,
}

impl TryFrom<TokenRow> for ApiToken {
    type Error = AppError;

    fn try_from(row: TokenRow) -> Result<Self, Self::Error> {
        let role = TokenRole::parse(&row.role).map_err(|_| {
            AppError::internal(
                "Stored token has invalid role",
                json!({ "id": row.id, "role": row.role }),
            )
        })?;

        Ok(ApiToken {
            id: row.id,
            name: row.name,
            token_hash: row.token_hash,
            role,
            created_at: row.created_at,
            last_used_at: row.last_used_at,
            revoked_at: row.revoked_at,
        })
    }
}

const TOKEN_COLUMNS: &str = "id, name, token_hash, role, created_at, last_used_at, revoked_at";

/// PostgreSQL repository for API token storage and validation.
///
/// Stores hashed tokens only; raw tokens are never persisted.
pub struct PgTokenRepository {
    pool: Arc<PgPool>,
}

impl PgTokenRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TokenRepository for PgTokenRepository {
    async fn find_valid(&self, token_hash: &str) -> Result<Option<ApiToken>, AppError> {
        let row = sqlx::query_as::<_, TokenRow>(&format!(
            "SELECT {TOKEN_COLUMNS} FROM api_tokens WHERE token_hash = $1 AND revoked_at IS NULL"
        ))
        .bind(token_hash)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(ApiToken::try_from).transpose()
    }

    async fn update_last_used(&self, token_hash: &str) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE api_tokens SET last_used_at = NOW() WHERE token_hash = $1 AND revoked_at IS NULL",
        )
        .bind(token_hash)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn create_token(
        &self,
        name: &str,
        token_hash: &str,
        role: TokenRole,
    ) -> Result<ApiToken, AppError> {
        let row = sqlx::query_as::<_, TokenRow>(&format!(
            r#"
            INSERT INTO api_tokens (name, token_hash, role)
            VALUES ($1, $2, $3)
            RETURNING {TOKEN_COLUMNS}
            "#
        ))
        .bind(name)
        .bind(token_hash)
        .bind(role.as_str())
        .fetch_one(self.pool.as_ref())
        .await?;

        row.try_into()
    }

    async fn list_tokens(&self) -> Result<Vec<ApiToken>, AppError> {
        let rows = sqlx::query_as::<_, TokenRow>(&format!(
            "SELECT {TOKEN_COLUMNS} FROM api_tokens ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.into_iter().map(ApiToken::try_from).collect()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ApiToken>, AppError> {
        let row = sqlx::query_as::<_, TokenRow>(&format!(
            "SELECT {TOKEN_COLUMNS} FROM api_tokens WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(ApiToken::try_from).transpose()
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<ApiToken>, AppError> {
        let row = sqlx::query_as::<_, TokenRow>(&format!(
            "SELECT {TOKEN_COLUMNS} FROM api_tokens WHERE name = $1"
        ))
        .bind(name)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(ApiToken::try_from).transpose()
    }

    async fn revoke_token(&self, id: i64) -> Result<(), AppError> {
        let result =
            sqlx::query("UPDATE api_tokens SET revoked_at = NOW() WHERE id = $1 AND revoked_at IS NULL")
                .bind(id)
                .execute(self.pool.as_ref())
                .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                "Token not found or already revoked",
                json!({ "id": id }),
            ));
        }

        Ok(())
    }
}
