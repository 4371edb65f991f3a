use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

pub struct MySqlTokenRepo {
    pool: MySqlPool,
}

impl MySqlTokenRepo {
    pub fn new(pool: MySqlPool) -> Self {
        MySqlTokenRepo { pool }
    }

    fn row_to_record(row: MySqlRow) -> Result<RefreshTokenRecord, AuthError> {
        let id: RefreshTokenId = row
            .try_get("id")
            .map_err(|e| AuthError::Store(e.to_string()))?;
        let user_id: UserId = row
            .try_get("user_id")
            .map_err(|e| AuthError::Store(e.to_string()))?;
        let secret_digest: String = row
            .try_get("secret_digest")
            .map_err(|e| AuthError::Store(e.to_string()))?;
        let issued_at: DateTime<Utc> = row
            .try_get("issued_at")
            .map_err(|e| AuthError::Store(e.to_string()))?;
        let expires_at: DateTime<Utc> = row
            .try_get("expires_at")
            .map_err(|e| AuthError::Store(e.to_string()))?;
        let client_ip: String = row
            .try_get("client_ip")
            .map_err(|e| AuthError::Store(e.to_string()))?;
        let used: bool = row
            .try_get("used")
            .map_err(|e| AuthError::Store(e.to_string()))?;

        Ok(RefreshTokenRecord {
            id,
            user_id,
            secret_digest,
            issued_at,
            expires_at,
            client_ip,
            used,
        })
    }
}

#[async_trait::async_trait]
impl TokenRepo for MySqlTokenRepo {
    async fn create_refresh_token(&self, token: NewRefreshToken) -> Result<(), AuthError> {
        let id = RefreshTokenId(Uuid::new_v4());

        sqlx::query(
            r#"
INSERT INTO refresh_token (id, user_id, secret_digest, issued_at, expires_at, client_ip, used)
VALUES (?, ?, ?, ?, ?, ?, FALSE)
"#,
        )
        .bind(id)
        .bind(token.user_id)
        .bind(&token.secret_digest)
        .bind(token.issued_at)
        .bind(token.expires_at)
        .bind(&token.client_ip)
        .execute(&self.pool)
        .await
        .map_err(|e| match e.as_database_error() {
            Some(db_err) if db_err.is_unique_violation() => AuthError::SessionAlreadyExists,
            _ => AuthError::Store(e.to_string()),
        })?;

        Ok(())
    }

    async fn list_refresh_tokens_by_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<RefreshTokenRecord>, AuthError> {
        let rows = sqlx::query(
            r#"
SELECT id, user_id, secret_digest, issued_at, expires_at, client_ip, used
FROM refresh_token
WHERE user_id = ?
"#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AuthError::Store(e.to_string()))?;

        rows.into_iter().map(Self::row_to_record).collect()
    }

    async fn mark_refresh_token_used(&self, id: RefreshTokenId) -> Result<u64, AuthError> {
        // Conditional update: the affected-row count is the arbiter between
        // concurrent refreshes racing on the same record.
        let result = sqlx::query(
            r#"
UPDATE refresh_token
SET used = TRUE
WHERE id = ? AND used = FALSE
"#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AuthError::Store(e.to_string()))?;

        Ok(result.rows_affected())
    }
}
