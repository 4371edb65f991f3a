use crate::application_port::*;
use crate::domain_model::*;
use chrono::{DateTime, Utc};

/// One row per issued refresh credential. `client_ip` is immutable after
/// creation; `used` flips to true at most once.
#[derive(Debug, Clone)]
pub struct RefreshTokenRecord {
    pub id: RefreshTokenId,
    pub user_id: UserId,
    pub secret_digest: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub client_ip: String,
    pub used: bool,
}

#[derive(Debug, Clone)]
pub struct NewRefreshToken {
    pub user_id: UserId,
    pub secret_digest: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub client_ip: String,
}

#[async_trait::async_trait]
pub trait TokenRepo: Send + Sync {
    /// Insert a record with `used = false`. A uniqueness conflict on the
    /// digest surfaces as `SessionAlreadyExists`.
    async fn create_refresh_token(&self, token: NewRefreshToken) -> Result<(), AuthError>;

    /// All records for a user, in no particular order.
    async fn list_refresh_tokens_by_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<RefreshTokenRecord>, AuthError>;

    /// Conditionally flip `used` from false to true and report how many
    /// records actually transitioned. Must be atomic: a concurrent caller
    /// racing on the same record sees 0, never a double transition.
    async fn mark_refresh_token_used(&self, id: RefreshTokenId) -> Result<u64, AuthError>;
}
