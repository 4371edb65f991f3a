use crate::domain_model::UserId;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Closed set of failure reasons crossing the service boundary.
///
/// The first seven variants are domain errors the caller can act on; `Store`
/// and `InternalError` are infrastructure failures and map to 5xx at the
/// transport layer.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("user not found")]
    UserNotFound,
    #[error("session with this refresh token and user id already exists")]
    SessionAlreadyExists,
    #[error("error parsing access token")]
    ParsingAccessToken,
    #[error("refresh token not found")]
    RefreshTokenNotFound,
    #[error("refresh token already used")]
    RefreshTokenAlreadyUsed,
    #[error("refresh token expired")]
    RefreshTokenExpired,
    #[error("no sessions found with this user id")]
    NoSessionsFoundWithThisUserID,
    #[error("store error: {0}")]
    Store(String),
    #[error("internal error: {0}")]
    InternalError(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct AccessToken(pub String);

/// Plaintext refresh secret. Exists only in memory and in the response to
/// the caller; the store only ever sees its digest.
#[derive(Debug, Clone, Serialize)]
pub struct RefreshSecret(pub String);

#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub access_token: AccessToken,
    pub refresh_token: RefreshSecret,
    pub access_token_expires_at: DateTime<Utc>,
    pub refresh_token_expires_at: DateTime<Utc>,
}

#[async_trait::async_trait]
pub trait TokenService: Send + Sync {
    /// Issue a fresh token pair for an existing user, bound to `client_ip`.
    async fn create_tokens(&self, user_id: UserId, client_ip: &str)
    -> Result<TokenPair, AuthError>;

    /// Exchange a refresh secret plus the access token it was issued with
    /// for a new pair, consuming the secret. The access token may be expired
    /// as long as its signature verifies.
    async fn refresh_tokens(
        &self,
        refresh_secret: &str,
        access_token: &str,
    ) -> Result<TokenPair, AuthError>;
}
