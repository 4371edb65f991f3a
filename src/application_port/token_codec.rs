use super::{AccessToken, AuthError};
use crate::domain_model::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Claim set embedded in the signed access token. Never persisted;
/// reconstructed by parsing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    pub sub: UserId,
    pub client_ip: String,
    pub iat: i64,
    pub exp: i64,
}

/// Outcome of parsing a structurally valid access token.
///
/// `Expired` carries the claims so refresh can still read the claimed
/// identity and client IP; it is the expected state on the refresh path.
#[derive(Debug, Clone)]
pub enum ParsedAccessToken {
    Valid(AccessClaims),
    Expired(AccessClaims),
}

impl ParsedAccessToken {
    pub fn claims(&self) -> &AccessClaims {
        match self {
            ParsedAccessToken::Valid(claims) => claims,
            ParsedAccessToken::Expired(claims) => claims,
        }
    }
}

#[async_trait::async_trait]
pub trait TokenCodec: Send + Sync {
    async fn issue_access_token(
        &self,
        user_id: UserId,
        client_ip: &str,
    ) -> Result<(AccessToken, DateTime<Utc>), AuthError>;

    /// Verify signature and algorithm, then classify by expiry. Anything
    /// other than a well-formed token signed with the expected HMAC key
    /// fails with `ParsingAccessToken`.
    async fn parse_access_token(&self, token: &AccessToken)
    -> Result<ParsedAccessToken, AuthError>;
}
