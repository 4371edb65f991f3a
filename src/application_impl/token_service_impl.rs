use crate::application_port::*;
use crate::domain_model::UserId;
use crate::domain_port::{NewRefreshToken, RefreshTokenRecord, TokenRepo, UserRepo, WarningNotifier};
use chrono::{Duration, Utc};
use std::sync::Arc;
use tracing::{error, warn};

/// The rotation engine. Owns no durable state; every mutation goes through
/// the repos, and the only write on the refresh path is the conditional
/// mark-used.
pub struct RealTokenService {
    user_repo: Arc<dyn UserRepo>,
    token_repo: Arc<dyn TokenRepo>,
    token_codec: Arc<dyn TokenCodec>,
    secret_generator: Arc<dyn SecretGenerator>,
    notifier: Arc<dyn WarningNotifier>,
    refresh_ttl: Duration,
}

impl RealTokenService {
    pub fn new(
        user_repo: Arc<dyn UserRepo>,
        token_repo: Arc<dyn TokenRepo>,
        token_codec: Arc<dyn TokenCodec>,
        secret_generator: Arc<dyn SecretGenerator>,
        notifier: Arc<dyn WarningNotifier>,
        refresh_ttl: Duration,
    ) -> Self {
        Self {
            user_repo,
            token_repo,
            token_codec,
            secret_generator,
            notifier,
            refresh_ttl,
        }
    }

    /// Issue an access token and persist a fresh refresh record, both bound
    /// to `client_ip`. Shared tail of create and refresh.
    async fn issue_pair(&self, user_id: UserId, client_ip: &str) -> Result<TokenPair, AuthError> {
        let (access_token, access_exp) = self
            .token_codec
            .issue_access_token(user_id, client_ip)
            .await?;

        let secret = self.secret_generator.new_secret().await?;

        let issued_at = Utc::now();
        let expires_at = issued_at + self.refresh_ttl;
        self.token_repo
            .create_refresh_token(NewRefreshToken {
                user_id,
                secret_digest: secret.digest,
                issued_at,
                expires_at,
                client_ip: client_ip.to_string(),
            })
            .await?;

        Ok(TokenPair {
            access_token,
            refresh_token: secret.plaintext,
            access_token_expires_at: access_exp,
            refresh_token_expires_at: expires_at,
        })
    }

    /// Linear scan over the user's records. Digests are salted one-way
    /// hashes, so there is nothing to index on; active-session counts per
    /// user are small.
    async fn find_matching(
        &self,
        refresh_secret: &str,
        records: &[RefreshTokenRecord],
    ) -> Result<RefreshTokenRecord, AuthError> {
        for record in records {
            if self
                .secret_generator
                .matches(refresh_secret, &record.secret_digest)
                .await?
            {
                return Ok(record.clone());
            }
        }

        Err(AuthError::RefreshTokenNotFound)
    }
}

#[async_trait::async_trait]
impl TokenService for RealTokenService {
    async fn create_tokens(
        &self,
        user_id: UserId,
        client_ip: &str,
    ) -> Result<TokenPair, AuthError> {
        self.user_repo
            .get_user_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        self.issue_pair(user_id, client_ip).await
    }

    async fn refresh_tokens(
        &self,
        refresh_secret: &str,
        access_token: &str,
    ) -> Result<TokenPair, AuthError> {
        // An expired access token is the expected state here; only a broken
        // signature or malformed payload refuses the refresh outright.
        let parsed = self
            .token_codec
            .parse_access_token(&AccessToken(access_token.to_string()))
            .await?;
        let claims = parsed.claims();

        let user = self
            .user_repo
            .get_user_by_id(claims.sub)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let records = self
            .token_repo
            .list_refresh_tokens_by_user(claims.sub)
            .await?;
        if records.is_empty() {
            return Err(AuthError::NoSessionsFoundWithThisUserID);
        }

        let matched = self.find_matching(refresh_secret, &records).await?;

        if matched.used {
            return Err(AuthError::RefreshTokenAlreadyUsed);
        }
        if matched.expires_at < Utc::now() {
            return Err(AuthError::RefreshTokenExpired);
        }

        if claims.client_ip != matched.client_ip {
            warn!(
                target: "security",
                user_id = %claims.sub,
                presented_ip = %claims.client_ip,
                bound_ip = %matched.client_ip,
                "client ip changed between issuance and refresh"
            );
            // Advisory only: a failed delivery must not block the rotation.
            if let Err(e) = self
                .notifier
                .send_warning(
                    &user.email,
                    "Suspicious login",
                    &format!(
                        "Warning! Someone logged in from this IP: {}",
                        claims.client_ip
                    ),
                )
                .await
            {
                error!(
                    target: "security",
                    user_id = %user.user_id,
                    "sending warning email failed: {e}"
                );
            }
        }

        // The conditional update is the single gate against double-spend:
        // zero transitions means another refresh got here first.
        let transitioned = self.token_repo.mark_refresh_token_used(matched.id).await?;
        if transitioned == 0 {
            return Err(AuthError::RefreshTokenNotFound);
        }

        // The new record keeps the claims' IP, not the connecting peer's.
        // Rotation preserves the binding chosen at original issuance; the
        // mismatch check above is what flags a change.
        self.issue_pair(claims.sub, &claims.client_ip).await
    }
}
