use crate::application_port::*;
use crate::domain_model::UserId;
use chrono::{Duration, Utc};

#[derive(Debug)]
pub struct FakeTokenService;

impl FakeTokenService {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FakeTokenService {
    fn default() -> Self {
        Self::new()
    }
}

// Minimal fake implementation for basic use only.
// Extend to simulate more error cases and configurable responses when needed.
#[async_trait::async_trait]
impl TokenService for FakeTokenService {
    async fn create_tokens(
        &self,
        user_id: UserId,
        client_ip: &str,
    ) -> Result<TokenPair, AuthError> {
        Ok(get_fake_pair(user_id, client_ip))
    }

    async fn refresh_tokens(
        &self,
        refresh_secret: &str,
        _access_token: &str,
    ) -> Result<TokenPair, AuthError> {
        if let Some(rest) = refresh_secret.strip_prefix("fake-refresh-secret:") {
            let (user_id, client_ip) = rest
                .split_once(':')
                .ok_or(AuthError::RefreshTokenNotFound)?;
            let user_id = user_id
                .parse::<UserId>()
                .map_err(|_| AuthError::RefreshTokenNotFound)?;
            Ok(get_fake_pair(user_id, client_ip))
        } else {
            Err(AuthError::RefreshTokenNotFound)
        }
    }
}

fn get_fake_pair(user_id: UserId, client_ip: &str) -> TokenPair {
    let now = Utc::now();
    TokenPair {
        access_token: AccessToken(format!("fake-access-token:{}:{}", user_id, client_ip)),
        refresh_token: RefreshSecret(format!("fake-refresh-secret:{}:{}", user_id, client_ip)),
        access_token_expires_at: now + Duration::minutes(20),
        refresh_token_expires_at: now + Duration::days(7),
    }
}
