use crate::application_port::*;
use crate::domain_model::UserId;
use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub access_ttl: Duration,
    pub signing_key: Vec<u8>,
}

/// HMAC-SHA512 access-token codec over a process-wide key.
pub struct JwtHs512Codec {
    access_ttl: Duration,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtHs512Codec {
    pub fn new(cfg: JwtConfig) -> Self {
        JwtHs512Codec {
            access_ttl: cfg.access_ttl,
            encoding_key: EncodingKey::from_secret(&cfg.signing_key),
            decoding_key: DecodingKey::from_secret(&cfg.signing_key),
        }
    }

    fn validation() -> Validation {
        // Expiry is classified manually so that an expired-but-authentic
        // token still yields its claims. Pinning the algorithm rejects
        // anything signed outside the HS512 family.
        let mut v = Validation::new(Algorithm::HS512);
        v.validate_exp = false;
        v.validate_aud = false;
        v
    }
}

#[async_trait::async_trait]
impl TokenCodec for JwtHs512Codec {
    async fn issue_access_token(
        &self,
        user_id: UserId,
        client_ip: &str,
    ) -> Result<(AccessToken, DateTime<Utc>), AuthError> {
        let iat_dt = Utc::now();
        let exp_dt = iat_dt + self.access_ttl;
        let claims = AccessClaims {
            sub: user_id,
            client_ip: client_ip.to_string(),
            iat: iat_dt.timestamp(),
            exp: exp_dt.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS512), &claims, &self.encoding_key)
            .map_err(|e| AuthError::InternalError(e.to_string()))?;

        Ok((AccessToken(token), exp_dt))
    }

    async fn parse_access_token(
        &self,
        token: &AccessToken,
    ) -> Result<ParsedAccessToken, AuthError> {
        let data = decode::<AccessClaims>(&token.0, &self.decoding_key, &Self::validation())
            .map_err(|_| AuthError::ParsingAccessToken)?;

        let claims = data.claims;
        if claims.exp < Utc::now().timestamp() {
            Ok(ParsedAccessToken::Expired(claims))
        } else {
            Ok(ParsedAccessToken::Valid(claims))
        }
    }
}
