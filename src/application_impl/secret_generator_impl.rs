use crate::application_port::*;
use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use nanoid::nanoid;

/// 43 chars of the URL-safe nanoid alphabet carry just over 256 bits of
/// CSPRNG entropy.
const SECRET_LEN: usize = 43;

pub struct Argon2SecretGenerator;

impl Argon2SecretGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for Argon2SecretGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl SecretGenerator for Argon2SecretGenerator {
    async fn new_secret(&self) -> Result<GeneratedSecret, AuthError> {
        let plaintext = nanoid!(SECRET_LEN);

        let salt = SaltString::generate(&mut OsRng);
        let digest = Argon2::default()
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| AuthError::InternalError(e.to_string()))?
            .to_string();

        Ok(GeneratedSecret {
            plaintext: RefreshSecret(plaintext),
            digest,
        })
    }

    async fn matches(&self, plaintext: &str, digest: &str) -> Result<bool, AuthError> {
        let parsed = PasswordHash::new(digest)
            .map_err(|e| AuthError::InternalError(format!("invalid PHC digest: {}", e)))?;

        match Argon2::default().verify_password(plaintext.as_bytes(), &parsed) {
            Ok(_) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AuthError::InternalError(format!("verify error: {}", e))),
        }
    }
}
