use super::{AuthError, RefreshSecret};

#[derive(Debug)]
pub struct GeneratedSecret {
    pub plaintext: RefreshSecret,
    /// Salted one-way digest in PHC string format, the only form that ever
    /// reaches the store.
    pub digest: String,
}

#[async_trait::async_trait]
pub trait SecretGenerator: Send + Sync {
    async fn new_secret(&self) -> Result<GeneratedSecret, AuthError>;

    /// Compare a presented plaintext against a stored digest through the
    /// hash function's own verification routine, never raw bytes.
    async fn matches(&self, plaintext: &str, digest: &str) -> Result<bool, AuthError>;
}
