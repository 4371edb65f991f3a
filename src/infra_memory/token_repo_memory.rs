use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use dashmap::DashMap;
use uuid::Uuid;

#[derive(Default)]
pub struct MemoryTokenRepo {
    records: DashMap<RefreshTokenId, RefreshTokenRecord>,
}

impl MemoryTokenRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a record directly, bypassing digest uniqueness. Test hook.
    pub fn insert_record(&self, record: RefreshTokenRecord) {
        self.records.insert(record.id, record);
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }
}

#[async_trait::async_trait]
impl TokenRepo for MemoryTokenRepo {
    async fn create_refresh_token(&self, token: NewRefreshToken) -> Result<(), AuthError> {
        if self
            .records
            .iter()
            .any(|r| r.secret_digest == token.secret_digest)
        {
            return Err(AuthError::SessionAlreadyExists);
        }

        let id = RefreshTokenId(Uuid::new_v4());
        self.records.insert(
            id,
            RefreshTokenRecord {
                id,
                user_id: token.user_id,
                secret_digest: token.secret_digest,
                issued_at: token.issued_at,
                expires_at: token.expires_at,
                client_ip: token.client_ip,
                used: false,
            },
        );

        Ok(())
    }

    async fn list_refresh_tokens_by_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<RefreshTokenRecord>, AuthError> {
        Ok(self
            .records
            .iter()
            .filter(|r| r.user_id == user_id)
            .map(|r| r.clone())
            .collect())
    }

    async fn mark_refresh_token_used(&self, id: RefreshTokenId) -> Result<u64, AuthError> {
        // The entry guard holds the shard write lock for the whole
        // check-and-set, mirroring the SQL conditional update.
        match self.records.get_mut(&id) {
            Some(mut record) if !record.used => {
                record.used = true;
                Ok(1)
            }
            Some(_) => Ok(0),
            None => Ok(0),
        }
    }
}
