use crate::application_port::*;
use crate::domain_model::*;

#[derive(Debug, Clone)]
pub struct UserRecord {
    pub user_id: UserId,
    pub email: String,
}

#[async_trait::async_trait]
pub trait UserRepo: Send + Sync {
    /// Fetch a user by id. `Ok(None)` means the user does not exist;
    /// `Err` is reserved for storage failures.
    async fn get_user_by_id(&self, user_id: UserId) -> Result<Option<UserRecord>, AuthError>;
}
