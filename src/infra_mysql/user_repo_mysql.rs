use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use sqlx::{MySqlPool, Row};

pub struct MySqlUserRepo {
    pool: MySqlPool,
}

impl MySqlUserRepo {
    pub fn new(pool: MySqlPool) -> Self {
        MySqlUserRepo { pool }
    }
}

#[async_trait::async_trait]
impl UserRepo for MySqlUserRepo {
    async fn get_user_by_id(&self, user_id: UserId) -> Result<Option<UserRecord>, AuthError> {
        let row_opt = sqlx::query(
            r#"
SELECT user_id, email
FROM user
WHERE user_id = ?
"#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::Store(e.to_string()))?;

        let Some(row) = row_opt else {
            return Ok(None);
        };

        Ok(Some(UserRecord {
            user_id: row
                .try_get("user_id")
                .map_err(|e| AuthError::Store(e.to_string()))?,
            email: row
                .try_get("email")
                .map_err(|e| AuthError::Store(e.to_string()))?,
        }))
    }
}
