use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use sqlx::MySqlPool;

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
    async fn id_exists(&self, user_id: UserId) -> Result<bool, FriendGraphError> {
        let count: i64 = sqlx::query_scalar(r#"SELECT COUNT(1) FROM users WHERE user_id = ?"#)
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| FriendGraphError::StoreUnavailable(format!("user exists: {e}")))?;

        Ok(count > 0)
    }
}
