use super::util::is_dup_key;
use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use sqlx::MySqlPool;

pub struct MySqlLinkRepo {
    pool: MySqlPool,
}

impl MySqlLinkRepo {
    pub fn new(pool: MySqlPool) -> Self {
        MySqlLinkRepo { pool }
    }
}

#[async_trait::async_trait]
impl LinkRepo for MySqlLinkRepo {
    // Both tables carry UNIQUE (user1_id, user2_id); the loser of a race gets ER_DUP_ENTRY.
    async fn upsert_link(&self, link: UserLink) -> Result<LinkClaim, FriendGraphError> {
        let sql = match link.kind {
            LinkKind::Friend => "INSERT INTO friend_link (user1_id, user2_id) VALUES (?, ?)",
            LinkKind::Block => "INSERT INTO block_list (user1_id, user2_id) VALUES (?, ?)",
        };

        let res = sqlx::query(sql)
            .bind(link.user1_id)
            .bind(link.user2_id)
            .execute(&self.pool)
            .await;

        match res {
            Ok(_) => Ok(LinkClaim::Created),
            Err(e) if is_dup_key(&e) => Ok(LinkClaim::Existing),
            Err(e) => Err(FriendGraphError::StoreUnavailable(format!(
                "{} insert: {e}",
                link.kind
            ))),
        }
    }
}
