use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use sqlx::mysql::MySqlRow;
use sqlx::{MySql, MySqlPool, QueryBuilder, Row};

const SELECT_ONE_HOP: &str = r#"
SELECT U.user_id, U.name
FROM users AS U
INNER JOIN friend_link AS FL
  ON U.user_id = FL.user2_id
WHERE FL.user1_id = "#;

const SELECT_TWO_HOP: &str = r#"
SELECT DISTINCT U.user_id, U.name
FROM users AS U
INNER JOIN friend_link AS FL
  ON U.user_id = FL.user2_id
INNER JOIN friend_link AS FL2
  ON FL.user1_id = FL2.user2_id
WHERE FL2.user1_id = "#;

pub struct MySqlFriendGraphRepo {
    pool: MySqlPool,
}

impl MySqlFriendGraphRepo {
    pub fn new(pool: MySqlPool) -> Self {
        MySqlFriendGraphRepo { pool }
    }

    fn row_to_friend(row: &MySqlRow) -> Result<Friend, FriendGraphError> {
        let user_id = row
            .try_get::<UserId, _>("user_id")
            .map_err(|e| FriendGraphError::StoreUnavailable(format!("decode user_id: {e}")))?;
        let name = row
            .try_get::<String, _>("name")
            .map_err(|e| FriendGraphError::StoreUnavailable(format!("decode name: {e}")))?;

        Ok(Friend { user_id, name })
    }

    /// Appends `AND <column> NOT IN (?, ?, ...)` with one bound parameter per id.
    fn push_not_in(qb: &mut QueryBuilder<'_, MySql>, column: &str, exclude: &ExclusionSet) {
        qb.push(" AND ").push(column).push(" NOT IN (");
        let mut ids = qb.separated(", ");
        for id in exclude.iter() {
            ids.push_bind(*id);
        }
        qb.push(")");
    }

    /// One-hop rows, filtered by `exclude` when given.
    fn one_hop_query(
        user_id: UserId,
        exclude: Option<&ExclusionSet>,
    ) -> QueryBuilder<'static, MySql> {
        let mut qb = QueryBuilder::<MySql>::new(SELECT_ONE_HOP);
        qb.push_bind(user_id);
        if let Some(exclude) = exclude {
            Self::push_not_in(&mut qb, "U.user_id", exclude);
        }
        qb.push(" ORDER BY U.user_id ASC");
        qb
    }

    /// Distinct two-hop rows; the window goes after the ordering.
    fn two_hop_query(
        user_id: UserId,
        exclude: &ExclusionSet,
        page: Option<Page>,
    ) -> QueryBuilder<'static, MySql> {
        let mut qb = QueryBuilder::<MySql>::new(SELECT_TWO_HOP);
        qb.push_bind(user_id);
        Self::push_not_in(&mut qb, "U.user_id", exclude);
        qb.push(" ORDER BY U.user_id ASC");
        if let Some(page) = page {
            qb.push(" LIMIT ")
                .push_bind(page.limit as i64)
                .push(" OFFSET ")
                .push_bind(page.offset as i64);
        }
        qb
    }

    async fn fetch_friends(
        &self,
        mut qb: QueryBuilder<'_, MySql>,
        what: &str,
    ) -> Result<Vec<Friend>, FriendGraphError> {
        let rows = qb
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| FriendGraphError::StoreUnavailable(format!("{what}: {e}")))?;

        rows.iter().map(Self::row_to_friend).collect()
    }
}

#[async_trait::async_trait]
impl FriendGraphRepo for MySqlFriendGraphRepo {
    async fn one_hop_friend_ids(&self, user_id: UserId) -> Result<Vec<UserId>, FriendGraphError> {
        sqlx::query_scalar::<_, UserId>("SELECT user2_id FROM friend_link WHERE user1_id = ?")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| FriendGraphError::StoreUnavailable(format!("select one-hop ids: {e}")))
    }

    async fn blocked_user_ids(&self, user_id: UserId) -> Result<Vec<UserId>, FriendGraphError> {
        sqlx::query_scalar::<_, UserId>("SELECT user2_id FROM block_list WHERE user1_id = ?")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| FriendGraphError::StoreUnavailable(format!("select blocked ids: {e}")))
    }

    async fn friends(&self, user_id: UserId) -> Result<Vec<Friend>, FriendGraphError> {
        let qb = Self::one_hop_query(user_id, None);
        self.fetch_friends(qb, "select friends").await
    }

    async fn friends_excluding(
        &self,
        user_id: UserId,
        exclude: &ExclusionSet,
    ) -> Result<Vec<Friend>, FriendGraphError> {
        require_exclusions(exclude)?;

        let qb = Self::one_hop_query(user_id, Some(exclude));
        self.fetch_friends(qb, "select friends excluding").await
    }

    async fn two_hop_friends_excluding(
        &self,
        user_id: UserId,
        exclude: &ExclusionSet,
        page: Option<Page>,
    ) -> Result<Vec<Friend>, FriendGraphError> {
        require_exclusions(exclude)?;

        let qb = Self::two_hop_query(user_id, exclude, page);
        self.fetch_friends(qb, "select two-hop friends").await
    }
}
