use crate::application_port::*;
use crate::domain_model::*;

#[async_trait::async_trait]
pub trait LinkRepo: Send + Sync {
    /// Inserts the edge unless it is already present. Concurrent callers with
    /// the same edge produce at most one row; exactly one of them sees
    /// [`LinkClaim::Created`].
    async fn upsert_link(&self, link: UserLink) -> Result<LinkClaim, FriendGraphError>;
}
