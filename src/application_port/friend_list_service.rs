use crate::domain_model::*;

#[derive(Debug, thiserror::Error)]
pub enum FriendGraphError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("user not exist")]
    UserNotFound,
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
}

/// Usecase boundary consumed by the HTTP layer. Every read checks that the
/// subject exists before touching the friend graph.
#[async_trait::async_trait]
pub trait FriendListService: Send + Sync {
    async fn get_friend_list(&self, user_id: UserId) -> Result<FriendList, FriendGraphError>;

    async fn get_friend_of_friend_list(
        &self,
        user_id: UserId,
    ) -> Result<FriendList, FriendGraphError>;

    async fn get_friend_of_friend_list_paged(
        &self,
        user_id: UserId,
        page: Page,
    ) -> Result<FriendList, FriendGraphError>;

    async fn post_user_link(&self, link: UserLink) -> Result<LinkClaim, FriendGraphError>;
}
