use super::FriendGraphResolver;
use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use crate::logger::*;
use std::sync::Arc;

pub struct RealFriendListService {
    user_repo: Arc<dyn UserRepo>,
    link_repo: Arc<dyn LinkRepo>,
    resolver: FriendGraphResolver,
}

impl RealFriendListService {
    pub fn new(
        user_repo: Arc<dyn UserRepo>,
        graph_repo: Arc<dyn FriendGraphRepo>,
        link_repo: Arc<dyn LinkRepo>,
    ) -> Self {
        Self {
            user_repo,
            link_repo,
            resolver: FriendGraphResolver::new(graph_repo),
        }
    }

    async fn ensure_user_exists(&self, user_id: UserId) -> Result<(), FriendGraphError> {
        if self.user_repo.id_exists(user_id).await? {
            Ok(())
        } else {
            debug!(%user_id, "user not exist");
            Err(FriendGraphError::UserNotFound)
        }
    }
}

#[async_trait::async_trait]
impl FriendListService for RealFriendListService {
    async fn get_friend_list(&self, user_id: UserId) -> Result<FriendList, FriendGraphError> {
        self.ensure_user_exists(user_id).await?;
        self.resolver.get_friend_list(user_id).await
    }

    async fn get_friend_of_friend_list(
        &self,
        user_id: UserId,
    ) -> Result<FriendList, FriendGraphError> {
        self.ensure_user_exists(user_id).await?;
        self.resolver.get_friend_of_friend_list(user_id).await
    }

    async fn get_friend_of_friend_list_paged(
        &self,
        user_id: UserId,
        page: Page,
    ) -> Result<FriendList, FriendGraphError> {
        self.ensure_user_exists(user_id).await?;
        self.resolver
            .get_friend_of_friend_list_paged(user_id, page)
            .await
    }

    async fn post_user_link(&self, link: UserLink) -> Result<LinkClaim, FriendGraphError> {
        if link.user1_id == link.user2_id {
            return Err(FriendGraphError::InvalidArgument(format!(
                "cannot link user {} to itself",
                link.user1_id
            )));
        }

        let claim = self.link_repo.upsert_link(link).await?;
        info!(
            user1_id = %link.user1_id,
            user2_id = %link.user2_id,
            table = %link.kind,
            ?claim,
            "user link upserted"
        );
        Ok(claim)
    }
}
