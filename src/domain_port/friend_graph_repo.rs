use crate::application_port::*;
use crate::domain_model::*;

/// Read-side primitives over `friend_link`, `block_list` and `users`.
///
/// Row-returning queries inner-join `users`: an edge whose target has no
/// user row is never reported. Rows come back in ascending `user_id` order.
#[async_trait::async_trait]
pub trait FriendGraphRepo: Send + Sync {
    /// Targets of every `friend_link` edge leaving `user_id`.
    async fn one_hop_friend_ids(&self, user_id: UserId) -> Result<Vec<UserId>, FriendGraphError>;

    /// Targets of every `block_list` edge leaving `user_id`.
    async fn blocked_user_ids(&self, user_id: UserId) -> Result<Vec<UserId>, FriendGraphError>;

    /// Full rows for the one-hop friends, unfiltered.
    async fn friends(&self, user_id: UserId) -> Result<Vec<Friend>, FriendGraphError>;

    /// One-hop friends whose id is not in `exclude`. `exclude` must be non-empty.
    async fn friends_excluding(
        &self,
        user_id: UserId,
        exclude: &ExclusionSet,
    ) -> Result<Vec<Friend>, FriendGraphError>;

    /// Distinct users two `friend_link` hops away whose id is not in `exclude`,
    /// optionally windowed. `exclude` must be non-empty.
    async fn two_hop_friends_excluding(
        &self,
        user_id: UserId,
        exclude: &ExclusionSet,
        page: Option<Page>,
    ) -> Result<Vec<Friend>, FriendGraphError>;
}

/// An empty `NOT IN` list has no finite form, so the excluding queries refuse it.
pub fn require_exclusions(exclude: &ExclusionSet) -> Result<(), FriendGraphError> {
    if exclude.is_empty() {
        return Err(FriendGraphError::InvalidArgument(
            "exclusion set must not be empty".to_string(),
        ));
    }
    Ok(())
}
