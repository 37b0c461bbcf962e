use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use crate::logger::*;
use std::sync::Arc;

/// Composes the graph primitives into direct and friend-of-friend lists.
///
/// Each call issues its reads one after another without a transaction. A
/// write to `friend_link` or `block_list` that lands between two of those
/// reads is seen by the later reads only, so a result may mix two states of
/// the graph. Nothing is cached between calls.
pub struct FriendGraphResolver {
    graph_repo: Arc<dyn FriendGraphRepo>,
}

impl FriendGraphResolver {
    pub fn new(graph_repo: Arc<dyn FriendGraphRepo>) -> Self {
        FriendGraphResolver { graph_repo }
    }

    /// One-hop friends minus everyone the subject has blocked.
    pub async fn get_friend_list(&self, user_id: UserId) -> Result<FriendList, FriendGraphError> {
        let blocked = self.graph_repo.blocked_user_ids(user_id).await?;

        // the excluding query cannot take an empty set
        if blocked.is_empty() {
            let friends = self.graph_repo.friends(user_id).await?;
            return Ok(FriendList::from(friends));
        }

        let exclude: ExclusionSet = blocked.into_iter().collect();
        debug!(%user_id, excluded = exclude.len(), "friend list with block filter");

        let friends = self
            .graph_repo
            .friends_excluding(user_id, &exclude)
            .await?;
        Ok(FriendList::from(friends))
    }

    /// Users two hops away, never including a direct friend, a blocked user or
    /// the subject.
    pub async fn get_friend_of_friend_list(
        &self,
        user_id: UserId,
    ) -> Result<FriendList, FriendGraphError> {
        let Some(exclude) = self.two_hop_exclusions(user_id).await? else {
            return Ok(FriendList::empty());
        };

        let friends = self
            .graph_repo
            .two_hop_friends_excluding(user_id, &exclude, None)
            .await?;
        Ok(FriendList::from(friends))
    }

    /// Windowed [`Self::get_friend_of_friend_list`], ordered by ascending id.
    pub async fn get_friend_of_friend_list_paged(
        &self,
        user_id: UserId,
        page: Page,
    ) -> Result<FriendList, FriendGraphError> {
        if !page.is_valid() {
            return Err(FriendGraphError::InvalidArgument(format!(
                "limit must be within 1..={MAX_PAGE_LIMIT}, got {}",
                page.limit
            )));
        }

        let Some(exclude) = self.two_hop_exclusions(user_id).await? else {
            return Ok(FriendList::empty());
        };

        let friends = self
            .graph_repo
            .two_hop_friends_excluding(user_id, &exclude, Some(page))
            .await?;
        Ok(FriendList::from(friends))
    }

    /// `None` when the subject has no direct friends, in which case there is
    /// nothing two hops away and no further query is needed.
    async fn two_hop_exclusions(
        &self,
        user_id: UserId,
    ) -> Result<Option<ExclusionSet>, FriendGraphError> {
        let one_hop = self.graph_repo.one_hop_friend_ids(user_id).await?;
        if one_hop.is_empty() {
            debug!(%user_id, "no direct friends, skipping two-hop query");
            return Ok(None);
        }

        let blocked = self.graph_repo.blocked_user_ids(user_id).await?;

        let mut exclude: ExclusionSet = one_hop.into_iter().collect();
        exclude.extend(blocked);
        // A -> B -> A must not list A as its own friend-of-friend.
        exclude.insert(user_id);

        debug!(%user_id, excluded = exclude.len(), "two-hop exclusion set");
        Ok(Some(exclude))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra_memory::MemoryGraphStore;
    use std::sync::Mutex;

    const A: UserId = UserId(123456789);
    const B: UserId = UserId(111111);
    const C: UserId = UserId(222222);
    const D: UserId = UserId(333333);
    const E: UserId = UserId(444444);

    async fn seeded(friends: &[(UserId, UserId)], blocks: &[(UserId, UserId)]) -> Arc<MemoryGraphStore> {
        let store = Arc::new(MemoryGraphStore::new());
        store.insert_user(A, "piyo").await;
        store.insert_user(B, "hoge").await;
        store.insert_user(C, "fuga").await;
        store.insert_user(D, "foo").await;
        store.insert_user(E, "bar").await;
        for (a, b) in friends {
            store.upsert_link(UserLink::friend(*a, *b)).await.unwrap();
        }
        for (a, b) in blocks {
            store.upsert_link(UserLink::block(*a, *b)).await.unwrap();
        }
        store
    }

    /// Records which primitives ran and can run a hook after a given one.
    struct RecordingRepo {
        inner: Arc<MemoryGraphStore>,
        calls: Mutex<Vec<&'static str>>,
        after: Option<(&'static str, UserLink)>,
    }

    impl RecordingRepo {
        fn new(inner: Arc<MemoryGraphStore>) -> Self {
            RecordingRepo {
                inner,
                calls: Mutex::new(Vec::new()),
                after: None,
            }
        }

        fn insert_after(mut self, call: &'static str, link: UserLink) -> Self {
            self.after = Some((call, link));
            self
        }

        async fn record(&self, call: &'static str) {
            self.calls.lock().unwrap().push(call);
            if let Some((hook, link)) = self.after {
                if hook == call {
                    self.inner.upsert_link(link).await.unwrap();
                }
            }
        }

        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl FriendGraphRepo for RecordingRepo {
        async fn one_hop_friend_ids(&self, user_id: UserId) -> Result<Vec<UserId>, FriendGraphError> {
            let out = self.inner.one_hop_friend_ids(user_id).await;
            self.record("one_hop_friend_ids").await;
            out
        }

        async fn blocked_user_ids(&self, user_id: UserId) -> Result<Vec<UserId>, FriendGraphError> {
            let out = self.inner.blocked_user_ids(user_id).await;
            self.record("blocked_user_ids").await;
            out
        }

        async fn friends(&self, user_id: UserId) -> Result<Vec<Friend>, FriendGraphError> {
            let out = self.inner.friends(user_id).await;
            self.record("friends").await;
            out
        }

        async fn friends_excluding(
            &self,
            user_id: UserId,
            exclude: &ExclusionSet,
        ) -> Result<Vec<Friend>, FriendGraphError> {
            let out = self.inner.friends_excluding(user_id, exclude).await;
            self.record("friends_excluding").await;
            out
        }

        async fn two_hop_friends_excluding(
            &self,
            user_id: UserId,
            exclude: &ExclusionSet,
            page: Option<Page>,
        ) -> Result<Vec<Friend>, FriendGraphError> {
            let out = self
                .inner
                .two_hop_friends_excluding(user_id, exclude, page)
                .await;
            self.record("two_hop_friends_excluding").await;
            out
        }
    }

    struct FailingRepo;

    #[async_trait::async_trait]
    impl FriendGraphRepo for FailingRepo {
        async fn one_hop_friend_ids(&self, _: UserId) -> Result<Vec<UserId>, FriendGraphError> {
            Err(FriendGraphError::StoreUnavailable("connection refused".into()))
        }

        async fn blocked_user_ids(&self, _: UserId) -> Result<Vec<UserId>, FriendGraphError> {
            Err(FriendGraphError::StoreUnavailable("connection refused".into()))
        }

        async fn friends(&self, _: UserId) -> Result<Vec<Friend>, FriendGraphError> {
            unreachable!()
        }

        async fn friends_excluding(
            &self,
            _: UserId,
            _: &ExclusionSet,
        ) -> Result<Vec<Friend>, FriendGraphError> {
            unreachable!()
        }

        async fn two_hop_friends_excluding(
            &self,
            _: UserId,
            _: &ExclusionSet,
            _: Option<Page>,
        ) -> Result<Vec<Friend>, FriendGraphError> {
            unreachable!()
        }
    }

    #[tokio::test]
    async fn friend_list_without_blocks_returns_all_direct_friends() {
        let store = seeded(&[(A, B), (A, C)], &[]).await;
        let repo = Arc::new(RecordingRepo::new(store));
        let resolver = FriendGraphResolver::new(repo.clone());

        let list = resolver.get_friend_list(A).await.unwrap();

        assert_eq!(
            list.friends,
            vec![Friend::new(B, "hoge"), Friend::new(C, "fuga")]
        );
        assert_eq!(repo.calls(), vec!["blocked_user_ids", "friends"]);
    }

    #[tokio::test]
    async fn friend_list_hides_blocked_users() {
        let store = seeded(&[(A, B), (A, C)], &[]).await;
        let resolver = FriendGraphResolver::new(store.clone());
        assert_eq!(resolver.get_friend_list(A).await.unwrap().len(), 2);

        store.upsert_link(UserLink::block(A, B)).await.unwrap();

        let list = resolver.get_friend_list(A).await.unwrap();
        assert_eq!(list.friends, vec![Friend::new(C, "fuga")]);
    }

    #[tokio::test]
    async fn friend_list_ignores_blocks_made_by_others() {
        let store = seeded(&[(A, B)], &[(B, A), (C, B)]).await;
        let resolver = FriendGraphResolver::new(store);

        assert_eq!(resolver.get_friend_list(A).await.unwrap().ids(), vec![B]);
    }

    #[tokio::test]
    async fn friend_of_friend_excludes_direct_friends() {
        let store = seeded(&[(A, B), (B, C), (B, D)], &[]).await;
        let resolver = FriendGraphResolver::new(store);

        let list = resolver.get_friend_of_friend_list(A).await.unwrap();
        assert_eq!(list.ids(), vec![C, D]);
    }

    #[tokio::test]
    async fn friend_of_friend_excludes_users_that_are_also_direct_friends() {
        // C is both one hop (A -> C) and two hops (A -> B -> C) away
        let store = seeded(&[(A, B), (A, C), (B, C), (B, D)], &[]).await;
        let resolver = FriendGraphResolver::new(store);

        assert_eq!(resolver.get_friend_of_friend_list(A).await.unwrap().ids(), vec![D]);
    }

    #[tokio::test]
    async fn friend_of_friend_excludes_blocked_users() {
        let store = seeded(&[(A, B), (B, C), (B, D)], &[(A, D)]).await;
        let resolver = FriendGraphResolver::new(store);

        assert_eq!(resolver.get_friend_of_friend_list(A).await.unwrap().ids(), vec![C]);
    }

    #[tokio::test]
    async fn friend_of_friend_excludes_users_both_friend_and_blocked() {
        let store = seeded(&[(A, B), (A, C), (B, C), (C, D)], &[(A, C)]).await;
        let resolver = FriendGraphResolver::new(store);

        assert_eq!(resolver.get_friend_of_friend_list(A).await.unwrap().ids(), vec![D]);
    }

    #[tokio::test]
    async fn friend_of_friend_has_no_duplicates_across_paths() {
        let store = seeded(&[(A, B), (A, C), (B, D), (C, D)], &[]).await;
        let resolver = FriendGraphResolver::new(store);

        assert_eq!(resolver.get_friend_of_friend_list(A).await.unwrap().ids(), vec![D]);
    }

    #[tokio::test]
    async fn friend_of_friend_never_lists_the_subject() {
        let store = seeded(&[(A, B), (B, A)], &[]).await;
        let resolver = FriendGraphResolver::new(store);

        assert!(resolver.get_friend_of_friend_list(A).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn direct_self_loop_is_not_filtered() {
        let store = seeded(&[(A, A), (A, B)], &[]).await;
        let resolver = FriendGraphResolver::new(store);

        assert_eq!(resolver.get_friend_list(A).await.unwrap().ids(), vec![B, A]);
    }

    #[tokio::test]
    async fn friend_of_friend_short_circuits_without_direct_friends() {
        let store = seeded(&[(B, C)], &[(A, D)]).await;
        let repo = Arc::new(RecordingRepo::new(store));
        let resolver = FriendGraphResolver::new(repo.clone());

        let list = resolver.get_friend_of_friend_list(A).await.unwrap();
        let paged = resolver
            .get_friend_of_friend_list_paged(A, Page::new(2, 0))
            .await
            .unwrap();

        assert!(list.is_empty());
        assert!(paged.is_empty());
        assert_eq!(
            repo.calls(),
            vec!["one_hop_friend_ids", "one_hop_friend_ids"]
        );
    }

    #[tokio::test]
    async fn paged_windows_concatenate_to_full_list() {
        let store = seeded(&[(A, B), (B, C), (B, D), (B, E), (C, E)], &[]).await;
        store.insert_user(UserId(555555), "baz").await;
        store
            .upsert_link(UserLink::friend(B, UserId(555555)))
            .await
            .unwrap();
        let resolver = FriendGraphResolver::new(store);

        let full = resolver.get_friend_of_friend_list(A).await.unwrap();
        assert_eq!(full.len(), 4);

        let mut paged = Vec::new();
        let mut offset = 0;
        loop {
            let window = resolver
                .get_friend_of_friend_list_paged(A, Page::new(2, offset))
                .await
                .unwrap();
            if window.is_empty() {
                break;
            }
            assert!(window.len() <= 2);
            paged.extend(window.friends);
            offset += 2;
        }

        assert_eq!(paged, full.friends);
    }

    #[tokio::test]
    async fn paged_rejects_out_of_range_limit_before_querying() {
        let store = seeded(&[(A, B), (B, C)], &[]).await;
        let repo = Arc::new(RecordingRepo::new(store));
        let resolver = FriendGraphResolver::new(repo.clone());

        for page in [Page::new(0, 0), Page::new(MAX_PAGE_LIMIT + 1, 0)] {
            let err = resolver
                .get_friend_of_friend_list_paged(A, page)
                .await
                .unwrap_err();
            assert!(matches!(err, FriendGraphError::InvalidArgument(_)));
        }
        assert!(repo.calls().is_empty());
    }

    #[tokio::test]
    async fn block_added_before_block_read_is_honored() {
        let store = seeded(&[(A, B), (B, C), (B, D)], &[]).await;
        let repo = Arc::new(
            RecordingRepo::new(store).insert_after("one_hop_friend_ids", UserLink::block(A, C)),
        );
        let resolver = FriendGraphResolver::new(repo);

        assert_eq!(resolver.get_friend_of_friend_list(A).await.unwrap().ids(), vec![D]);
    }

    #[tokio::test]
    async fn block_added_after_block_read_is_missed() {
        // Reads are not wrapped in a transaction: a block written between the
        // block-list read and the two-hop read does not affect this call.
        let store = seeded(&[(A, B), (B, C), (B, D)], &[]).await;
        let repo = Arc::new(
            RecordingRepo::new(store.clone())
                .insert_after("blocked_user_ids", UserLink::block(A, C)),
        );
        let resolver = FriendGraphResolver::new(repo);

        assert_eq!(
            resolver.get_friend_of_friend_list(A).await.unwrap().ids(),
            vec![C, D]
        );

        let fresh = FriendGraphResolver::new(store);
        assert_eq!(fresh.get_friend_of_friend_list(A).await.unwrap().ids(), vec![D]);
    }

    #[tokio::test]
    async fn store_failures_propagate_unchanged() {
        let resolver = FriendGraphResolver::new(Arc::new(FailingRepo));

        let err = resolver.get_friend_list(A).await.unwrap_err();
        assert!(matches!(err, FriendGraphError::StoreUnavailable(m) if m == "connection refused"));

        let err = resolver.get_friend_of_friend_list(A).await.unwrap_err();
        assert!(matches!(err, FriendGraphError::StoreUnavailable(_)));
    }
}
