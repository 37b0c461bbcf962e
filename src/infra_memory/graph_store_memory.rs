use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use std::collections::{BTreeMap, BTreeSet};
use tokio::sync::RwLock;

type Edges = BTreeSet<(UserId, UserId)>;

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<UserId, String>,
    friend_link: Edges,
    block_list: Edges,
}

impl Tables {
    fn edges(&self, kind: LinkKind) -> &Edges {
        match kind {
            LinkKind::Friend => &self.friend_link,
            LinkKind::Block => &self.block_list,
        }
    }

    fn edges_mut(&mut self, kind: LinkKind) -> &mut Edges {
        match kind {
            LinkKind::Friend => &mut self.friend_link,
            LinkKind::Block => &mut self.block_list,
        }
    }

    fn targets(&self, kind: LinkKind, from: UserId) -> impl Iterator<Item = UserId> + '_ {
        self.edges(kind)
            .range((from, UserId::MIN)..=(from, UserId::MAX))
            .map(|(_, to)| *to)
    }

    fn friend_row(&self, id: UserId) -> Option<Friend> {
        self.users.get(&id).map(|name| Friend::new(id, name.clone()))
    }
}

/// In-process relationship store with the same contract as the MySQL repos.
///
/// Edge tables are ordered sets keyed by `(user1_id, user2_id)`, so a pair can
/// only ever be stored once.
#[derive(Debug, Default)]
pub struct MemoryGraphStore {
    tables: RwLock<Tables>,
}

impl MemoryGraphStore {
    pub fn new() -> Self {
        MemoryGraphStore::default()
    }

    /// Inserts or renames a user.
    pub async fn insert_user(&self, user_id: UserId, name: impl Into<String>) {
        self.tables.write().await.users.insert(user_id, name.into());
    }

    pub async fn remove_link(&self, link: UserLink) -> bool {
        self.tables
            .write()
            .await
            .edges_mut(link.kind)
            .remove(&(link.user1_id, link.user2_id))
    }

    pub async fn link_count(&self, link: UserLink) -> usize {
        let tables = self.tables.read().await;
        tables
            .edges(link.kind)
            .iter()
            .filter(|(a, b)| *a == link.user1_id && *b == link.user2_id)
            .count()
    }
}

#[async_trait::async_trait]
impl FriendGraphRepo for MemoryGraphStore {
    async fn one_hop_friend_ids(&self, user_id: UserId) -> Result<Vec<UserId>, FriendGraphError> {
        let tables = self.tables.read().await;
        Ok(tables.targets(LinkKind::Friend, user_id).collect())
    }

    async fn blocked_user_ids(&self, user_id: UserId) -> Result<Vec<UserId>, FriendGraphError> {
        let tables = self.tables.read().await;
        Ok(tables.targets(LinkKind::Block, user_id).collect())
    }

    async fn friends(&self, user_id: UserId) -> Result<Vec<Friend>, FriendGraphError> {
        let tables = self.tables.read().await;
        Ok(tables
            .targets(LinkKind::Friend, user_id)
            .filter_map(|id| tables.friend_row(id))
            .collect())
    }

    async fn friends_excluding(
        &self,
        user_id: UserId,
        exclude: &ExclusionSet,
    ) -> Result<Vec<Friend>, FriendGraphError> {
        require_exclusions(exclude)?;

        let tables = self.tables.read().await;
        Ok(tables
            .targets(LinkKind::Friend, user_id)
            .filter(|id| !exclude.contains(id))
            .filter_map(|id| tables.friend_row(id))
            .collect())
    }

    async fn two_hop_friends_excluding(
        &self,
        user_id: UserId,
        exclude: &ExclusionSet,
        page: Option<Page>,
    ) -> Result<Vec<Friend>, FriendGraphError> {
        require_exclusions(exclude)?;

        let tables = self.tables.read().await;
        let reachable: BTreeSet<UserId> = tables
            .targets(LinkKind::Friend, user_id)
            .flat_map(|mid| tables.targets(LinkKind::Friend, mid))
            .filter(|id| !exclude.contains(id))
            .collect();

        let rows = reachable.into_iter().filter_map(|id| tables.friend_row(id));
        Ok(match page {
            Some(page) => rows
                .skip(page.offset as usize)
                .take(page.limit as usize)
                .collect(),
            None => rows.collect(),
        })
    }
}

#[async_trait::async_trait]
impl UserRepo for MemoryGraphStore {
    async fn id_exists(&self, user_id: UserId) -> Result<bool, FriendGraphError> {
        Ok(self.tables.read().await.users.contains_key(&user_id))
    }
}

#[async_trait::async_trait]
impl LinkRepo for MemoryGraphStore {
    async fn upsert_link(&self, link: UserLink) -> Result<LinkClaim, FriendGraphError> {
        let mut tables = self.tables.write().await;
        if tables
            .edges_mut(link.kind)
            .insert((link.user1_id, link.user2_id))
        {
            Ok(LinkClaim::Created)
        } else {
            Ok(LinkClaim::Existing)
        }
    }
}
