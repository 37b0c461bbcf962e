use crate::domain_model::UserId;
use std::fmt;
use std::str::FromStr;

/// Which relationship table an edge lives in.
#[derive(Debug, Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum LinkKind {
    Friend,
    Block,
}

impl LinkKind {
    pub fn table(&self) -> &'static str {
        match self {
            LinkKind::Friend => "friend_link",
            LinkKind::Block => "block_list",
        }
    }
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table())
    }
}

impl FromStr for LinkKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "friend_link" => Ok(LinkKind::Friend),
            "block_list" => Ok(LinkKind::Block),
            other => Err(format!("table not exist: {other}")),
        }
    }
}

/// Directed edge `user1 -> user2` of the given kind.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct UserLink {
    pub user1_id: UserId,
    pub user2_id: UserId,
    pub kind: LinkKind,
}

impl UserLink {
    pub fn new(user1_id: UserId, user2_id: UserId, kind: LinkKind) -> Self {
        UserLink {
            user1_id,
            user2_id,
            kind,
        }
    }

    pub fn friend(user1_id: UserId, user2_id: UserId) -> Self {
        Self::new(user1_id, user2_id, LinkKind::Friend)
    }

    pub fn block(user1_id: UserId, user2_id: UserId) -> Self {
        Self::new(user1_id, user2_id, LinkKind::Block)
    }
}

/// Outcome of an insert-if-absent.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum LinkClaim {
    Created,
    Existing,
}
