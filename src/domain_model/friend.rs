use crate::domain_model::UserId;
use serde::Serialize;

/// One row of a friend list: a user reachable from the subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Friend {
    #[serde(rename = "userId")]
    pub user_id: UserId,
    pub name: String,
}

impl Friend {
    pub fn new(user_id: UserId, name: impl Into<String>) -> Self {
        Friend {
            user_id,
            name: name.into(),
        }
    }
}

/// Resolver output. Rows are kept in ascending `user_id` order; an empty list
/// serializes as `{"friends": []}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FriendList {
    pub friends: Vec<Friend>,
}

impl FriendList {
    pub fn empty() -> Self {
        FriendList::default()
    }

    pub fn ids(&self) -> Vec<UserId> {
        self.friends.iter().map(|f| f.user_id).collect()
    }

    pub fn len(&self) -> usize {
        self.friends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.friends.is_empty()
    }
}

impl From<Vec<Friend>> for FriendList {
    fn from(friends: Vec<Friend>) -> Self {
        FriendList { friends }
    }
}
