use crate::domain_model::UserId;
use std::collections::BTreeSet;

/// Request-scoped set of ids a single query must leave out of its result.
///
/// Backed by an ordered set, so combining sources is a union: an id that is
/// both a direct friend and blocked is held once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet(BTreeSet<UserId>);

impl ExclusionSet {
    pub fn new() -> Self {
        ExclusionSet::default()
    }

    pub fn insert(&mut self, id: UserId) -> bool {
        self.0.insert(id)
    }

    pub fn contains(&self, id: &UserId) -> bool {
        self.0.contains(id)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &UserId> {
        self.0.iter()
    }
}

impl FromIterator<UserId> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = UserId>>(iter: I) -> Self {
        ExclusionSet(iter.into_iter().collect())
    }
}

impl Extend<UserId> for ExclusionSet {
    fn extend<I: IntoIterator<Item = UserId>>(&mut self, iter: I) {
        self.0.extend(iter)
    }
}
