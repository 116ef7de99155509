//! Entity implementation

use slotmap::{DefaultKey, Key};

/// Entity identifier
///
/// A generational handle into the world's entity store. Holding one never
/// keeps the entity alive; once the entity is destroyed the handle goes
/// stale and lookups through it fail, even if the slot is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entity(DefaultKey);

impl Entity {
    pub(super) fn from_key(key: DefaultKey) -> Self {
        Self(key)
    }

    pub(super) fn key(self) -> DefaultKey {
        self.0
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.0.data())
    }
}
