//! In-memory friendship store.

use std::collections::HashSet;

use async_trait::async_trait;
use dashmap::DashMap;

use guildnet_core::result::AppResult;
use guildnet_core::types::UserId;

use crate::traits::FriendshipStore;

/// Friend graph held in process memory.
#[derive(Debug, Default)]
pub struct MemoryFriendshipStore {
    friends: DashMap<UserId, HashSet<UserId>>,
}

impl MemoryFriendshipStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FriendshipStore for MemoryFriendshipStore {
    async fn link(&self, a: UserId, b: UserId) -> AppResult<()> {
        self.friends.entry(a).or_default().insert(b);
        self.friends.entry(b).or_default().insert(a);
        Ok(())
    }

    async fn are_friends(&self, a: UserId, b: UserId) -> AppResult<bool> {
        Ok(self
            .friends
            .get(&a)
            .map(|set| set.contains(&b))
            .unwrap_or(false))
    }
}
