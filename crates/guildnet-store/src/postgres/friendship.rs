//! PostgreSQL friendship store.

use async_trait::async_trait;
use sqlx::PgPool;

use guildnet_core::error::{AppError, ErrorKind};
use guildnet_core::result::AppResult;
use guildnet_core::types::UserId;

use crate::traits::FriendshipStore;

/// Friend graph backed by the `friendships` table.
#[derive(Debug, Clone)]
pub struct PgFriendshipStore {
    pool: PgPool,
}

impl PgFriendshipStore {
    /// Create a new friendship store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FriendshipStore for PgFriendshipStore {
    async fn link(&self, a: UserId, b: UserId) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO friendships (user_id, friend_id) \
             VALUES ($1, $2), ($2, $1) \
             ON CONFLICT (user_id, friend_id) DO NOTHING",
        )
        .bind(a)
        .bind(b)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to link friends", e))?;
        Ok(())
    }

    async fn are_friends(&self, a: UserId, b: UserId) -> AppResult<bool> {
        sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM friendships WHERE user_id = $1 AND friend_id = $2)",
        )
        .bind(a)
        .bind(b)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check friendship", e))
    }
}
