//! Store manager that dispatches to the configured backend.

use std::sync::Arc;

use tracing::info;

use guildnet_core::config::store::StoreConfig;
use guildnet_core::error::AppError;
use guildnet_core::result::AppResult;

use crate::memory::{MemoryFriendshipStore, MemoryMailQueue, MemoryNotificationStore};
use crate::postgres::{PgFriendshipStore, PgMailQueue, PgNotificationStore};
use crate::traits::{FriendshipStore, MailQueue, NotificationStore};

/// Bundle of store handles behind the adapter traits.
///
/// The backend is selected at construction time based on configuration.
#[derive(Debug, Clone)]
pub struct StoreManager {
    notifications: Arc<dyn NotificationStore>,
    friendships: Arc<dyn FriendshipStore>,
    mail: Arc<dyn MailQueue>,
}

impl StoreManager {
    /// Create a store manager from configuration.
    ///
    /// The PostgreSQL backend runs pending migrations before handing out
    /// any store handle.
    pub async fn new(config: &StoreConfig) -> AppResult<Self> {
        match config.provider.as_str() {
            "postgres" => {
                info!("Initializing PostgreSQL store backend");
                let pool = crate::connection::create_pool(&config.database).await?;
                crate::migration::run_migrations(&pool).await?;

                let notifications =
                    PgNotificationStore::connect(pool.clone(), config.change_buffer).await?;

                Ok(Self {
                    notifications: Arc::new(notifications),
                    friendships: Arc::new(PgFriendshipStore::new(pool.clone())),
                    mail: Arc::new(PgMailQueue::new(pool)),
                })
            }
            "memory" => {
                info!("Initializing in-memory store backend");
                Ok(Self::in_memory(config.change_buffer))
            }
            other => Err(AppError::configuration(format!(
                "Unknown store provider: '{other}'. Supported: memory, postgres"
            ))),
        }
    }

    /// Create an in-memory store manager (single-node dev and tests).
    pub fn in_memory(change_buffer: usize) -> Self {
        Self {
            notifications: Arc::new(MemoryNotificationStore::new(change_buffer)),
            friendships: Arc::new(MemoryFriendshipStore::new()),
            mail: Arc::new(MemoryMailQueue::new()),
        }
    }

    /// Notification store handle.
    pub fn notifications(&self) -> Arc<dyn NotificationStore> {
        Arc::clone(&self.notifications)
    }

    /// Friendship store handle.
    pub fn friendships(&self) -> Arc<dyn FriendshipStore> {
        Arc::clone(&self.friendships)
    }

    /// Mail queue handle.
    pub fn mail(&self) -> Arc<dyn MailQueue> {
        Arc::clone(&self.mail)
    }
}
