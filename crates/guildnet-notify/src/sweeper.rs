//! Retention sweeper.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::info;

use guildnet_core::result::AppResult;
use guildnet_store::traits::NotificationStore;

/// Deletes read notifications older than the retention window.
///
/// Unread notifications are never deleted, regardless of age. The sweep is
/// idempotent: a second pass over the same data removes nothing.
#[derive(Debug, Clone)]
pub struct RetentionSweeper {
    store: Arc<dyn NotificationStore>,
    retention_days: i64,
}

impl RetentionSweeper {
    /// Create a sweeper with the given retention window in days.
    pub fn new(store: Arc<dyn NotificationStore>, retention_days: i64) -> Self {
        Self {
            store,
            retention_days,
        }
    }

    /// Run one sweep against the current clock.
    pub async fn sweep(&self) -> AppResult<u64> {
        self.sweep_at(Utc::now()).await
    }

    /// Run one sweep with an explicit notion of "now".
    pub async fn sweep_at(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let cutoff = now - Duration::days(self.retention_days);
        let deleted = self.store.delete_read_before(cutoff).await?;
        info!(%cutoff, deleted, "Retention sweep complete");
        Ok(deleted)
    }
}
