//! In-memory mail queue.

use async_trait::async_trait;
use tokio::sync::RwLock;

use guildnet_core::result::AppResult;
use guildnet_core::types::MailMessageId;
use guildnet_entity::mail::OutboundMail;

use crate::traits::MailQueue;

/// Mail queue held in process memory. Nothing consumes it; entries
/// accumulate for inspection.
#[derive(Debug, Default)]
pub struct MemoryMailQueue {
    messages: RwLock<Vec<OutboundMail>>,
}

impl MemoryMailQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all enqueued messages.
    pub async fn messages(&self) -> Vec<OutboundMail> {
        self.messages.read().await.clone()
    }
}

#[async_trait]
impl MailQueue for MemoryMailQueue {
    async fn enqueue(&self, mail: &OutboundMail) -> AppResult<MailMessageId> {
        self.messages.write().await.push(mail.clone());
        Ok(mail.id)
    }
}
