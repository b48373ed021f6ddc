//! Live inbox subscription handle.

use tokio::sync::watch;
use tokio::task::JoinHandle;

use guildnet_core::error::AppError;
use guildnet_core::result::AppResult;
use guildnet_core::types::UserId;

use crate::projection::InboxSnapshot;

/// A handle on one recipient's live inbox stream.
///
/// Dropping the handle stops the backing projection task; `unsubscribe`
/// does the same explicitly.
#[derive(Debug)]
pub struct InboxSubscription {
    recipient: UserId,
    receiver: watch::Receiver<InboxSnapshot>,
    task: JoinHandle<()>,
}

impl InboxSubscription {
    pub(crate) fn new(
        recipient: UserId,
        receiver: watch::Receiver<InboxSnapshot>,
        task: JoinHandle<()>,
    ) -> Self {
        Self {
            recipient,
            receiver,
            task,
        }
    }

    /// The subscribed inbox owner.
    pub fn recipient(&self) -> UserId {
        self.recipient
    }

    /// The most recent snapshot, without waiting.
    pub fn snapshot(&self) -> InboxSnapshot {
        self.receiver.borrow().clone()
    }

    /// Wait for the next snapshot after a change to this inbox.
    pub async fn changed(&mut self) -> AppResult<InboxSnapshot> {
        self.receiver.changed().await.map_err(|_| {
            AppError::service_unavailable("Inbox projection stream closed")
        })?;
        Ok(self.receiver.borrow_and_update().clone())
    }

    /// Stop the stream.
    pub fn unsubscribe(self) {
        // Drop runs the abort.
    }
}

impl Drop for InboxSubscription {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use guildnet_entity::notification::{Actor, NewNotification, NotificationKind};
    use guildnet_store::memory::MemoryNotificationStore;
    use guildnet_store::traits::NotificationStore;

    use crate::projection::InboxProjection;

    #[tokio::test]
    async fn test_unsubscribe_stops_stream() {
        let store = Arc::new(MemoryNotificationStore::new(16));
        let recipient = UserId::new();

        let subscription = InboxProjection::new(store.clone())
            .subscribe(recipient)
            .await
            .expect("subscribe");
        subscription.unsubscribe();

        // The projection task is gone; inserts still succeed and nothing
        // panics in the background.
        store
            .insert(&NewNotification {
                recipient_id: recipient,
                kind: NotificationKind::Like,
                actor: Actor {
                    id: UserId::new(),
                    display_name: "valkyrie".into(),
                    avatar_url: None,
                },
                subject_ref: None,
                message: "valkyrie liked your post".into(),
            })
            .await
            .expect("insert")
            .expect("record");
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
}
