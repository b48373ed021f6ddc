//! Change-driven inbox snapshots.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{broadcast, watch};
use tracing::{debug, warn};

use guildnet_core::result::AppResult;
use guildnet_core::types::UserId;
use guildnet_entity::notification::{NotificationKind, NotificationRecord};
use guildnet_store::traits::NotificationStore;

use crate::subscription::InboxSubscription;

/// A point-in-time view of one recipient's inbox.
#[derive(Debug, Clone, Serialize)]
pub struct InboxSnapshot {
    /// The inbox owner.
    pub recipient_id: UserId,
    /// Inbox records, newest first, with duplicate friend requests from the
    /// same actor collapsed to the newest one.
    pub notifications: Vec<NotificationRecord>,
    /// Unread count over the full inbox, computed before display dedup.
    pub unread_count: u64,
}

/// Builds and streams inbox snapshots off the store's change signals.
#[derive(Debug, Clone)]
pub struct InboxProjection {
    store: Arc<dyn NotificationStore>,
}

impl InboxProjection {
    /// Create a projection over the given store.
    pub fn new(store: Arc<dyn NotificationStore>) -> Self {
        Self { store }
    }

    /// Build a one-off snapshot of the recipient's inbox.
    pub async fn snapshot(&self, recipient: UserId) -> AppResult<InboxSnapshot> {
        let records = self.store.list_inbox(recipient).await?;
        let unread_count = self.store.count_unread(recipient).await?;

        Ok(InboxSnapshot {
            recipient_id: recipient,
            notifications: dedup_friend_requests(records),
            unread_count,
        })
    }

    /// Subscribe to the recipient's inbox.
    ///
    /// The subscription starts with a current snapshot and receives a fresh
    /// one after every change signal for this inbox. Signals for other
    /// inboxes are ignored. The backing task stops when the subscription is
    /// dropped or explicitly unsubscribed.
    pub async fn subscribe(&self, recipient: UserId) -> AppResult<InboxSubscription> {
        // The receiver must exist before the initial reads: a record written
        // while the snapshot is in flight then costs one redundant re-read
        // instead of a lost signal.
        let mut changes = self.store.watch();
        let initial = self.snapshot(recipient).await?;
        let (tx, rx) = watch::channel(initial);

        let projection = self.clone();

        let task = tokio::spawn(async move {
            loop {
                match changes.recv().await {
                    Ok(user) if user == recipient => {}
                    Ok(_) => continue,
                    // Missed signals carry no payload anyway; one re-read
                    // catches the projection up.
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        debug!(recipient = %recipient, skipped, "Change stream lagged, resyncing");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }

                match projection.snapshot(recipient).await {
                    Ok(snapshot) => {
                        if tx.send(snapshot).is_err() {
                            break;
                        }
                    }
                    Err(err) => {
                        warn!(recipient = %recipient, error = %err, "Inbox re-read failed");
                    }
                }
            }
            debug!(recipient = %recipient, "Inbox projection task stopped");
        });

        Ok(InboxSubscription::new(recipient, rx, task))
    }
}

/// Collapse duplicate friend-request entries to the first (newest) one per
/// actor. Stored data already carries a write-time guarantee against
/// duplicates; this keeps the rendered inbox clean even over rows written
/// before that guarantee existed.
fn dedup_friend_requests(records: Vec<NotificationRecord>) -> Vec<NotificationRecord> {
    let mut seen_actors = std::collections::HashSet::new();
    records
        .into_iter()
        .filter(|record| {
            record.kind != NotificationKind::FriendRequest || seen_actors.insert(record.actor.id)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use guildnet_core::types::{NotificationId, PageRequest, PageResponse};
    use guildnet_entity::notification::{Actor, NewNotification};
    use guildnet_store::memory::MemoryNotificationStore;

    /// Store whose unread count sneaks one insert in mid-read, the way a
    /// record can land while a snapshot is being assembled.
    #[derive(Debug)]
    struct InsertDuringCount {
        inner: MemoryNotificationStore,
        pending: std::sync::Mutex<Option<NewNotification>>,
    }

    #[async_trait]
    impl NotificationStore for InsertDuringCount {
        async fn insert(&self, new: &NewNotification) -> AppResult<Option<NotificationRecord>> {
            self.inner.insert(new).await
        }

        async fn find_by_id(
            &self,
            recipient: UserId,
            id: NotificationId,
        ) -> AppResult<Option<NotificationRecord>> {
            self.inner.find_by_id(recipient, id).await
        }

        async fn list_inbox(&self, recipient: UserId) -> AppResult<Vec<NotificationRecord>> {
            self.inner.list_inbox(recipient).await
        }

        async fn find_by_recipient(
            &self,
            recipient: UserId,
            page: &PageRequest,
        ) -> AppResult<PageResponse<NotificationRecord>> {
            self.inner.find_by_recipient(recipient, page).await
        }

        async fn count_unread(&self, recipient: UserId) -> AppResult<u64> {
            let count = self.inner.count_unread(recipient).await?;
            let pending = self.pending.lock().expect("lock").take();
            if let Some(new) = pending {
                self.inner.insert(&new).await?;
            }
            Ok(count)
        }

        async fn unread_ids(&self, recipient: UserId) -> AppResult<Vec<NotificationId>> {
            self.inner.unread_ids(recipient).await
        }

        async fn mark_read(&self, recipient: UserId, ids: &[NotificationId]) -> AppResult<u64> {
            self.inner.mark_read(recipient, ids).await
        }

        async fn mark_email_dispatched(
            &self,
            recipient: UserId,
            id: NotificationId,
        ) -> AppResult<()> {
            self.inner.mark_email_dispatched(recipient, id).await
        }

        async fn has_pending_friend_request(
            &self,
            recipient: UserId,
            actor: UserId,
        ) -> AppResult<bool> {
            self.inner.has_pending_friend_request(recipient, actor).await
        }

        async fn delete_friend_request(&self, recipient: UserId, actor: UserId) -> AppResult<u64> {
            self.inner.delete_friend_request(recipient, actor).await
        }

        async fn delete_read_before(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
            self.inner.delete_read_before(cutoff).await
        }

        fn watch(&self) -> broadcast::Receiver<UserId> {
            self.inner.watch()
        }
    }

    fn new_notification(recipient: UserId, kind: NotificationKind, actor: UserId) -> NewNotification {
        NewNotification {
            recipient_id: recipient,
            kind,
            actor: Actor {
                id: actor,
                display_name: "valkyrie".into(),
                avatar_url: None,
            },
            subject_ref: None,
            message: "valkyrie did a thing".into(),
        }
    }

    #[tokio::test]
    async fn test_snapshot_is_newest_first() {
        let store = Arc::new(MemoryNotificationStore::new(16));
        let recipient = UserId::new();
        let mut ids = Vec::new();
        for _ in 0..3 {
            let record = store
                .insert(&new_notification(recipient, NotificationKind::Like, UserId::new()))
                .await
                .expect("insert")
                .expect("record");
            ids.push(record.id);
        }

        let snapshot = InboxProjection::new(store)
            .snapshot(recipient)
            .await
            .expect("snapshot");
        let got: Vec<_> = snapshot.notifications.iter().map(|n| n.id).collect();
        ids.reverse();
        assert_eq!(got, ids);
        assert_eq!(snapshot.unread_count, 3);
    }

    #[tokio::test]
    async fn test_subscription_sees_new_notification() {
        let store = Arc::new(MemoryNotificationStore::new(16));
        let recipient = UserId::new();

        let mut subscription = InboxProjection::new(store.clone())
            .subscribe(recipient)
            .await
            .expect("subscribe");
        assert_eq!(subscription.snapshot().unread_count, 0);

        store
            .insert(&new_notification(recipient, NotificationKind::Comment, UserId::new()))
            .await
            .expect("insert")
            .expect("record");

        let snapshot = subscription.changed().await.expect("changed");
        assert_eq!(snapshot.unread_count, 1);
        assert_eq!(snapshot.notifications.len(), 1);
    }

    #[tokio::test]
    async fn test_subscription_ignores_other_inboxes() {
        let store = Arc::new(MemoryNotificationStore::new(16));
        let recipient = UserId::new();
        let other = UserId::new();

        let mut subscription = InboxProjection::new(store.clone())
            .subscribe(recipient)
            .await
            .expect("subscribe");

        store
            .insert(&new_notification(other, NotificationKind::Like, UserId::new()))
            .await
            .expect("insert")
            .expect("record");
        store
            .insert(&new_notification(recipient, NotificationKind::Like, UserId::new()))
            .await
            .expect("insert")
            .expect("record");

        // Only the second insert targets our inbox; the resulting snapshot
        // must not contain the other user's record.
        let snapshot = subscription.changed().await.expect("changed");
        assert_eq!(snapshot.notifications.len(), 1);
        assert_eq!(snapshot.notifications[0].recipient_id, recipient);
    }

    #[tokio::test]
    async fn test_subscribe_catches_insert_during_initial_snapshot() {
        let recipient = UserId::new();
        let store = Arc::new(InsertDuringCount {
            inner: MemoryNotificationStore::new(16),
            pending: std::sync::Mutex::new(Some(new_notification(
                recipient,
                NotificationKind::Like,
                UserId::new(),
            ))),
        });

        let mut subscription = InboxProjection::new(store)
            .subscribe(recipient)
            .await
            .expect("subscribe");

        // The record landed while the initial snapshot was being read; its
        // change signal must still reach the subscription.
        let snapshot = tokio::time::timeout(
            std::time::Duration::from_secs(1),
            subscription.changed(),
        )
        .await
        .expect("change signal before deadline")
        .expect("changed");
        assert_eq!(snapshot.notifications.len(), 1);
        assert_eq!(snapshot.unread_count, 1);
    }

    #[tokio::test]
    async fn test_friend_request_display_dedup() {
        let actor = UserId::new();
        let recipient = UserId::new();
        let mut records = Vec::new();
        let store = Arc::new(MemoryNotificationStore::new(16));
        for kind in [
            NotificationKind::FriendRequest,
            NotificationKind::Like,
            NotificationKind::FriendRequest,
        ] {
            let record = store
                .insert(&new_notification(recipient, kind, actor))
                .await
                .expect("insert");
            // The second friend request is refused at write time.
            if let Some(record) = record {
                records.push(record);
            }
        }
        assert_eq!(records.len(), 2);

        // Feed a pre-guarantee duplicate straight through the dedup filter.
        let mut legacy = records.clone();
        legacy.push(records[0].clone());
        let deduped = dedup_friend_requests(legacy);
        assert_eq!(
            deduped
                .iter()
                .filter(|r| r.kind == NotificationKind::FriendRequest)
                .count(),
            1
        );
    }
}
