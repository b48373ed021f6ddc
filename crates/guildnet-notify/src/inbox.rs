//! Inbox read-state manager.

use std::sync::Arc;

use tracing::debug;

use guildnet_core::result::AppResult;
use guildnet_core::types::{NotificationId, PageRequest, PageResponse, UserId};
use guildnet_entity::notification::NotificationRecord;
use guildnet_store::traits::NotificationStore;

/// Read-state operations over a recipient's inbox.
///
/// All mutations here are idempotent: re-marking a read notification is a
/// no-op, and unknown ids are accepted silently.
#[derive(Debug, Clone)]
pub struct InboxReadState {
    store: Arc<dyn NotificationStore>,
}

impl InboxReadState {
    /// Create a read-state manager over the given store.
    pub fn new(store: Arc<dyn NotificationStore>) -> Self {
        Self { store }
    }

    /// The recipient's full inbox, newest first.
    pub async fn list(&self, recipient: UserId) -> AppResult<Vec<NotificationRecord>> {
        self.store.list_inbox(recipient).await
    }

    /// A page of the recipient's inbox, newest first.
    pub async fn list_page(
        &self,
        recipient: UserId,
        page: &PageRequest,
    ) -> AppResult<PageResponse<NotificationRecord>> {
        self.store.find_by_recipient(recipient, page).await
    }

    /// Number of unread notifications.
    pub async fn unread_count(&self, recipient: UserId) -> AppResult<u64> {
        self.store.count_unread(recipient).await
    }

    /// Mark the listed notifications read. Returns the number newly marked.
    pub async fn mark_read(
        &self,
        recipient: UserId,
        ids: &[NotificationId],
    ) -> AppResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }
        let marked = self.store.mark_read(recipient, ids).await?;
        debug!(recipient = %recipient, requested = ids.len(), marked, "Marked notifications read");
        Ok(marked)
    }

    /// Mark every unread notification read. Returns the number newly marked.
    ///
    /// Composed from a snapshot of unread ids; a notification arriving
    /// between the snapshot and the write stays unread, which is the
    /// behavior the recipient expects.
    pub async fn mark_all_read(&self, recipient: UserId) -> AppResult<u64> {
        let unread = self.store.unread_ids(recipient).await?;
        self.mark_read(recipient, &unread).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use guildnet_entity::notification::{Actor, NewNotification, NotificationKind};
    use guildnet_store::memory::MemoryNotificationStore;

    fn new_notification(recipient: UserId) -> NewNotification {
        NewNotification {
            recipient_id: recipient,
            kind: NotificationKind::Like,
            actor: Actor {
                id: UserId::new(),
                display_name: "valkyrie".into(),
                avatar_url: None,
            },
            subject_ref: None,
            message: "valkyrie liked your post".into(),
        }
    }

    async fn seeded(count: usize) -> (InboxReadState, Arc<MemoryNotificationStore>, UserId, Vec<NotificationId>) {
        let store = Arc::new(MemoryNotificationStore::new(16));
        let recipient = UserId::new();
        let mut ids = Vec::new();
        for _ in 0..count {
            let record = store
                .insert(&new_notification(recipient))
                .await
                .expect("insert")
                .expect("record");
            ids.push(record.id);
        }
        (InboxReadState::new(store.clone()), store, recipient, ids)
    }

    #[tokio::test]
    async fn test_mark_read_is_idempotent() {
        let (inbox, _, recipient, ids) = seeded(3).await;

        assert_eq!(inbox.mark_read(recipient, &ids[..2]).await.expect("mark"), 2);
        assert_eq!(inbox.unread_count(recipient).await.expect("count"), 1);

        // Same ids again: nothing newly marked, count unchanged.
        assert_eq!(inbox.mark_read(recipient, &ids[..2]).await.expect("mark"), 0);
        assert_eq!(inbox.unread_count(recipient).await.expect("count"), 1);
    }

    #[tokio::test]
    async fn test_mark_read_accepts_unknown_ids() {
        let (inbox, _, recipient, _) = seeded(1).await;
        let marked = inbox
            .mark_read(recipient, &[NotificationId::new()])
            .await
            .expect("mark");
        assert_eq!(marked, 0);
    }

    #[tokio::test]
    async fn test_mark_all_read() {
        let (inbox, _, recipient, _) = seeded(4).await;
        assert_eq!(inbox.mark_all_read(recipient).await.expect("mark"), 4);
        assert_eq!(inbox.unread_count(recipient).await.expect("count"), 0);
        assert_eq!(inbox.mark_all_read(recipient).await.expect("mark"), 0);
    }

    #[tokio::test]
    async fn test_mark_read_scoped_to_recipient() {
        let (inbox, store, _, ids) = seeded(1).await;
        let other = UserId::new();
        store
            .insert(&new_notification(other))
            .await
            .expect("insert")
            .expect("record");

        // Another user's ids do not touch this inbox.
        assert_eq!(inbox.mark_read(other, &ids).await.expect("mark"), 0);
        assert_eq!(inbox.unread_count(other).await.expect("count"), 1);
    }
}
