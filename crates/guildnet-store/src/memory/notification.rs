//! In-memory notification store.
//!
//! Inboxes are kept as per-recipient vectors in insertion order; each
//! vector is guarded by its dashmap shard lock, so the friend-request
//! dedup check and the insert happen atomically per inbox — the same
//! write-time guarantee the PostgreSQL backend gets from its partial
//! unique index.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tokio::sync::broadcast;

use guildnet_core::result::AppResult;
use guildnet_core::types::{NotificationId, PageRequest, PageResponse, UserId};
use guildnet_entity::notification::{
    NewNotification, NotificationKind, NotificationRecord,
};

use crate::traits::NotificationStore;

/// Notification store held entirely in process memory.
#[derive(Debug)]
pub struct MemoryNotificationStore {
    /// Recipient → inbox, oldest first.
    inboxes: DashMap<UserId, Vec<NotificationRecord>>,
    /// Inbox change signals.
    changes: broadcast::Sender<UserId>,
}

impl MemoryNotificationStore {
    /// Create an empty store.
    pub fn new(change_buffer: usize) -> Self {
        let (changes, _) = broadcast::channel(change_buffer);
        Self {
            inboxes: DashMap::new(),
            changes,
        }
    }

    fn signal(&self, recipient: UserId) {
        // No receivers is fine; signals are best-effort.
        let _ = self.changes.send(recipient);
    }
}

#[async_trait]
impl NotificationStore for MemoryNotificationStore {
    async fn insert(&self, new: &NewNotification) -> AppResult<Option<NotificationRecord>> {
        let record = {
            let mut inbox = self.inboxes.entry(new.recipient_id).or_default();

            if new.kind == NotificationKind::FriendRequest
                && inbox
                    .iter()
                    .any(|r| r.kind == NotificationKind::FriendRequest && r.actor.id == new.actor.id)
            {
                return Ok(None);
            }

            // Per-inbox timestamps never go backwards, even if the wall
            // clock does.
            let created_at = match inbox.last() {
                Some(last) => last.created_at.max(Utc::now()),
                None => Utc::now(),
            };

            let record = NotificationRecord {
                id: NotificationId::new(),
                recipient_id: new.recipient_id,
                kind: new.kind,
                actor: new.actor.clone(),
                subject_ref: new.subject_ref,
                message: new.message.clone(),
                read: false,
                email_dispatched: false,
                created_at,
            };
            inbox.push(record.clone());
            record
        };

        self.signal(new.recipient_id);
        Ok(Some(record))
    }

    async fn find_by_id(
        &self,
        recipient: UserId,
        id: NotificationId,
    ) -> AppResult<Option<NotificationRecord>> {
        Ok(self
            .inboxes
            .get(&recipient)
            .and_then(|inbox| inbox.iter().find(|r| r.id == id).cloned()))
    }

    async fn list_inbox(&self, recipient: UserId) -> AppResult<Vec<NotificationRecord>> {
        Ok(self
            .inboxes
            .get(&recipient)
            .map(|inbox| inbox.iter().rev().cloned().collect())
            .unwrap_or_default())
    }

    async fn find_by_recipient(
        &self,
        recipient: UserId,
        page: &PageRequest,
    ) -> AppResult<PageResponse<NotificationRecord>> {
        let all = self.list_inbox(recipient).await?;
        let total = all.len() as u64;
        let items = all
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();
        Ok(PageResponse::new(items, page.page, page.page_size, total))
    }

    async fn count_unread(&self, recipient: UserId) -> AppResult<u64> {
        Ok(self
            .inboxes
            .get(&recipient)
            .map(|inbox| inbox.iter().filter(|r| !r.read).count() as u64)
            .unwrap_or(0))
    }

    async fn unread_ids(&self, recipient: UserId) -> AppResult<Vec<NotificationId>> {
        Ok(self
            .inboxes
            .get(&recipient)
            .map(|inbox| {
                inbox
                    .iter()
                    .filter(|r| !r.read)
                    .map(|r| r.id)
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn mark_read(&self, recipient: UserId, ids: &[NotificationId]) -> AppResult<u64> {
        let mut marked = 0;
        if let Some(mut inbox) = self.inboxes.get_mut(&recipient) {
            for record in inbox.iter_mut() {
                if !record.read && ids.contains(&record.id) {
                    record.read = true;
                    marked += 1;
                }
            }
        }

        if marked > 0 {
            self.signal(recipient);
        }
        Ok(marked)
    }

    async fn mark_email_dispatched(&self, recipient: UserId, id: NotificationId) -> AppResult<()> {
        if let Some(mut inbox) = self.inboxes.get_mut(&recipient) {
            if let Some(record) = inbox.iter_mut().find(|r| r.id == id) {
                record.email_dispatched = true;
            }
        }
        Ok(())
    }

    async fn has_pending_friend_request(
        &self,
        recipient: UserId,
        actor: UserId,
    ) -> AppResult<bool> {
        Ok(self
            .inboxes
            .get(&recipient)
            .map(|inbox| {
                inbox
                    .iter()
                    .any(|r| r.kind == NotificationKind::FriendRequest && r.actor.id == actor)
            })
            .unwrap_or(false))
    }

    async fn delete_friend_request(&self, recipient: UserId, actor: UserId) -> AppResult<u64> {
        let mut deleted = 0;
        if let Some(mut inbox) = self.inboxes.get_mut(&recipient) {
            let before = inbox.len();
            inbox.retain(|r| {
                !(r.kind == NotificationKind::FriendRequest && r.actor.id == actor)
            });
            deleted = (before - inbox.len()) as u64;
        }

        if deleted > 0 {
            self.signal(recipient);
        }
        Ok(deleted)
    }

    async fn delete_read_before(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        let mut deleted = 0;
        let mut touched = Vec::new();

        for mut entry in self.inboxes.iter_mut() {
            let before = entry.len();
            entry.retain(|r| !(r.read && r.created_at <= cutoff));
            let removed = before - entry.len();
            if removed > 0 {
                deleted += removed as u64;
                touched.push(*entry.key());
            }
        }

        for recipient in touched {
            self.signal(recipient);
        }
        Ok(deleted)
    }

    fn watch(&self) -> broadcast::Receiver<UserId> {
        self.changes.subscribe()
    }
}
