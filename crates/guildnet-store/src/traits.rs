//! Store adapter contracts.
//!
//! These traits are the only boundary between the notification core and the
//! persistent store. The inbox is logically owned by its recipient: creation
//! happens in the fan-out dispatcher, `read` flips in the read-state manager,
//! and deletion happens only through friend-request consumption and the
//! retention sweeper.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::broadcast;

use guildnet_core::result::AppResult;
use guildnet_core::types::{MailMessageId, NotificationId, PageRequest, PageResponse, UserId};
use guildnet_entity::mail::OutboundMail;
use guildnet_entity::notification::{NewNotification, NotificationRecord};

/// Persistence contract for notification records.
#[async_trait]
pub trait NotificationStore: std::fmt::Debug + Send + Sync + 'static {
    /// Insert a new record into the recipient's inbox.
    ///
    /// The store assigns the id and a per-inbox non-decreasing creation
    /// timestamp. Returns `None` when a pending friend request for the same
    /// `(recipient, actor)` pair already exists — the write-time dedup
    /// guarantee for FRIEND_REQUEST.
    async fn insert(&self, new: &NewNotification) -> AppResult<Option<NotificationRecord>>;

    /// Fetch a single record from the recipient's inbox.
    async fn find_by_id(
        &self,
        recipient: UserId,
        id: NotificationId,
    ) -> AppResult<Option<NotificationRecord>>;

    /// Full inbox, ordered by creation time descending.
    async fn list_inbox(&self, recipient: UserId) -> AppResult<Vec<NotificationRecord>>;

    /// Paginated inbox listing, ordered by creation time descending.
    async fn find_by_recipient(
        &self,
        recipient: UserId,
        page: &PageRequest,
    ) -> AppResult<PageResponse<NotificationRecord>>;

    /// Count records with `read == false`.
    async fn count_unread(&self, recipient: UserId) -> AppResult<u64>;

    /// Ids of all currently unread records.
    async fn unread_ids(&self, recipient: UserId) -> AppResult<Vec<NotificationId>>;

    /// Set `read = true` on the listed records.
    ///
    /// Unknown and already-read ids are silently accepted. Returns the
    /// number of records newly marked.
    async fn mark_read(&self, recipient: UserId, ids: &[NotificationId]) -> AppResult<u64>;

    /// Record that the paired mail queue entry was enqueued.
    async fn mark_email_dispatched(&self, recipient: UserId, id: NotificationId) -> AppResult<()>;

    /// Whether an unconsumed friend-request record exists for the pair.
    async fn has_pending_friend_request(
        &self,
        recipient: UserId,
        actor: UserId,
    ) -> AppResult<bool>;

    /// Delete the pair's friend-request records (accept/reject consumption).
    ///
    /// Returns the number of records deleted; this frees the dedup key.
    async fn delete_friend_request(&self, recipient: UserId, actor: UserId) -> AppResult<u64>;

    /// Delete every record that is read and was created at or before
    /// `cutoff`, across all inboxes. Unread records are never touched.
    async fn delete_read_before(&self, cutoff: DateTime<Utc>) -> AppResult<u64>;

    /// Subscribe to inbox change signals.
    ///
    /// The receiver yields the recipient id of every inbox that changed
    /// (create, read-flip, delete). Consumers re-read the inbox on each
    /// signal; the signal itself carries no payload beyond the owner.
    fn watch(&self) -> broadcast::Receiver<UserId>;
}

/// Persistence contract for the friend graph mutations the notification
/// subsystem performs on friend-request acceptance.
#[async_trait]
pub trait FriendshipStore: std::fmt::Debug + Send + Sync + 'static {
    /// Link two users as friends, in both directions. Idempotent.
    async fn link(&self, a: UserId, b: UserId) -> AppResult<()>;

    /// Whether the two users are already linked.
    async fn are_friends(&self, a: UserId, b: UserId) -> AppResult<bool>;
}

/// Outbound mail queue contract.
///
/// Fire-and-forget: the service does not await delivery, only queue
/// acceptance. An external relay consumes the queue.
#[async_trait]
pub trait MailQueue: std::fmt::Debug + Send + Sync + 'static {
    /// Append a mail message to the queue.
    async fn enqueue(&self, mail: &OutboundMail) -> AppResult<MailMessageId>;
}
