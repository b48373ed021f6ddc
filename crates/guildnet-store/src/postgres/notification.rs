//! PostgreSQL notification store.
//!
//! Inbox change signals ride on LISTEN/NOTIFY: a trigger on the
//! `notifications` table emits the recipient id on the
//! `guildnet_inbox_changes` channel, and a background task forwards
//! payloads into a broadcast channel handed out by [`watch`].
//!
//! [`watch`]: NotificationStore::watch

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::postgres::PgListener;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::warn;
use uuid::Uuid;

use guildnet_core::error::{AppError, ErrorKind};
use guildnet_core::result::AppResult;
use guildnet_core::types::{NotificationId, PageRequest, PageResponse, UserId};
use guildnet_entity::notification::{NewNotification, NotificationRecord};

use crate::traits::NotificationStore;

/// NOTIFY channel fed by the `notifications_inbox_change` trigger.
const INBOX_CHANGES_CHANNEL: &str = "guildnet_inbox_changes";

/// Notification store backed by PostgreSQL.
#[derive(Debug)]
pub struct PgNotificationStore {
    pool: PgPool,
    changes: broadcast::Sender<UserId>,
    listener_task: JoinHandle<()>,
}

impl PgNotificationStore {
    /// Connect the store and start the LISTEN/NOTIFY forwarder.
    pub async fn connect(pool: PgPool, change_buffer: usize) -> AppResult<Self> {
        let mut listener = PgListener::connect_with(&pool).await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to open change listener", e)
        })?;
        listener.listen(INBOX_CHANGES_CHANNEL).await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to LISTEN on change channel", e)
        })?;

        let (changes, _) = broadcast::channel(change_buffer);
        let tx = changes.clone();

        let listener_task = tokio::spawn(async move {
            loop {
                match listener.recv().await {
                    Ok(notification) => match notification.payload().parse::<Uuid>() {
                        Ok(uuid) => {
                            let _ = tx.send(UserId::from_uuid(uuid));
                        }
                        Err(e) => {
                            warn!(payload = notification.payload(), error = %e, "Bad inbox change payload");
                        }
                    },
                    Err(e) => {
                        // PgListener reconnects internally; recv errors are transient.
                        warn!(error = %e, "Inbox change listener error");
                        tokio::time::sleep(std::time::Duration::from_secs(1)).await;
                    }
                }
            }
        });

        Ok(Self {
            pool,
            changes,
            listener_task,
        })
    }
}

impl Drop for PgNotificationStore {
    fn drop(&mut self) {
        self.listener_task.abort();
    }
}

#[async_trait]
impl NotificationStore for PgNotificationStore {
    async fn insert(&self, new: &NewNotification) -> AppResult<Option<NotificationRecord>> {
        let (subject_type, subject_id) = match &new.subject_ref {
            Some(subject) => {
                let (kind, id) = subject.as_parts();
                (Some(kind), Some(id))
            }
            None => (None, None),
        };

        sqlx::query_as::<_, NotificationRecord>(
            "INSERT INTO notifications \
                 (recipient_id, kind, actor_id, actor_name, actor_avatar_url, \
                  subject_type, subject_id, message) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             ON CONFLICT (recipient_id, actor_id) \
                 WHERE (kind = 'friend_request'::notification_kind) \
                 DO NOTHING \
             RETURNING *",
        )
        .bind(new.recipient_id)
        .bind(new.kind)
        .bind(new.actor.id)
        .bind(&new.actor.display_name)
        .bind(&new.actor.avatar_url)
        .bind(subject_type)
        .bind(subject_id)
        .bind(&new.message)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to insert notification", e))
    }

    async fn find_by_id(
        &self,
        recipient: UserId,
        id: NotificationId,
    ) -> AppResult<Option<NotificationRecord>> {
        sqlx::query_as::<_, NotificationRecord>(
            "SELECT * FROM notifications WHERE id = $1 AND recipient_id = $2",
        )
        .bind(id)
        .bind(recipient)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to fetch notification", e))
    }

    async fn list_inbox(&self, recipient: UserId) -> AppResult<Vec<NotificationRecord>> {
        sqlx::query_as::<_, NotificationRecord>(
            "SELECT * FROM notifications WHERE recipient_id = $1 \
             ORDER BY created_at DESC, id DESC",
        )
        .bind(recipient)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list inbox", e))
    }

    async fn find_by_recipient(
        &self,
        recipient: UserId,
        page: &PageRequest,
    ) -> AppResult<PageResponse<NotificationRecord>> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM notifications WHERE recipient_id = $1")
                .bind(recipient)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count notifications", e)
                })?;

        let records = sqlx::query_as::<_, NotificationRecord>(
            "SELECT * FROM notifications WHERE recipient_id = $1 \
             ORDER BY created_at DESC, id DESC LIMIT $2 OFFSET $3",
        )
        .bind(recipient)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list notifications", e)
        })?;

        Ok(PageResponse::new(
            records,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    async fn count_unread(&self, recipient: UserId) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications WHERE recipient_id = $1 AND is_read = FALSE",
        )
        .bind(recipient)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count unread", e))?;
        Ok(count as u64)
    }

    async fn unread_ids(&self, recipient: UserId) -> AppResult<Vec<NotificationId>> {
        let ids: Vec<Uuid> = sqlx::query_scalar(
            "SELECT id FROM notifications WHERE recipient_id = $1 AND is_read = FALSE",
        )
        .bind(recipient)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list unread ids", e))?;
        Ok(ids.into_iter().map(NotificationId::from_uuid).collect())
    }

    async fn mark_read(&self, recipient: UserId, ids: &[NotificationId]) -> AppResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }

        let uuids: Vec<Uuid> = ids.iter().map(|id| id.into_uuid()).collect();
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE \
             WHERE recipient_id = $1 AND id = ANY($2) AND is_read = FALSE",
        )
        .bind(recipient)
        .bind(&uuids)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark read", e))?;

        Ok(result.rows_affected())
    }

    async fn mark_email_dispatched(&self, recipient: UserId, id: NotificationId) -> AppResult<()> {
        sqlx::query(
            "UPDATE notifications SET email_dispatched = TRUE \
             WHERE id = $1 AND recipient_id = $2",
        )
        .bind(id)
        .bind(recipient)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to flag email dispatch", e)
        })?;
        Ok(())
    }

    async fn has_pending_friend_request(
        &self,
        recipient: UserId,
        actor: UserId,
    ) -> AppResult<bool> {
        sqlx::query_scalar(
            "SELECT EXISTS( \
                 SELECT 1 FROM notifications \
                 WHERE recipient_id = $1 AND actor_id = $2 \
                   AND kind = 'friend_request'::notification_kind)",
        )
        .bind(recipient)
        .bind(actor)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to check pending request", e)
        })
    }

    async fn delete_friend_request(&self, recipient: UserId, actor: UserId) -> AppResult<u64> {
        let result = sqlx::query(
            "DELETE FROM notifications \
             WHERE recipient_id = $1 AND actor_id = $2 \
               AND kind = 'friend_request'::notification_kind",
        )
        .bind(recipient)
        .bind(actor)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to delete friend request", e)
        })?;
        Ok(result.rows_affected())
    }

    async fn delete_read_before(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        let result =
            sqlx::query("DELETE FROM notifications WHERE is_read = TRUE AND created_at <= $1")
                .bind(cutoff)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to sweep notifications", e)
                })?;
        Ok(result.rows_affected())
    }

    fn watch(&self) -> broadcast::Receiver<UserId> {
        self.changes.subscribe()
    }
}
