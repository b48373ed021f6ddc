//! PostgreSQL mail queue.
//!
//! Insert-only from this service's point of view; the external relay
//! consumes and deletes entries.

use async_trait::async_trait;
use sqlx::PgPool;

use guildnet_core::error::{AppError, ErrorKind};
use guildnet_core::result::AppResult;
use guildnet_core::types::MailMessageId;
use guildnet_entity::mail::OutboundMail;

use crate::traits::MailQueue;

/// Mail queue backed by the `mail_queue` table.
#[derive(Debug, Clone)]
pub struct PgMailQueue {
    pool: PgPool,
}

impl PgMailQueue {
    /// Create a new mail queue.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MailQueue for PgMailQueue {
    async fn enqueue(&self, mail: &OutboundMail) -> AppResult<MailMessageId> {
        sqlx::query(
            "INSERT INTO mail_queue \
             (id, from_address, recipient, template_name, template_data, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(mail.id)
        .bind(&mail.from_address)
        .bind(&mail.to)
        .bind(&mail.template_name)
        .bind(&mail.template_data)
        .bind(mail.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Mail, "Failed to enqueue mail", e))?;

        Ok(mail.id)
    }
}
