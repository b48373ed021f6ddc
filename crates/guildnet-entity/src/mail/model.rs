//! Outbound mail queue entry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use guildnet_core::types::MailMessageId;

use crate::notification::NotificationEvent;

/// A write-only mail queue entry consumed by the external relay.
///
/// Exactly one entry is enqueued per in-app notification record, except when
/// the recipient has no resolvable email address.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OutboundMail {
    /// Queue entry identifier.
    pub id: MailMessageId,
    /// Configured sender address.
    pub from_address: String,
    /// Recipient email address.
    pub to: String,
    /// Relay template to render (lower-cased notification kind).
    pub template_name: String,
    /// The serialized originating event, fed into the template.
    pub template_data: serde_json::Value,
    /// When the entry was enqueued.
    pub created_at: DateTime<Utc>,
}

impl OutboundMail {
    /// Build a queue entry for an event, or `None` when the event carries no
    /// recipient email (the in-app record is still created in that case).
    pub fn for_event(event: &NotificationEvent, from_address: &str) -> Option<Self> {
        let to = event.recipient_email.clone()?;
        let template_data = serde_json::to_value(event).ok()?;

        Some(Self {
            id: MailMessageId::new(),
            from_address: from_address.to_string(),
            to,
            template_name: event.kind.template_name().to_string(),
            template_data,
            created_at: Utc::now(),
        })
    }
}
