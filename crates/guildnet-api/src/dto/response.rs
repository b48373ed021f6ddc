//! Response DTOs.

use serde::{Deserialize, Serialize};

use guildnet_core::types::NotificationId;
use guildnet_notify::DispatchOutcome;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Unread-count response.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CountResponse {
    /// The unread count.
    pub count: u64,
}

/// Batch read-marking response.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MarkedResponse {
    /// Number of notifications newly marked read.
    pub marked: u64,
}

/// Event ingestion response.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DispatchResponse {
    /// Whether an inbox record was created.
    pub delivered: bool,
    /// The new record's id, when delivered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_id: Option<NotificationId>,
    /// Whether a mail queue entry was also enqueued.
    pub mail_enqueued: bool,
}

impl From<DispatchOutcome> for DispatchResponse {
    fn from(outcome: DispatchOutcome) -> Self {
        match outcome {
            DispatchOutcome::Suppressed => Self {
                delivered: false,
                notification_id: None,
                mail_enqueued: false,
            },
            DispatchOutcome::Delivered {
                record_id,
                mail_enqueued,
            } => Self {
                delivered: true,
                notification_id: Some(record_id),
                mail_enqueued,
            },
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Crate version.
    pub version: String,
}
