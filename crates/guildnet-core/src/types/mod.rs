//! Shared value types: typed identifiers and pagination.

pub mod id;
pub mod pagination;

pub use id::{MailMessageId, MessageId, NotificationId, PostId, UserId};
pub use pagination::{PageRequest, PageResponse};
