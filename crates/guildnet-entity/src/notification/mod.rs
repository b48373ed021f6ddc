//! Notification domain entities.

pub mod event;
pub mod kind;
pub mod model;

pub use event::{Actor, NotificationEvent};
pub use kind::NotificationKind;
pub use model::{NewNotification, NotificationRecord, SubjectRef};
