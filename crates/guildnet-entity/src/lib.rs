//! # guildnet-entity
//!
//! Domain entity models for the GuildNet notification service: notification
//! kinds, events, persisted records, user profiles, and outbound mail queue
//! entries.

pub mod mail;
pub mod notification;
pub mod user;

pub use mail::OutboundMail;
pub use notification::{
    Actor, NewNotification, NotificationEvent, NotificationKind, NotificationRecord, SubjectRef,
};
pub use user::UserProfile;
