//! # guildnet-realtime
//!
//! Live inbox projection for GuildNet notifications. Subscribers get an
//! initial inbox snapshot and a fresh one after every change to that inbox
//! (new notification, read flip, friend-request consumption, retention
//! sweep), driven by the store adapter's change signals.

pub mod projection;
pub mod subscription;

pub use projection::{InboxProjection, InboxSnapshot};
pub use subscription::InboxSubscription;
