//! # guildnet-store
//!
//! The store adapter boundary for the GuildNet notification service.
//!
//! All persistence flows through the [`traits::NotificationStore`],
//! [`traits::FriendshipStore`], and [`traits::MailQueue`] contracts. Two
//! complete backends are provided: PostgreSQL (sqlx, with LISTEN/NOTIFY
//! inbox change signals) and in-memory (dashmap + broadcast, for
//! single-node development and tests). The backend is selected from
//! configuration by [`provider::StoreManager`].

pub mod connection;
pub mod memory;
pub mod migration;
pub mod postgres;
pub mod provider;
pub mod traits;

pub use provider::StoreManager;
pub use traits::{FriendshipStore, MailQueue, NotificationStore};
