//! In-memory store backends for single-node deployments and tests.

pub mod friendship;
pub mod mail;
pub mod notification;

pub use friendship::MemoryFriendshipStore;
pub use mail::MemoryMailQueue;
pub use notification::MemoryNotificationStore;
