//! PostgreSQL store backends.

pub mod friendship;
pub mod mail;
pub mod notification;

pub use friendship::PgFriendshipStore;
pub use mail::PgMailQueue;
pub use notification::PgNotificationStore;
