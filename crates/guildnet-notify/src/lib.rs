//! # guildnet-notify
//!
//! The notification core: classifies user actions into events, applies the
//! suppression policy, fans events out to the in-app inbox and the mail
//! queue, manages read state, consumes friend requests, and sweeps aged-out
//! read notifications.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references to the store adapter traits.

pub mod classifier;
pub mod dispatcher;
pub mod friendship;
pub mod inbox;
pub mod service;
pub mod suppression;
pub mod sweeper;

pub use classifier::{Action, EventClassifier};
pub use dispatcher::{DispatchOutcome, FanoutDispatcher};
pub use friendship::FriendRequestService;
pub use inbox::InboxReadState;
pub use service::NotificationService;
pub use suppression::SuppressionPolicy;
pub use sweeper::RetentionSweeper;
