//! HTTP handlers, organized by domain.

pub mod events;
pub mod friend_request;
pub mod health;
pub mod notification;
pub mod ws;
