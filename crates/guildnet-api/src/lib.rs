//! # guildnet-api
//!
//! HTTP API layer for the GuildNet notification service, built on Axum.
//!
//! Provides the event ingestion endpoint, inbox and read-state endpoints,
//! friend-request consumption, a WebSocket live inbox stream, DTOs, and
//! error mapping. Authentication is handled upstream by the identity
//! gateway, which forwards the caller's id in the `x-guildnet-user` header.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::ApiError;
pub use state::AppState;
