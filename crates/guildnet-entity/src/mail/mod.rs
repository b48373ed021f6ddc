//! Outbound mail domain entities.

pub mod model;

pub use model::OutboundMail;
