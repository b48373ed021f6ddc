//! User domain entities.

pub mod profile;

pub use profile::UserProfile;
