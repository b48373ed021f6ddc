//! # guildnet-worker
//!
//! Scheduled maintenance for the GuildNet notification service. The only
//! periodic task is the retention sweep, run on a configurable cron
//! schedule.

pub mod scheduler;

pub use scheduler::CronScheduler;
