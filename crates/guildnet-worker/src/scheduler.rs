//! Cron scheduler for periodic maintenance tasks.

use std::sync::Arc;

use tokio_cron_scheduler::{Job as CronJob, JobScheduler};
use tracing;

use guildnet_core::config::notifications::NotificationsConfig;
use guildnet_core::error::AppError;
use guildnet_core::result::AppResult;
use guildnet_notify::RetentionSweeper;

/// Cron-based scheduler for periodic background tasks.
pub struct CronScheduler {
    scheduler: JobScheduler,
    sweeper: Arc<RetentionSweeper>,
    sweep_schedule: String,
}

impl std::fmt::Debug for CronScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CronScheduler")
            .field("sweep_schedule", &self.sweep_schedule)
            .finish()
    }
}

impl CronScheduler {
    /// Create a new cron scheduler.
    pub async fn new(sweeper: RetentionSweeper, config: &NotificationsConfig) -> AppResult<Self> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {e}")))?;

        Ok(Self {
            scheduler,
            sweeper: Arc::new(sweeper),
            sweep_schedule: config.sweep_schedule.clone(),
        })
    }

    /// Register all scheduled tasks.
    pub async fn register_default_tasks(&self) -> AppResult<()> {
        self.register_retention_sweep().await?;
        tracing::info!("All scheduled tasks registered");
        Ok(())
    }

    /// Start the scheduler.
    pub async fn start(&self) -> AppResult<()> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {e}")))?;

        tracing::info!("Cron scheduler started");
        Ok(())
    }

    /// Shutdown the scheduler.
    pub async fn shutdown(&mut self) -> AppResult<()> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {e}")))?;

        tracing::info!("Cron scheduler shut down");
        Ok(())
    }

    /// Retention sweep on the configured cadence.
    async fn register_retention_sweep(&self) -> AppResult<()> {
        let sweeper = Arc::clone(&self.sweeper);
        let job = CronJob::new_async(self.sweep_schedule.as_str(), move |_uuid, _lock| {
            let sweeper = Arc::clone(&sweeper);
            Box::pin(async move {
                tracing::debug!("Running retention sweep");
                match sweeper.sweep().await {
                    Ok(deleted) => tracing::info!(deleted, "Retention sweep finished"),
                    Err(e) => tracing::error!("Retention sweep failed: {}", e),
                }
            })
        })
        .map_err(|e| {
            AppError::internal(format!("Failed to create retention_sweep schedule: {e}"))
        })?;

        self.scheduler.add(job).await.map_err(|e| {
            AppError::internal(format!("Failed to add retention_sweep schedule: {e}"))
        })?;

        tracing::info!(schedule = %self.sweep_schedule, "Registered: retention_sweep");
        Ok(())
    }
}
