//! GuildNet notification service entry point.
//!
//! Wires the store backend, notification services, retention scheduler,
//! and HTTP API together and runs the server.

use tracing;
use tracing_subscriber::{EnvFilter, fmt};

use guildnet_api::{AppState, run_server};
use guildnet_core::config::AppConfig;
use guildnet_core::error::AppError;
use guildnet_notify::RetentionSweeper;
use guildnet_store::StoreManager;
use guildnet_worker::CronScheduler;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file and environment.
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("GUILDNET_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function.
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(
        "Starting GuildNet notifications v{}",
        env!("CARGO_PKG_VERSION")
    );

    tracing::info!(provider = %config.store.provider, "Initializing store backend");
    let stores = StoreManager::new(&config.store).await?;

    let scheduler = if config.worker.enabled {
        let sweeper =
            RetentionSweeper::new(stores.notifications(), config.notifications.retention_days);
        let scheduler = CronScheduler::new(sweeper, &config.notifications).await?;
        scheduler.register_default_tasks().await?;
        scheduler.start().await?;
        Some(scheduler)
    } else {
        tracing::info!("Worker disabled, retention sweep will not run in this process");
        None
    };

    let state = AppState::new(config, stores);
    let result = run_server(state).await;

    if let Some(mut scheduler) = scheduler {
        scheduler.shutdown().await?;
    }

    result
}
