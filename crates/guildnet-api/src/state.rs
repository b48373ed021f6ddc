//! Application state shared across all handlers.

use std::sync::Arc;

use guildnet_core::config::AppConfig;
use guildnet_notify::NotificationService;
use guildnet_realtime::InboxProjection;
use guildnet_store::StoreManager;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. All fields are
/// `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Store backend handles.
    pub stores: StoreManager,
    /// Notification service facade.
    pub notifications: Arc<NotificationService>,
    /// Live inbox projection.
    pub projection: Arc<InboxProjection>,
}

impl AppState {
    /// Wire the full state from configuration and an initialized store
    /// manager.
    pub fn new(config: AppConfig, stores: StoreManager) -> Self {
        let notifications = Arc::new(NotificationService::new(&stores, &config.mail));
        let projection = Arc::new(InboxProjection::new(stores.notifications()));

        Self {
            config: Arc::new(config),
            stores,
            notifications,
            projection,
        }
    }
}
