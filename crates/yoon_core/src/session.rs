//! Session wiring.
//!
//! # Responsibility
//! - Build the notification store and search service once per session
//!   from `CoreConfig`, and hand them to consumers explicitly.

use crate::config::CoreConfig;
use crate::notification::notifier::LogNotifier;
use crate::notification::store::NotificationStore;
use crate::search::flow::SearchFlow;
use crate::search::service::MockLegalService;
use crate::storage::{LocalStorage, MemoryStorage, SqliteStorage, StorageResult};
use log::info;

/// Storage backend selected by configuration.
pub type SessionStorage = Box<dyn LocalStorage>;

/// Per-session context shared by every page.
pub struct Session {
    pub notifications: NotificationStore<SessionStorage>,
    pub legal: MockLegalService,
}

impl Session {
    /// Opens storage, rehydrates notifications and prepares the service.
    ///
    /// # Errors
    /// - The configured SQLite file cannot be opened or migrated.
    pub fn open(config: &CoreConfig) -> StorageResult<Self> {
        let storage: SessionStorage = match &config.storage_path {
            Some(path) => Box::new(SqliteStorage::open(path)?),
            None => Box::new(MemoryStorage::new()),
        };

        let mut notifications = NotificationStore::load(storage, config.storage_key.clone());
        if config.system_alerts {
            notifications = notifications.with_notifier(Box::new(LogNotifier));
        }

        info!(
            "event=session_open module=core status=ok durable={} notifications={}",
            config.storage_path.is_some(),
            notifications.len()
        );

        Ok(Self {
            notifications,
            legal: MockLegalService::new(config.latency),
        })
    }

    /// Search page bound to this session's service and store.
    pub fn search_flow(&mut self) -> SearchFlow<'_, MockLegalService, SessionStorage> {
        SearchFlow::new(&self.legal, &mut self.notifications)
    }
}
