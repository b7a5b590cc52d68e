//! Core domain logic for YOON legal search and in-app notifications.
//! This crate is the single source of truth for notification invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod notification;
pub mod search;
pub mod session;
pub mod storage;

pub use config::{ConfigError, CoreConfig, LogConfig, SearchLatency, DEFAULT_STORAGE_KEY};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::legal::{
    LegalArticle, LegalArticleId, LegalDomain, LegalText, LegalTextId, TextStatus, TextType,
};
pub use model::notification::{
    ConsultationStatus, LegalUpdateKind, NewNotification, Notification, NotificationCategory,
    NotificationId, NotificationMetadata,
};
pub use notification::notifier::{AlertPermission, LogNotifier, SystemAlert, SystemNotifier};
pub use notification::store::{NotificationStore, ReadFilter, StoreEvent, SubscriptionId};
pub use notification::templates::NotificationEvent;
pub use search::catalog::LegalCatalog;
pub use search::flow::{OpenedText, SearchFlow, SearchOutcome, SearchScope};
pub use search::service::{LegalSource, MockLegalService};
pub use search::{SearchError, SearchResult};
pub use session::Session;
pub use storage::{LocalStorage, MemoryStorage, SqliteStorage, StorageError, StorageResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
