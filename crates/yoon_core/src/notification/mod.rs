//! In-app notifications.
//!
//! # Responsibility
//! - `store`: session collection with local-storage mirroring.
//! - `templates`: pure builders turning domain events into payloads.
//! - `notifier`: optional, injected system-alert capability.

pub mod notifier;
pub mod store;
pub mod templates;
