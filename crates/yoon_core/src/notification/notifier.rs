//! Optional system-level alert capability.
//!
//! # Responsibility
//! - Describe the permission-gated pop-up channel the store may use after
//!   an `add`.
//! - Keep the store core free of platform side effects: the capability is
//!   injected, and its failures never reach stored state.

use crate::logging::{sanitize_message, MAX_LOGGED_TEXT_CHARS};
use crate::model::notification::Notification;
use log::info;

/// Icon and badge shown with system alerts.
pub const ALERT_ICON: &str = "/yoon.png";

/// Permission state reported by the host platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertPermission {
    Granted,
    Denied,
    /// The user has not been asked yet; treated as not granted.
    Default,
}

/// Payload of one transient system alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemAlert {
    pub title: String,
    pub body: String,
    pub icon: String,
    pub badge: String,
}

impl SystemAlert {
    pub fn for_notification(notification: &Notification) -> Self {
        Self {
            title: notification.title().to_string(),
            body: notification.message().to_string(),
            icon: ALERT_ICON.to_string(),
            badge: ALERT_ICON.to_string(),
        }
    }
}

/// Host capability raising best-effort system alerts.
pub trait SystemNotifier {
    fn permission(&self) -> AlertPermission;

    /// Shows the alert. Errors are reported as text and only logged.
    fn show(&self, alert: &SystemAlert) -> Result<(), String>;
}

/// Notifier that writes alerts to the log instead of a desktop surface.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl SystemNotifier for LogNotifier {
    fn permission(&self) -> AlertPermission {
        AlertPermission::Granted
    }

    fn show(&self, alert: &SystemAlert) -> Result<(), String> {
        info!(
            "event=system_alert module=notification status=ok title={} icon={}",
            sanitize_message(&alert.title, MAX_LOGGED_TEXT_CHARS),
            alert.icon
        );
        Ok(())
    }
}
