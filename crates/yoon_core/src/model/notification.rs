//! Notification domain model.
//!
//! # Responsibility
//! - Define the persisted notification record and its wire shape.
//! - Define the typed metadata attached by template builders.
//!
//! # Invariants
//! - `Notification` values are only minted by `Notification::issue`, which
//!   the store calls with a fresh id and the current time.
//! - `read` only ever flips from `false` to `true`.
//! - Wire field names match the browser app (`type`, `timestamp`, `userId`,
//!   `actionUrl`) so previously persisted collections stay readable.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use time::OffsetDateTime;
use uuid::Uuid;

/// Opaque notification identifier.
///
/// Kept as a string newtype: records persisted by older clients carry
/// non-UUID ids that must still round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(String);

impl NotificationId {
    /// Generates a time-ordered id (UUIDv7: millisecond clock + random bits).
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for NotificationId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NotificationId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for NotificationId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Visual severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationCategory {
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// Kind of change announced by a legal-update notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegalUpdateKind {
    New,
    Modified,
    Abrogated,
}

/// Consultation lifecycle state as reported by the consultation backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsultationStatus {
    Pending,
    Accepted,
    Rejected,
    InProgress,
    Completed,
    Cancelled,
}

/// Event-specific payload attached to a notification.
///
/// Serialized with a `type` discriminator and camelCase fields. Maps that
/// carry no known discriminator, or whose fields do not fit the tagged
/// variant, decode as `Untyped` and are written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum NotificationMetadata {
    LegalSearch {
        search_query: String,
        results_count: usize,
    },
    LegalUpdate {
        affected_texts: Vec<u32>,
        update_type: LegalUpdateKind,
    },
    ExpertAvailability {
        expert_count: u32,
        domain: String,
    },
    ConsultationCreated {
        consultation_id: String,
    },
    ConsultationStatusChanged {
        consultation_id: String,
        new_status: ConsultationStatus,
    },
    NewMessage {
        conversation_id: String,
        sender_id: String,
    },
    DocumentUploaded {
        document_id: String,
        document_name: String,
    },
    ExpertRegistration {
        expert_id: String,
    },
    AdminAlert {
        #[serde(default)]
        details: BTreeMap<String, Value>,
    },
    PaymentReminder {
        payment_id: String,
        amount: u64,
    },
    PaymentConfirmed {
        payment_id: String,
        amount: u64,
    },
    Maintenance {
        date: String,
        start_time: String,
        end_time: String,
    },
    AppUpdate {
        version: String,
    },
    #[serde(untagged)]
    Untyped(Map<String, Value>),
}

/// Caller-supplied part of a notification.
///
/// Everything except `id`, `created_at` and `read`, which the store assigns.
#[derive(Debug, Clone, PartialEq)]
pub struct NewNotification {
    pub title: String,
    pub message: String,
    pub category: NotificationCategory,
    pub owner_user_id: Option<String>,
    pub action_link: Option<String>,
    pub metadata: Option<NotificationMetadata>,
}

impl NewNotification {
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        category: NotificationCategory,
    ) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            category,
            owner_user_id: None,
            action_link: None,
            metadata: None,
        }
    }

    pub fn with_owner(mut self, user_id: impl Into<String>) -> Self {
        self.owner_user_id = Some(user_id.into());
        self
    }

    pub fn with_action_link(mut self, link: impl Into<String>) -> Self {
        self.action_link = Some(link.into());
        self
    }

    pub fn with_metadata(mut self, metadata: NotificationMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Persisted, user-facing notification record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    id: NotificationId,
    title: String,
    message: String,
    #[serde(rename = "type")]
    category: NotificationCategory,
    #[serde(rename = "timestamp", with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
    read: bool,
    #[serde(rename = "userId", default, skip_serializing_if = "Option::is_none")]
    owner_user_id: Option<String>,
    #[serde(rename = "actionUrl", default, skip_serializing_if = "Option::is_none")]
    action_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    metadata: Option<NotificationMetadata>,
}

impl Notification {
    /// Mints an unread record from caller input and store-assigned fields.
    pub(crate) fn issue(input: NewNotification, id: NotificationId, now: OffsetDateTime) -> Self {
        Self {
            id,
            title: input.title,
            message: input.message,
            category: input.category,
            created_at: now,
            read: false,
            owner_user_id: input.owner_user_id,
            action_link: input.action_link,
            metadata: input.metadata,
        }
    }

    pub fn id(&self) -> &NotificationId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn category(&self) -> NotificationCategory {
        self.category
    }

    pub fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    pub fn is_read(&self) -> bool {
        self.read
    }

    pub fn owner_user_id(&self) -> Option<&str> {
        self.owner_user_id.as_deref()
    }

    pub fn action_link(&self) -> Option<&str> {
        self.action_link.as_deref()
    }

    pub fn metadata(&self) -> Option<&NotificationMetadata> {
        self.metadata.as_ref()
    }

    /// Flips the record to read. Returns whether state changed.
    pub(crate) fn mark_read(&mut self) -> bool {
        let changed = !self.read;
        self.read = true;
        changed
    }
}
