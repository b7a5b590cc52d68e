//! Session notification store.
//!
//! # Responsibility
//! - Own the authoritative in-memory list of notifications for a session.
//! - Mirror the full list into local storage after every state change.
//! - Fan state changes out to subscribers (UI re-render hooks).
//!
//! # Invariants
//! - Records are ordered newest first; `add` inserts at the head.
//! - Ids are unique among live records; `read` starts `false`.
//! - Mutations never fail: storage and alert errors are logged, and the
//!   in-memory list stays authoritative.
//! - Missing ids on `mark_as_read`/`remove` are silent no-ops.
//! - Loading decodes record by record: a malformed record is logged and
//!   skipped, the rest of the collection survives.

use crate::model::notification::{NewNotification, Notification, NotificationId};
use crate::notification::notifier::{AlertPermission, SystemAlert, SystemNotifier};
use crate::storage::LocalStorage;
use log::{debug, error, warn};
use serde_json::Value;
use time::OffsetDateTime;

/// Read-state filter offered by the notifications page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadFilter {
    #[default]
    All,
    Unread,
    Read,
}

impl ReadFilter {
    fn accepts(self, notification: &Notification) -> bool {
        match self {
            Self::All => true,
            Self::Unread => !notification.is_read(),
            Self::Read => notification.is_read(),
        }
    }
}

/// State change broadcast to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    Added(NotificationId),
    Read(NotificationId),
    AllRead,
    Removed(NotificationId),
    Cleared,
}

/// Handle returned by [`NotificationStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&StoreEvent)>;

/// Notification collection for one session, mirrored to `S`.
///
/// Construct once per session and hand `&mut` access to consumers.
pub struct NotificationStore<S: LocalStorage> {
    storage: S,
    storage_key: String,
    notifications: Vec<Notification>,
    notifier: Option<Box<dyn SystemNotifier>>,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl<S: LocalStorage> NotificationStore<S> {
    /// Rehydrates the store from `storage[storage_key]`.
    ///
    /// A missing entry yields an empty store. An unreadable or malformed
    /// entry is logged and also yields an empty store.
    pub fn load(storage: S, storage_key: impl Into<String>) -> Self {
        let storage_key = storage_key.into();
        let notifications = read_persisted(&storage, &storage_key);
        debug!(
            "event=notification_load module=notification status=ok count={}",
            notifications.len()
        );

        Self {
            storage,
            storage_key,
            notifications,
            notifier: None,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Installs the system-alert capability used after `add`.
    pub fn with_notifier(mut self, notifier: Box<dyn SystemNotifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn has_notifier(&self) -> bool {
        self.notifier.is_some()
    }

    /// Creates, stores and persists a new unread notification.
    ///
    /// Returns a copy of the stored record.
    pub fn add(&mut self, input: NewNotification) -> Notification {
        let id = self.fresh_id();
        let notification = Notification::issue(input, id.clone(), OffsetDateTime::now_utc());
        self.notifications.insert(0, notification.clone());

        debug!(
            "event=notification_add module=notification status=ok category={} unread={}",
            notification.category().as_str(),
            self.unread_count()
        );
        self.persist();
        self.emit(StoreEvent::Added(id));
        self.raise_alert(&notification);

        notification
    }

    pub fn mark_as_read(&mut self, id: &NotificationId) {
        let changed = self
            .notifications
            .iter_mut()
            .find(|notification| notification.id() == id)
            .is_some_and(Notification::mark_read);
        if !changed {
            return;
        }

        self.persist();
        self.emit(StoreEvent::Read(id.clone()));
    }

    pub fn mark_all_as_read(&mut self) {
        let mut changed = false;
        for notification in &mut self.notifications {
            changed |= notification.mark_read();
        }
        if !changed {
            return;
        }

        self.persist();
        self.emit(StoreEvent::AllRead);
    }

    pub fn remove(&mut self, id: &NotificationId) {
        let before = self.notifications.len();
        self.notifications.retain(|notification| notification.id() != id);
        if self.notifications.len() == before {
            return;
        }

        self.persist();
        self.emit(StoreEvent::Removed(id.clone()));
    }

    /// Empties the collection and overwrites the persisted copy.
    pub fn clear(&mut self) {
        let had_records = !self.notifications.is_empty();
        self.notifications.clear();
        self.persist();
        if had_records {
            self.emit(StoreEvent::Cleared);
        }
    }

    /// Records owned by `user_id`, in store order.
    ///
    /// The iterator borrows the store and is evaluated lazily; call again
    /// for a fresh pass.
    pub fn by_owner<'a>(
        &'a self,
        user_id: &'a str,
    ) -> impl Iterator<Item = &'a Notification> + 'a {
        self.notifications
            .iter()
            .filter(move |notification| notification.owner_user_id() == Some(user_id))
    }

    pub fn filtered(&self, filter: ReadFilter) -> impl Iterator<Item = &Notification> + '_ {
        self.notifications
            .iter()
            .filter(move |notification| filter.accepts(notification))
    }

    /// Number of unread records, recounted on every call.
    pub fn unread_count(&self) -> usize {
        self.notifications
            .iter()
            .filter(|notification| !notification.is_read())
            .count()
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn get(&self, id: &NotificationId) -> Option<&Notification> {
        self.notifications
            .iter()
            .find(|notification| notification.id() == id)
    }

    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Consumes the store, handing back its storage backend.
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Registers a callback invoked after every state change.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&StoreEvent) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Drops a subscription. Returns `false` when it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(subscription, _)| *subscription != id);
        self.subscribers.len() != before
    }

    fn fresh_id(&self) -> NotificationId {
        loop {
            let id = NotificationId::generate();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    fn persist(&mut self) {
        let payload = match serde_json::to_string(&self.notifications) {
            Ok(payload) => payload,
            Err(err) => {
                error!(
                    "event=notification_persist module=notification status=error error_code=encode_failed error={err}"
                );
                return;
            }
        };

        if let Err(err) = self.storage.set_item(&self.storage_key, &payload) {
            error!(
                "event=notification_persist module=notification status=error error_code=write_failed count={} error={err}",
                self.notifications.len()
            );
        }
    }

    fn emit(&mut self, event: StoreEvent) {
        for (_, callback) in &mut self.subscribers {
            callback(&event);
        }
    }

    fn raise_alert(&self, notification: &Notification) {
        let Some(notifier) = self.notifier.as_deref() else {
            return;
        };
        if notifier.permission() != AlertPermission::Granted {
            return;
        }
        if let Err(err) = notifier.show(&SystemAlert::for_notification(notification)) {
            warn!("event=system_alert module=notification status=error error={err}");
        }
    }
}

fn read_persisted<S: LocalStorage>(storage: &S, key: &str) -> Vec<Notification> {
    let raw = match storage.get_item(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(err) => {
            error!(
                "event=notification_load module=notification status=error error_code=read_failed error={err}"
            );
            return Vec::new();
        }
    };

    let records = match serde_json::from_str::<Vec<Value>>(&raw) {
        Ok(records) => records,
        Err(err) => {
            error!(
                "event=notification_load module=notification status=error error_code=decode_failed bytes={} error={err}",
                raw.len()
            );
            return Vec::new();
        }
    };

    let total = records.len();
    let notifications: Vec<Notification> = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value(record) {
            Ok(notification) => Some(notification),
            Err(err) => {
                warn!(
                    "event=notification_load module=notification status=skipped error_code=record_decode_failed index={index} error={err}"
                );
                None
            }
        })
        .collect();

    if notifications.len() < total {
        warn!(
            "event=notification_load module=notification status=partial loaded={} skipped={}",
            notifications.len(),
            total - notifications.len()
        );
    }
    notifications
}
