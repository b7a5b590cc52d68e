//! Domain model for notifications and the legal catalog.
//!
//! # Responsibility
//! - Define the notification record and its creation input.
//! - Define read-only legal text/article records served by search.
//!
//! # Invariants
//! - Notification `id`, `created_at` and initial `read` are assigned by the
//!   store, never by callers.
//! - Legal records are immutable once the catalog is built.

pub mod legal;
pub mod notification;
