//! Legal text search.
//!
//! # Responsibility
//! - `catalog`: static legal dataset and its filters.
//! - `service`: async service seam (`LegalSource`) and its mock backend.
//! - `flow`: search-page orchestration reporting outcomes as notifications.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod catalog;
pub mod flow;
pub mod service;

/// Result type for search APIs.
pub type SearchResult<T> = Result<T, SearchError>;

/// Failure reported by a legal search backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// Backend could not be reached or refused the request.
    Unavailable(String),
    /// Backend answered with data that cannot be interpreted.
    InvalidData(String),
}

impl Display for SearchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(message) => write!(f, "legal search unavailable: {message}"),
            Self::InvalidData(message) => write!(f, "invalid legal search data: {message}"),
        }
    }
}

impl Error for SearchError {}
