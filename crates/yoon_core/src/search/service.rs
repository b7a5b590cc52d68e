//! Legal search service seam and mock backend.
//!
//! # Invariants
//! - `MockLegalService` never fails; its only suspension point is the
//!   configured artificial delay.
//! - In-flight calls cannot be cancelled and stale results are not
//!   suppressed.

use crate::config::SearchLatency;
use crate::logging::{sanitize_message, MAX_LOGGED_TEXT_CHARS};
use crate::model::legal::{LegalArticle, LegalDomain, LegalText, LegalTextId};
use crate::search::catalog::LegalCatalog;
use crate::search::SearchResult;
use log::info;
use std::sync::Arc;
use std::time::Duration;

/// Callable legal search service consumed by pages.
#[allow(async_fn_in_trait)]
pub trait LegalSource {
    async fn list_texts(&self) -> SearchResult<Vec<LegalText>>;

    async fn get_text(&self, id: LegalTextId) -> SearchResult<Option<LegalText>>;

    /// Articles of one text, ordered by position.
    async fn list_articles(&self, text_id: LegalTextId) -> SearchResult<Vec<LegalArticle>>;

    /// `domain` of `None`, `""` or `"all"` disables domain filtering.
    async fn search_texts(
        &self,
        query: &str,
        domain: Option<&str>,
    ) -> SearchResult<Vec<LegalText>>;

    async fn search_articles(
        &self,
        query: &str,
        text_id: Option<LegalTextId>,
    ) -> SearchResult<Vec<LegalArticle>>;

    async fn list_domains(&self) -> SearchResult<Vec<LegalDomain>>;

    /// Fire-and-forget history write.
    async fn record_search_history(
        &self,
        user_id: &str,
        query: &str,
        result_count: usize,
    ) -> SearchResult<()>;
}

/// Catalog-backed service simulating network latency.
#[derive(Debug, Clone)]
pub struct MockLegalService {
    catalog: Arc<LegalCatalog>,
    latency: SearchLatency,
}

impl MockLegalService {
    /// Service over the seeded catalog.
    pub fn new(latency: SearchLatency) -> Self {
        Self::with_catalog(LegalCatalog::seeded(), latency)
    }

    pub fn with_catalog(catalog: Arc<LegalCatalog>, latency: SearchLatency) -> Self {
        Self { catalog, latency }
    }

    pub fn catalog(&self) -> &LegalCatalog {
        &self.catalog
    }
}

impl Default for MockLegalService {
    fn default() -> Self {
        Self::new(SearchLatency::default())
    }
}

impl LegalSource for MockLegalService {
    async fn list_texts(&self) -> SearchResult<Vec<LegalText>> {
        delay(self.latency.lookup).await;
        Ok(self.catalog.texts().to_vec())
    }

    async fn get_text(&self, id: LegalTextId) -> SearchResult<Option<LegalText>> {
        delay(self.latency.lookup).await;
        Ok(self.catalog.text(id).cloned())
    }

    async fn list_articles(&self, text_id: LegalTextId) -> SearchResult<Vec<LegalArticle>> {
        delay(self.latency.lookup).await;
        Ok(self.catalog.articles_of(text_id))
    }

    async fn search_texts(
        &self,
        query: &str,
        domain: Option<&str>,
    ) -> SearchResult<Vec<LegalText>> {
        delay(self.latency.search).await;
        Ok(self.catalog.search_texts(query, domain))
    }

    async fn search_articles(
        &self,
        query: &str,
        text_id: Option<LegalTextId>,
    ) -> SearchResult<Vec<LegalArticle>> {
        delay(self.latency.search).await;
        Ok(self.catalog.search_articles(query, text_id))
    }

    async fn list_domains(&self) -> SearchResult<Vec<LegalDomain>> {
        delay(self.latency.lookup).await;
        Ok(self.catalog.domains())
    }

    async fn record_search_history(
        &self,
        user_id: &str,
        query: &str,
        result_count: usize,
    ) -> SearchResult<()> {
        delay(self.latency.history).await;
        info!(
            "event=search_history module=search status=ok user_id={} query={} results={result_count}",
            sanitize_message(user_id, MAX_LOGGED_TEXT_CHARS),
            sanitize_message(query, MAX_LOGGED_TEXT_CHARS)
        );
        Ok(())
    }
}

async fn delay(duration: Duration) {
    if !duration.is_zero() {
        tokio::time::sleep(duration).await;
    }
}
