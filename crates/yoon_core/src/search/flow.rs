//! Search-page orchestration.
//!
//! # Responsibility
//! - Validate queries before dispatching them to a `LegalSource`.
//! - Report every outcome (rejection, success, failure) as a notification.
//!
//! # Invariants
//! - A blank query never reaches the source.
//! - Source failures never escape: they become one error notification.

use crate::logging::{sanitize_message, MAX_LOGGED_TEXT_CHARS};
use crate::model::legal::{LegalArticle, LegalDomain, LegalText, LegalTextId};
use crate::model::notification::{NewNotification, NotificationCategory};
use crate::notification::store::NotificationStore;
use crate::notification::templates::search_completed;
use crate::search::service::LegalSource;
use crate::search::SearchResult;
use crate::storage::LocalStorage;
use log::{info, warn};

/// What a search runs against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchScope {
    /// Legal texts, optionally within one domain (`"all"` for none).
    Texts { domain: Option<String> },
    /// Articles, optionally within one parent text.
    Articles { text_id: Option<LegalTextId> },
}

/// Records returned by a successful search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Texts(Vec<LegalText>),
    Articles(Vec<LegalArticle>),
}

impl SearchOutcome {
    pub fn len(&self) -> usize {
        match self {
            Self::Texts(texts) => texts.len(),
            Self::Articles(articles) => articles.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A legal text opened for reading, with its ordered articles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenedText {
    pub text: LegalText,
    pub articles: Vec<LegalArticle>,
}

/// Search page wiring a legal source to the session notification store.
pub struct SearchFlow<'a, L, S: LocalStorage> {
    source: &'a L,
    store: &'a mut NotificationStore<S>,
}

impl<'a, L: LegalSource, S: LocalStorage> SearchFlow<'a, L, S> {
    pub fn new(source: &'a L, store: &'a mut NotificationStore<S>) -> Self {
        Self { source, store }
    }

    /// Runs a search on behalf of `user_id` (anonymous when `None`).
    ///
    /// Returns `None` when the query was rejected or the source failed; the
    /// reason is already in the notification store.
    pub async fn search(
        &mut self,
        user_id: Option<&str>,
        query: &str,
        scope: &SearchScope,
    ) -> Option<SearchOutcome> {
        let query = query.trim();
        if query.is_empty() {
            self.store.add(NewNotification::new(
                "Attention",
                "Veuillez saisir un terme de recherche",
                NotificationCategory::Warning,
            ));
            return None;
        }

        let outcome = match self.dispatch(query, scope).await {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(
                    "event=legal_search module=search status=error query={} error={err}",
                    sanitize_message(query, MAX_LOGGED_TEXT_CHARS)
                );
                self.notify_error("Erreur lors de la recherche");
                return None;
            }
        };
        let count = outcome.len();
        info!(
            "event=legal_search module=search status=ok scope={} results={count}",
            scope_label(scope)
        );

        if let Some(user_id) = user_id {
            if let Err(err) = self
                .source
                .record_search_history(user_id, query, count)
                .await
            {
                warn!("event=search_history module=search status=error error={err}");
            }
            self.store.add(search_completed(user_id, query, count));
        }

        self.store.add(NewNotification::new(
            "Succès",
            format!("{count} résultat(s) trouvé(s)"),
            NotificationCategory::Success,
        ));

        Some(outcome)
    }

    /// Domain list for the filter selector; empty on failure.
    pub async fn load_domains(&mut self) -> Vec<LegalDomain> {
        match self.source.list_domains().await {
            Ok(domains) => domains,
            Err(err) => {
                warn!("event=legal_domains module=search status=error error={err}");
                self.notify_error("Erreur lors du chargement des domaines");
                Vec::new()
            }
        }
    }

    /// Loads a text and its articles.
    ///
    /// An unknown id yields `None` with a warning. An article failure keeps
    /// the text and reports the error.
    pub async fn open_text(&mut self, id: LegalTextId) -> Option<OpenedText> {
        let text = match self.source.get_text(id).await {
            Ok(Some(text)) => text,
            Ok(None) => {
                self.store.add(NewNotification::new(
                    "Attention",
                    "Texte juridique introuvable",
                    NotificationCategory::Warning,
                ));
                return None;
            }
            Err(err) => {
                warn!("event=legal_text module=search status=error text_id={id} error={err}");
                self.notify_error("Erreur lors du chargement du texte");
                return None;
            }
        };

        let articles = match self.source.list_articles(id).await {
            Ok(articles) => articles,
            Err(err) => {
                warn!("event=legal_articles module=search status=error text_id={id} error={err}");
                self.notify_error("Erreur lors du chargement des articles");
                Vec::new()
            }
        };

        Some(OpenedText { text, articles })
    }

    async fn dispatch(&self, query: &str, scope: &SearchScope) -> SearchResult<SearchOutcome> {
        match scope {
            SearchScope::Texts { domain } => self
                .source
                .search_texts(query, domain.as_deref())
                .await
                .map(SearchOutcome::Texts),
            SearchScope::Articles { text_id } => self
                .source
                .search_articles(query, *text_id)
                .await
                .map(SearchOutcome::Articles),
        }
    }

    fn notify_error(&mut self, message: &str) {
        self.store.add(NewNotification::new(
            "Erreur",
            message,
            NotificationCategory::Error,
        ));
    }
}

fn scope_label(scope: &SearchScope) -> &'static str {
    match scope {
        SearchScope::Texts { .. } => "texts",
        SearchScope::Articles { .. } => "articles",
    }
}
