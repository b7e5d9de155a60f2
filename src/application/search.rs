//! Remote post search with a persisted list of recent terms.

use std::num::NonZeroUsize;

use jamjournal_api_types::{Post, PostListQuery};
use tracing::debug;

use super::listview::{FetchPhase, Fetcher};
use crate::infra::error::InfraError;
use crate::infra::http::{ApiClient, ScopeHandle};
use crate::infra::store::{LocalState, StateStore};

/// Most recent distinct search terms, newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentSearches {
    terms: Vec<String>,
    limit: NonZeroUsize,
}

impl RecentSearches {
    pub fn new(limit: NonZeroUsize) -> Self {
        Self {
            terms: Vec::new(),
            limit,
        }
    }

    pub fn from_state(state: &LocalState, limit: NonZeroUsize) -> Self {
        let mut recent = Self::new(limit);
        // Stored newest first; replay oldest first to rebuild the same order.
        for term in state.recent_searches.iter().rev() {
            recent.record(term);
        }
        recent
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Move `term` to the front. Blank terms are ignored.
    pub fn record(&mut self, term: &str) -> bool {
        let term = term.trim();
        if term.is_empty() {
            return false;
        }
        self.terms.retain(|existing| existing != term);
        self.terms.insert(0, term.to_string());
        self.terms.truncate(self.limit.get());
        true
    }

    pub fn clear(&mut self) {
        self.terms.clear();
    }

    pub fn persist(&self, store: &dyn StateStore) -> Result<(), InfraError> {
        let terms = self.terms.clone();
        store.update(&mut |state| state.recent_searches = terms.clone())?;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct SearchPanel {
    term: String,
    pub results: Fetcher<Vec<Post>>,
    pub recent: RecentSearches,
}

impl SearchPanel {
    pub fn new(recent: RecentSearches) -> Self {
        Self {
            term: String::new(),
            results: Fetcher::new("search", "Failed to fetch search results"),
            recent,
        }
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    /// Query the backend for `term`. A blank term clears the results
    /// without sending anything.
    pub async fn search(&mut self, client: &ApiClient, scope: &ScopeHandle, term: &str) {
        self.term = term.to_string();
        if term.trim().is_empty() {
            debug!("blank search term; clearing results");
            self.results.reset();
            return;
        }
        let query = PostListQuery::search(term.trim());
        self.results
            .run(scope.run(client.list_posts(&query)))
            .await;
    }

    /// Commit the current term as a search the reader acted on.
    pub fn submit(&mut self, store: &dyn StateStore) -> Result<bool, InfraError> {
        if !self.recent.record(&self.term) {
            return Ok(false);
        }
        self.recent.persist(store)?;
        Ok(true)
    }

    pub fn clear_recent(&mut self, store: &dyn StateStore) -> Result<(), InfraError> {
        self.recent.clear();
        self.recent.persist(store)
    }

    pub fn has_results(&self) -> bool {
        self.results.phase() == FetchPhase::Ready
            && self.results.data().is_some_and(|posts| !posts.is_empty())
    }
}
