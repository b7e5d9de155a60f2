use std::future::Future;
use std::num::NonZeroUsize;

use serde::Serialize;
use time::OffsetDateTime;

use super::fetcher::{FetchPhase, Fetcher};
use super::filter::{FilterSet, apply};
use super::paginate::{Paginated, clamp_page, paginate};
use crate::domain::listing::ListItem;
use crate::domain::types::{GenreFilter, Highlight, SearchScope, SortKey, StatusFilter};
use crate::infra::http::ClientError;

/// Fetched rows plus the filter, sort and page selection shown over them.
///
/// `page` always stays within `[1, max(total_pages, 1)]` of the current
/// filtered view; every filter or sort change resets it to 1.
#[derive(Debug, Clone)]
pub struct ListView<T: ListItem> {
    fetcher: Fetcher<Vec<T>>,
    filters: FilterSet,
    sort: SortKey,
    page: usize,
    page_size: NonZeroUsize,
    clock: fn() -> OffsetDateTime,
}

impl<T: ListItem> ListView<T> {
    pub fn new(
        label: &'static str,
        failure_message: &'static str,
        page_size: NonZeroUsize,
    ) -> Self {
        Self {
            fetcher: Fetcher::new(label, failure_message),
            filters: FilterSet::default(),
            sort: SortKey::default(),
            page: 1,
            page_size,
            clock: OffsetDateTime::now_utc,
        }
    }

    /// Source of "now" for the freshness predicate. Read on every derivation.
    pub fn with_clock(mut self, clock: fn() -> OffsetDateTime) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_filters(mut self, filters: FilterSet) -> Self {
        self.filters = filters;
        self
    }

    pub fn fetcher(&self) -> &Fetcher<Vec<T>> {
        &self.fetcher
    }

    pub fn phase(&self) -> FetchPhase {
        self.fetcher.phase()
    }

    pub fn is_loading(&self) -> bool {
        self.fetcher.is_loading()
    }

    pub fn error(&self) -> Option<&'static str> {
        self.fetcher.error()
    }

    /// Everything fetched, unfiltered.
    pub fn items(&self) -> &[T] {
        self.fetcher.data().map_or(&[][..], Vec::as_slice)
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    pub fn set_filters(&mut self, filters: FilterSet) {
        self.filters = filters;
        self.page = 1;
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.filters.search = term.into();
        self.page = 1;
    }

    pub fn set_scope(&mut self, scope: SearchScope) {
        self.filters.scope = scope;
        self.page = 1;
    }

    pub fn set_genre(&mut self, genre: GenreFilter) {
        self.filters.genre = genre;
        self.page = 1;
    }

    pub fn set_highlight(&mut self, highlight: Highlight) {
        self.filters.highlight = highlight;
        self.page = 1;
    }

    pub fn set_status(&mut self, status: StatusFilter) {
        self.filters.status = status;
        self.page = 1;
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
        self.page = 1;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
        self.reclamp();
    }

    pub fn next_page(&mut self) {
        self.set_page(self.page.saturating_add(1));
    }

    pub fn previous_page(&mut self) {
        self.set_page(self.page.saturating_sub(1));
    }

    /// Filtered and sorted rows, evaluated against the clock right now.
    pub fn filtered(&self) -> Vec<&T> {
        apply(self.items(), &self.filters, self.sort, (self.clock)())
    }

    pub fn current_page(&self) -> Paginated<&T> {
        paginate(&self.filtered(), self.page, self.page_size)
    }

    /// Reload from the backend. Filters, sort and page survive the reload.
    pub async fn load<F>(&mut self, request: F)
    where
        F: Future<Output = Result<Vec<T>, ClientError>>,
    {
        self.fetcher.run(request).await;
        self.reclamp();
    }

    pub fn begin_load(&mut self) {
        self.fetcher.begin();
    }

    pub fn complete_load(&mut self, result: Result<Vec<T>, ClientError>) {
        self.fetcher.complete(result);
        self.reclamp();
    }

    pub fn find(&self, id: &T::Id) -> Option<&T> {
        self.items().iter().find(|item| &item.id() == id)
    }

    pub fn find_mut(&mut self, id: &T::Id) -> Option<&mut T> {
        self.fetcher
            .data_mut()?
            .iter_mut()
            .find(|item| &item.id() == id)
    }

    /// Apply `patch` to the row with `id`. Returns whether a row matched.
    pub fn patch(&mut self, id: &T::Id, patch: impl FnOnce(&mut T)) -> bool {
        match self.find_mut(id) {
            Some(item) => {
                patch(item);
                true
            }
            None => false,
        }
    }

    /// Swap in a fresh copy of a row, matched by id.
    pub fn replace(&mut self, fresh: T) -> bool {
        let id = fresh.id();
        match self.find_mut(&id) {
            Some(item) => {
                *item = fresh;
                true
            }
            None => false,
        }
    }

    /// Append a row created elsewhere, e.g. after a confirmed create.
    pub fn push(&mut self, item: T) {
        match self.fetcher.data_mut() {
            Some(items) => items.push(item),
            None => self.fetcher.set_data(vec![item]),
        }
    }

    /// Replace every row with data derived from another fetch.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.fetcher.set_data(items);
        self.reclamp();
    }

    pub fn remove(&mut self, id: &T::Id) -> Option<T> {
        let items = self.fetcher.data_mut()?;
        let index = items.iter().position(|item| &item.id() == id)?;
        let removed = items.remove(index);
        self.reclamp();
        Some(removed)
    }

    pub fn snapshot(&self) -> ViewSnapshot<'_, T>
    where
        T: Serialize,
    {
        let filtered = self.filtered();
        let matched = filtered.len();
        let page = paginate(&filtered, self.page, self.page_size);
        ViewSnapshot {
            section: self.fetcher.label(),
            phase: self.phase(),
            error: self.error(),
            matched,
            page: page.page,
            total_pages: page.total_pages,
            items: page.items,
        }
    }

    fn reclamp(&mut self) {
        let len = self.filtered().len();
        self.page = clamp_page(self.page, len, self.page_size);
    }
}

/// Render-ready view of one list: what a page would draw right now.
#[derive(Debug, Serialize)]
pub struct ViewSnapshot<'a, T> {
    pub section: &'static str,
    pub phase: FetchPhase,
    pub error: Option<&'static str>,
    pub matched: usize,
    pub page: usize,
    pub total_pages: usize,
    pub items: Vec<&'a T>,
}
