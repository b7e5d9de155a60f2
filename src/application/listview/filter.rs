use std::cmp::Ordering;

use time::{Duration, OffsetDateTime};

use crate::domain::listing::ListItem;
use crate::domain::types::{GenreFilter, Highlight, SearchScope, SortKey, StatusFilter};

const DEFAULT_RECENT_WINDOW_DAYS: i64 = 7;

/// Conjunction of independent predicates. Every field at its default is a
/// pass-through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSet {
    pub search: String,
    pub scope: SearchScope,
    pub genre: GenreFilter,
    pub highlight: Highlight,
    pub status: StatusFilter,
    pub recent_window: Duration,
}

impl Default for FilterSet {
    fn default() -> Self {
        Self {
            search: String::new(),
            scope: SearchScope::default(),
            genre: GenreFilter::All,
            highlight: Highlight::All,
            status: StatusFilter::All,
            recent_window: Duration::days(DEFAULT_RECENT_WINDOW_DAYS),
        }
    }
}

impl FilterSet {
    pub fn matches<T: ListItem>(&self, item: &T, now: OffsetDateTime) -> bool {
        self.matches_search(item)
            && self.genre.matches(item.genre())
            && self.matches_highlight(item, now)
            && self.status.matches(item.featured())
    }

    fn matches_search<T: ListItem>(&self, item: &T) -> bool {
        let term = self.search.trim();
        if term.is_empty() {
            return true;
        }
        let term = term.to_lowercase();
        let hit = |field: Option<&str>| field.is_some_and(|value| value.to_lowercase().contains(&term));

        match self.scope {
            SearchScope::TitleExcerptAuthor => {
                hit(Some(item.title())) || hit(item.excerpt()) || hit(item.author())
            }
            SearchScope::TitleAuthor => hit(Some(item.title())) || hit(item.author()),
        }
    }

    fn matches_highlight<T: ListItem>(&self, item: &T, now: OffsetDateTime) -> bool {
        match self.highlight {
            Highlight::All => true,
            Highlight::Featured => item.featured(),
            Highlight::Recent => {
                let cutoff = now.checked_sub(self.recent_window);
                item.created_at()
                    .is_some_and(|created| cutoff.is_none_or(|cutoff| created > cutoff))
            }
        }
    }
}

/// Comparator for `sort`. Every key orders descending; missing creation
/// dates sort last.
pub fn compare<T: ListItem>(sort: SortKey, a: &T, b: &T) -> Ordering {
    match sort {
        SortKey::Server => Ordering::Equal,
        SortKey::Latest => b.created_at().cmp(&a.created_at()),
        SortKey::Popular => b.views().cmp(&a.views()),
        SortKey::Rating => b.rating().cmp(&a.rating()),
        SortKey::Priority => b.priority().cmp(&a.priority()),
    }
}

/// Filter then stable-sort. Ties keep the fetched order, so repeated calls
/// never reshuffle equally ranked rows.
pub fn apply<'a, T: ListItem>(
    items: &'a [T],
    filters: &FilterSet,
    sort: SortKey,
    now: OffsetDateTime,
) -> Vec<&'a T> {
    let mut selected: Vec<&T> = items
        .iter()
        .filter(|item| filters.matches(*item, now))
        .collect();
    if sort != SortKey::Server {
        selected.sort_by(|a, b| compare(sort, *a, *b));
    }
    selected
}
