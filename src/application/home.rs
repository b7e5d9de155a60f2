//! Home page: three independent post sections loaded side by side.

use std::num::NonZeroUsize;

use jamjournal_api_types::{Post, PostCategory, PostListQuery};
use serde::Serialize;

use super::listview::{ListView, ViewSnapshot};
use crate::domain::types::{GenreFilter, SortKey};
use crate::infra::http::{ApiClient, ScopeHandle};

pub const FEATURED_LIMIT: u32 = 4;
pub const LATEST_LIMIT: u32 = 6;
pub const POPULAR_LIMIT: u32 = 3;

#[derive(Debug, Clone)]
pub struct HomeFeed {
    pub featured: ListView<Post>,
    pub latest: ListView<Post>,
    pub popular: ListView<Post>,
}

impl Default for HomeFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl HomeFeed {
    pub fn new() -> Self {
        Self {
            featured: section("featured", "Failed to load featured posts", FEATURED_LIMIT),
            latest: section("latest", "Failed to load latest posts", LATEST_LIMIT),
            popular: section("popular", "Failed to load popular posts", POPULAR_LIMIT),
        }
    }

    /// Load every section concurrently. Each section settles on its own; a
    /// failure in one leaves the others untouched.
    pub async fn load(&mut self, client: &ApiClient, scope: &ScopeHandle) {
        let featured_query = PostListQuery::category(PostCategory::Featured, FEATURED_LIMIT);
        let latest_query = PostListQuery::category(PostCategory::Latest, LATEST_LIMIT);
        let popular_query = PostListQuery::category(PostCategory::Popular, POPULAR_LIMIT);

        let Self {
            featured,
            latest,
            popular,
        } = self;
        tokio::join!(
            featured.load(scope.run(client.list_posts(&featured_query))),
            latest.load(scope.run(client.list_posts(&latest_query))),
            popular.load(scope.run(client.list_posts(&popular_query))),
        );
    }

    /// The genre picker only narrows the latest section.
    pub fn set_genre(&mut self, genre: GenreFilter) {
        self.latest.set_genre(genre);
    }

    pub fn snapshot(&self) -> HomeSnapshot<'_> {
        HomeSnapshot {
            featured: self.featured.snapshot(),
            latest: self.latest.snapshot(),
            popular: self.popular.snapshot(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HomeSnapshot<'a> {
    pub featured: ViewSnapshot<'a, Post>,
    pub latest: ViewSnapshot<'a, Post>,
    pub popular: ViewSnapshot<'a, Post>,
}

fn section(label: &'static str, failure: &'static str, limit: u32) -> ListView<Post> {
    let page_size = usize::try_from(limit)
        .ok()
        .and_then(NonZeroUsize::new)
        .unwrap_or(NonZeroUsize::MIN);
    ListView::new(label, failure, page_size).with_sort(SortKey::Server)
}
