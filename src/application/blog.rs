//! Blog index (filterable post grid plus sidebars) and single-post pages.

use std::num::NonZeroUsize;

use jamjournal_api_types::{Post, PostCategory, PostListQuery};
use time::Duration;

use super::listview::{
    FilterSet, Fetcher, ListView, MutationReport, OptimisticMutator, RollbackPolicy,
};
use crate::domain::types::SortKey;
use crate::infra::http::{ApiClient, ScopeHandle};

pub const SIDEBAR_LIMIT: u32 = 4;

#[derive(Debug)]
pub struct BlogIndex {
    pub posts: ListView<Post>,
    pub popular: Fetcher<Vec<Post>>,
    pub recent: Fetcher<Vec<Post>>,
    ratings: OptimisticMutator<Post>,
}

impl BlogIndex {
    pub fn new(page_size: NonZeroUsize, recent_window: Duration, policy: RollbackPolicy) -> Self {
        let filters = FilterSet {
            recent_window,
            ..FilterSet::default()
        };
        Self {
            posts: ListView::new("blog", "Failed to load posts", page_size)
                .with_filters(filters)
                .with_sort(SortKey::Latest),
            popular: Fetcher::new("blog_popular", "Failed to load popular posts"),
            recent: Fetcher::new("blog_recent", "Failed to load recent reviews"),
            ratings: OptimisticMutator::new(policy),
        }
    }

    pub async fn load(&mut self, client: &ApiClient, scope: &ScopeHandle) {
        let all = PostListQuery::default();
        let popular = PostListQuery::category(PostCategory::Popular, SIDEBAR_LIMIT);
        let recent = PostListQuery::category(PostCategory::Latest, SIDEBAR_LIMIT);

        tokio::join!(
            self.posts.load(scope.run(client.list_posts(&all))),
            self.popular.run(scope.run(client.list_posts(&popular))),
            self.recent.run(scope.run(client.list_posts(&recent))),
        );
    }

    /// Like a post: the grid shows `rating + 1` before the backend answers.
    pub fn rate(&mut self, client: &ApiClient, id: i64) -> Option<u64> {
        let client = client.clone();
        self.ratings.mutate(
            &mut self.posts,
            id,
            |post| post.rating = post.rating.saturating_add(1),
            async move { client.rate_post(id).await },
        )
    }

    pub async fn next_rating_report(&mut self) -> Option<MutationReport<i64>> {
        self.ratings.next_report(&mut self.posts).await
    }
}

#[derive(Debug, Clone)]
pub struct PostDetail {
    pub post: Fetcher<Post>,
}

impl Default for PostDetail {
    fn default() -> Self {
        Self::new()
    }
}

impl PostDetail {
    pub fn new() -> Self {
        Self {
            post: Fetcher::new("post_detail", "Failed to load post"),
        }
    }

    pub async fn load(&mut self, client: &ApiClient, scope: &ScopeHandle, id: i64) {
        self.post.run(scope.run(client.get_post(id))).await;
    }
}

#[cfg(test)]
mod tests {
    use httpmock::MockServer;
    use serde_json::json;

    use super::*;
    use crate::application::listview::MutationStatus;
    use crate::domain::types::GenreFilter;
    use crate::infra::http::Scope;
    use crate::infra::session::Session;

    fn index() -> BlogIndex {
        BlogIndex::new(
            NonZeroUsize::new(6).expect("non-zero"),
            Duration::days(7),
            RollbackPolicy::Revert,
        )
    }

    fn serve_catalogue(server: &MockServer) {
        let posts: Vec<_> = (1..=13)
            .map(|id| {
                json!({
                    "id": id,
                    "title": format!("Post {id}"),
                    "genre": if id % 2 == 0 { "Jazz" } else { "Rock" },
                    "created_at": format!("2026-01-{id:02}T00:00:00Z"),
                    "rating": 10
                })
            })
            .collect();
        server.mock(|when, then| {
            when.method("GET")
                .path("/api/posts")
                .query_param_missing("category");
            then.status(200).json_body(json!(posts));
        });
        server.mock(|when, then| {
            when.method("GET")
                .path("/api/posts")
                .query_param_exists("category");
            then.status(200).json_body(json!([]));
        });
    }

    #[tokio::test]
    async fn index_paginates_newest_first() {
        let server = MockServer::start();
        serve_catalogue(&server);
        let client = ApiClient::new(&server.base_url(), Session::anonymous()).expect("client");
        let scope = Scope::new();

        let mut blog = index();
        blog.load(&client, &scope.handle()).await;
        blog.posts.set_genre(GenreFilter::from_label("All Genres"));

        let page = blog.posts.current_page();
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items.first().map(|p| p.id), Some(13));
        blog.posts.set_page(3);
        assert_eq!(
            blog.posts.current_page().items.iter().map(|p| p.id).collect::<Vec<_>>(),
            [1]
        );
    }

    #[tokio::test]
    async fn failed_rating_is_rolled_back() {
        let server = MockServer::start();
        serve_catalogue(&server);
        server.mock(|when, then| {
            when.method("POST").path("/api/posts/4/rate");
            then.status(500);
        });
        let client = ApiClient::new(&server.base_url(), Session::anonymous()).expect("client");
        let scope = Scope::new();

        let mut blog = index();
        blog.load(&client, &scope.handle()).await;
        blog.rate(&client, 4).expect("row present");
        assert_eq!(blog.posts.find(&4).map(|p| p.rating), Some(11));

        let report = blog.next_rating_report().await.expect("report");
        assert!(matches!(
            report.status,
            MutationStatus::Failed { reverted: true, .. }
        ));
        assert_eq!(blog.posts.find(&4).map(|p| p.rating), Some(10));
    }

    #[tokio::test]
    async fn detail_normalises_joined_tags() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method("GET").path("/api/posts/42");
            then.status(200).json_body(json!({
                "id": 42,
                "title": "Digital Dreams",
                "tags": "synthwave, retro,,",
                "media": [{
                    "type": "external",
                    "media_type": "audio",
                    "platform": "spotify",
                    "url": "https://open.spotify.com/track/x",
                    "title": "Dreams",
                    "artist": "Neon"
                }]
            }));
        });
        let client = ApiClient::new(&server.base_url(), Session::anonymous()).expect("client");
        let scope = Scope::new();

        let mut detail = PostDetail::new();
        detail.load(&client, &scope.handle(), 42).await;
        let post = detail.post.data().expect("loaded");
        assert_eq!(post.tags, ["synthwave", "retro"]);
        assert_eq!(post.media.len(), 1);
    }
}
