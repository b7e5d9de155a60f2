//! Admin content list: every post in priority order with search, a status
//! filter and in-place priority edits.

use std::num::NonZeroUsize;

use jamjournal_api_types::{Post, PostListQuery};
use serde::Serialize;
use tracing::info;

use crate::application::listview::{ListView, MutationReport, OptimisticMutator, RollbackPolicy};
use crate::domain::types::{SearchScope, SortKey};
use crate::infra::http::{ApiClient, ClientError, PostForm, ScopeHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContentTotals {
    pub total: usize,
    /// Featured posts count as published.
    pub published: usize,
    pub drafts: usize,
}

#[derive(Debug)]
pub struct ContentAdmin {
    pub posts: ListView<Post>,
    priorities: OptimisticMutator<Post>,
}

impl ContentAdmin {
    pub fn new(page_size: NonZeroUsize, policy: RollbackPolicy) -> Self {
        // The backend already orders by priority.
        let mut posts =
            ListView::new("admin_content", "Failed to load posts", page_size).with_sort(SortKey::Server);
        posts.set_scope(SearchScope::TitleAuthor);
        Self {
            posts,
            priorities: OptimisticMutator::new(policy),
        }
    }

    pub async fn load(&mut self, client: &ApiClient, scope: &ScopeHandle) {
        let query = PostListQuery::by_priority();
        self.posts.load(scope.run(client.list_posts(&query))).await;
    }

    /// Totals over every loaded post, ignoring the active filters.
    pub fn totals(&self) -> ContentTotals {
        let items = self.posts.items();
        let published = items.iter().filter(|post| post.featured).count();
        ContentTotals {
            total: items.len(),
            published,
            drafts: items.len() - published,
        }
    }

    /// Show the new priority immediately and confirm it in the background.
    pub fn set_priority(&mut self, client: &ApiClient, id: i64, priority: i64) -> Option<u64> {
        let client = client.clone();
        self.priorities.mutate(
            &mut self.posts,
            id,
            |post| post.priority = priority,
            async move { client.set_priority(id, priority).await },
        )
    }

    pub async fn next_priority_report(&mut self) -> Option<MutationReport<i64>> {
        self.priorities.next_report(&mut self.posts).await
    }

    /// The row disappears only once the backend confirms the delete.
    pub async fn delete(&mut self, client: &ApiClient, id: i64) -> Result<(), ClientError> {
        client.delete_post(id).await?;
        self.posts.remove(&id);
        Ok(())
    }

    /// Create a post and reload, so the new row lands at its priority slot.
    pub async fn create(
        &mut self,
        client: &ApiClient,
        scope: &ScopeHandle,
        form: PostForm,
    ) -> Result<Post, ClientError> {
        let post = client.create_post(form).await?;
        info!(id = post.id, "post created");
        self.load(client, scope).await;
        Ok(post)
    }

    pub async fn update(
        &mut self,
        client: &ApiClient,
        id: i64,
        form: PostForm,
    ) -> Result<Post, ClientError> {
        let post = client.update_post(id, form).await?;
        info!(id, "post updated");
        if !self.posts.replace(post.clone()) {
            self.posts.push(post.clone());
        }
        Ok(post)
    }
}

#[cfg(test)]
mod tests {
    use httpmock::MockServer;
    use serde_json::json;

    use super::*;
    use crate::application::listview::MutationStatus;
    use crate::domain::types::StatusFilter;
    use crate::infra::http::Scope;
    use crate::infra::session::Session;

    fn admin() -> ContentAdmin {
        ContentAdmin::new(NonZeroUsize::new(10).expect("non-zero"), RollbackPolicy::Revert)
    }

    fn serve_posts(server: &MockServer) {
        server.mock(|when, then| {
            when.method("GET")
                .path("/api/posts")
                .query_param("sortBy", "priority");
            then.status(200).json_body(json!([
                {"id": 1, "title": "Top Pick", "featured": true, "priority": 9,
                 "excerpt": "a dreamy record", "author": {"name": "Ada"}},
                {"id": 2, "title": "Draft Notes", "priority": 5,
                 "author": {"name": "Dream Team"}},
                {"id": 3, "title": "Dreamscape", "featured": true, "priority": 1}
            ]));
        });
    }

    #[tokio::test]
    async fn search_covers_title_and_author_only() {
        let server = MockServer::start();
        serve_posts(&server);
        let client = ApiClient::new(&server.base_url(), Session::with_token("t")).expect("client");
        let scope = Scope::new();
        let mut admin = admin();
        admin.load(&client, &scope.handle()).await;

        admin.posts.set_search("DREAM");
        let ids: Vec<_> = admin.posts.filtered().iter().map(|p| p.id).collect();
        assert_eq!(ids, [2, 3]);

        admin.posts.set_status(StatusFilter::Draft);
        let ids: Vec<_> = admin.posts.filtered().iter().map(|p| p.id).collect();
        assert_eq!(ids, [2]);

        assert_eq!(
            admin.totals(),
            ContentTotals {
                total: 3,
                published: 2,
                drafts: 1
            }
        );
    }

    #[tokio::test]
    async fn failed_priority_change_is_reverted() {
        let server = MockServer::start();
        serve_posts(&server);
        server.mock(|when, then| {
            when.method("PATCH").path("/api/posts/2/priority");
            then.status(500);
        });
        let client = ApiClient::new(&server.base_url(), Session::with_token("t")).expect("client");
        let scope = Scope::new();
        let mut admin = admin();
        admin.load(&client, &scope.handle()).await;

        admin.set_priority(&client, 2, 10).expect("row present");
        assert_eq!(admin.posts.find(&2).map(|p| p.priority), Some(10));

        let report = admin.next_priority_report().await.expect("report");
        assert!(matches!(
            report.status,
            MutationStatus::Failed { reverted: true, .. }
        ));
        assert_eq!(admin.posts.find(&2).map(|p| p.priority), Some(5));
    }

    #[tokio::test]
    async fn failed_delete_keeps_the_row() {
        let server = MockServer::start();
        serve_posts(&server);
        server.mock(|when, then| {
            when.method("DELETE").path("/api/posts/1");
            then.status(403);
        });
        server.mock(|when, then| {
            when.method("DELETE").path("/api/posts/3");
            then.status(204);
        });
        let client = ApiClient::new(&server.base_url(), Session::with_token("t")).expect("client");
        let scope = Scope::new();
        let mut admin = admin();
        admin.load(&client, &scope.handle()).await;

        let err = admin.delete(&client, 1).await.expect_err("forbidden");
        assert_eq!(err.status(), Some(403));
        admin.delete(&client, 3).await.expect("deleted");

        let ids: Vec<_> = admin.posts.items().iter().map(|p| p.id).collect();
        assert_eq!(ids, [1, 2]);
    }

    #[tokio::test]
    async fn update_replaces_the_row_in_place() {
        let server = MockServer::start();
        serve_posts(&server);
        server.mock(|when, then| {
            when.method("PUT").path("/api/posts/2");
            then.status(200)
                .json_body(json!({"id": 2, "title": "Final Notes", "featured": true, "priority": 5}));
        });
        let client = ApiClient::new(&server.base_url(), Session::with_token("t")).expect("client");
        let scope = Scope::new();
        let mut admin = admin();
        admin.load(&client, &scope.handle()).await;

        let form = PostForm {
            title: "Final Notes".into(),
            featured: true,
            ..PostForm::default()
        };
        admin.update(&client, 2, form).await.expect("updated");

        let titles: Vec<_> = admin.posts.items().iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["Top Pick", "Final Notes", "Dreamscape"]);
        assert_eq!(admin.totals().drafts, 0);
    }
}
