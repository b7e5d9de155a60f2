use jamjournal_api_types::{Post, PostListQuery, PriorityRequest};
use reqwest::Method;
use tracing::info;

use crate::infra::http::client::{ApiClient, Auth};
use crate::infra::http::error::ClientError;
use crate::infra::http::forms::PostForm;

impl ApiClient {
    pub async fn list_posts(&self, query: &PostListQuery) -> Result<Vec<Post>, ClientError> {
        self.get_json("api/posts", &query.to_pairs(), Auth::Public)
            .await
    }

    pub async fn get_post(&self, id: i64) -> Result<Post, ClientError> {
        self.get_json(&format!("api/posts/{id}"), &[], Auth::Public)
            .await
    }

    /// Anonymous "like". The backend increments the counter by one.
    pub async fn rate_post(&self, id: i64) -> Result<(), ClientError> {
        self.send_bare(Method::POST, &format!("api/posts/{id}/rate"), Auth::Public)
            .await
    }

    pub async fn set_priority(&self, id: i64, priority: i64) -> Result<(), ClientError> {
        self.send_unit(
            Method::PATCH,
            &format!("api/posts/{id}/priority"),
            &PriorityRequest { priority },
            Auth::Bearer,
        )
        .await
    }

    pub async fn delete_post(&self, id: i64) -> Result<(), ClientError> {
        self.send_bare(Method::DELETE, &format!("api/posts/{id}"), Auth::Bearer)
            .await?;
        info!(id, "post deleted");
        Ok(())
    }

    pub async fn create_post(&self, form: PostForm) -> Result<Post, ClientError> {
        let form = form.into_multipart().await?;
        self.send_multipart(Method::POST, "api/posts", form, Auth::Bearer)
            .await
    }

    pub async fn update_post(&self, id: i64, form: PostForm) -> Result<Post, ClientError> {
        let form = form.into_multipart().await?;
        self.send_multipart(
            Method::PUT,
            &format!("api/posts/{id}"),
            form,
            Auth::Bearer,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use httpmock::MockServer;
    use jamjournal_api_types::PostCategory;
    use serde_json::json;

    use crate::infra::session::Session;

    use super::*;

    #[tokio::test]
    async fn list_posts_sends_category_and_limit() -> Result<(), ClientError> {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("GET")
                .path("/api/posts")
                .query_param("category", "featured")
                .query_param("limit", "4");
            then.status(200).json_body(json!([
                {"id": 1, "title": "One", "tags": "a, b", "genre": "Jazz"}
            ]));
        });

        let client = ApiClient::new(&server.base_url(), Session::anonymous())?;
        let posts = client
            .list_posts(&PostListQuery::category(PostCategory::Featured, 4))
            .await?;
        mock.assert();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].tags, ["a", "b"]);
        assert_eq!(posts[0].genre_name.as_deref(), Some("Jazz"));
        Ok(())
    }

    #[tokio::test]
    async fn priority_patch_is_authenticated() -> Result<(), ClientError> {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("PATCH")
                .path("/api/posts/9/priority")
                .header("authorization", "Bearer t")
                .json_body(json!({"priority": 5}));
            then.status(200).json_body(json!({"message": "ok"}));
        });

        let client = ApiClient::new(&server.base_url(), Session::with_token("t"))?;
        client.set_priority(9, 5).await?;
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn admin_calls_without_token_fail_locally() -> Result<(), ClientError> {
        // Nothing listens here; the call must fail before connecting.
        let client = ApiClient::new("http://127.0.0.1:9", Session::anonymous())?;
        let err = client.delete_post(2).await.expect_err("no token");
        assert!(matches!(err, ClientError::MissingToken));
        Ok(())
    }
}
