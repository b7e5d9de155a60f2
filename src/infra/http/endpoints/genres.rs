use jamjournal_api_types::{Genre, GenreRequest};
use reqwest::Method;

use crate::infra::http::client::{ApiClient, Auth};
use crate::infra::http::error::ClientError;

impl ApiClient {
    pub async fn list_genres(&self) -> Result<Vec<Genre>, ClientError> {
        self.get_json("api/genres", &[], Auth::Public).await
    }

    pub async fn create_genre(&self, name: &str) -> Result<Genre, ClientError> {
        let body = genre_request(name)?;
        self.send_json(Method::POST, "api/genres", &body, Auth::Bearer)
            .await
    }

    pub async fn update_genre(&self, id: i64, name: &str) -> Result<Genre, ClientError> {
        let body = genre_request(name)?;
        self.send_json(
            Method::PUT,
            &format!("api/genres/{id}"),
            &body,
            Auth::Bearer,
        )
        .await
    }

    pub async fn delete_genre(&self, id: i64) -> Result<(), ClientError> {
        self.send_bare(Method::DELETE, &format!("api/genres/{id}"), Auth::Bearer)
            .await
    }
}

fn genre_request(name: &str) -> Result<GenreRequest, ClientError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ClientError::InvalidInput("genre name is required".into()));
    }
    Ok(GenreRequest {
        name: name.to_string(),
    })
}
