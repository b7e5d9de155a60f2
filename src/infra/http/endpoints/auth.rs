use jamjournal_api_types::{AdminProfile, LoginRequest, LoginResponse};
use reqwest::Method;
use tracing::info;

use crate::infra::http::client::{ApiClient, Auth};
use crate::infra::http::error::ClientError;
use crate::infra::http::forms::ProfileForm;

impl ApiClient {
    /// Exchange credentials for a bearer token and sign the session in.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, ClientError> {
        let body = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse = self
            .send_json(Method::POST, "api/auth/login", &body, Auth::Public)
            .await?;
        if response.token.trim().is_empty() {
            return Err(ClientError::Decode("login response carried an empty token".into()));
        }
        self.session().sign_in(response.token.clone());
        info!(email = %body.email, "signed in");
        Ok(response.token)
    }

    pub fn logout(&self) {
        self.session().sign_out();
    }

    pub async fn me(&self) -> Result<AdminProfile, ClientError> {
        self.get_json("api/auth/me", &[], Auth::Bearer).await
    }

    pub async fn update_profile(&self, form: ProfileForm) -> Result<AdminProfile, ClientError> {
        let form = form.into_multipart().await?;
        self.send_multipart(Method::PUT, "api/auth/profile", form, Auth::Bearer)
            .await
    }
}
