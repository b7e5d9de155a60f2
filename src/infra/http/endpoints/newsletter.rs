use jamjournal_api_types::{ApiMessage, Campaign, EmailRequest, SendNewsletterRequest, Subscriber};
use reqwest::Method;

use crate::infra::http::client::{ApiClient, Auth};
use crate::infra::http::error::ClientError;

impl ApiClient {
    pub async fn subscribe(&self, email: &str) -> Result<ApiMessage, ClientError> {
        let body = email_request(email)?;
        self.send_json(Method::POST, "api/newsletter/subscribe", &body, Auth::Public)
            .await
    }

    pub async fn unsubscribe(&self, email: &str) -> Result<ApiMessage, ClientError> {
        let body = email_request(email)?;
        self.send_json(
            Method::POST,
            "api/newsletter/unsubscribe",
            &body,
            Auth::Public,
        )
        .await
    }

    pub async fn send_newsletter(
        &self,
        subject: &str,
        content: &str,
    ) -> Result<ApiMessage, ClientError> {
        if subject.trim().is_empty() || content.trim().is_empty() {
            return Err(ClientError::InvalidInput(
                "subject and content are required".into(),
            ));
        }
        let body = SendNewsletterRequest {
            subject: subject.trim().to_string(),
            content: content.to_string(),
        };
        self.send_json(Method::POST, "api/newsletter/send", &body, Auth::Bearer)
            .await
    }

    pub async fn subscribers(&self) -> Result<Vec<Subscriber>, ClientError> {
        self.get_json("api/newsletter/subscribers", &[], Auth::Bearer)
            .await
    }

    pub async fn campaigns(&self) -> Result<Vec<Campaign>, ClientError> {
        self.get_json("api/newsletter/campaigns", &[], Auth::Bearer)
            .await
    }
}

fn email_request(email: &str) -> Result<EmailRequest, ClientError> {
    let email = email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(ClientError::InvalidInput(format!(
            "`{email}` is not an email address"
        )));
    }
    Ok(EmailRequest {
        email: email.to_string(),
    })
}
