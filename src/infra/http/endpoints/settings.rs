use jamjournal_api_types::{HomepageContent, HomepageStats, SocialLinks, SubmitRedirectUrl};
use reqwest::Method;

use crate::infra::http::client::{ApiClient, Auth};
use crate::infra::http::error::ClientError;

const SUBMIT_REDIRECT: &str = "api/auth/settings/submit-redirect-url";
const HOMEPAGE_CONTENT: &str = "api/auth/settings/homepage-content";
const SOCIAL_LINKS: &str = "api/auth/settings/social-links";
const HOMEPAGE_STATS: &str = "api/auth/homepage-stats";

// Reads are public: the public pages render these values too.
impl ApiClient {
    pub async fn submit_redirect_url(&self) -> Result<SubmitRedirectUrl, ClientError> {
        self.get_json(SUBMIT_REDIRECT, &[], Auth::Public).await
    }

    pub async fn set_submit_redirect_url(&self, url: &str) -> Result<(), ClientError> {
        let body = SubmitRedirectUrl {
            url: Some(url.trim().to_string()),
        };
        self.send_unit(Method::PUT, SUBMIT_REDIRECT, &body, Auth::Bearer)
            .await
    }

    pub async fn homepage_content(&self) -> Result<HomepageContent, ClientError> {
        self.get_json(HOMEPAGE_CONTENT, &[], Auth::Public).await
    }

    pub async fn set_homepage_content(&self, content: &HomepageContent) -> Result<(), ClientError> {
        self.send_unit(Method::PUT, HOMEPAGE_CONTENT, content, Auth::Bearer)
            .await
    }

    pub async fn social_links(&self) -> Result<SocialLinks, ClientError> {
        self.get_json(SOCIAL_LINKS, &[], Auth::Public).await
    }

    pub async fn set_social_links(&self, links: &SocialLinks) -> Result<(), ClientError> {
        self.send_unit(Method::PUT, SOCIAL_LINKS, links, Auth::Bearer)
            .await
    }

    pub async fn homepage_stats(&self) -> Result<HomepageStats, ClientError> {
        self.get_json(HOMEPAGE_STATS, &[], Auth::Public).await
    }

    pub async fn set_homepage_stats(&self, stats: &HomepageStats) -> Result<(), ClientError> {
        self.send_unit(Method::PUT, HOMEPAGE_STATS, stats, Auth::Bearer)
            .await
    }
}
