//! Site settings aggregated from four independent resources, plus the
//! signed-in administrator's profile.

use jamjournal_api_types::{
    AdminProfile, HomepageContent, HomepageStats, SocialLinks, SubmitRedirectUrl,
};
use serde::Serialize;
use tracing::info;

use crate::application::listview::Fetcher;
use crate::domain::site::{homepage_or_default, stats_or_default, submit_redirect_or_default};
use crate::infra::http::{ApiClient, ClientError, ProfileForm, ScopeHandle};

/// Settings with display fallbacks applied, as the public pages show them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedSettings {
    pub submit_redirect_url: String,
    pub homepage: HomepageContent,
    pub social_links: SocialLinks,
    pub stats: HomepageStats,
}

#[derive(Debug, Clone)]
pub struct SiteSettings {
    pub submit_redirect: Fetcher<SubmitRedirectUrl>,
    pub homepage: Fetcher<HomepageContent>,
    pub social: Fetcher<SocialLinks>,
    pub stats: Fetcher<HomepageStats>,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self::new()
    }
}

impl SiteSettings {
    pub fn new() -> Self {
        Self {
            submit_redirect: Fetcher::new(
                "settings_submit_redirect",
                "Failed to load submit redirect URL",
            ),
            homepage: Fetcher::new("settings_homepage", "Failed to load homepage content"),
            social: Fetcher::new("settings_social", "Failed to load social links"),
            stats: Fetcher::new("settings_stats", "Failed to load homepage stats"),
        }
    }

    /// Fetch all four resources side by side; each settles on its own.
    pub async fn load(&mut self, client: &ApiClient, scope: &ScopeHandle) {
        let Self {
            submit_redirect,
            homepage,
            social,
            stats,
        } = self;
        tokio::join!(
            submit_redirect.run(scope.run(client.submit_redirect_url())),
            homepage.run(scope.run(client.homepage_content())),
            social.run(scope.run(client.social_links())),
            stats.run(scope.run(client.homepage_stats())),
        );
    }

    pub fn resolved(&self) -> ResolvedSettings {
        ResolvedSettings {
            submit_redirect_url: submit_redirect_or_default(self.submit_redirect.data()),
            homepage: homepage_or_default(self.homepage.data()),
            social_links: self.social.data().cloned().unwrap_or_default(),
            stats: stats_or_default(self.stats.data()),
        }
    }

    /// Messages of every resource that failed to load.
    pub fn errors(&self) -> Vec<&'static str> {
        [
            self.submit_redirect.error(),
            self.homepage.error(),
            self.social.error(),
            self.stats.error(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    pub async fn update_submit_redirect(
        &mut self,
        client: &ApiClient,
        url: &str,
    ) -> Result<(), ClientError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(ClientError::InvalidInput("redirect URL is required".into()));
        }
        client.set_submit_redirect_url(url).await?;
        info!(url, "submit redirect updated");
        self.submit_redirect.set_data(SubmitRedirectUrl {
            url: Some(url.to_string()),
        });
        Ok(())
    }

    pub async fn update_homepage(
        &mut self,
        client: &ApiClient,
        content: HomepageContent,
    ) -> Result<(), ClientError> {
        client.set_homepage_content(&content).await?;
        info!("homepage content updated");
        self.homepage.set_data(content);
        Ok(())
    }

    pub async fn update_social(
        &mut self,
        client: &ApiClient,
        links: SocialLinks,
    ) -> Result<(), ClientError> {
        client.set_social_links(&links).await?;
        info!("social links updated");
        self.social.set_data(links);
        Ok(())
    }

    pub async fn update_stats(
        &mut self,
        client: &ApiClient,
        stats: HomepageStats,
    ) -> Result<(), ClientError> {
        client.set_homepage_stats(&stats).await?;
        info!("homepage stats updated");
        self.stats.set_data(stats);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct AdminProfileView {
    pub profile: Fetcher<AdminProfile>,
}

impl Default for AdminProfileView {
    fn default() -> Self {
        Self::new()
    }
}

impl AdminProfileView {
    pub fn new() -> Self {
        Self {
            profile: Fetcher::new("admin_profile", "Failed to load profile"),
        }
    }

    pub async fn load(&mut self, client: &ApiClient, scope: &ScopeHandle) {
        self.profile.run(scope.run(client.me())).await;
    }

    pub async fn update(
        &mut self,
        client: &ApiClient,
        form: ProfileForm,
    ) -> Result<AdminProfile, ClientError> {
        if form.name.trim().is_empty() {
            return Err(ClientError::InvalidInput("name is required".into()));
        }
        let profile = client.update_profile(form).await?;
        info!("profile updated");
        self.profile.set_data(profile.clone());
        Ok(profile)
    }
}
