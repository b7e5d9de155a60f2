//! Site settings resources served under `/api/auth/settings/*` and
//! `/api/auth/homepage-stats`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitRedirectUrl {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HomepageContent {
    pub homepage_title: String,
    pub homepage_subtitle: String,
    pub homepage_description: String,
    pub homepage_logo_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLinks {
    pub social_x_url: Option<String>,
    pub social_facebook_url: Option<String>,
    pub social_instagram_url: Option<String>,
    pub social_youtube_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HomepageStats {
    pub artists_featured_count: String,
    pub reviews_published_count: String,
    pub monthly_readers_count: String,
}
