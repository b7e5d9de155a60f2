//! Display fallbacks for site settings the backend may leave blank.

use jamjournal_api_types::{HomepageContent, HomepageStats, SubmitRedirectUrl};

pub const DEFAULT_SUBMIT_REDIRECT_URL: &str = "https://example.com";
pub const DEFAULT_ARTISTS_FEATURED: &str = "2.5K+";
pub const DEFAULT_REVIEWS_PUBLISHED: &str = "15K+";
pub const DEFAULT_MONTHLY_READERS: &str = "1M+";
pub const DEFAULT_HOMEPAGE_SUBTITLE: &str = "Where Music Stories Come Alive";
pub const DEFAULT_HOMEPAGE_DESCRIPTION: &str = "Discover emerging artists, read exclusive reviews, and explore the sounds shaping tomorrow's music scene.";

fn or_default(value: &str, fallback: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

pub fn submit_redirect_or_default(setting: Option<&SubmitRedirectUrl>) -> String {
    let url = setting
        .and_then(|setting| setting.url.as_deref())
        .unwrap_or_default();
    or_default(url, DEFAULT_SUBMIT_REDIRECT_URL)
}

pub fn stats_or_default(stats: Option<&HomepageStats>) -> HomepageStats {
    let stats = stats.cloned().unwrap_or_default();
    HomepageStats {
        artists_featured_count: or_default(&stats.artists_featured_count, DEFAULT_ARTISTS_FEATURED),
        reviews_published_count: or_default(
            &stats.reviews_published_count,
            DEFAULT_REVIEWS_PUBLISHED,
        ),
        monthly_readers_count: or_default(&stats.monthly_readers_count, DEFAULT_MONTHLY_READERS),
    }
}

pub fn homepage_or_default(content: Option<&HomepageContent>) -> HomepageContent {
    let content = content.cloned().unwrap_or_default();
    HomepageContent {
        homepage_subtitle: or_default(&content.homepage_subtitle, DEFAULT_HOMEPAGE_SUBTITLE),
        homepage_description: or_default(
            &content.homepage_description,
            DEFAULT_HOMEPAGE_DESCRIPTION,
        ),
        ..content
    }
}
