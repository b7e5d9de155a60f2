#![deny(clippy::all, clippy::pedantic)]

use jamjournal::application::admin::SiteSettings;
use jamjournal::application::error::AppError;
use jamjournal::config::SettingsCmd;
use serde_json::json;

use super::ensure_loaded;
use crate::ctx::Ctx;
use crate::print::print_json;

pub async fn handle(ctx: &Ctx, cmd: SettingsCmd) -> Result<(), AppError> {
    let mut site = SiteSettings::new();
    let scope = ctx.scope();
    let client = &ctx.client;

    // Partial updates start from the stored value, so that value must load.
    match cmd {
        SettingsCmd::Show => {
            site.load(client, &scope).await;
            let errors = site.errors();
            print_json(&json!({
                "settings": site.resolved(),
                "errors": errors,
            }))?;
            match errors.as_slice() {
                [first, _, _, _] => Err(AppError::Unavailable(*first)),
                _ => Ok(()),
            }
        }
        SettingsCmd::Redirect { url } => {
            site.update_submit_redirect(client, &url).await?;
            print_json(&site.resolved().submit_redirect_url)
        }
        SettingsCmd::Homepage {
            title,
            subtitle,
            description,
            logo_url,
        } => {
            site.homepage.run(scope.run(client.homepage_content())).await;
            ensure_loaded(site.homepage.error())?;
            let mut content = site.homepage.data().cloned().unwrap_or_default();
            merge(&mut content.homepage_title, title);
            merge(&mut content.homepage_subtitle, subtitle);
            merge(&mut content.homepage_description, description);
            merge(&mut content.homepage_logo_url, logo_url);
            site.update_homepage(client, content).await?;
            print_json(&site.resolved().homepage)
        }
        SettingsCmd::Social {
            x,
            facebook,
            instagram,
            youtube,
        } => {
            site.social.run(scope.run(client.social_links())).await;
            ensure_loaded(site.social.error())?;
            let mut links = site.social.data().cloned().unwrap_or_default();
            merge_link(&mut links.social_x_url, x);
            merge_link(&mut links.social_facebook_url, facebook);
            merge_link(&mut links.social_instagram_url, instagram);
            merge_link(&mut links.social_youtube_url, youtube);
            site.update_social(client, links).await?;
            print_json(&site.resolved().social_links)
        }
        SettingsCmd::Stats {
            artists,
            reviews,
            readers,
        } => {
            site.stats.run(scope.run(client.homepage_stats())).await;
            ensure_loaded(site.stats.error())?;
            let mut stats = site.stats.data().cloned().unwrap_or_default();
            merge(&mut stats.artists_featured_count, artists);
            merge(&mut stats.reviews_published_count, reviews);
            merge(&mut stats.monthly_readers_count, readers);
            site.update_stats(client, stats).await?;
            print_json(&site.resolved().stats)
        }
    }
}

pub(crate) fn merge(field: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *field = value.trim().to_string();
    }
}

/// An empty value clears the link.
pub(crate) fn merge_link(field: &mut Option<String>, value: Option<String>) {
    if let Some(value) = value {
        let value = value.trim();
        *field = (!value.is_empty()).then(|| value.to_string());
    }
}
