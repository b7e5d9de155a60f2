#![deny(clippy::all, clippy::pedantic)]

use jamjournal::application::error::AppError;
use jamjournal::application::newsletter::{self, NewsletterAdmin};
use jamjournal::config::NewsletterCmd;
use serde_json::json;

use super::ensure_loaded;
use crate::ctx::Ctx;
use crate::io::read_value;
use crate::print::print_json;

pub async fn handle(ctx: &Ctx, cmd: NewsletterCmd) -> Result<(), AppError> {
    let mut admin = NewsletterAdmin::new(ctx.settings.listing.admin_page_size);
    let scope = ctx.scope();
    let client = &ctx.client;

    match cmd {
        NewsletterCmd::Subscribe { email } => {
            let message = newsletter::subscribe(client, &email).await?;
            print_json(&json!({ "message": message }))
        }
        NewsletterCmd::Unsubscribe { email } => {
            let message = newsletter::unsubscribe(client, &email).await?;
            print_json(&json!({ "message": message }))
        }
        NewsletterCmd::Send {
            subject,
            content,
            content_file,
        } => {
            let content = read_value(content, content_file)?;
            let message = admin.send(client, &scope, &subject, &content).await?;
            print_json(&json!({
                "message": message,
                "campaigns": admin.campaigns.data(),
            }))
        }
        NewsletterCmd::Subscribers { search, page } => {
            admin
                .subscribers
                .load(scope.run(client.subscribers()))
                .await;
            ensure_loaded(admin.subscribers.error())?;
            if let Some(search) = search {
                admin.subscribers.set_search(search);
            }
            admin.subscribers.set_page(page);
            print_json(&admin.subscribers.snapshot())
        }
        NewsletterCmd::Campaigns => {
            admin.campaigns.run(scope.run(client.campaigns())).await;
            ensure_loaded(admin.campaigns.error())?;
            print_json(&admin.campaigns.data())
        }
    }
}
