#![deny(clippy::all, clippy::pedantic)]

use jamjournal::application::admin::AdminProfileView;
use jamjournal::application::error::AppError;
use jamjournal::config::AuthCmd;
use jamjournal::infra::http::{ClientError, ProfileForm};
use serde_json::json;
use tracing::info;

use super::ensure_loaded;
use crate::ctx::Ctx;
use crate::print::print_json;

pub async fn handle(ctx: &Ctx, cmd: AuthCmd) -> Result<(), AppError> {
    match cmd {
        AuthCmd::Login { email, password } => {
            let token = ctx.client.login(&email, &password).await?;
            ctx.store
                .update(&mut |state| state.token = Some(token.clone()))?;
            print_json(&json!({ "signed_in": true, "email": email.trim() }))
        }
        AuthCmd::Logout => {
            ctx.client.logout();
            ctx.store.update(&mut |state| state.token = None)?;
            info!("signed out");
            print_json(&json!({ "signed_in": false }))
        }
        AuthCmd::Me => {
            if !ctx.client.session().is_signed_in() {
                return Err(ClientError::MissingToken.into());
            }
            let mut view = AdminProfileView::new();
            view.load(&ctx.client, &ctx.scope()).await;
            ensure_loaded(view.profile.error())?;
            print_json(&view.profile.data())
        }
        AuthCmd::Profile { name, bio, avatar } => {
            let mut view = AdminProfileView::new();
            let profile = view
                .update(&ctx.client, ProfileForm { name, bio, avatar })
                .await?;
            print_json(&profile)
        }
    }
}
