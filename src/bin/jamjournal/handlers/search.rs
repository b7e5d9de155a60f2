#![deny(clippy::all, clippy::pedantic)]

use jamjournal::application::error::AppError;
use jamjournal::application::search::{RecentSearches, SearchPanel};
use jamjournal::config::SearchCmd;
use serde_json::json;

use super::ensure_loaded;
use crate::ctx::Ctx;
use crate::print::print_json;

pub async fn handle(ctx: &Ctx, cmd: SearchCmd) -> Result<(), AppError> {
    let state = ctx.store.load()?;
    let recent = RecentSearches::from_state(&state, ctx.settings.search.recent_limit);
    let mut panel = SearchPanel::new(recent);

    match cmd {
        SearchCmd::Run { term } => {
            panel.search(&ctx.client, &ctx.scope(), &term).await;
            ensure_loaded(panel.results.error())?;
            panel.submit(ctx.store.as_ref())?;
            let results = panel.results.data().map_or(&[][..], Vec::as_slice);
            print_json(&json!({
                "term": panel.term().trim(),
                "results": results,
                "recent": panel.recent.terms(),
            }))
        }
        SearchCmd::Recent => print_json(&json!({ "recent": panel.recent.terms() })),
        SearchCmd::Clear => {
            panel.clear_recent(ctx.store.as_ref())?;
            print_json(&json!({ "recent": panel.recent.terms() }))
        }
    }
}
