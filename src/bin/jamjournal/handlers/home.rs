#![deny(clippy::all, clippy::pedantic)]

use jamjournal::application::error::AppError;
use jamjournal::application::home::HomeFeed;
use jamjournal::domain::types::GenreFilter;

use crate::ctx::Ctx;
use crate::print::print_json;

/// Sections fail independently; the command only fails when none loaded.
pub async fn handle(ctx: &Ctx, genre: Option<String>) -> Result<(), AppError> {
    let mut feed = HomeFeed::new();
    if let Some(genre) = genre {
        feed.set_genre(GenreFilter::from_label(&genre));
    }
    feed.load(&ctx.client, &ctx.scope()).await;
    print_json(&feed.snapshot())?;

    let errors = [
        feed.featured.error(),
        feed.latest.error(),
        feed.popular.error(),
    ];
    match errors {
        [Some(_), Some(_), Some(message)] => Err(AppError::Unavailable(message)),
        _ => Ok(()),
    }
}
