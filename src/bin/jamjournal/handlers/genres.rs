#![deny(clippy::all, clippy::pedantic)]

use jamjournal::application::error::AppError;
use jamjournal::application::genres::GenreCatalogue;
use jamjournal::config::GenresCmd;
use serde_json::json;

use super::ensure_loaded;
use crate::ctx::Ctx;
use crate::print::print_json;

pub async fn handle(ctx: &Ctx, cmd: GenresCmd) -> Result<(), AppError> {
    let mut catalogue = GenreCatalogue::new();
    match cmd {
        GenresCmd::List => {
            catalogue.load(&ctx.client, &ctx.scope()).await;
            ensure_loaded(catalogue.genres.error())?;
            print_json(&json!({
                "options": catalogue.options(),
                "genres": catalogue.genres.items(),
            }))
        }
        GenresCmd::Create { name } => {
            let genre = catalogue.create(&ctx.client, &name).await?;
            print_json(&genre)
        }
        GenresCmd::Update { id, name } => {
            let genre = catalogue.rename(&ctx.client, id, &name).await?;
            print_json(&genre)
        }
        GenresCmd::Delete { id } => {
            catalogue.delete(&ctx.client, id).await?;
            print_json(&json!({ "deleted": id }))
        }
    }
}
