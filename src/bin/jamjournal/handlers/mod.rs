#![deny(clippy::all, clippy::pedantic)]

pub mod analytics;
pub mod auth;
pub mod genres;
pub mod home;
pub mod newsletter;
pub mod posts;
pub mod search;
pub mod settings;

use jamjournal::application::error::AppError;
use jamjournal::config::Command;

use crate::ctx::Ctx;

pub async fn dispatch(ctx: &Ctx, command: Command) -> Result<(), AppError> {
    match command {
        Command::Home { genre } => home::handle(ctx, genre).await,
        Command::Posts { action } => posts::handle(ctx, action).await,
        Command::Search { action } => search::handle(ctx, action).await,
        Command::Genres { action } => genres::handle(ctx, action).await,
        Command::Auth { action } => auth::handle(ctx, action).await,
        Command::Settings { action } => settings::handle(ctx, action).await,
        Command::Newsletter { action } => newsletter::handle(ctx, action).await,
        Command::Analytics => analytics::handle(ctx).await,
    }
}

/// A single-resource view that failed to load fails the command.
pub fn ensure_loaded(error: Option<&'static str>) -> Result<(), AppError> {
    match error {
        Some(message) => Err(AppError::Unavailable(message)),
        None => Ok(()),
    }
}
