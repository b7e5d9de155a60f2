#![deny(clippy::all, clippy::pedantic)]

use jamjournal::application::error::AppError;
use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let out = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::unexpected(format!("failed to render output: {e}")))?;
    println!("{out}");
    Ok(())
}
