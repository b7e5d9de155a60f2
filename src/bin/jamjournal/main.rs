//! jamjournal: command-line front end for the JAM JOURNAL backend.
//! Every command mounts one page controller, loads it and prints what the
//! page would show as JSON.
#![deny(clippy::all, clippy::pedantic)]

mod ctx;
mod handlers;
mod io;
mod print;

#[cfg(test)]
mod tests;

use std::process;

use jamjournal::{application::error::AppError, config, infra::telemetry};
use tracing::{debug, dispatcher};

use ctx::Ctx;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        debug!(error = ?error, "command failed");
    }

    let mut chain = error.chain().into_iter();
    if let Some(head) = chain.next() {
        eprintln!("error: {head}");
    }
    for cause in chain {
        eprintln!("  caused by: {cause}");
    }
    if let Some(hint) = error.hint() {
        eprintln!("hint: {hint}");
    }
}

async fn run() -> Result<(), AppError> {
    let (cli, settings) = config::load_with_cli()?;
    telemetry::init(&settings.logging)?;

    let ctx = Ctx::from_settings(settings)?;
    handlers::dispatch(&ctx, cli.command).await
}
