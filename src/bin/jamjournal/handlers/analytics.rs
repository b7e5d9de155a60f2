#![deny(clippy::all, clippy::pedantic)]

use jamjournal::application::admin::AnalyticsDashboard;
use jamjournal::application::error::AppError;

use super::ensure_loaded;
use crate::ctx::Ctx;
use crate::print::print_json;

pub async fn handle(ctx: &Ctx) -> Result<(), AppError> {
    let mut dashboard = AnalyticsDashboard::new();
    dashboard.load(&ctx.client, &ctx.scope()).await;
    ensure_loaded(dashboard.report.error())?;
    print_json(&dashboard.snapshot())
}
