#![deny(clippy::all, clippy::pedantic)]

use jamjournal::application::admin::ContentAdmin;
use jamjournal::application::blog::{BlogIndex, PostDetail};
use jamjournal::application::error::AppError;
use jamjournal::application::listview::{MutationReport, MutationStatus};
use jamjournal::config::PostsCmd;
use jamjournal::domain::display::format_views;
use jamjournal::domain::types::{GenreFilter, Highlight, SortKey, StatusFilter};
use jamjournal_api_types::Post;
use serde::Serialize;
use serde_json::json;

use super::ensure_loaded;
use crate::ctx::Ctx;
use crate::io::post_form;
use crate::print::print_json;

struct ListArgs {
    search: Option<String>,
    genre: Option<String>,
    highlight: String,
    sort: Option<String>,
    page: usize,
    status: String,
}

pub async fn handle(ctx: &Ctx, cmd: PostsCmd) -> Result<(), AppError> {
    match cmd {
        PostsCmd::List {
            search,
            genre,
            highlight,
            sort,
            page,
            admin,
            status,
        } => {
            let args = ListArgs {
                search,
                genre,
                highlight,
                sort,
                page,
                status,
            };
            if admin {
                list_admin(ctx, args).await
            } else {
                list_public(ctx, args).await
            }
        }
        PostsCmd::Get { id } => get(ctx, id).await,
        PostsCmd::Rate { id } => rate(ctx, id).await,
        PostsCmd::Priority { id, priority } => set_priority(ctx, id, priority).await,
        PostsCmd::Delete { id, yes } => delete(ctx, id, yes).await,
        PostsCmd::Create(form) => {
            let form = post_form(form)?;
            let mut admin = ContentAdmin::new(ctx.settings.listing.admin_page_size, ctx.rollback());
            let post = admin.create(&ctx.client, &ctx.scope(), form).await?;
            print_json(&post)
        }
        PostsCmd::Update { id, form } => {
            let form = post_form(form)?;
            let mut admin = ContentAdmin::new(ctx.settings.listing.admin_page_size, ctx.rollback());
            let post = admin.update(&ctx.client, id, form).await?;
            print_json(&post)
        }
    }
}

async fn list_public(ctx: &Ctx, args: ListArgs) -> Result<(), AppError> {
    if args.status.parse::<StatusFilter>()? != StatusFilter::All {
        return Err(AppError::validation("--status only applies to --admin listings"));
    }
    let listing = &ctx.settings.listing;
    let mut blog = BlogIndex::new(listing.page_size, listing.recent_window, ctx.rollback());
    blog.load(&ctx.client, &ctx.scope()).await;
    ensure_loaded(blog.posts.error())?;

    let posts = &mut blog.posts;
    if let Some(search) = args.search {
        posts.set_search(search);
    }
    if let Some(genre) = args.genre {
        posts.set_genre(GenreFilter::from_label(&genre));
    }
    posts.set_highlight(args.highlight.parse::<Highlight>()?);
    if let Some(sort) = args.sort {
        posts.set_sort(sort.parse::<SortKey>()?);
    }
    posts.set_page(args.page);

    print_json(&json!({
        "posts": blog.posts.snapshot(),
        "popular": blog.popular.data(),
        "recent": blog.recent.data(),
    }))
}

async fn list_admin(ctx: &Ctx, args: ListArgs) -> Result<(), AppError> {
    let mut admin = ContentAdmin::new(ctx.settings.listing.admin_page_size, ctx.rollback());
    admin.load(&ctx.client, &ctx.scope()).await;
    ensure_loaded(admin.posts.error())?;

    let posts = &mut admin.posts;
    if let Some(search) = args.search {
        posts.set_search(search);
    }
    if let Some(genre) = args.genre {
        posts.set_genre(GenreFilter::from_label(&genre));
    }
    posts.set_highlight(args.highlight.parse::<Highlight>()?);
    posts.set_status(args.status.parse::<StatusFilter>()?);
    if let Some(sort) = args.sort {
        posts.set_sort(sort.parse::<SortKey>()?);
    }
    posts.set_page(args.page);

    print_json(&json!({
        "totals": admin.totals(),
        "posts": admin.posts.snapshot(),
    }))
}

#[derive(Serialize)]
struct PostView<'a> {
    #[serde(flatten)]
    post: &'a Post,
    views_label: String,
}

async fn get(ctx: &Ctx, id: i64) -> Result<(), AppError> {
    let mut detail = PostDetail::new();
    detail.load(&ctx.client, &ctx.scope(), id).await;
    ensure_loaded(detail.post.error())?;
    let post = detail
        .post
        .data()
        .ok_or_else(|| AppError::unexpected("post view finished without data"))?;
    print_json(&PostView {
        post,
        views_label: format_views(post.views),
    })
}

#[derive(Serialize)]
struct MutationOutcome {
    id: i64,
    field: &'static str,
    value: Option<i64>,
    confirmed: bool,
    reverted: bool,
}

/// Print where the row ended up, then fail the command if the backend
/// rejected the change.
fn report_outcome(
    report: MutationReport<i64>,
    field: &'static str,
    value: Option<i64>,
) -> Result<(), AppError> {
    let (confirmed, reverted, failure) = match report.status {
        MutationStatus::Confirmed => (true, false, None),
        MutationStatus::Failed { message, reverted } => (false, reverted, Some(message)),
    };
    print_json(&MutationOutcome {
        id: report.id,
        field,
        value,
        confirmed,
        reverted,
    })?;
    match failure {
        Some(message) => Err(AppError::unexpected(format!("{field} change failed: {message}"))),
        None => Ok(()),
    }
}

fn not_listed(id: i64) -> AppError {
    AppError::validation(format!("post {id} is not in the listing"))
}

async fn rate(ctx: &Ctx, id: i64) -> Result<(), AppError> {
    let listing = &ctx.settings.listing;
    let mut blog = BlogIndex::new(listing.page_size, listing.recent_window, ctx.rollback());
    blog.load(&ctx.client, &ctx.scope()).await;
    ensure_loaded(blog.posts.error())?;

    blog.rate(&ctx.client, id).ok_or_else(|| not_listed(id))?;
    let report = blog
        .next_rating_report()
        .await
        .ok_or_else(|| AppError::unexpected("rating finished without a report"))?;
    let rating = blog
        .posts
        .find(&id)
        .and_then(|post| i64::try_from(post.rating).ok());
    report_outcome(report, "rating", rating)
}

async fn set_priority(ctx: &Ctx, id: i64, priority: i64) -> Result<(), AppError> {
    let mut admin = ContentAdmin::new(ctx.settings.listing.admin_page_size, ctx.rollback());
    admin.load(&ctx.client, &ctx.scope()).await;
    ensure_loaded(admin.posts.error())?;

    admin
        .set_priority(&ctx.client, id, priority)
        .ok_or_else(|| not_listed(id))?;
    let report = admin
        .next_priority_report()
        .await
        .ok_or_else(|| AppError::unexpected("priority change finished without a report"))?;
    let value = admin.posts.find(&id).map(|post| post.priority);
    report_outcome(report, "priority", value)
}

async fn delete(ctx: &Ctx, id: i64, yes: bool) -> Result<(), AppError> {
    if !yes {
        return Err(AppError::validation(format!(
            "deleting post {id} cannot be undone; pass --yes to confirm"
        )));
    }
    let mut admin = ContentAdmin::new(ctx.settings.listing.admin_page_size, ctx.rollback());
    admin.delete(&ctx.client, id).await?;
    print_json(&json!({ "deleted": id }))
}
