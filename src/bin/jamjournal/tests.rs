#![deny(clippy::all, clippy::pedantic)]

use clap::Parser;
use httpmock::MockServer;
use jamjournal::application::error::AppError;
use jamjournal::config::{self, CliArgs, Command};
use jamjournal::infra::http::{ClientError, MediaUpload};
use jamjournal::infra::store::{LocalState, MemoryStore, StateStore};
use jamjournal_api_types::MediaKind;
use serde_json::json;

use crate::ctx::Ctx;
use crate::handlers::dispatch;
use crate::handlers::settings::merge_link;
use crate::io::{parse_external_media, parse_local_media, read_value};

fn command(server: &MockServer, state: LocalState, args: &[&str]) -> (Ctx, Command) {
    let base = server.base_url();
    let mut argv = vec!["jamjournal", "--api-base-url", base.as_str()];
    argv.extend_from_slice(args);
    let cli = CliArgs::try_parse_from(argv).expect("valid arguments");
    let settings = config::load(&cli).expect("settings");
    let ctx = Ctx::with_store(settings, Box::new(MemoryStore::new(state))).expect("ctx");
    (ctx, cli.command)
}

fn signed_in() -> LocalState {
    LocalState {
        token: Some("t".into()),
        ..LocalState::default()
    }
}

#[tokio::test]
async fn login_persists_the_token() -> Result<(), AppError> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("POST")
            .path("/api/auth/login")
            .json_body(json!({"email": "ada@jam.fm", "password": "pw"}));
        then.status(200).json_body(json!({"token": "fresh"}));
    });

    let (ctx, cmd) = command(
        &server,
        LocalState::default(),
        &["auth", "login", "--email", " ada@jam.fm ", "--password", "pw"],
    );
    dispatch(&ctx, cmd).await?;

    assert_eq!(ctx.store.load()?.token.as_deref(), Some("fresh"));
    assert_eq!(ctx.client.session().token().as_deref(), Some("fresh"));
    Ok(())
}

#[tokio::test]
async fn logout_forgets_the_token() -> Result<(), AppError> {
    let server = MockServer::start();
    let (ctx, cmd) = command(&server, signed_in(), &["auth", "logout"]);
    dispatch(&ctx, cmd).await?;

    assert!(ctx.store.load()?.token.is_none());
    assert!(!ctx.client.session().is_signed_in());
    Ok(())
}

#[tokio::test]
async fn me_without_a_session_points_at_login() {
    let server = MockServer::start();
    let (ctx, cmd) = command(&server, LocalState::default(), &["auth", "me"]);
    let err = dispatch(&ctx, cmd).await.expect_err("signed out");
    assert!(matches!(err, AppError::Client(ClientError::MissingToken)));
    assert!(err.hint().is_some());
}

#[tokio::test]
async fn search_records_recent_terms_newest_first() -> Result<(), AppError> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("GET").path("/api/posts").query_param("search", "dream");
        then.status(200).json_body(json!([{"id": 1, "title": "Dreamscape"}]));
    });
    let state = LocalState {
        recent_searches: vec!["jazz".into(), "dream".into()],
        ..LocalState::default()
    };

    let (ctx, cmd) = command(&server, state, &["search", "run", "  dream "]);
    dispatch(&ctx, cmd).await?;

    assert_eq!(ctx.store.load()?.recent_searches, ["dream", "jazz"]);
    Ok(())
}

#[tokio::test]
async fn failed_search_does_not_record_the_term() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("GET").path("/api/posts");
        then.status(500);
    });

    let (ctx, cmd) = command(&server, LocalState::default(), &["search", "run", "dream"]);
    let err = dispatch(&ctx, cmd).await.expect_err("backend down");
    assert!(matches!(
        err,
        AppError::Unavailable("Failed to fetch search results")
    ));
    assert!(ctx.store.load().expect("state").recent_searches.is_empty());
}

#[tokio::test]
async fn homepage_update_keeps_fields_not_given() -> Result<(), AppError> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("GET").path("/api/auth/settings/homepage-content");
        then.status(200).json_body(json!({
            "homepage_title": "JAM JOURNAL",
            "homepage_subtitle": "old",
            "homepage_description": "desc",
            "homepage_logo_url": "https://cdn.jam/logo.png"
        }));
    });
    let put = server.mock(|when, then| {
        when.method("PUT")
            .path("/api/auth/settings/homepage-content")
            .json_body(json!({
                "homepage_title": "JAM JOURNAL",
                "homepage_subtitle": "Fresh sounds",
                "homepage_description": "desc",
                "homepage_logo_url": "https://cdn.jam/logo.png"
            }));
        then.status(200);
    });

    let (ctx, cmd) = command(
        &server,
        signed_in(),
        &["settings", "homepage", "--subtitle", "Fresh sounds"],
    );
    dispatch(&ctx, cmd).await?;
    put.assert();
    Ok(())
}

#[tokio::test]
async fn delete_requires_confirmation() {
    let server = MockServer::start();
    let (ctx, cmd) = command(&server, signed_in(), &["posts", "delete", "7"]);
    let err = dispatch(&ctx, cmd).await.expect_err("unconfirmed");
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn rejected_priority_change_fails_the_command() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("GET").path("/api/posts").query_param("sortBy", "priority");
        then.status(200)
            .json_body(json!([{"id": 4, "title": "Song", "priority": 2}]));
    });
    server.mock(|when, then| {
        when.method("PATCH").path("/api/posts/4/priority");
        then.status(500);
    });

    let (ctx, cmd) = command(&server, signed_in(), &["posts", "priority", "4", "9"]);
    let err = dispatch(&ctx, cmd).await.expect_err("rejected");
    assert!(err.to_string().contains("priority change failed"));
}

#[tokio::test]
async fn home_fails_only_when_every_section_fails() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("GET").path("/api/posts");
        then.status(503);
    });

    let (ctx, cmd) = command(&server, LocalState::default(), &["home"]);
    let err = dispatch(&ctx, cmd).await.expect_err("all down");
    assert!(matches!(err, AppError::Unavailable(_)));
}

#[test]
fn media_specs_parse_by_source() {
    let local = parse_local_media("audio;track.mp3;Track;Band").expect("local");
    assert!(matches!(
        local,
        MediaUpload::Local {
            media_type: MediaKind::Audio,
            ..
        }
    ));

    let external = parse_external_media("video;https://youtu.be/x;;Clip;Band").expect("external");
    assert!(matches!(
        external,
        MediaUpload::External { platform: None, .. }
    ));

    assert!(parse_local_media("audio;track.mp3").is_err());
    assert!(parse_external_media("video;ftp://x;yt;Clip;Band").is_err());
    assert!(parse_local_media("midi;a.mid;T;A").is_err());
}

#[test]
fn read_value_prefers_file_over_inline() -> Result<(), AppError> {
    let mut file = tempfile::NamedTempFile::new().expect("tmp file");
    std::io::Write::write_all(&mut file, b"from-file").expect("write tmp");
    let value = read_value(Some("inline".into()), Some(file.path().to_path_buf()))?;
    assert_eq!(value, "from-file");
    assert!(read_value(None, None).is_err());
    Ok(())
}

#[test]
fn empty_link_clears_it() {
    let mut link = Some("https://x.com/jam".to_string());
    merge_link(&mut link, None);
    assert!(link.is_some());
    merge_link(&mut link, Some("  ".into()));
    assert!(link.is_none());
}
