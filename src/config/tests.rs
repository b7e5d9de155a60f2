use super::*;

fn parse(args: &[&str]) -> CliArgs {
    CliArgs::try_parse_from(args).expect("valid arguments")
}

#[test]
fn defaults_match_the_public_site() {
    let settings = Settings::from_raw(RawSettings::default()).expect("valid settings");

    assert_eq!(settings.api.base_url.as_str(), DEFAULT_API_BASE_URL);
    assert!(settings.api.request_timeout.is_none());
    assert_eq!(settings.logging.level, LevelFilter::WARN);
    assert!(matches!(settings.logging.format, LogFormat::Compact));
    assert_eq!(settings.listing.page_size.get(), 6);
    assert_eq!(settings.listing.admin_page_size.get(), 10);
    assert_eq!(settings.listing.recent_window, TimeDuration::days(7));
    assert_eq!(settings.search.recent_limit.get(), 5);
    assert!(settings.mutations.rollback_on_failure);
    assert_eq!(settings.state.file, PathBuf::from(DEFAULT_STATE_FILE));
}

#[test]
fn cli_overrides_take_highest_precedence() {
    let mut raw = RawSettings::default();
    raw.api.base_url = Some("http://from-file.test/".to_string());
    raw.logging.level = Some("info".to_string());

    let cli = parse(&[
        "jamjournal",
        "--api-base-url",
        "http://from-cli.test/",
        "--log-level",
        "debug",
        "genres",
        "list",
    ]);
    raw.apply_overrides(&cli.overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(settings.api.base_url.as_str(), "http://from-cli.test/");
    assert_eq!(settings.logging.level, LevelFilter::DEBUG);
}

#[test]
fn global_flags_are_accepted_after_the_subcommand() {
    let cli = parse(&[
        "jamjournal",
        "search",
        "recent",
        "--state-file",
        "/tmp/state.json",
        "--log-json",
        "true",
    ]);
    assert_eq!(
        cli.overrides.state_file.as_deref(),
        Some(std::path::Path::new("/tmp/state.json"))
    );

    let mut raw = RawSettings::default();
    raw.apply_overrides(&cli.overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");
    assert!(matches!(settings.logging.format, LogFormat::Json));
}

#[test]
fn zero_page_size_is_rejected() {
    let mut raw = RawSettings::default();
    raw.listing.page_size = Some(0);

    let err = Settings::from_raw(raw).expect_err("zero page size");
    assert!(matches!(
        err,
        LoadError::Invalid {
            key: "listing.page_size",
            ..
        }
    ));
}

#[test]
fn non_http_base_url_is_rejected() {
    let mut raw = RawSettings::default();
    raw.api.base_url = Some("ftp://backend.test/".to_string());

    let err = Settings::from_raw(raw).expect_err("ftp scheme");
    assert!(matches!(err, LoadError::Invalid { key: "api.base_url", .. }));
}

#[test]
fn timeout_is_opt_in() {
    let mut raw = RawSettings::default();
    raw.api.request_timeout_seconds = Some(15);
    let settings = Settings::from_raw(raw).expect("valid settings");
    assert_eq!(settings.api.request_timeout, Some(Duration::from_secs(15)));

    let mut raw = RawSettings::default();
    raw.api.request_timeout_seconds = Some(0);
    assert!(Settings::from_raw(raw).is_err());
}

#[test]
fn rollback_can_be_disabled() {
    let mut raw = RawSettings::default();
    raw.mutations.rollback_on_failure = Some(false);
    let settings = Settings::from_raw(raw).expect("valid settings");
    assert!(!settings.mutations.rollback_on_failure);
}

#[test]
fn config_file_layer_is_read() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("jamjournal.toml");
    std::fs::write(
        &path,
        "[listing]\npage_size = 9\n\n[search]\nrecent_limit = 3\n",
    )
    .expect("write config");

    let cli = parse(&[
        "jamjournal",
        "--config-file",
        path.to_str().expect("utf-8 path"),
        "analytics",
    ]);
    let settings = load(&cli).expect("settings");
    assert_eq!(settings.listing.page_size.get(), 9);
    assert_eq!(settings.search.recent_limit.get(), 3);
}

#[test]
fn recent_window_is_bounded() {
    let mut raw = RawSettings::default();
    raw.listing.recent_window_days = Some(36_500);
    let settings = Settings::from_raw(raw).expect("hundred-year window");
    assert_eq!(settings.listing.recent_window, TimeDuration::days(36_500));

    for days in [0, 36_501, 10_000_000, u64::MAX] {
        let mut raw = RawSettings::default();
        raw.listing.recent_window_days = Some(days);
        let err = Settings::from_raw(raw).expect_err("out of range window");
        assert!(matches!(
            err,
            LoadError::Invalid {
                key: "listing.recent_window_days",
                ..
            }
        ));
    }
}
