//! Configuration layer: typed settings with layered precedence (file → env → CLI).

use std::{num::NonZeroUsize, path::PathBuf, str::FromStr, time::Duration};

use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use time::Duration as TimeDuration;
use tracing::level_filters::LevelFilter;
use url::Url;

mod cli;

pub use cli::{
    AuthCmd, CliArgs, Command, GenresCmd, GlobalOverrides, NewsletterCmd, PostFormArgs, PostsCmd,
    SearchCmd, SettingsCmd,
};

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "jamjournal";
const ENV_PREFIX: &str = "JAMJOURNAL";
const DEFAULT_API_BASE_URL: &str = "https://backend.jamjournal.com/";
const DEFAULT_PAGE_SIZE: usize = 6;
const DEFAULT_ADMIN_PAGE_SIZE: usize = 10;
const DEFAULT_RECENT_WINDOW_DAYS: u64 = 7;
const MAX_RECENT_WINDOW_DAYS: u64 = 36_500;
const DEFAULT_RECENT_SEARCH_LIMIT: usize = 5;
const DEFAULT_STATE_FILE: &str = ".jamjournal/state.json";

#[derive(Debug, Clone)]
pub struct Settings {
    pub api: ApiSettings,
    pub logging: LoggingSettings,
    pub listing: ListingSettings,
    pub search: SearchSettings,
    pub mutations: MutationSettings,
    pub state: StateSettings,
}

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: Url,
    /// `None` leaves requests without a deadline.
    pub request_timeout: Option<Duration>,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Clone)]
pub struct ListingSettings {
    pub page_size: NonZeroUsize,
    pub admin_page_size: NonZeroUsize,
    pub recent_window: TimeDuration,
}

#[derive(Debug, Clone)]
pub struct SearchSettings {
    pub recent_limit: NonZeroUsize,
}

#[derive(Debug, Clone, Copy)]
pub struct MutationSettings {
    pub rollback_on_failure: bool,
}

#[derive(Debug, Clone)]
pub struct StateSettings {
    pub file: PathBuf,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Load settings using the configured precedence (file → environment → CLI).
pub fn load(cli: &CliArgs) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = cli.config_file.as_ref() {
        builder = builder.add_source(File::from(path.as_path()).required(true));
    }

    builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;
    raw.apply_overrides(&cli.overrides);

    Settings::from_raw(raw)
}

/// Resolve configuration using the supplied CLI arguments, returning both for downstream use.
pub fn load_with_cli() -> Result<(CliArgs, Settings), LoadError> {
    let args = CliArgs::parse();
    let settings = load(&args)?;
    Ok((args, settings))
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    api: RawApiSettings,
    logging: RawLoggingSettings,
    listing: RawListingSettings,
    search: RawSearchSettings,
    mutations: RawMutationSettings,
    state: RawStateSettings,
}

impl RawSettings {
    fn apply_overrides(&mut self, overrides: &GlobalOverrides) {
        if let Some(url) = overrides.api_base_url.as_ref() {
            self.api.base_url = Some(url.clone());
        }
        if let Some(level) = overrides.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = Some(json);
        }
        if let Some(path) = overrides.state_file.as_ref() {
            self.state.file = Some(path.clone());
        }
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings {
            api,
            logging,
            listing,
            search,
            mutations,
            state,
        } = raw;

        Ok(Self {
            api: build_api_settings(api)?,
            logging: build_logging_settings(logging)?,
            listing: build_listing_settings(listing)?,
            search: build_search_settings(search)?,
            mutations: MutationSettings {
                rollback_on_failure: mutations.rollback_on_failure.unwrap_or(true),
            },
            state: build_state_settings(state)?,
        })
    }
}

fn build_api_settings(api: RawApiSettings) -> Result<ApiSettings, LoadError> {
    let raw_url = api
        .base_url
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
    let base_url = Url::parse(&raw_url)
        .map_err(|err| LoadError::invalid("api.base_url", format!("`{raw_url}`: {err}")))?;
    if !matches!(base_url.scheme(), "http" | "https") {
        return Err(LoadError::invalid(
            "api.base_url",
            "scheme must be http or https",
        ));
    }

    let request_timeout = match api.request_timeout_seconds {
        Some(0) => {
            return Err(LoadError::invalid(
                "api.request_timeout_seconds",
                "must be greater than zero",
            ));
        }
        Some(seconds) => Some(Duration::from_secs(seconds)),
        None => None,
    };

    Ok(ApiSettings {
        base_url,
        request_timeout,
    })
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::WARN,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}

fn build_listing_settings(listing: RawListingSettings) -> Result<ListingSettings, LoadError> {
    let page_size = non_zero(
        listing.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        "listing.page_size",
    )?;
    let admin_page_size = non_zero(
        listing.admin_page_size.unwrap_or(DEFAULT_ADMIN_PAGE_SIZE),
        "listing.admin_page_size",
    )?;
    let days = listing
        .recent_window_days
        .unwrap_or(DEFAULT_RECENT_WINDOW_DAYS);
    if !(1..=MAX_RECENT_WINDOW_DAYS).contains(&days) {
        return Err(LoadError::invalid(
            "listing.recent_window_days",
            format!("must be between 1 and {MAX_RECENT_WINDOW_DAYS}"),
        ));
    }
    let days = i64::try_from(days)
        .map_err(|_| LoadError::invalid("listing.recent_window_days", "value is too large"))?;

    Ok(ListingSettings {
        page_size,
        admin_page_size,
        recent_window: TimeDuration::days(days),
    })
}

fn build_search_settings(search: RawSearchSettings) -> Result<SearchSettings, LoadError> {
    Ok(SearchSettings {
        recent_limit: non_zero(
            search.recent_limit.unwrap_or(DEFAULT_RECENT_SEARCH_LIMIT),
            "search.recent_limit",
        )?,
    })
}

fn build_state_settings(state: RawStateSettings) -> Result<StateSettings, LoadError> {
    let file = state
        .file
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_FILE));
    if file.as_os_str().is_empty() {
        return Err(LoadError::invalid("state.file", "path must not be empty"));
    }
    Ok(StateSettings { file })
}

fn non_zero(value: usize, key: &'static str) -> Result<NonZeroUsize, LoadError> {
    NonZeroUsize::new(value).ok_or_else(|| LoadError::invalid(key, "must be greater than zero"))
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawApiSettings {
    base_url: Option<String>,
    request_timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawListingSettings {
    page_size: Option<usize>,
    admin_page_size: Option<usize>,
    recent_window_days: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSearchSettings {
    recent_limit: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawMutationSettings {
    rollback_on_failure: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawStateSettings {
    file: Option<PathBuf>,
}

#[cfg(test)]
mod tests;
