//! JAM JOURNAL client library.
//!
//! `domain` holds the list vocabulary and pure helpers, `application` the
//! list-view layer and page controllers, `infra` the HTTP client, session
//! storage and telemetry, `config` the layered settings.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
