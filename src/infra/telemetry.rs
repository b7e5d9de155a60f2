use std::sync::Once;

use metrics::{Unit, describe_counter};
use tracing_error::ErrorLayer;
use tracing_subscriber::{
    EnvFilter, fmt,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::config::{LogFormat, LoggingSettings};

use super::error::InfraError;

pub const FETCH_TOTAL: &str = "jamjournal_fetch_total";
pub const REQUEST_COALESCED_TOTAL: &str = "jamjournal_request_coalesced_total";
pub const MUTATION_TOTAL: &str = "jamjournal_mutation_total";
pub const MUTATION_ROLLBACK_TOTAL: &str = "jamjournal_mutation_rollback_total";

static METRIC_DESCRIPTIONS: Once = Once::new();

/// Install a global tracing subscriber using the provided logging settings.
///
/// Events go to stderr so command output on stdout stays machine readable.
pub fn init(logging: &LoggingSettings) -> Result<(), InfraError> {
    describe_metrics();

    let env_filter = EnvFilter::builder()
        .with_default_directive(logging.level.into())
        .from_env_lossy();

    let fmt_layer = match logging.format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(ErrorLayer::default())
        .with(fmt_layer)
        .try_init()
        .map_err(|err| {
            InfraError::telemetry(format!("failed to install tracing subscriber: {err}"))
        })
}

fn describe_metrics() {
    METRIC_DESCRIPTIONS.call_once(|| {
        describe_counter!(
            FETCH_TOTAL,
            Unit::Count,
            "Completed fetcher requests, labelled by fetcher and outcome."
        );
        describe_counter!(
            REQUEST_COALESCED_TOTAL,
            Unit::Count,
            "GET requests that joined an identical in-flight request."
        );
        describe_counter!(
            MUTATION_TOTAL,
            Unit::Count,
            "Settled optimistic mutations, labelled by outcome."
        );
        describe_counter!(
            MUTATION_ROLLBACK_TOTAL,
            Unit::Count,
            "Optimistic patches reverted after the backend rejected them."
        );
    });
}
