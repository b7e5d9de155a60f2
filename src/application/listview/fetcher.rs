use std::future::Future;

use serde::Serialize;
use tracing::{debug, warn};

use crate::infra::http::ClientError;
use crate::infra::telemetry::FETCH_TOTAL;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchPhase {
    Idle,
    Loading,
    Ready,
    Errored,
}

/// Lifecycle of one data need: a single request slot with its own
/// loading, error and data state.
///
/// A failure keeps the previously loaded data visible and replaces the
/// backend's error detail with the call site's static message.
#[derive(Debug, Clone)]
pub struct Fetcher<T> {
    label: &'static str,
    failure_message: &'static str,
    phase: FetchPhase,
    data: Option<T>,
    error: Option<&'static str>,
    resume: (FetchPhase, Option<&'static str>),
}

impl<T> Fetcher<T> {
    pub fn new(label: &'static str, failure_message: &'static str) -> Self {
        Self {
            label,
            failure_message,
            phase: FetchPhase::Idle,
            data: None,
            error: None,
            resume: (FetchPhase::Idle, None),
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn phase(&self) -> FetchPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == FetchPhase::Loading
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn data_mut(&mut self) -> Option<&mut T> {
        self.data.as_mut()
    }

    /// User-facing message of the last failed load.
    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    /// Install data obtained outside a load, e.g. the body of a confirmed write.
    pub fn set_data(&mut self, data: T) {
        self.data = Some(data);
        self.error = None;
        self.phase = FetchPhase::Ready;
    }

    /// Back to `Idle` with nothing loaded.
    pub fn reset(&mut self) {
        self.phase = FetchPhase::Idle;
        self.data = None;
        self.error = None;
        self.resume = (FetchPhase::Idle, None);
    }

    /// Enter `Loading`. Clears the error so a loading view never shows one.
    pub fn begin(&mut self) {
        if self.phase != FetchPhase::Loading {
            self.resume = (self.phase, self.error);
        }
        self.phase = FetchPhase::Loading;
        self.error = None;
    }

    pub fn complete(&mut self, result: Result<T, ClientError>) {
        match result {
            Ok(data) => {
                debug!(fetcher = self.label, "fetch succeeded");
                metrics::counter!(FETCH_TOTAL, "fetcher" => self.label, "outcome" => "ok")
                    .increment(1);
                self.data = Some(data);
                self.error = None;
                self.phase = FetchPhase::Ready;
            }
            Err(ClientError::Cancelled) => {
                debug!(fetcher = self.label, "fetch cancelled");
                metrics::counter!(FETCH_TOTAL, "fetcher" => self.label, "outcome" => "cancelled")
                    .increment(1);
                (self.phase, self.error) = self.resume;
            }
            Err(err) => {
                warn!(fetcher = self.label, error = %err, "fetch failed");
                metrics::counter!(FETCH_TOTAL, "fetcher" => self.label, "outcome" => "error")
                    .increment(1);
                self.error = Some(self.failure_message);
                self.phase = FetchPhase::Errored;
            }
        }
    }

    /// Run one request through the lifecycle. No retry is attempted.
    pub async fn run<F>(&mut self, request: F)
    where
        F: Future<Output = Result<T, ClientError>>,
    {
        self.begin();
        let result = request.await;
        self.complete(result);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::time::{Instant, sleep};

    use super::*;

    fn failure() -> ClientError {
        ClientError::Status {
            status: 500,
            body: "stack trace".into(),
        }
    }

    #[tokio::test]
    async fn failure_keeps_stale_data_visible() {
        let mut fetcher = Fetcher::new("latest", "Failed to load posts");
        fetcher.run(async { Ok(vec![1, 2, 3]) }).await;
        assert_eq!(fetcher.phase(), FetchPhase::Ready);

        fetcher.run(async { Err(failure()) }).await;
        assert_eq!(fetcher.phase(), FetchPhase::Errored);
        assert_eq!(fetcher.error(), Some("Failed to load posts"));
        assert_eq!(fetcher.data(), Some(&vec![1, 2, 3]));
    }

    #[test]
    fn loading_clears_the_error() {
        let mut fetcher: Fetcher<Vec<u8>> = Fetcher::new("latest", "Failed to load posts");
        fetcher.complete(Err(failure()));
        assert!(fetcher.error().is_some());

        fetcher.begin();
        assert!(fetcher.is_loading());
        assert_eq!(fetcher.error(), None);
    }

    #[test]
    fn cancellation_restores_the_previous_phase() {
        let mut fetcher: Fetcher<Vec<u8>> = Fetcher::new("latest", "Failed to load posts");
        fetcher.complete(Err(failure()));
        fetcher.begin();
        fetcher.complete(Err(ClientError::Cancelled));

        assert_eq!(fetcher.phase(), FetchPhase::Errored);
        assert_eq!(fetcher.error(), Some("Failed to load posts"));
    }

    #[tokio::test(start_paused = true)]
    async fn sibling_fetchers_complete_independently() {
        let mut featured: Fetcher<Vec<&str>> =
            Fetcher::new("featured", "Failed to load featured posts");
        let mut latest: Fetcher<Vec<&str>> = Fetcher::new("latest", "Failed to load latest posts");
        let start = Instant::now();

        let (featured_at, latest_at) = tokio::join!(
            async {
                featured
                    .run(async {
                        sleep(Duration::from_secs(2)).await;
                        Err(failure())
                    })
                    .await;
                start.elapsed()
            },
            async {
                latest
                    .run(async {
                        sleep(Duration::from_millis(200)).await;
                        Ok(vec!["Digital Dreams"])
                    })
                    .await;
                start.elapsed()
            },
        );

        assert!(latest_at < Duration::from_secs(1));
        assert!(featured_at >= Duration::from_secs(2));
        assert_eq!(latest.phase(), FetchPhase::Ready);
        assert_eq!(featured.phase(), FetchPhase::Errored);
        assert_eq!(latest.error(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn hung_request_stays_loading() {
        let mut fetcher: Fetcher<Vec<u8>> = Fetcher::new("latest", "Failed to load posts");
        let hung = tokio::time::timeout(
            Duration::from_secs(3600),
            fetcher.run(futures::future::pending()),
        )
        .await;
        assert!(hung.is_err());
        assert!(fetcher.is_loading());
    }
}
