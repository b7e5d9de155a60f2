//! Request coalescing and scope-bound cancellation.
//!
//! Identical GETs issued while one is already in flight join that request
//! instead of opening another connection. The coordinator only keeps a weak
//! handle: once every waiter has gone away the request future is dropped,
//! which aborts the underlying HTTP exchange.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use bytes::Bytes;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use futures::FutureExt;
use futures::future::{BoxFuture, Shared, WeakShared};
use tokio::sync::watch;
use tracing::debug;

use super::client::Auth;
use super::error::ClientError;
use crate::infra::telemetry::REQUEST_COALESCED_TOTAL;

type BodyFuture = BoxFuture<'static, Result<Bytes, ClientError>>;

/// A shared handle on one in-flight request body.
pub type SharedBody = Shared<BodyFuture>;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestKey {
    url: String,
    auth: Auth,
}

impl RequestKey {
    pub fn new(url: impl Into<String>, auth: Auth) -> Self {
        Self {
            url: url.into(),
            auth,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

struct InFlight {
    generation: u64,
    body: WeakShared<BodyFuture>,
}

#[derive(Clone, Default)]
pub struct RequestCoordinator {
    inner: Arc<DashMap<RequestKey, InFlight>>,
    generations: Arc<AtomicU64>,
}

impl fmt::Debug for RequestCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestCoordinator")
            .field("in_flight", &self.inner.len())
            .finish()
    }
}

impl RequestCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys that currently have a registered request.
    pub fn in_flight(&self) -> usize {
        self.inner.len()
    }

    /// Join the in-flight request for `key`, or start one with `start`.
    pub fn join<F>(&self, key: RequestKey, start: F) -> SharedBody
    where
        F: FnOnce() -> BodyFuture,
    {
        match self.inner.entry(key) {
            Entry::Occupied(mut occupied) => {
                if let Some(body) = occupied.get().body.upgrade() {
                    metrics::counter!(REQUEST_COALESCED_TOTAL).increment(1);
                    debug!(url = occupied.key().url(), "joined in-flight request");
                    return body;
                }
                let (in_flight, body) = self.launch(occupied.key().clone(), start);
                if let Some(in_flight) = in_flight {
                    occupied.insert(in_flight);
                } else {
                    occupied.remove();
                }
                body
            }
            Entry::Vacant(vacant) => {
                let (in_flight, body) = self.launch(vacant.key().clone(), start);
                if let Some(in_flight) = in_flight {
                    vacant.insert(in_flight);
                }
                body
            }
        }
    }

    fn launch<F>(&self, key: RequestKey, start: F) -> (Option<InFlight>, SharedBody)
    where
        F: FnOnce() -> BodyFuture,
    {
        let generation = self.generations.fetch_add(1, Ordering::Relaxed);
        let registry = Arc::clone(&self.inner);
        let request = start();
        let body = async move {
            let result = request.await;
            registry.remove_if(&key, |_, entry| entry.generation == generation);
            result
        }
        .boxed()
        .shared();
        let in_flight = body.downgrade().map(|weak| InFlight {
            generation,
            body: weak,
        });
        (in_flight, body)
    }
}

/// Lifetime of a consumer (a mounted page). Dropping it cancels every wait
/// started through one of its handles.
#[derive(Debug)]
pub struct Scope {
    cancel: watch::Sender<bool>,
}

#[derive(Debug, Clone)]
pub struct ScopeHandle {
    cancelled: watch::Receiver<bool>,
}

impl Scope {
    pub fn new() -> Self {
        let (cancel, _) = watch::channel(false);
        Self { cancel }
    }

    pub fn handle(&self) -> ScopeHandle {
        ScopeHandle {
            cancelled: self.cancel.subscribe(),
        }
    }

    pub fn cancel(self) {
        self.cancel.send_replace(true);
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeHandle {
    pub fn is_cancelled(&self) -> bool {
        *self.cancelled.borrow() || self.cancelled.has_changed().is_err()
    }

    /// Resolves once the owning scope is cancelled or dropped.
    pub async fn cancelled(&mut self) {
        loop {
            if *self.cancelled.borrow_and_update() {
                return;
            }
            if self.cancelled.changed().await.is_err() {
                return;
            }
        }
    }

    /// Run `request` unless the scope goes away first.
    pub async fn run<T, F>(&self, request: F) -> Result<T, ClientError>
    where
        F: Future<Output = Result<T, ClientError>>,
    {
        let mut watcher = self.clone();
        tokio::select! {
            biased;
            () = watcher.cancelled() => Err(ClientError::Cancelled),
            result = request => result,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    use super::*;

    fn counted(calls: &Arc<AtomicUsize>, body: &'static [u8]) -> impl FnOnce() -> BodyFuture {
        let calls = Arc::clone(calls);
        move || {
            calls.fetch_add(1, Ordering::SeqCst);
            async move {
                tokio::time::sleep(Duration::from_millis(50)).await;
                Ok(Bytes::from_static(body))
            }
            .boxed()
        }
    }

    fn key() -> RequestKey {
        RequestKey::new("http://backend/api/posts?category=latest", Auth::Public)
    }

    #[tokio::test(start_paused = true)]
    async fn identical_requests_share_one_call() {
        let coordinator = RequestCoordinator::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let first = coordinator.join(key(), counted(&calls, b"[1]"));
        let second = coordinator.join(key(), counted(&calls, b"[2]"));
        assert_eq!(coordinator.in_flight(), 1);

        let (a, b) = tokio::join!(first, second);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(a.expect("first"), Bytes::from_static(b"[1]"));
        assert_eq!(b.expect("second"), Bytes::from_static(b"[1]"));
        assert_eq!(coordinator.in_flight(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn completed_requests_are_not_reused() {
        let coordinator = RequestCoordinator::new();
        let calls = Arc::new(AtomicUsize::new(0));

        coordinator
            .join(key(), counted(&calls, b"[]"))
            .await
            .expect("first");
        coordinator
            .join(key(), counted(&calls, b"[]"))
            .await
            .expect("second");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn abandoned_request_is_restarted() {
        let coordinator = RequestCoordinator::new();
        let calls = Arc::new(AtomicUsize::new(0));

        drop(coordinator.join(key(), counted(&calls, b"[]")));
        let body = coordinator
            .join(key(), counted(&calls, b"[3]"))
            .await
            .expect("restarted");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(body, Bytes::from_static(b"[3]"));
    }

    #[tokio::test]
    async fn dropping_scope_cancels_waiters() {
        let scope = Scope::new();
        let handle = scope.handle();
        assert!(!handle.is_cancelled());

        let waiter = tokio::spawn({
            let handle = handle.clone();
            async move {
                handle
                    .run(futures::future::pending::<Result<(), ClientError>>())
                    .await
            }
        });
        drop(scope);

        let result = waiter.await.expect("join");
        assert!(matches!(result, Err(ClientError::Cancelled)));
        assert!(handle.is_cancelled());
    }

    #[tokio::test]
    async fn live_scope_passes_results_through() {
        let scope = Scope::new();
        let value = scope
            .handle()
            .run(async { Ok::<_, ClientError>(7) })
            .await
            .expect("value");
        assert_eq!(value, 7);
        scope.cancel();
    }
}
