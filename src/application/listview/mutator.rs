//! Optimistic updates with an explicit failure policy.
//!
//! The patch lands in local state before the request leaves. Requests run
//! on spawned tasks and report back over a channel; the owner folds the
//! reports into its view with [`OptimisticMutator::drain`] or
//! [`OptimisticMutator::next_report`]. For a given row only the most
//! recently issued mutation may roll the row back.

use std::collections::HashMap;
use std::future::Future;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::fetcher::Fetcher;
use super::state::ListView;
use crate::domain::listing::ListItem;
use crate::infra::http::ClientError;
use crate::infra::telemetry::{MUTATION_ROLLBACK_TOTAL, MUTATION_TOTAL};

/// Something that owns rows the mutator can patch in place.
pub trait PatchTarget<T: ListItem> {
    fn row_mut(&mut self, id: &T::Id) -> Option<&mut T>;
}

impl<T: ListItem> PatchTarget<T> for ListView<T> {
    fn row_mut(&mut self, id: &T::Id) -> Option<&mut T> {
        self.find_mut(id)
    }
}

impl<T: ListItem> PatchTarget<T> for Fetcher<Vec<T>> {
    fn row_mut(&mut self, id: &T::Id) -> Option<&mut T> {
        self.data_mut()?.iter_mut().find(|item| &item.id() == id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollbackPolicy {
    /// Restore the row to the value the backend last accepted.
    Revert,
    /// Leave the optimistic value in place.
    Keep,
}

impl RollbackPolicy {
    pub fn from_flag(rollback_on_failure: bool) -> Self {
        if rollback_on_failure {
            Self::Revert
        } else {
            Self::Keep
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationStatus {
    Confirmed,
    Failed { message: String, reverted: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationReport<Id> {
    pub id: Id,
    pub generation: u64,
    pub status: MutationStatus,
}

/// Per-row bookkeeping while at least one mutation is in flight.
struct Pending<T> {
    latest: u64,
    /// Row as the backend last acknowledged it: the value before the first
    /// in-flight patch, advanced by each newer confirmation.
    accepted: T,
    accepted_generation: Option<u64>,
    /// Row right after each in-flight patch, by generation.
    applied: HashMap<u64, T>,
    latest_failed: bool,
}

struct Settled<Id> {
    id: Id,
    generation: u64,
    result: Result<(), ClientError>,
}

pub struct OptimisticMutator<T: ListItem> {
    policy: RollbackPolicy,
    next_generation: u64,
    pending: HashMap<T::Id, Pending<T>>,
    tx: mpsc::UnboundedSender<Settled<T::Id>>,
    rx: mpsc::UnboundedReceiver<Settled<T::Id>>,
}

impl<T: ListItem> std::fmt::Debug for OptimisticMutator<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptimisticMutator")
            .field("policy", &self.policy)
            .field("in_flight", &self.in_flight())
            .finish()
    }
}

impl<T: ListItem> OptimisticMutator<T> {
    pub fn new(policy: RollbackPolicy) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            policy,
            next_generation: 0,
            pending: HashMap::new(),
            tx,
            rx,
        }
    }

    pub fn policy(&self) -> RollbackPolicy {
        self.policy
    }

    /// Requests issued but not yet folded back in.
    pub fn in_flight(&self) -> usize {
        self.pending.values().map(|entry| entry.applied.len()).sum()
    }

    /// Patch row `id` now and send `request` in the background.
    ///
    /// Returns the mutation's generation, or `None` (and sends nothing) when
    /// the row is not present. Must be called from within a Tokio runtime.
    pub fn mutate<V, P, F>(&mut self, target: &mut V, id: T::Id, patch: P, request: F) -> Option<u64>
    where
        V: PatchTarget<T>,
        P: FnOnce(&mut T),
        F: Future<Output = Result<(), ClientError>> + Send + 'static,
    {
        let row = target.row_mut(&id)?;
        let generation = self.next_generation;
        self.next_generation += 1;

        let entry = self.pending.entry(id.clone()).or_insert_with(|| Pending {
            latest: generation,
            accepted: row.clone(),
            accepted_generation: None,
            applied: HashMap::new(),
            latest_failed: false,
        });
        patch(&mut *row);
        entry.latest = generation;
        entry.latest_failed = false;
        entry.applied.insert(generation, row.clone());
        debug!(?id, generation, "optimistic patch applied");

        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = request.await;
            // The owner may be gone; nothing is left to reconcile then.
            let _ = tx.send(Settled {
                id,
                generation,
                result,
            });
        });
        Some(generation)
    }

    /// Fold every report that has already arrived.
    pub fn drain<V: PatchTarget<T>>(&mut self, target: &mut V) -> Vec<MutationReport<T::Id>> {
        let mut reports = Vec::new();
        while let Ok(settled) = self.rx.try_recv() {
            reports.push(self.settle(target, settled));
        }
        reports
    }

    /// Wait for the next report. `None` when nothing is in flight.
    pub async fn next_report<V: PatchTarget<T>>(
        &mut self,
        target: &mut V,
    ) -> Option<MutationReport<T::Id>> {
        if self.in_flight() == 0 {
            return None;
        }
        let settled = self.rx.recv().await?;
        Some(self.settle(target, settled))
    }

    fn settle<V: PatchTarget<T>>(
        &mut self,
        target: &mut V,
        settled: Settled<T::Id>,
    ) -> MutationReport<T::Id> {
        let Settled {
            id,
            generation,
            result,
        } = settled;

        let revert = self.policy == RollbackPolicy::Revert;
        let Some(entry) = self.pending.get_mut(&id) else {
            return MutationReport {
                id,
                generation,
                status: MutationStatus::Confirmed,
            };
        };
        let applied = entry.applied.remove(&generation);

        let status = match result {
            Ok(()) => {
                metrics::counter!(MUTATION_TOTAL, "outcome" => "confirmed").increment(1);
                let newer = entry
                    .accepted_generation
                    .is_none_or(|accepted| generation > accepted);
                if let (true, Some(row)) = (newer, applied) {
                    entry.accepted = row;
                    entry.accepted_generation = Some(generation);
                    // The newest patch was already rolled back; show what the
                    // backend now holds.
                    if entry.latest_failed && revert {
                        if let Some(current) = target.row_mut(&id) {
                            *current = entry.accepted.clone();
                        }
                    }
                }
                MutationStatus::Confirmed
            }
            Err(err) => {
                metrics::counter!(MUTATION_TOTAL, "outcome" => "failed").increment(1);
                let latest = entry.latest == generation;
                if latest {
                    entry.latest_failed = true;
                }
                let reverted = latest
                    && revert
                    && match target.row_mut(&id) {
                        Some(row) => {
                            *row = entry.accepted.clone();
                            true
                        }
                        None => false,
                    };
                if reverted {
                    metrics::counter!(MUTATION_ROLLBACK_TOTAL).increment(1);
                }
                warn!(?id, generation, reverted, error = %err, "optimistic mutation failed");
                MutationStatus::Failed {
                    message: err.to_string(),
                    reverted,
                }
            }
        };

        if entry.applied.is_empty() {
            self.pending.remove(&id);
        }

        MutationReport {
            id,
            generation,
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use jamjournal_api_types::Post;
    use tokio::sync::oneshot;

    use super::*;
    use crate::domain::types::SortKey;

    fn view_with(ids: &[i64]) -> ListView<Post> {
        let mut view = ListView::new(
            "blog",
            "Failed to load posts",
            NonZeroUsize::new(6).expect("non-zero"),
        )
        .with_sort(SortKey::Server);
        let posts = ids
            .iter()
            .map(|id| {
                serde_json::from_value(serde_json::json!({
                    "id": id, "title": format!("Post {id}"), "rating": 7, "priority": 1
                }))
                .expect("post fixture")
            })
            .collect();
        view.complete_load(Ok(posts));
        view
    }

    fn rating(view: &ListView<Post>, id: i64) -> u64 {
        view.find(&id).map_or(0, |post| post.rating)
    }

    fn controlled() -> (
        oneshot::Sender<Result<(), ClientError>>,
        impl Future<Output = Result<(), ClientError>> + Send + 'static,
    ) {
        let (tx, rx) = oneshot::channel();
        (tx, async move { rx.await.unwrap_or(Err(ClientError::Cancelled)) })
    }

    fn rejected() -> ClientError {
        ClientError::Status {
            status: 500,
            body: String::new(),
        }
    }

    #[tokio::test]
    async fn patch_is_visible_while_the_request_hangs() {
        let mut view = view_with(&[41, 42]);
        let mut mutator = OptimisticMutator::new(RollbackPolicy::Revert);

        let issued = mutator.mutate(
            &mut view,
            42,
            |post| post.rating += 1,
            futures::future::pending(),
        );
        assert!(issued.is_some());
        assert_eq!(rating(&view, 42), 8);

        tokio::task::yield_now().await;
        assert!(mutator.drain(&mut view).is_empty());
        assert_eq!(rating(&view, 42), 8);
        assert_eq!(mutator.in_flight(), 1);
    }

    #[tokio::test]
    async fn failure_reverts_under_revert_policy() {
        let mut view = view_with(&[42]);
        let mut mutator = OptimisticMutator::new(RollbackPolicy::Revert);

        mutator.mutate(&mut view, 42, |post| post.rating += 1, async {
            Err(rejected())
        });
        let report = mutator.next_report(&mut view).await.expect("report");

        assert!(matches!(
            report.status,
            MutationStatus::Failed { reverted: true, .. }
        ));
        assert_eq!(rating(&view, 42), 7);
        assert_eq!(mutator.in_flight(), 0);
    }

    #[tokio::test]
    async fn failure_is_kept_under_keep_policy() {
        let mut view = view_with(&[42]);
        let mut mutator = OptimisticMutator::new(RollbackPolicy::Keep);

        mutator.mutate(&mut view, 42, |post| post.rating += 1, async {
            Err(rejected())
        });
        let report = mutator.next_report(&mut view).await.expect("report");

        assert!(matches!(
            report.status,
            MutationStatus::Failed {
                reverted: false,
                ..
            }
        ));
        assert_eq!(rating(&view, 42), 8);
    }

    fn priority(view: &ListView<Post>, id: i64) -> Option<i64> {
        view.find(&id).map(|post| post.priority)
    }

    #[tokio::test]
    async fn only_the_latest_mutation_may_roll_back() {
        let mut view = view_with(&[42]);
        let mut mutator = OptimisticMutator::new(RollbackPolicy::Revert);
        let (first_tx, first) = controlled();
        let (second_tx, second) = controlled();

        mutator.mutate(&mut view, 42, |post| post.priority = 5, first);
        mutator.mutate(&mut view, 42, |post| post.priority = 9, second);

        first_tx.send(Err(rejected())).expect("send");
        let report = mutator.next_report(&mut view).await.expect("first");
        assert_eq!(report.generation, 0);
        assert!(matches!(
            report.status,
            MutationStatus::Failed {
                reverted: false,
                ..
            }
        ));
        assert_eq!(priority(&view, 42), Some(9));

        second_tx.send(Err(rejected())).expect("send");
        let report = mutator.next_report(&mut view).await.expect("second");
        assert!(matches!(
            report.status,
            MutationStatus::Failed { reverted: true, .. }
        ));
        assert_eq!(priority(&view, 42), Some(1));
        assert!(mutator.next_report(&mut view).await.is_none());
    }

    #[tokio::test]
    async fn rollback_lands_on_the_last_confirmed_value() {
        let mut view = view_with(&[42]);
        let mut mutator = OptimisticMutator::new(RollbackPolicy::Revert);
        let (first_tx, first) = controlled();
        let (second_tx, second) = controlled();

        mutator.mutate(&mut view, 42, |post| post.priority = 5, first);
        mutator.mutate(&mut view, 42, |post| post.priority = 9, second);

        first_tx.send(Ok(())).expect("send");
        let report = mutator.next_report(&mut view).await.expect("first");
        assert_eq!(report.status, MutationStatus::Confirmed);
        assert_eq!(priority(&view, 42), Some(9));

        second_tx.send(Err(rejected())).expect("send");
        mutator.next_report(&mut view).await.expect("second");
        assert_eq!(priority(&view, 42), Some(5));
    }

    #[tokio::test]
    async fn late_confirmation_replaces_a_rolled_back_row() {
        let mut view = view_with(&[42]);
        let mut mutator = OptimisticMutator::new(RollbackPolicy::Revert);
        let (first_tx, first) = controlled();
        let (second_tx, second) = controlled();

        mutator.mutate(&mut view, 42, |post| post.priority = 5, first);
        mutator.mutate(&mut view, 42, |post| post.priority = 9, second);

        second_tx.send(Err(rejected())).expect("send");
        mutator.next_report(&mut view).await.expect("second");
        assert_eq!(priority(&view, 42), Some(1));

        first_tx.send(Ok(())).expect("send");
        mutator.next_report(&mut view).await.expect("first");
        assert_eq!(priority(&view, 42), Some(5));
        assert_eq!(mutator.in_flight(), 0);
    }

    #[tokio::test]
    async fn missing_row_sends_nothing() {
        let mut view = view_with(&[1]);
        let mut mutator = OptimisticMutator::new(RollbackPolicy::Revert);
        let issued = mutator.mutate(&mut view, 99, |post| post.rating += 1, async { Ok(()) });
        assert!(issued.is_none());
        assert_eq!(mutator.in_flight(), 0);
    }

    #[tokio::test]
    async fn confirmation_keeps_the_patch() {
        let mut view = view_with(&[3]);
        let mut mutator = OptimisticMutator::new(RollbackPolicy::Revert);
        mutator.mutate(&mut view, 3, |post| post.rating += 1, async { Ok(()) });

        let report = mutator.next_report(&mut view).await.expect("report");
        assert_eq!(report.status, MutationStatus::Confirmed);
        assert_eq!(rating(&view, 3), 8);
    }
}
