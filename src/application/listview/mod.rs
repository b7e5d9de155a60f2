//! Generic list-view layer shared by every page that lists things.
//!
//! A [`ListView`] owns one [`Fetcher`] plus the filter, sort and page
//! selection applied to what it fetched. Filter, sort and page changes are
//! synchronous re-derivations; only an explicit load re-enters `Loading`.

mod fetcher;
mod filter;
mod mutator;
mod paginate;
mod state;

pub use fetcher::{FetchPhase, Fetcher};
pub use filter::{FilterSet, apply, compare};
pub use mutator::{
    MutationReport, MutationStatus, OptimisticMutator, PatchTarget, RollbackPolicy,
};
pub use paginate::{Paginated, clamp_page, paginate, total_pages};
pub use state::{ListView, ViewSnapshot};
