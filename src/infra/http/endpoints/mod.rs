//! Typed wrappers over the backend routes, one module per route group.
//!
//! Every wrapper is an inherent method on [`ApiClient`](super::ApiClient);
//! public reads are coalesced, admin calls carry the session token.

mod analytics;
mod auth;
mod genres;
mod newsletter;
mod posts;
mod settings;
