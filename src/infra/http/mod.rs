//! HTTP plumbing for the backend API: the shared client, request
//! coalescing, multipart forms and one typed wrapper per route group.

pub mod client;
pub mod coordinator;
pub mod endpoints;
pub mod error;
pub mod forms;

pub use client::{ApiClient, Auth};
pub use coordinator::{RequestCoordinator, RequestKey, Scope, ScopeHandle};
pub use error::ClientError;
pub use forms::{MediaUpload, PostForm, ProfileForm};
