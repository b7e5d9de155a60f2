//! Page-level controllers built on the generic list-view layer.

pub mod admin;
pub mod blog;
pub mod error;
pub mod genres;
pub mod home;
pub mod listview;
pub mod newsletter;
pub mod search;
