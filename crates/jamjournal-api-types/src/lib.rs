//! Wire types for the JAM JOURNAL backend API.
//!
//! These mirror the JSON bodies exchanged with `/api/*`. They carry no
//! transport logic so both the client library and tests can share them.

pub mod analytics;
pub mod auth;
pub mod genres;
pub mod newsletter;
pub mod posts;
pub mod settings;

pub use analytics::{Analytics, CountryCount, DeviceCount, TopContent};
pub use auth::{AdminProfile, LoginRequest, LoginResponse};
pub use genres::{Genre, GenreRequest};
pub use newsletter::{ApiMessage, Campaign, EmailRequest, SendNewsletterRequest, Subscriber};
pub use posts::{
    Author, MediaKind, MediaItem, MediaSource, Post, PostCategory, PostListQuery, PostOrder,
    PriorityRequest,
};
pub use settings::{HomepageContent, HomepageStats, SocialLinks, SubmitRedirectUrl};
