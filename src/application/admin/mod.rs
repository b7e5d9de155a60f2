//! Controllers for the administrative pages.

pub mod analytics;
pub mod content;
pub mod settings;

pub use analytics::AnalyticsDashboard;
pub use content::{ContentAdmin, ContentTotals};
pub use settings::{AdminProfileView, ResolvedSettings, SiteSettings};
