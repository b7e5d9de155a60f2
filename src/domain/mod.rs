pub mod analytics;
pub mod display;
pub mod error;
pub mod listing;
pub mod site;
pub mod types;
