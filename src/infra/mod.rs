pub mod error;
pub mod http;
pub(crate) mod lock;
pub mod session;
pub mod store;
pub mod telemetry;
