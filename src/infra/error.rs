use std::fmt::Display;
use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("cannot access state file `{path}`: {source}")]
    StateIo {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("state file `{path}` is unusable: {message}")]
    State { path: String, message: String },
    #[error("telemetry initialization failed: {0}")]
    Telemetry(String),
}

impl InfraError {
    pub fn state_io(path: &Path, source: std::io::Error) -> Self {
        Self::StateIo {
            path: path.display().to_string(),
            source,
        }
    }

    pub fn state(path: &Path, message: impl Display) -> Self {
        Self::State {
            path: path.display().to_string(),
            message: message.to_string(),
        }
    }

    pub fn telemetry(message: impl Into<String>) -> Self {
        Self::Telemetry(message.into())
    }
}
