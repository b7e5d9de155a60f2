use thiserror::Error;

/// Failure of a single backend call.
///
/// Cloneable so that one coalesced request can hand the same failure to
/// every caller waiting on it.
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("http error: {0}")]
    Transport(String),
    #[error("server error: status {status} body {body}")]
    Status { status: u16, body: String },
    #[error("failed to parse body: {0}")]
    Decode(String),
    #[error("no admin session; run `auth login` first")]
    MissingToken,
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to read {path}: {message}")]
    File { path: String, message: String },
    #[error("request cancelled")]
    Cancelled,
}

impl ClientError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ClientError::Cancelled)
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Transport(err.to_string())
    }
}
