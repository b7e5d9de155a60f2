use std::error::Error as StdError;

use thiserror::Error;

use crate::{
    config::LoadError, domain::error::DomainError, infra::error::InfraError,
    infra::http::ClientError,
};

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("failed to load configuration: {0}")]
    Config(#[from] LoadError),
    /// A view could not load; carries the view's user-facing message.
    #[error("{0}")]
    Unavailable(&'static str),
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected(message.into())
    }

    /// The error followed by every source beneath it.
    pub fn chain(&self) -> Vec<String> {
        let mut messages = vec![self.to_string()];
        let mut current = self.source();
        while let Some(inner) = current {
            let message = inner.to_string();
            if messages.last() != Some(&message) {
                messages.push(message);
            }
            current = inner.source();
        }
        messages
    }

    /// Short hint printed under the error on the command line.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            AppError::Client(ClientError::MissingToken) => {
                Some("sign in with `jamjournal auth login --email <EMAIL>`")
            }
            AppError::Client(ClientError::Status { status: 401 | 403, .. }) => {
                Some("the session may have expired; sign in again")
            }
            AppError::Client(ClientError::Transport(_)) => {
                Some("check --api-base-url and that the backend is reachable")
            }
            AppError::Config(_) => Some("check the config file and JAMJOURNAL__* variables"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transparent_variants_do_not_repeat_themselves() {
        let err = AppError::from(ClientError::MissingToken);
        assert_eq!(err.chain().len(), 1);
        assert!(err.hint().is_some());
    }

    #[test]
    fn domain_errors_convert() {
        let err: AppError = DomainError::validation("bad sort").into();
        assert!(matches!(err, AppError::Domain(_)));
        assert!(err.hint().is_none());
    }
}
