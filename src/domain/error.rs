use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    /// A filter or sort name outside the accepted vocabulary.
    #[error("unknown {kind} `{value}` (expected one of: {expected})")]
    UnknownVariant {
        kind: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("invalid value: {message}")]
    Validation { message: String },
    #[error("`{name}` is reserved for the unfiltered genre view")]
    ReservedName { name: String },
}

impl DomainError {
    pub fn unknown(kind: &'static str, value: impl Into<String>, expected: &'static str) -> Self {
        Self::UnknownVariant {
            kind,
            value: value.into(),
            expected,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn reserved(name: impl Into<String>) -> Self {
        Self::ReservedName { name: name.into() }
    }
}
