//! Admin session shared by every client clone.

use std::sync::{Arc, RwLock};

use super::lock::recover;
use super::store::LocalState;

const SOURCE: &str = "infra::session";

#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Arc<RwLock<Option<String>>>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        let session = Self::default();
        session.sign_in(token);
        session
    }

    pub fn from_state(state: &LocalState) -> Self {
        match state.token.as_deref().map(str::trim) {
            Some(token) if !token.is_empty() => Self::with_token(token),
            _ => Self::anonymous(),
        }
    }

    pub fn token(&self) -> Option<String> {
        recover(self.token.read(), SOURCE, "token").clone()
    }

    pub fn is_signed_in(&self) -> bool {
        recover(self.token.read(), SOURCE, "is_signed_in").is_some()
    }

    pub fn sign_in(&self, token: impl Into<String>) {
        *recover(self.token.write(), SOURCE, "sign_in") = Some(token.into());
    }

    pub fn sign_out(&self) {
        *recover(self.token.write(), SOURCE, "sign_out") = None;
    }
}
