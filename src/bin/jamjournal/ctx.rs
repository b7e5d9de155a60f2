#![deny(clippy::all, clippy::pedantic)]

use jamjournal::application::error::AppError;
use jamjournal::application::listview::RollbackPolicy;
use jamjournal::config::Settings;
use jamjournal::infra::http::{ApiClient, Scope, ScopeHandle};
use jamjournal::infra::session::Session;
use jamjournal::infra::store::{FileStore, StateStore};

/// Everything a command needs: the backend client, the persisted state and
/// the resolved settings. One invocation is one mounted page, so one scope.
pub struct Ctx {
    pub client: ApiClient,
    pub store: Box<dyn StateStore>,
    pub settings: Settings,
    scope: Scope,
}

impl Ctx {
    pub fn from_settings(settings: Settings) -> Result<Self, AppError> {
        let store = FileStore::new(settings.state.file.clone());
        Self::with_store(settings, Box::new(store))
    }

    /// The session starts from whatever token the store holds.
    pub fn with_store(settings: Settings, store: Box<dyn StateStore>) -> Result<Self, AppError> {
        let state = store.load()?;
        let client = ApiClient::with_timeout(
            settings.api.base_url.as_str(),
            Session::from_state(&state),
            settings.api.request_timeout,
        )?;
        Ok(Self {
            client,
            store,
            settings,
            scope: Scope::new(),
        })
    }

    pub fn scope(&self) -> ScopeHandle {
        self.scope.handle()
    }

    pub fn rollback(&self) -> RollbackPolicy {
        RollbackPolicy::from_flag(self.settings.mutations.rollback_on_failure)
    }
}
