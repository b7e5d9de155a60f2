//! Persisted client-side state: the admin token and recent searches.
//!
//! Everything the browser build kept in ambient local storage goes through
//! an explicit [`StateStore`] handed to whoever needs it.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::debug;

use super::error::InfraError;
use super::lock::recover;

const SOURCE: &str = "infra::store";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalState {
    pub token: Option<String>,
    pub recent_searches: Vec<String>,
}

pub trait StateStore: Send + Sync {
    fn load(&self) -> Result<LocalState, InfraError>;

    fn save(&self, state: &LocalState) -> Result<(), InfraError>;

    /// Read-modify-write helper.
    fn update(&self, apply: &mut dyn FnMut(&mut LocalState)) -> Result<LocalState, InfraError> {
        let mut state = self.load()?;
        apply(&mut state);
        self.save(&state)?;
        Ok(state)
    }
}

/// JSON file store. A missing file reads as the empty state.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateStore for FileStore {
    fn load(&self) -> Result<LocalState, InfraError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "state file absent; starting empty");
                return Ok(LocalState::default());
            }
            Err(err) => return Err(InfraError::state_io(&self.path, err)),
        };
        serde_json::from_slice(&bytes).map_err(|err| InfraError::state(&self.path, err))
    }

    /// Replaces the file atomically: a sibling temp file is written, synced
    /// and renamed over the target.
    fn save(&self, state: &LocalState) -> Result<(), InfraError> {
        let dir = match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                fs::create_dir_all(parent).map_err(|err| InfraError::state_io(parent, err))?;
                parent
            }
            None => Path::new("."),
        };
        let rendered =
            serde_json::to_vec_pretty(state).map_err(|err| InfraError::state(&self.path, err))?;

        let mut staged = NamedTempFile::new_in(dir).map_err(|err| InfraError::state_io(dir, err))?;
        staged
            .write_all(&rendered)
            .and_then(|()| staged.as_file().sync_all())
            .map_err(|err| InfraError::state_io(staged.path(), err))?;
        staged
            .persist(&self.path)
            .map_err(|err| InfraError::state_io(&self.path, err.error))?;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<LocalState>,
}

impl MemoryStore {
    pub fn new(state: LocalState) -> Self {
        Self {
            state: Mutex::new(state),
        }
    }
}

impl StateStore for MemoryStore {
    fn load(&self) -> Result<LocalState, InfraError> {
        Ok(recover(self.state.lock(), SOURCE, "load").clone())
    }

    fn save(&self, state: &LocalState) -> Result<(), InfraError> {
        *recover(self.state.lock(), SOURCE, "save") = state.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_round_trips_and_creates_parent() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::new(dir.path().join("nested").join("state.json"));

        assert_eq!(store.load().expect("empty load"), LocalState::default());

        let state = LocalState {
            token: Some("t0k".into()),
            recent_searches: vec!["dream".into()],
        };
        store.save(&state).expect("save");
        assert_eq!(store.load().expect("reload"), state);
    }

    #[test]
    fn corrupt_state_file_is_reported() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("state.json");
        fs::write(&path, b"{not json").expect("write");

        let err = FileStore::new(path).load().expect_err("corrupt file");
        assert!(matches!(err, InfraError::State { .. }));
    }

    #[test]
    fn update_applies_and_persists() {
        let store = MemoryStore::default();
        store
            .update(&mut |state| state.token = Some("abc".into()))
            .expect("update");
        assert_eq!(store.load().expect("load").token.as_deref(), Some("abc"));
    }

    #[test]
    fn save_replaces_the_file_without_leftovers() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("state.json");
        let store = FileStore::new(&path);

        store
            .save(&LocalState {
                token: Some("first".into()),
                recent_searches: vec!["a".repeat(4096)],
            })
            .expect("first save");
        let second = LocalState {
            token: None,
            recent_searches: vec!["ambient".into()],
        };
        store.save(&second).expect("second save");

        assert_eq!(store.load().expect("reload"), second);
        let entries: Vec<_> = fs::read_dir(dir.path())
            .expect("read dir")
            .map(|entry| entry.expect("entry").file_name())
            .collect();
        assert_eq!(entries, [std::ffi::OsString::from("state.json")]);
    }
}
