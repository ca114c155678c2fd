//! Persisted theme state
//!
//! The state record lives under a single key in a string key-value store.
//! Reads and writes are best-effort: [`load_persisted`] and [`save_persisted`]
//! catch every [`StorageError`], log it, and carry on, because losing
//! persistence never breaks the current session.

use crate::error::StorageError;
use crate::theme::Mode;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

/// Synchronous string key-value storage
pub trait Storage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Default)]
struct MemoryInner {
    items: FxHashMap<String, String>,
    unavailable: bool,
}

/// In-memory storage.
///
/// Clones share the same backing map, so a test can keep a handle while the
/// store owns another.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    inner: Arc<RwLock<MemoryInner>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage whose every access fails, like a browser with storage disabled
    pub fn unavailable() -> Self {
        let storage = Self::default();
        storage.set_unavailable(true);
        storage
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .unavailable = unavailable;
    }

    /// Raw value under `key`, ignoring availability
    pub fn peek(&self, key: &str) -> Option<String> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .items
            .get(key)
            .cloned()
    }

    fn check(inner: &MemoryInner) -> Result<(), StorageError> {
        if inner.unavailable {
            Err(StorageError::Unavailable("memory storage disabled".into()))
        } else {
            Ok(())
        }
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        Self::check(&inner)?;
        Ok(inner.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        Self::check(&inner)?;
        inner.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        Self::check(&inner)?;
        inner.items.remove(key);
        Ok(())
    }
}

/// Directory-backed storage: one `<key>.json` file per key
#[derive(Clone, Debug)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `key`
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !key.starts_with('.');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }

    fn io_error(path: PathBuf, source: std::io::Error) -> StorageError {
        StorageError::Io { path, source }
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(Self::io_error(path, err)),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir).map_err(|e| Self::io_error(self.dir.clone(), e))?;
        fs::write(&path, value).map_err(|e| Self::io_error(path, e))
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(Self::io_error(path, err)),
        }
    }
}

/// The persisted state record.
///
/// Every field is optional on read and unknown fields are ignored, so older
/// and newer writers stay mutually readable.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_mode")]
    pub mode: Option<Mode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition: Option<String>,
}

/// An unrecognised mode string reads as absent instead of failing the record
fn lenient_mode<'de, D>(deserializer: D) -> Result<Option<Mode>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| match s.parse::<Mode>() {
        Ok(mode) => Some(mode),
        Err(err) => {
            tracing::warn!("ignoring persisted mode: {err}");
            None
        }
    }))
}

impl PersistedState {
    pub fn parse(raw: &str) -> Result<Self, StorageError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn to_json(&self) -> Result<String, StorageError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Read the record under `key`.
///
/// Returns `None` when the key is absent, the storage fails, or the record
/// does not parse; failures are logged as warnings.
pub fn load_persisted(storage: &dyn Storage, key: &str) -> Option<PersistedState> {
    let raw = match storage.get_item(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(err) => {
            tracing::warn!("failed to read persisted theme state {key:?}: {err}");
            return None;
        }
    };
    match PersistedState::parse(&raw) {
        Ok(state) => Some(state),
        Err(err) => {
            tracing::warn!("failed to parse persisted theme state {key:?}: {err}");
            None
        }
    }
}

/// Write the record under `key`, logging any failure.
///
/// Returns whether the write succeeded.
pub fn save_persisted(storage: &mut dyn Storage, key: &str, state: &PersistedState) -> bool {
    let result = state
        .to_json()
        .and_then(|json| storage.set_item(key, &json));
    match result {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!("failed to persist theme state {key:?}: {err}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn record_tolerates_missing_and_extra_fields() {
        let state =
            PersistedState::parse(r#"{"theme":"slate","accent":"red","version":3}"#).unwrap();
        assert_eq!(
            state,
            PersistedState {
                theme: Some("slate".into()),
                mode: None,
                transition: None,
            }
        );
    }

    #[test]
    fn unknown_mode_reads_as_absent() {
        let state = PersistedState::parse(r#"{"theme":"rose","mode":"sepia"}"#).unwrap();
        assert_eq!(state.mode, None);
        assert_eq!(state.theme.as_deref(), Some("rose"));
    }

    #[test]
    fn malformed_record_loads_as_none() {
        let mut storage = MemoryStorage::new();
        storage.set_item("theme-state", "{not json").unwrap();
        assert_eq!(load_persisted(&storage, "theme-state"), None);
    }

    #[test]
    fn unavailable_storage_never_panics() {
        let mut storage = MemoryStorage::unavailable();
        assert_eq!(load_persisted(&storage, "theme-state"), None);
        assert!(!save_persisted(&mut storage, "theme-state", &PersistedState::default()));
    }

    #[test]
    fn memory_handles_share_contents() {
        let storage = MemoryStorage::new();
        let mut writer = storage.clone();
        let state = PersistedState {
            theme: Some("zinc".into()),
            mode: Some(Mode::Dark),
            transition: Some("wave".into()),
        };
        assert!(save_persisted(&mut writer, "k", &state));
        assert_eq!(load_persisted(&storage, "k"), Some(state));
        assert_eq!(
            storage.peek("k").as_deref(),
            Some(r#"{"theme":"zinc","mode":"dark","transition":"wave"}"#)
        );
    }

    #[test]
    fn file_storage_round_trips_and_validates_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path().join("state"));

        assert_eq!(storage.get_item("theme-state").unwrap(), None);
        storage.set_item("theme-state", "{}").unwrap();
        assert_eq!(storage.get_item("theme-state").unwrap().as_deref(), Some("{}"));
        storage.remove_item("theme-state").unwrap();
        storage.remove_item("theme-state").unwrap();
        assert_eq!(storage.get_item("theme-state").unwrap(), None);

        assert!(matches!(
            storage.get_item("../escape"),
            Err(StorageError::InvalidKey(_))
        ));
    }
}
