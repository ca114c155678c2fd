use std::path::PathBuf;

use thiserror::Error;

/// Failure to read or write the persisted state record.
///
/// These never escape the store: every read and write site logs them and
/// falls back to defaults.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage is unavailable: {0}")]
    Unavailable(String),

    #[error("storage I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid storage key {0:?}")]
    InvalidKey(String),

    #[error("malformed persisted state: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Failure to build a theme catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("theme catalog is empty")]
    Empty,

    #[error("duplicate theme name {0:?}")]
    DuplicateTheme(String),

    #[error("theme name must not be empty")]
    UnnamedTheme,

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Failure inside the transition capture or effect machinery.
///
/// A transition error never undoes a committed state change; the change is
/// simply shown without the visual effect.
#[derive(Debug, Error)]
pub enum TransitionError {
    #[error("snapshot capture is not supported by this surface")]
    Unsupported,

    #[error("snapshot capture was aborted: {0}")]
    Aborted(String),

    #[error("effect playback failed: {0}")]
    Playback(String),
}

/// An identifier string did not name a known mode or transition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} {value:?}")]
pub struct ParseIdError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseIdError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
