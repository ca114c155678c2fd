//! Tincture Theme System
//!
//! Named themes with light and dark variants, a persisted theme selection, and
//! animated transitions played across a snapshot of the page when the
//! selection changes.
//!
//! # Overview
//!
//! - **Catalog**: ordered, read-only [`Theme`]s loaded from presets, TOML, or JSON
//! - **Store**: [`ThemeStore`] owns the active [`ThemeState`] and persists it
//! - **Pre-paint**: [`initialize`] paints the root before anything mounts
//! - **Transitions**: thirteen registered effects, dispatched by [`TransitionDispatcher`]
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use tincture_theme::{initialize, MemoryRoot, MemoryStorage, Mode, StaticEnvironment,
//!     StoreConfig, ThemeCatalog, ThemeStore};
//!
//! let catalog = ThemeCatalog::builtin();
//! let config = StoreConfig::default();
//! let mut storage = MemoryStorage::new();
//! let mut root = MemoryRoot::new();
//! let env = StaticEnvironment::new().with_prefers_dark(true);
//!
//! // Before first paint
//! initialize(&mut storage, &mut root, &env, &catalog, &config);
//!
//! // Once the UI mounts
//! let mut store = ThemeStore::builder()
//!     .catalog(catalog)
//!     .config(config)
//!     .storage(storage)
//!     .root(root)
//!     .environment(env)
//!     .build();
//!
//! store.set_transition("ripple");
//! store.toggle_mode(None);
//! assert_eq!(store.mode(), Mode::Light);
//! ```
//!
//! # Host seams
//!
//! The store reaches the host only through traits, each with a headless
//! implementation in this crate:
//!
//! - [`Storage`]: [`MemoryStorage`], [`FileStorage`]
//! - [`StyleRoot`]: [`MemoryRoot`]
//! - [`Environment`]: [`StaticEnvironment`]
//! - [`TransitionSurface`]: [`RecordingSurface`]

pub mod apply;
pub mod catalog;
pub mod config;
pub mod dispatch;
pub mod environment;
mod error;
pub mod geometry;
pub mod init;
pub mod presets;
pub mod root;
pub mod state;
pub mod storage;
pub mod theme;
pub mod transition;

pub use apply::{apply_theme, css_color, DARK_CLASS};
pub use catalog::{ThemeCatalog, DEFAULT_THEME};
pub use config::{StoreConfig, DEFAULT_STORAGE_KEY};
pub use dispatch::{
    CaptureHandle, CaptureRecord, FailurePoint, InstantReason, PlayedEffect, RecordingSurface,
    TransitionDispatcher, TransitionOutcome, TransitionPhase, TransitionSurface,
};
pub use environment::{Environment, StaticEnvironment};
pub use error::{CatalogError, ParseIdError, StorageError, TransitionError};
pub use geometry::{max_effect_radius, Point, Rect, Viewport};
pub use init::{initialize, Initialized, StateSource};
pub use presets::ThemePreset;
pub use root::{CriticalProperty, MemoryRoot, StyleRoot};
pub use state::{ListenerId, ThemeState, ThemeStore, ThemeStoreBuilder};
pub use storage::{load_persisted, save_persisted, FileStorage, MemoryStorage, PersistedState, Storage};
pub use theme::{FontSet, Mode, Radius, Theme, ThemeVariant};
pub use transition::{EffectOrigin, TransitionConfig, TransitionKind};
