//! Theme state store
//!
//! [`ThemeStore`] owns the active [`ThemeState`] and is its only writer.
//! Every committed change is persisted, re-applied to the root, and then
//! announced to subscribers. The store is an ordinary value: build one per
//! page (or per test) with [`ThemeStore::builder`] and pass it around.

use crate::apply::{apply_theme, DARK_CLASS};
use crate::catalog::ThemeCatalog;
use crate::config::StoreConfig;
use crate::dispatch::{
    RecordingSurface, TransitionDispatcher, TransitionOutcome, TransitionRequest,
    TransitionSurface, TransitionTarget,
};
use crate::environment::{Environment, StaticEnvironment};
use crate::geometry::{Point, Rect};
use crate::root::{MemoryRoot, StyleRoot};
use crate::storage::{load_persisted, save_persisted, MemoryStorage, PersistedState, Storage};
use crate::theme::Mode;
use crate::transition::TransitionKind;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// The active selection: theme, mode, and transition
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ThemeState {
    pub theme: String,
    pub mode: Mode,
    pub transition: TransitionKind,
}

impl ThemeState {
    /// State used when nothing else is known
    pub fn defaults(config: &StoreConfig) -> Self {
        Self {
            theme: config.default_theme.clone(),
            mode: config.default_mode,
            transition: config.default_transition,
        }
    }

    /// Adopt a persisted record, filling gaps from `config`.
    ///
    /// The theme name is taken verbatim. A missing or unreadable mode becomes
    /// `ambient`. A transition id that is no longer registered falls back to
    /// the configured default.
    pub fn from_persisted(record: PersistedState, config: &StoreConfig, ambient: Mode) -> Self {
        let transition = match record.transition {
            Some(id) => id.parse().unwrap_or_else(|err| {
                tracing::warn!("ignoring persisted transition: {err}");
                config.default_transition
            }),
            None => config.default_transition,
        };
        Self {
            theme: record.theme.unwrap_or_else(|| config.default_theme.clone()),
            mode: record.mode.unwrap_or(ambient),
            transition,
        }
    }

    pub fn to_persisted(&self) -> PersistedState {
        PersistedState {
            theme: Some(self.theme.clone()),
            mode: Some(self.mode),
            transition: Some(self.transition.id().to_string()),
        }
    }
}

/// Handle returned by [`ThemeStore::subscribe`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&ThemeState)>;

/// Everything a commit touches
struct StoreCore {
    catalog: Arc<ThemeCatalog>,
    config: StoreConfig,
    storage: Box<dyn Storage>,
    root: Box<dyn StyleRoot>,
    state: ThemeState,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
}

impl StoreCore {
    fn commit(&mut self, next: ThemeState) {
        if next == self.state {
            return;
        }
        tracing::debug!("ThemeStore - {:?} -> {:?}", self.state, next);
        let visual_change = next.theme != self.state.theme || next.mode != self.state.mode;
        self.state = next;

        save_persisted(
            self.storage.as_mut(),
            &self.config.storage_key,
            &self.state.to_persisted(),
        );
        if visual_change {
            apply_theme(
                self.root.as_mut(),
                &self.catalog,
                &self.state.theme,
                self.state.mode,
            );
        }
        for (_, listener) in &mut self.listeners {
            listener(&self.state);
        }
    }

    fn set_theme(&mut self, theme: &str) {
        let next = ThemeState {
            theme: theme.to_string(),
            ..self.state.clone()
        };
        self.commit(next);
    }

    fn set_mode(&mut self, mode: Mode) {
        let next = ThemeState {
            mode,
            ..self.state.clone()
        };
        self.commit(next);
    }
}

impl TransitionTarget for StoreCore {
    fn root_mut(&mut self) -> &mut dyn StyleRoot {
        self.root.as_mut()
    }
}

/// Owner of the active theme state
pub struct ThemeStore {
    core: StoreCore,
    dispatcher: TransitionDispatcher,
    env: Box<dyn Environment>,
}

impl ThemeStore {
    pub fn builder() -> ThemeStoreBuilder {
        ThemeStoreBuilder::default()
    }

    /// Current state
    pub fn state(&self) -> &ThemeState {
        &self.core.state
    }

    pub fn theme(&self) -> &str {
        &self.core.state.theme
    }

    pub fn mode(&self) -> Mode {
        self.core.state.mode
    }

    pub fn transition(&self) -> TransitionKind {
        self.core.state.transition
    }

    pub fn catalog(&self) -> &ThemeCatalog {
        &self.core.catalog
    }

    pub fn config(&self) -> &StoreConfig {
        &self.core.config
    }

    pub fn root(&self) -> &dyn StyleRoot {
        self.core.root.as_ref()
    }

    pub fn environment(&self) -> &dyn Environment {
        self.env.as_ref()
    }

    pub fn dispatcher(&self) -> &TransitionDispatcher {
        &self.dispatcher
    }

    /// Switch theme instantly.
    ///
    /// The name is not validated; a theme missing from the catalog leaves
    /// the root as it was.
    pub fn set_theme(&mut self, theme: &str) {
        self.core.set_theme(theme);
    }

    /// Switch mode instantly
    pub fn set_mode(&mut self, mode: Mode) {
        self.core.set_mode(mode);
    }

    /// Select the transition played on later changes.
    ///
    /// Unknown ids are ignored and the current transition is kept. Returns
    /// whether `id` was accepted.
    pub fn set_transition(&mut self, id: &str) -> bool {
        match id.parse::<TransitionKind>() {
            Ok(kind) => {
                self.set_transition_kind(kind);
                true
            }
            Err(err) => {
                tracing::debug!("ThemeStore::set_transition - {err}, keeping {}", self.transition());
                false
            }
        }
    }

    pub fn set_transition_kind(&mut self, kind: TransitionKind) {
        let next = ThemeState {
            transition: kind,
            ..self.core.state.clone()
        };
        self.core.commit(next);
    }

    /// Switch theme, animated from `origin` when possible
    pub fn change_theme(&mut self, theme: &str, origin: Option<Point>) -> TransitionOutcome {
        let theme = theme.to_string();
        self.transitioned(origin, move |core| core.set_theme(&theme))
    }

    /// Switch mode, animated from `origin` when possible
    pub fn change_mode(&mut self, mode: Mode, origin: Option<Point>) -> TransitionOutcome {
        self.transitioned(origin, move |core| core.set_mode(mode))
    }

    /// Flip between light and dark.
    ///
    /// Without an origin the effect starts from the centre of the viewport.
    pub fn toggle_mode(&mut self, origin: Option<Point>) -> TransitionOutcome {
        let origin = origin.unwrap_or_else(|| self.env.viewport().center());
        self.change_mode(self.mode().toggle(), Some(origin))
    }

    /// [`toggle_mode`](Self::toggle_mode) from the centre of the control that
    /// was activated
    pub fn toggle_mode_from(&mut self, control: Rect) -> TransitionOutcome {
        self.toggle_mode(Some(control.center()))
    }

    /// Register a callback run after every committed change
    pub fn subscribe(&mut self, listener: impl FnMut(&ThemeState) + 'static) -> ListenerId {
        self.core.next_listener += 1;
        let id = ListenerId(self.core.next_listener);
        self.core.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.core.listeners.len();
        self.core.listeners.retain(|(listener, _)| *listener != id);
        self.core.listeners.len() != before
    }

    fn transitioned(
        &mut self,
        origin: Option<Point>,
        commit: impl FnOnce(&mut StoreCore),
    ) -> TransitionOutcome {
        let request = TransitionRequest {
            kind: self.core.state.transition,
            origin,
            enabled: self.core.config.enable_transitions,
        };
        self.dispatcher
            .run(&mut self.core, self.env.as_ref(), request, commit)
    }
}

impl std::fmt::Debug for ThemeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeStore")
            .field("state", &self.core.state)
            .field("config", &self.core.config)
            .field("dispatcher", &self.dispatcher)
            .finish_non_exhaustive()
    }
}

/// Builder for [`ThemeStore`].
///
/// Every collaborator defaults to its headless implementation.
#[derive(Default)]
pub struct ThemeStoreBuilder {
    catalog: Option<Arc<ThemeCatalog>>,
    config: StoreConfig,
    storage: Option<Box<dyn Storage>>,
    root: Option<Box<dyn StyleRoot>>,
    env: Option<Box<dyn Environment>>,
    surface: Option<Box<dyn TransitionSurface>>,
}

impl ThemeStoreBuilder {
    pub fn catalog(mut self, catalog: impl Into<Arc<ThemeCatalog>>) -> Self {
        self.catalog = Some(catalog.into());
        self
    }

    pub fn config(mut self, config: StoreConfig) -> Self {
        self.config = config;
        self
    }

    pub fn storage(mut self, storage: impl Storage + 'static) -> Self {
        self.storage = Some(Box::new(storage));
        self
    }

    pub fn root(mut self, root: impl StyleRoot + 'static) -> Self {
        self.root = Some(Box::new(root));
        self
    }

    pub fn environment(mut self, env: impl Environment + 'static) -> Self {
        self.env = Some(Box::new(env));
        self
    }

    pub fn surface(mut self, surface: impl TransitionSurface + 'static) -> Self {
        self.surface = Some(Box::new(surface));
        self
    }

    /// Hydrate and build the store.
    ///
    /// State comes from storage when a record parses, otherwise from the
    /// markers already on the root, otherwise from the configured defaults.
    /// The hydrated state is then applied to the root, which is a no-op when
    /// the pre-paint initializer already painted it.
    pub fn build(self) -> ThemeStore {
        let catalog = self
            .catalog
            .unwrap_or_else(|| Arc::new(ThemeCatalog::builtin()));
        let storage = self
            .storage
            .unwrap_or_else(|| Box::new(MemoryStorage::new()));
        let mut root = self.root.unwrap_or_else(|| Box::new(MemoryRoot::new()));
        let env = self
            .env
            .unwrap_or_else(|| Box::new(StaticEnvironment::new()));
        let surface = self
            .surface
            .unwrap_or_else(|| Box::new(RecordingSurface::new()));
        let config = self.config;

        let state = match load_persisted(storage.as_ref(), &config.storage_key) {
            Some(record) => {
                let ambient = env.preferred_mode(config.default_mode);
                ThemeState::from_persisted(record, &config, ambient)
            }
            None => from_root_markers(root.as_ref(), &catalog, &config),
        };
        tracing::debug!("ThemeStore::build - hydrated {state:?}");
        apply_theme(root.as_mut(), &catalog, &state.theme, state.mode);

        ThemeStore {
            core: StoreCore {
                catalog,
                config,
                storage,
                root,
                state,
                listeners: Vec::new(),
                next_listener: 0,
            },
            dispatcher: TransitionDispatcher::new(surface),
            env,
        }
    }
}

/// Infer theme and mode from classes a previous paint left on the root
fn from_root_markers(root: &dyn StyleRoot, catalog: &ThemeCatalog, config: &StoreConfig) -> ThemeState {
    let defaults = ThemeState::defaults(config);
    let theme = catalog.names().find(|name| root.has_class(name));
    let dark = root.has_class(DARK_CLASS);
    match (theme, dark) {
        (None, false) => defaults,
        (theme, dark) => ThemeState {
            theme: theme.map_or(defaults.theme, str::to_string),
            mode: if dark { Mode::Dark } else { Mode::Light },
            transition: defaults.transition,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn defaults_without_storage_or_markers() {
        let store = ThemeStore::builder().build();
        assert_eq!(store.state(), &ThemeState::defaults(&StoreConfig::default()));
        assert_eq!(store.root().classes(), vec!["default"]);
    }

    #[test]
    fn hydrates_from_root_markers_when_storage_is_empty() {
        let mut root = MemoryRoot::new();
        root.add_class("rose");
        root.add_class("dark");

        let store = ThemeStore::builder().root(root).build();
        assert_eq!(store.theme(), "rose");
        assert_eq!(store.mode(), Mode::Dark);
        assert_eq!(store.transition(), TransitionKind::Radial);
    }

    #[test]
    fn record_fills_missing_fields_from_config_and_ambient_mode() {
        let config = StoreConfig {
            default_transition: TransitionKind::Neon,
            ..StoreConfig::default()
        };
        let record = PersistedState {
            theme: Some("slate".into()),
            mode: None,
            transition: Some("teleport".into()),
        };
        assert_eq!(
            ThemeState::from_persisted(record, &config, Mode::Dark),
            ThemeState {
                theme: "slate".into(),
                mode: Mode::Dark,
                transition: TransitionKind::Neon,
            }
        );
    }

    #[test]
    fn listeners_see_each_committed_change_once() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut store = ThemeStore::builder().build();
        let sink = Rc::clone(&seen);
        let id = store.subscribe(move |state| sink.borrow_mut().push(state.mode));

        store.set_mode(Mode::Dark);
        store.set_mode(Mode::Dark);
        assert!(store.unsubscribe(id));
        store.set_mode(Mode::Light);

        assert_eq!(*seen.borrow(), vec![Mode::Dark]);
    }

    #[test]
    fn rejected_transition_changes_nothing() {
        let storage = MemoryStorage::new();
        let mut store = ThemeStore::builder().storage(storage.clone()).build();
        assert!(store.set_transition("wave"));
        let stored = storage.peek("theme-state");

        assert!(!store.set_transition("bogus"));
        assert_eq!(store.transition(), TransitionKind::Wave);
        assert_eq!(storage.peek("theme-state"), stored);
    }

    #[test]
    fn toggle_defaults_origin_to_viewport_centre() {
        let surface = RecordingSurface::new();
        let mut store = ThemeStore::builder().surface(surface.clone()).build();

        let outcome = store.toggle_mode(None);

        assert_eq!(store.mode(), Mode::Dark);
        match outcome {
            TransitionOutcome::Animated { origin, .. } => {
                assert_eq!(origin, store.environment().viewport().center());
            }
            other => panic!("expected an animated toggle, got {other:?}"),
        }
        assert_eq!(surface.played().len(), 1);
    }
}
