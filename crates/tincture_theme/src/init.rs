//! Pre-paint initializer
//!
//! Runs before anything mounts. It resolves the state from the persisted
//! record or the ambient dark preference and paints the root exactly as the
//! store would, so the store's later hydration has nothing left to change.

use crate::apply::{apply_theme, mark_root, write_variant};
use crate::catalog::ThemeCatalog;
use crate::config::StoreConfig;
use crate::environment::Environment;
use crate::root::StyleRoot;
use crate::state::ThemeState;
use crate::storage::{load_persisted, save_persisted, Storage};

/// Where the initializer found its state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StateSource {
    Storage,
    /// Nothing stored; mode came from the ambient preference
    Ambient,
}

/// Result of the pre-paint pass
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Initialized {
    pub state: ThemeState,
    pub source: StateSource,
    /// A fresh record was written because storage was empty
    pub persisted: bool,
}

/// Resolve the starting state and paint the root with it.
///
/// Never fails: storage and parse errors are logged and treated as an empty
/// store. A resolved theme missing from the catalog still marks the root
/// with its name, but paints the catalog's default theme.
pub fn initialize(
    storage: &mut dyn Storage,
    root: &mut dyn StyleRoot,
    env: &dyn Environment,
    catalog: &ThemeCatalog,
    config: &StoreConfig,
) -> Initialized {
    let ambient = env.preferred_mode(config.default_mode);
    let (state, source) = match load_persisted(storage, &config.storage_key) {
        Some(record) => (
            ThemeState::from_persisted(record, config, ambient),
            StateSource::Storage,
        ),
        None => {
            let state = ThemeState {
                mode: ambient,
                ..ThemeState::defaults(config)
            };
            (state, StateSource::Ambient)
        }
    };

    let persisted = source == StateSource::Ambient
        && save_persisted(storage, &config.storage_key, &state.to_persisted());

    if !apply_theme(root, catalog, &state.theme, state.mode) {
        let fallback = catalog.resolve(&config.default_theme);
        tracing::debug!(
            "initialize - theme {:?} not in catalog, painting {:?}",
            state.theme,
            fallback.name
        );
        mark_root(root, &state.theme, state.mode);
        write_variant(root, fallback.variant(state.mode), state.mode);
    }

    tracing::debug!("initialize - resolved {state:?} from {source:?}");
    Initialized {
        state,
        source,
        persisted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::StaticEnvironment;
    use crate::root::{CriticalProperty, MemoryRoot};
    use crate::storage::{MemoryStorage, PersistedState};
    use crate::theme::Mode;
    use crate::transition::TransitionKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_storage_uses_ambient_dark_and_writes_back() {
        let mut storage = MemoryStorage::new();
        let mut root = MemoryRoot::new();
        let env = StaticEnvironment::new().with_prefers_dark(true);
        let config = StoreConfig::default();

        let init = initialize(&mut storage, &mut root, &env, &ThemeCatalog::builtin(), &config);

        assert_eq!(
            init.state,
            ThemeState {
                theme: "default".into(),
                mode: Mode::Dark,
                transition: TransitionKind::Radial,
            }
        );
        assert!(init.persisted);
        assert_eq!(root.classes(), vec!["default", "dark"]);
        assert_eq!(
            PersistedState::parse(&storage.peek("theme-state").unwrap()).unwrap(),
            init.state.to_persisted()
        );
    }

    #[test]
    fn stored_record_is_not_rewritten() {
        let mut storage = MemoryStorage::new();
        storage
            .set_item("theme-state", r#"{"theme":"zinc","mode":"light","transition":"fade"}"#)
            .unwrap();
        let mut root = MemoryRoot::new();
        let env = StaticEnvironment::new().with_prefers_dark(true);

        let init = initialize(
            &mut storage,
            &mut root,
            &env,
            &ThemeCatalog::builtin(),
            &StoreConfig::default(),
        );

        assert_eq!(init.source, StateSource::Storage);
        assert!(!init.persisted);
        assert_eq!(init.state.mode, Mode::Light);
        assert_eq!(root.classes(), vec!["zinc"]);
    }

    #[test]
    fn stored_record_without_mode_follows_ambient_preference() {
        let mut storage = MemoryStorage::new();
        storage
            .set_item("theme-state", r#"{"theme":"rose","mode":"sepia"}"#)
            .unwrap();
        let mut root = MemoryRoot::new();
        let env = StaticEnvironment::new().with_prefers_dark(true);

        let init = initialize(
            &mut storage,
            &mut root,
            &env,
            &ThemeCatalog::builtin(),
            &StoreConfig::default(),
        );

        assert_eq!(init.source, StateSource::Storage);
        assert_eq!(init.state.mode, Mode::Dark);
        assert_eq!(root.classes(), vec!["rose", "dark"]);
    }

    #[test]
    fn unknown_stored_theme_paints_default_variant() {
        let mut storage = MemoryStorage::new();
        storage
            .set_item("theme-state", r#"{"theme":"ocean","mode":"dark"}"#)
            .unwrap();
        let mut root = MemoryRoot::new();
        let catalog = ThemeCatalog::builtin();

        initialize(
            &mut storage,
            &mut root,
            &StaticEnvironment::new(),
            &catalog,
            &StoreConfig::default(),
        );

        assert_eq!(root.classes(), vec!["ocean", "dark"]);
        let default_bg = catalog
            .get("default")
            .and_then(|t| t.dark.color("background"))
            .map(crate::apply::css_color);
        assert_eq!(root.critical(CriticalProperty::Background), default_bg);
    }

    #[test]
    fn broken_storage_still_paints() {
        let mut storage = MemoryStorage::unavailable();
        let mut root = MemoryRoot::new();

        let init = initialize(
            &mut storage,
            &mut root,
            &StaticEnvironment::new(),
            &ThemeCatalog::builtin(),
            &StoreConfig::default(),
        );

        assert!(!init.persisted);
        assert_eq!(init.state, ThemeState::defaults(&StoreConfig::default()));
        assert_eq!(root.classes(), vec!["default"]);
        assert!(root.critical(CriticalProperty::Foreground).is_some());
    }
}
