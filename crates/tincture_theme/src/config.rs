//! Store configuration

use crate::catalog::DEFAULT_THEME;
use crate::theme::Mode;
use crate::transition::TransitionKind;
use serde::{Deserialize, Serialize};

/// Storage key the state record lives under unless configured otherwise
pub const DEFAULT_STORAGE_KEY: &str = "theme-state";

/// Defaults and switches for a [`ThemeStore`](crate::ThemeStore)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Theme used when nothing is persisted or marked on the root
    pub default_theme: String,
    pub default_mode: Mode,
    pub default_transition: TransitionKind,
    /// Key of the persisted state record
    pub storage_key: String,
    /// When false every change takes the instant path
    pub enable_transitions: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            default_theme: DEFAULT_THEME.to_string(),
            default_mode: Mode::Light,
            default_transition: TransitionKind::Radial,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            enable_transitions: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn partial_config_fills_defaults() {
        let config: StoreConfig =
            toml::from_str("default_mode = \"dark\"\ndefault_transition = \"ripple\"").unwrap();
        assert_eq!(
            config,
            StoreConfig {
                default_mode: Mode::Dark,
                default_transition: TransitionKind::Ripple,
                ..StoreConfig::default()
            }
        );
    }

    #[test]
    fn unknown_transition_is_a_config_error() {
        assert!(toml::from_str::<StoreConfig>("default_transition = \"spin\"").is_err());
    }
}
