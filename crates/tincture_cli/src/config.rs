//! Tincture configuration file handling

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tincture_theme::{StaticEnvironment, StoreConfig, ThemeCatalog, Viewport};

/// Name of the configuration file looked up in a directory
pub const CONFIG_FILE: &str = "tincture.toml";

/// Top-level Tincture configuration (tincture.toml)
#[derive(Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct TinctureConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub environment: EnvironmentConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Host environment the CLI pretends to run in
#[derive(Debug, PartialEq, Deserialize, Serialize)]
pub struct EnvironmentConfig {
    #[serde(default)]
    pub reduced_motion: bool,
    #[serde(default)]
    pub prefers_dark: bool,
    /// Whether snapshot transitions are available
    #[serde(default = "default_true")]
    pub view_transitions: bool,
    #[serde(default = "default_width")]
    pub viewport_width: f32,
    #[serde(default = "default_height")]
    pub viewport_height: f32,
}

fn default_true() -> bool {
    true
}

fn default_width() -> f32 {
    1280.0
}

fn default_height() -> f32 {
    800.0
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            reduced_motion: false,
            prefers_dark: false,
            view_transitions: true,
            viewport_width: default_width(),
            viewport_height: default_height(),
        }
    }
}

impl EnvironmentConfig {
    pub fn to_environment(&self) -> StaticEnvironment {
        StaticEnvironment::new()
            .with_reduced_motion(self.reduced_motion)
            .with_prefers_dark(self.prefers_dark)
            .with_view_transitions(self.view_transitions)
            .with_viewport(Viewport::new(self.viewport_width, self.viewport_height))
    }
}

/// Where themes and state live
#[derive(Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// Extra TOML or JSON catalog merged over the built-in presets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Directory holding the persisted state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_dir: Option<PathBuf>,
}

impl TinctureConfig {
    /// Load configuration from a file, or from `tincture.toml` in a directory.
    ///
    /// A directory without a config file yields the defaults.
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = if path.is_file() {
            path.to_path_buf()
        } else {
            path.join(CONFIG_FILE)
        };

        if !config_path.exists() {
            tracing::debug!("no config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let mut config: TinctureConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        // Relative paths are relative to the config file
        if let Some(base) = config_path.parent() {
            config.catalog.path = config.catalog.path.map(|p| base.join(p));
            config.catalog.state_dir = config.catalog.state_dir.map(|p| base.join(p));
        }

        Ok(config)
    }

    /// Built-in presets, with the configured catalog merged over them
    pub fn load_catalog(&self) -> Result<ThemeCatalog> {
        let mut catalog = ThemeCatalog::builtin();
        let Some(path) = &self.catalog.path else {
            return Ok(catalog);
        };

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read theme catalog {}", path.display()))?;
        let extra = if path.extension().is_some_and(|ext| ext == "json") {
            ThemeCatalog::from_json_str(&content)
        } else {
            ThemeCatalog::from_toml_str(&content)
        }
        .with_context(|| format!("Failed to parse theme catalog {}", path.display()))?;

        catalog.merge(extra);
        Ok(catalog)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tincture_theme::{Mode, TransitionKind};

    #[test]
    fn missing_file_means_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            TinctureConfig::load_from_dir(dir.path()).unwrap(),
            TinctureConfig::default()
        );
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            r#"
[store]
default_mode = "dark"
default_transition = "wave"

[environment]
reduced_motion = true

[catalog]
state_dir = "state"
"#,
        )
        .unwrap();

        let config = TinctureConfig::load_from_dir(dir.path()).unwrap();
        assert_eq!(config.store.default_mode, Mode::Dark);
        assert_eq!(config.store.default_transition, TransitionKind::Wave);
        assert_eq!(config.store.storage_key, "theme-state");
        assert!(config.environment.reduced_motion);
        assert!(config.environment.view_transitions);
        assert_eq!(config.catalog.state_dir, Some(dir.path().join("state")));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "[store\n").unwrap();
        let err = TinctureConfig::load_from_dir(dir.path()).unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse"));
    }

    #[test]
    fn extra_catalog_is_merged_over_presets() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("themes.json");
        fs::write(
            &path,
            r#"[{"name": "ocean", "light": {"colors": {}}, "dark": {"colors": {}}}]"#,
        )
        .unwrap();
        let config = TinctureConfig {
            catalog: CatalogConfig {
                path: Some(path),
                state_dir: None,
            },
            ..Default::default()
        };

        let catalog = config.load_catalog().unwrap();
        assert!(catalog.contains("ocean"));
        assert!(catalog.contains("default"));
    }

    #[test]
    fn defaults_round_trip_through_toml() {
        let toml = TinctureConfig::default().to_toml().unwrap();
        let parsed: TinctureConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, TinctureConfig::default());
    }
}
