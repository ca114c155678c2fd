//! One simulated page load

use crate::cli::Cli;
use crate::config::TinctureConfig;
use anyhow::Result;
use std::env;
use std::path::PathBuf;
use tincture_theme::{
    initialize, FileStorage, Initialized, MemoryRoot, RecordingSurface, StaticEnvironment,
    StoreConfig, ThemeCatalog, ThemeStore,
};

/// Default state directory, relative to the working directory
pub const DEFAULT_STATE_DIR: &str = ".tincture";

/// Effective settings: the config file with command-line overrides applied
#[derive(Debug)]
pub struct Settings {
    pub config: TinctureConfig,
    pub state_dir: PathBuf,
    pub env: StaticEnvironment,
}

impl Settings {
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let config_path = match &cli.config {
            Some(path) => path.clone(),
            None => env::current_dir()?,
        };
        let config = TinctureConfig::load_from_dir(&config_path)?;
        Ok(Self::merge(cli, config))
    }

    fn merge(cli: &Cli, config: TinctureConfig) -> Self {
        let file_env = config.environment.to_environment();
        let env = StaticEnvironment {
            reduced_motion: file_env.reduced_motion || cli.reduced_motion,
            prefers_dark: file_env.prefers_dark || cli.prefers_dark,
            view_transitions: file_env.view_transitions && !cli.no_view_transitions,
            viewport: cli.viewport.unwrap_or(file_env.viewport),
        };
        let state_dir = cli
            .state_dir
            .clone()
            .or_else(|| config.catalog.state_dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_DIR));
        Self {
            config,
            state_dir,
            env,
        }
    }
}

/// A painted root and a hydrated store, plus handles to observe them
pub struct Session {
    pub store: ThemeStore,
    pub root: MemoryRoot,
    pub surface: RecordingSurface,
    pub storage: FileStorage,
    pub initialized: Initialized,
}

impl Session {
    pub fn open(settings: &Settings) -> Result<Self> {
        let catalog = settings.config.load_catalog()?;
        Ok(Self::with_catalog(
            catalog,
            settings.config.store.clone(),
            FileStorage::new(&settings.state_dir),
            settings.env,
        ))
    }

    pub fn with_catalog(
        catalog: ThemeCatalog,
        config: StoreConfig,
        storage: FileStorage,
        env: StaticEnvironment,
    ) -> Self {
        let root = MemoryRoot::new();
        let surface = RecordingSurface::new();
        let initialized = initialize(
            &mut storage.clone(),
            &mut root.clone(),
            &env,
            &catalog,
            &config,
        );
        tracing::info!(
            "painted {} ({}) from {:?}",
            initialized.state.theme,
            initialized.state.mode,
            initialized.source
        );

        let store = ThemeStore::builder()
            .catalog(catalog)
            .config(config)
            .storage(storage.clone())
            .root(root.clone())
            .environment(env)
            .surface(surface.clone())
            .build();

        Self {
            store,
            root,
            surface,
            storage,
            initialized,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;
    use tincture_theme::{Mode, StyleRoot, Viewport};

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("tincture").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn flags_override_config_file() {
        let mut config = TinctureConfig::default();
        config.environment.view_transitions = true;
        config.catalog.state_dir = Some(PathBuf::from("from-file"));

        let settings = Settings::merge(
            &cli(&["--no-view-transitions", "--viewport", "640x480", "status"]),
            config,
        );

        assert!(!settings.env.view_transitions);
        assert_eq!(settings.env.viewport, Viewport::new(640.0, 480.0));
        assert_eq!(settings.state_dir, PathBuf::from("from-file"));
    }

    #[test]
    fn consecutive_sessions_share_state() {
        let dir = tempfile::tempdir().unwrap();
        let open = |env: StaticEnvironment| {
            Session::with_catalog(
                ThemeCatalog::builtin(),
                StoreConfig::default(),
                FileStorage::new(dir.path()),
                env,
            )
        };

        let mut first = open(StaticEnvironment::new().with_prefers_dark(true));
        assert_eq!(first.store.mode(), Mode::Dark);
        first.store.change_theme("rose", None);

        let second = open(StaticEnvironment::new());
        assert_eq!(second.store.theme(), "rose");
        assert_eq!(second.store.mode(), Mode::Dark);
        assert_eq!(second.root.classes(), vec!["rose", "dark"]);
    }
}
