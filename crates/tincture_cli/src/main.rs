//! Tincture CLI
//!
//! A headless front-end for the theme store. Each run paints a fresh root
//! from the persisted state, applies one command, and writes any change back,
//! so consecutive runs behave like reloads of the same page.

mod cli;
mod config;
mod render;
mod session;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command, PageCommand};
use session::{Session, Settings};
use tincture_theme::{max_effect_radius, Storage};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let settings = Settings::resolve(&cli)?;
    tracing::debug!("settings: {settings:?}");
    run(cli.command, &settings)
}

/// `RUST_LOG` wins over `-v` when set
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Command, settings: &Settings) -> Result<()> {
    match command {
        Command::Config => print!("{}", settings.config.to_toml()?),
        Command::Preview {
            id,
            origin,
            frames,
            css,
            at,
        } => {
            let viewport = settings.env.viewport;
            let origin = origin.unwrap_or_else(|| viewport.center());
            let plan = id.config().plan(origin, max_effect_radius(origin, viewport));
            if css {
                print!("{}", plan.to_css(&format!("tincture-{id}")));
            } else if let Some(elapsed_ms) = at {
                print!("{}", render::snapshot_at(&plan, elapsed_ms, viewport));
            } else {
                print!("{}", render::preview(id, &plan, frames));
            }
        }
        Command::Page(command) => run_page(command, Session::open(settings)?)?,
    }
    Ok(())
}

fn run_page(command: PageCommand, mut session: Session) -> Result<()> {
    let store = &mut session.store;

    match command {
        PageCommand::Status => {
            print!(
                "{}",
                render::status(store.state(), store.catalog(), &session.initialized)
            );
        }
        PageCommand::Themes => print!("{}", render::themes(store.catalog(), store.theme())),
        PageCommand::Transitions => print!("{}", render::transitions(store.transition())),
        PageCommand::Theme { name, origin } => {
            if !store.catalog().contains(&name) {
                tracing::warn!("theme {name:?} is not in the catalog; the page keeps its colors");
            }
            let outcome = store.change_theme(&name, origin);
            print!(
                "{}",
                render::outcome(&outcome, session.surface.last_played().as_ref())
            );
        }
        PageCommand::Mode { mode, origin } => {
            let outcome = store.change_mode(mode, origin);
            print!(
                "{}",
                render::outcome(&outcome, session.surface.last_played().as_ref())
            );
        }
        PageCommand::Toggle { origin } => {
            let outcome = store.toggle_mode(origin);
            println!("mode: {}", store.mode());
            print!(
                "{}",
                render::outcome(&outcome, session.surface.last_played().as_ref())
            );
        }
        PageCommand::Transition { id } => {
            if !store.set_transition(&id) {
                anyhow::bail!("Unknown transition {id:?}. Run `tincture transitions` to list them.");
            }
            println!("transition: {}", store.transition());
        }
        PageCommand::Css => print!("{}", session.root.to_css()),
        PageCommand::Reset => {
            let key = &store.config().storage_key;
            session
                .storage
                .remove_item(key)
                .with_context(|| format!("Failed to remove {key:?}"))?;
            println!("forgot stored theme state in {}", session.storage.dir().display());
        }
    }
    Ok(())
}
