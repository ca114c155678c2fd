//! Command-line arguments

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use tincture_theme::{Mode, Point, TransitionKind, Viewport};

/// Pick themes, toggle light/dark mode, and preview theme transitions.
///
/// Every invocation behaves like one page load: the stored state is painted
/// before the command runs, and any change is written back.
#[derive(Parser, Debug)]
#[command(name = "tincture")]
#[command(about = "Theme switcher with animated transitions")]
#[command(version)]
pub struct Cli {
    /// Config file, or a directory containing tincture.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the persisted theme state
    #[arg(long, global = true)]
    pub state_dir: Option<PathBuf>,

    /// Behave as if the user asked for reduced motion
    #[arg(long, global = true)]
    pub reduced_motion: bool,

    /// Behave as if snapshot transitions are unavailable
    #[arg(long, global = true)]
    pub no_view_transitions: bool,

    /// Behave as if the system prefers a dark color scheme
    #[arg(long, global = true)]
    pub prefers_dark: bool,

    /// Viewport size as WIDTHxHEIGHT
    #[arg(long, global = true, value_name = "WxH")]
    pub viewport: Option<Viewport>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show how a transition plays
    Preview {
        id: TransitionKind,
        /// Defaults to the centre of the viewport
        #[arg(long, value_name = "X,Y")]
        origin: Option<Point>,
        /// Number of evenly spaced samples per track
        #[arg(long, default_value_t = 5)]
        frames: u32,
        /// Print the CSS keyframes instead of samples
        #[arg(long, conflicts_with = "at")]
        css: bool,
        /// Show every layer at this many milliseconds into the effect
        #[arg(long, value_name = "MS")]
        at: Option<f32>,
    },

    /// Print the effective configuration as TOML
    Config,

    #[command(flatten)]
    Page(PageCommand),
}

/// Commands that run against a painted page
#[derive(Subcommand, Debug)]
pub enum PageCommand {
    /// Show the active theme, mode, and transition
    Status,

    /// List the available themes
    Themes,

    /// List the registered transitions
    Transitions,

    /// Switch to a theme
    Theme {
        name: String,
        /// Pointer position the effect starts from, as X,Y
        #[arg(long, value_name = "X,Y")]
        origin: Option<Point>,
    },

    /// Switch to light or dark mode
    Mode {
        mode: Mode,
        #[arg(long, value_name = "X,Y")]
        origin: Option<Point>,
    },

    /// Flip between light and dark mode
    Toggle {
        /// Defaults to the centre of the viewport
        #[arg(long, value_name = "X,Y")]
        origin: Option<Point>,
    },

    /// Select the transition played on later changes
    Transition { id: String },

    /// Print the root's style variables as CSS
    Css,

    /// Forget the persisted state
    Reset,
}
