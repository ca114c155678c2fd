//! Capability provider
//!
//! The store never queries the host directly. Everything it needs to know
//! about the execution environment comes through [`Environment`].

use crate::geometry::Viewport;
use crate::theme::Mode;

/// Ambient preferences and capabilities of the host
pub trait Environment {
    /// User asked the system to minimise motion
    fn prefers_reduced_motion(&self) -> bool;

    /// System-wide dark color scheme preference
    fn prefers_dark(&self) -> bool;

    /// Host can capture before/after snapshots for an animated transition
    fn supports_view_transitions(&self) -> bool;

    fn viewport(&self) -> Viewport;

    /// Dark when the system asks for it, otherwise `fallback`
    fn preferred_mode(&self, fallback: Mode) -> Mode {
        if self.prefers_dark() {
            Mode::Dark
        } else {
            fallback
        }
    }
}

/// Fixed answers, set up front
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StaticEnvironment {
    pub reduced_motion: bool,
    pub prefers_dark: bool,
    pub view_transitions: bool,
    pub viewport: Viewport,
}

impl StaticEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reduced_motion(mut self, reduced_motion: bool) -> Self {
        self.reduced_motion = reduced_motion;
        self
    }

    pub fn with_prefers_dark(mut self, prefers_dark: bool) -> Self {
        self.prefers_dark = prefers_dark;
        self
    }

    pub fn with_view_transitions(mut self, supported: bool) -> Self {
        self.view_transitions = supported;
        self
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }
}

impl Default for StaticEnvironment {
    fn default() -> Self {
        Self {
            reduced_motion: false,
            prefers_dark: false,
            view_transitions: true,
            viewport: Viewport::default(),
        }
    }
}

impl Environment for StaticEnvironment {
    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    fn prefers_dark(&self) -> bool {
        self.prefers_dark
    }

    fn supports_view_transitions(&self) -> bool {
        self.view_transitions
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }
}
