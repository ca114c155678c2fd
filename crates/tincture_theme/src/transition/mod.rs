//! Transition registry
//!
//! The set of transitions is closed: [`TransitionKind`] enumerates every
//! identifier and [`TransitionKind::config`] matches exhaustively, so each
//! identifier has exactly one [`TransitionConfig`] and adding a transition is
//! a compile-checked change.

mod effects;

use crate::dispatch::{CaptureHandle, TransitionSurface};
use crate::error::{ParseIdError, TransitionError};
use crate::geometry::Point;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tincture_animation::{EffectPlan, Easing};

/// Identifier of a registered transition effect
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionKind {
    #[default]
    Radial,
    RadialBlur,
    Fade,
    Morph,
    Wave,
    Glitch,
    Zoom,
    Slide,
    Rotate,
    Ripple,
    Neon,
    Matrix,
    Verci,
}

impl TransitionKind {
    /// Every transition, in menu order
    pub const ALL: [TransitionKind; 13] = [
        TransitionKind::Radial,
        TransitionKind::RadialBlur,
        TransitionKind::Fade,
        TransitionKind::Morph,
        TransitionKind::Wave,
        TransitionKind::Glitch,
        TransitionKind::Zoom,
        TransitionKind::Slide,
        TransitionKind::Rotate,
        TransitionKind::Ripple,
        TransitionKind::Neon,
        TransitionKind::Matrix,
        TransitionKind::Verci,
    ];

    /// Stable identifier used in storage and on the command line
    pub fn id(self) -> &'static str {
        match self {
            TransitionKind::Radial => "radial",
            TransitionKind::RadialBlur => "radialblur",
            TransitionKind::Fade => "fade",
            TransitionKind::Morph => "morph",
            TransitionKind::Wave => "wave",
            TransitionKind::Glitch => "glitch",
            TransitionKind::Zoom => "zoom",
            TransitionKind::Slide => "slide",
            TransitionKind::Rotate => "rotate",
            TransitionKind::Ripple => "ripple",
            TransitionKind::Neon => "neon",
            TransitionKind::Matrix => "matrix",
            TransitionKind::Verci => "verci",
        }
    }

    /// Registered configuration for this transition
    pub fn config(self) -> &'static TransitionConfig {
        match self {
            TransitionKind::Radial => &effects::RADIAL,
            TransitionKind::RadialBlur => &effects::RADIAL_BLUR,
            TransitionKind::Fade => &effects::FADE,
            TransitionKind::Morph => &effects::MORPH,
            TransitionKind::Wave => &effects::WAVE,
            TransitionKind::Glitch => &effects::GLITCH,
            TransitionKind::Zoom => &effects::ZOOM,
            TransitionKind::Slide => &effects::SLIDE,
            TransitionKind::Rotate => &effects::ROTATE,
            TransitionKind::Ripple => &effects::RIPPLE,
            TransitionKind::Neon => &effects::NEON,
            TransitionKind::Matrix => &effects::MATRIX,
            TransitionKind::Verci => &effects::VERCI,
        }
    }
}

impl fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for TransitionKind {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TransitionKind::ALL
            .into_iter()
            .find(|kind| kind.id() == s)
            .ok_or_else(|| ParseIdError::new("transition", s))
    }
}

/// Where an effect starts and how far it must reach
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EffectOrigin {
    pub point: Point,
    /// Distance to the farthest viewport corner
    pub max_radius: f32,
}

/// Builds the effect plan for an origin
pub type EffectFn = fn(&EffectOrigin) -> EffectPlan;

/// A named visual effect with its nominal timing
pub struct TransitionConfig {
    pub kind: TransitionKind,
    /// Display name
    pub name: &'static str,
    /// Nominal duration in milliseconds
    pub duration_ms: u32,
    pub easing: Easing,
    effect: EffectFn,
}

impl TransitionConfig {
    /// Look up a configuration by identifier
    pub fn lookup(id: &str) -> Option<&'static TransitionConfig> {
        id.parse::<TransitionKind>().ok().map(TransitionKind::config)
    }

    /// Describe the effect for an origin point and covering radius
    pub fn plan(&self, point: Point, max_radius: f32) -> EffectPlan {
        (self.effect)(&EffectOrigin { point, max_radius })
    }

    /// Play the effect on a surface whose capture is ready
    pub fn apply(
        &self,
        surface: &mut dyn TransitionSurface,
        capture: &dyn CaptureHandle,
        point: Point,
        max_radius: f32,
    ) -> Result<(), TransitionError> {
        let plan = self.plan(point, max_radius);
        tracing::trace!(
            "TransitionConfig::apply - {} ({} tracks, {}ms) at {point}",
            self.name,
            plan.tracks().len(),
            plan.duration_ms()
        );
        surface.play_effect(capture, self.kind, &plan)
    }
}

impl fmt::Debug for TransitionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionConfig")
            .field("kind", &self.kind)
            .field("name", &self.name)
            .field("duration_ms", &self.duration_ms)
            .field("easing", &self.easing)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_its_own_config() {
        for kind in TransitionKind::ALL {
            let config = kind.config();
            assert_eq!(config.kind, kind);
            assert!(config.duration_ms > 0);
            assert_eq!(kind.id().parse::<TransitionKind>(), Ok(kind));
        }
    }

    #[test]
    fn unknown_ids_are_rejected() {
        assert!("bogus".parse::<TransitionKind>().is_err());
        assert!("Radial".parse::<TransitionKind>().is_err());
        assert!(TransitionConfig::lookup("radial-blur").is_none());
        assert_eq!(
            TransitionConfig::lookup("radialblur").map(|c| c.name),
            Some("Radial Blur")
        );
    }

    #[test]
    fn serde_ids_match_display_ids() {
        for kind in TransitionKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.id()));
        }
    }
}
