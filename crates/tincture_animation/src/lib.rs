//! Tincture Animation Vocabulary
//!
//! Declarative descriptions of the visual effects played across a snapshot
//! boundary when the theme changes.
//!
//! # Features
//!
//! - **Easing**: CSS-compatible named curves, cubic beziers, and step functions
//! - **Values**: clip shapes, filter lists, and transforms that render to CSS
//! - **Keyframes**: sparse property sets that interpolate component-wise
//! - **Effect plans**: per-layer tracks that can be sampled or emitted as CSS

pub mod easing;
pub mod effect;
pub mod keyframe;
pub mod values;

pub use easing::Easing;
pub use effect::{EffectPlan, EffectTrack, SnapshotLayer};
pub use keyframe::EffectFrame;
pub use values::{ClipPath, Filter, Glow, Length, Transform};
