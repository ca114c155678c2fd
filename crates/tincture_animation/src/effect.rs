//! Snapshot effect tracks and plans
//!
//! An [`EffectPlan`] describes how the "before" and "after" snapshots of a
//! state change are animated against each other. Each [`EffectTrack`] targets
//! one snapshot layer with evenly spaced keyframes and a single timing curve
//! applied across the whole track.

use crate::easing::Easing;
use crate::keyframe::EffectFrame;
use smallvec::SmallVec;
use std::fmt::Write as _;

/// The snapshot a track animates
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SnapshotLayer {
    /// Capture of the state before the change
    Old,
    /// Live rendering of the state after the change
    New,
}

impl SnapshotLayer {
    /// CSS pseudo-element selecting this layer
    pub fn pseudo_element(self) -> &'static str {
        match self {
            SnapshotLayer::Old => "::view-transition-old(root)",
            SnapshotLayer::New => "::view-transition-new(root)",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SnapshotLayer::Old => "old",
            SnapshotLayer::New => "new",
        }
    }
}

/// A keyframe sequence played on one snapshot layer
#[derive(Clone, Debug, PartialEq)]
pub struct EffectTrack {
    pub layer: SnapshotLayer,
    pub duration_ms: u32,
    pub easing: Easing,
    frames: SmallVec<[EffectFrame; 3]>,
}

impl EffectTrack {
    pub fn new(layer: SnapshotLayer, duration_ms: u32, easing: Easing) -> Self {
        Self {
            layer,
            duration_ms,
            easing,
            frames: SmallVec::new(),
        }
    }

    /// Append a keyframe (builder pattern). Frames are spread evenly over the track.
    pub fn frame(mut self, frame: EffectFrame) -> Self {
        self.frames.push(frame);
        self
    }

    /// Append several keyframes at once
    pub fn frames(mut self, frames: impl IntoIterator<Item = EffectFrame>) -> Self {
        self.frames.extend(frames);
        self
    }

    /// Get the keyframes
    pub fn keyframes(&self) -> &[EffectFrame] {
        &self.frames
    }

    /// Offset (0.0 to 1.0) of each keyframe
    pub fn offsets(&self) -> Vec<f32> {
        match self.frames.len() {
            0 => Vec::new(),
            1 => vec![1.0],
            n => (0..n).map(|i| i as f32 / (n - 1) as f32).collect(),
        }
    }

    /// Interpolated properties at a linear progress value (0.0 to 1.0)
    pub fn sample(&self, progress: f32) -> EffectFrame {
        let Some(first) = self.frames.first() else {
            return EffectFrame::default();
        };
        if self.frames.len() == 1 {
            return first.clone();
        }

        let eased = self.easing.apply(progress.clamp(0.0, 1.0));
        let segments = (self.frames.len() - 1) as f32;
        let position = (eased * segments).clamp(0.0, segments);
        let index = (position.floor() as usize).min(self.frames.len() - 2);
        let local = position - index as f32;

        self.frames[index].lerp(&self.frames[index + 1], local)
    }

    /// Properties at a point in time (milliseconds since the track started)
    pub fn sample_at(&self, elapsed_ms: f32) -> EffectFrame {
        if self.duration_ms == 0 {
            return self.sample(1.0);
        }
        self.sample(elapsed_ms / self.duration_ms as f32)
    }

    /// Render as a CSS `@keyframes` block plus the rule that plays it
    pub fn to_css(&self, name: &str) -> String {
        let mut css = String::new();
        let _ = writeln!(css, "@keyframes {name} {{");
        for (offset, frame) in self.offsets().into_iter().zip(self.frames.iter()) {
            let declarations = frame
                .css_declarations()
                .into_iter()
                .map(|(property, value)| format!("{property}: {value};"))
                .collect::<Vec<_>>()
                .join(" ");
            let _ = writeln!(css, "  {}% {{ {declarations} }}", (offset * 100.0).round());
        }
        css.push_str("}\n");
        let _ = writeln!(
            css,
            "{} {{ animation: {name} {}ms {}; }}",
            self.layer.pseudo_element(),
            self.duration_ms,
            self.easing.to_css()
        );
        css
    }
}

/// The full set of tracks one transition plays
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EffectPlan {
    tracks: Vec<EffectTrack>,
}

impl EffectPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a track (builder pattern)
    pub fn track(mut self, track: EffectTrack) -> Self {
        self.tracks.push(track);
        self
    }

    pub fn tracks(&self) -> &[EffectTrack] {
        &self.tracks
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Wall-clock length of the plan (longest track)
    pub fn duration_ms(&self) -> u32 {
        self.tracks
            .iter()
            .map(|t| t.duration_ms)
            .max()
            .unwrap_or(0)
    }

    /// Sample every track at a time offset, one entry per track.
    ///
    /// Tracks shorter than `elapsed_ms` report their final frame.
    pub fn sample_at(&self, elapsed_ms: f32) -> Vec<(SnapshotLayer, EffectFrame)> {
        self.tracks
            .iter()
            .map(|t| (t.layer, t.sample_at(elapsed_ms)))
            .collect()
    }

    /// Render every track as CSS, naming keyframes `<prefix>-<layer>-<index>`
    pub fn to_css(&self, prefix: &str) -> String {
        self.tracks
            .iter()
            .enumerate()
            .map(|(i, track)| track.to_css(&format!("{prefix}-{}-{i}", track.layer.as_str())))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::{ClipPath, Length};
    use pretty_assertions::assert_eq;

    fn grow(radius: f32) -> EffectTrack {
        EffectTrack::new(SnapshotLayer::New, 300, Easing::Linear)
            .frame(EffectFrame::new().with_clip(ClipPath::circle(Length::Px(0.0), 10.0, 20.0)))
            .frame(EffectFrame::new().with_clip(ClipPath::circle(Length::Px(radius), 10.0, 20.0)))
    }

    #[test]
    fn test_offsets_are_evenly_spaced() {
        let track = EffectTrack::new(SnapshotLayer::Old, 100, Easing::Linear).frames([
            EffectFrame::new().with_opacity(1.0),
            EffectFrame::new().with_opacity(0.5),
            EffectFrame::new().with_opacity(1.0),
        ]);
        assert_eq!(track.offsets(), vec![0.0, 0.5, 1.0]);
        assert_eq!(track.sample(0.5).resolved_opacity(), 0.5);
        assert_eq!(track.sample(0.75).resolved_opacity(), 0.75);
    }

    #[test]
    fn test_sample_clamps_out_of_range_progress() {
        let track = grow(100.0);
        assert_eq!(track.sample(-1.0), track.keyframes()[0]);
        assert_eq!(track.sample(2.0), track.keyframes()[1]);
    }

    #[test]
    fn test_sample_at_uses_duration() {
        let track = grow(100.0);
        let frame = track.sample_at(150.0);
        assert_eq!(
            frame.clip,
            Some(ClipPath::circle(Length::Px(50.0), 10.0, 20.0))
        );
    }

    #[test]
    fn test_plan_duration_is_longest_track() {
        let plan = EffectPlan::new()
            .track(EffectTrack::new(SnapshotLayer::Old, 300, Easing::EaseIn))
            .track(EffectTrack::new(SnapshotLayer::New, 700, Easing::STANDARD));
        assert_eq!(plan.duration_ms(), 700);
    }

    #[test]
    fn test_track_css() {
        let css = grow(890.0).to_css("demo");
        assert_eq!(
            css,
            "@keyframes demo {\n  0% { clip-path: circle(0px at 10px 20px); }\n  100% { clip-path: circle(890px at 10px 20px); }\n}\n::view-transition-new(root) { animation: demo 300ms linear; }\n"
        );
    }
}
