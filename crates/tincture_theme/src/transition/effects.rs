//! The thirteen registered effects
//!
//! Every effect is a pure function of its origin. Tracks on the new layer
//! reveal the post-change snapshot; tracks on the old layer distort the
//! pre-change snapshot underneath it.

use super::{EffectOrigin, TransitionConfig, TransitionKind};
use tincture_animation::{ClipPath, Easing, EffectFrame, EffectPlan, EffectTrack, Length, SnapshotLayer};

const FULL: [(f32, f32); 4] = [(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 100.0)];
const TOP_EDGE: [(f32, f32); 4] = [(0.0, 0.0), (100.0, 0.0), (100.0, 0.0), (0.0, 0.0)];
const CENTER_POINT: [(f32, f32); 4] = [(50.0, 50.0); 4];

pub(super) static RADIAL: TransitionConfig = TransitionConfig {
    kind: TransitionKind::Radial,
    name: "Radial",
    duration_ms: 300,
    easing: Easing::EaseInOut,
    effect: radial,
};

pub(super) static RADIAL_BLUR: TransitionConfig = TransitionConfig {
    kind: TransitionKind::RadialBlur,
    name: "Radial Blur",
    duration_ms: 600,
    easing: Easing::EaseInOut,
    effect: radial_blur,
};

pub(super) static FADE: TransitionConfig = TransitionConfig {
    kind: TransitionKind::Fade,
    name: "Fade",
    duration_ms: 200,
    easing: Easing::EaseInOut,
    effect: fade,
};

pub(super) static MORPH: TransitionConfig = TransitionConfig {
    kind: TransitionKind::Morph,
    name: "Morph",
    duration_ms: 800,
    easing: Easing::STANDARD,
    effect: morph,
};

pub(super) static WAVE: TransitionConfig = TransitionConfig {
    kind: TransitionKind::Wave,
    name: "Wave",
    duration_ms: 1200,
    easing: Easing::STANDARD,
    effect: wave,
};

pub(super) static GLITCH: TransitionConfig = TransitionConfig {
    kind: TransitionKind::Glitch,
    name: "Glitch",
    duration_ms: 600,
    easing: Easing::Steps(6),
    effect: glitch,
};

pub(super) static ZOOM: TransitionConfig = TransitionConfig {
    kind: TransitionKind::Zoom,
    name: "Zoom",
    duration_ms: 700,
    easing: Easing::STANDARD,
    effect: zoom,
};

pub(super) static SLIDE: TransitionConfig = TransitionConfig {
    kind: TransitionKind::Slide,
    name: "Slide",
    duration_ms: 500,
    easing: Easing::STANDARD,
    effect: slide,
};

pub(super) static ROTATE: TransitionConfig = TransitionConfig {
    kind: TransitionKind::Rotate,
    name: "Rotate",
    duration_ms: 800,
    easing: Easing::STANDARD,
    effect: rotate,
};

pub(super) static RIPPLE: TransitionConfig = TransitionConfig {
    kind: TransitionKind::Ripple,
    name: "Ripple",
    duration_ms: 900,
    easing: Easing::STANDARD,
    effect: ripple,
};

pub(super) static NEON: TransitionConfig = TransitionConfig {
    kind: TransitionKind::Neon,
    name: "Neon",
    duration_ms: 600,
    easing: Easing::STANDARD,
    effect: neon,
};

pub(super) static MATRIX: TransitionConfig = TransitionConfig {
    kind: TransitionKind::Matrix,
    name: "Matrix",
    duration_ms: 500,
    easing: Easing::STANDARD,
    effect: matrix,
};

pub(super) static VERCI: TransitionConfig = TransitionConfig {
    kind: TransitionKind::Verci,
    name: "Verci",
    duration_ms: 1000,
    easing: Easing::STANDARD,
    effect: verci,
};

fn circle_at(origin: &EffectOrigin, radius: Length) -> ClipPath {
    ClipPath::circle(radius, origin.point.x, origin.point.y)
}

fn new_layer(duration_ms: u32, easing: Easing) -> EffectTrack {
    EffectTrack::new(SnapshotLayer::New, duration_ms, easing)
}

fn old_layer(duration_ms: u32, easing: Easing) -> EffectTrack {
    EffectTrack::new(SnapshotLayer::Old, duration_ms, easing)
}

/// Circle growing from the origin until it covers the viewport
fn radial(origin: &EffectOrigin) -> EffectPlan {
    EffectPlan::new().track(
        new_layer(300, Easing::EaseInOut)
            .frame(EffectFrame::new().with_clip(circle_at(origin, Length::Px(0.0))))
            .frame(EffectFrame::new().with_clip(circle_at(origin, Length::Px(origin.max_radius)))),
    )
}

/// Old view blurs out while a sharpening circle reveals the new one
fn radial_blur(origin: &EffectOrigin) -> EffectPlan {
    let sharp = EffectFrame::new()
        .with_blur(0.0)
        .with_brightness(1.0)
        .with_scale(1.0);
    let hazy = EffectFrame::new()
        .with_blur(12.0)
        .with_brightness(1.2)
        .with_scale(1.02);

    EffectPlan::new()
        .track(
            old_layer(300, Easing::EaseIn)
                .frame(sharp.clone())
                .frame(hazy.clone()),
        )
        .track(
            new_layer(300, Easing::EaseOut)
                .frame(hazy.with_clip(circle_at(origin, Length::Px(0.0))))
                .frame(sharp.with_clip(circle_at(origin, Length::Px(origin.max_radius)))),
        )
}

fn fade(_origin: &EffectOrigin) -> EffectPlan {
    EffectPlan::new().track(
        new_layer(200, Easing::EaseInOut)
            .frame(EffectFrame::new().with_opacity(0.0).with_scale(0.95))
            .frame(EffectFrame::new().with_opacity(1.0).with_scale(1.0)),
    )
}

/// Polygon expanding from the page centre through a saturated blur
fn morph(_origin: &EffectOrigin) -> EffectPlan {
    let collapsed = ClipPath::polygon(&CENTER_POINT);
    let full = ClipPath::polygon(&FULL);
    let halfway = ClipPath::lerp(&collapsed, &full, 0.5);

    EffectPlan::new().track(new_layer(800, Easing::STANDARD).frames([
        EffectFrame::new()
            .with_clip(collapsed)
            .with_blur(0.0)
            .with_saturate(1.0),
        EffectFrame::new()
            .with_clip(halfway)
            .with_blur(8.0)
            .with_saturate(1.2),
        EffectFrame::new()
            .with_clip(full)
            .with_blur(0.0)
            .with_saturate(1.0),
    ]))
}

/// Old view lifts away while the new one washes down from the top
fn wave(_origin: &EffectOrigin) -> EffectPlan {
    EffectPlan::new()
        .track(
            old_layer(400, Easing::EaseIn)
                .frame(
                    EffectFrame::new()
                        .with_blur(0.0)
                        .with_brightness(1.0)
                        .with_translate(Length::ZERO, Length::ZERO),
                )
                .frame(
                    EffectFrame::new()
                        .with_blur(4.0)
                        .with_brightness(1.1)
                        .with_translate(Length::ZERO, Length::Px(-10.0)),
                ),
        )
        .track(
            new_layer(800, Easing::STANDARD)
                .frame(
                    EffectFrame::new()
                        .with_blur(4.0)
                        .with_brightness(1.1)
                        .with_translate(Length::ZERO, Length::Px(10.0))
                        .with_clip(ClipPath::polygon(&TOP_EDGE)),
                )
                .frame(
                    EffectFrame::new()
                        .with_blur(0.0)
                        .with_brightness(1.0)
                        .with_translate(Length::ZERO, Length::ZERO)
                        .with_clip(ClipPath::polygon(&FULL)),
                ),
        )
}

/// Six jittering slices with hue cycling, played in discrete steps
fn glitch(_origin: &EffectOrigin) -> EffectPlan {
    const SLICES: [([f32; 4], (f32, f32), f32); 6] = [
        ([0.0, 0.0, 0.0, 0.0], (0.0, 0.0), 0.0),
        ([10.0, -10.0, 90.0, 10.0], (-5.0, 5.0), 90.0),
        ([-10.0, 10.0, 110.0, -10.0], (5.0, -5.0), 180.0),
        ([20.0, -20.0, 80.0, 20.0], (-8.0, 8.0), 270.0),
        ([-20.0, 20.0, 120.0, -20.0], (8.0, -8.0), 360.0),
        ([0.0, 0.0, 0.0, 0.0], (0.0, 0.0), 0.0),
    ];

    EffectPlan::new().track(new_layer(600, Easing::Steps(6)).frames(SLICES.iter().map(
        |&(inset, (dx, dy), hue)| {
            EffectFrame::new()
                .with_clip(ClipPath::inset(inset))
                .with_translate(Length::Px(dx), Length::Px(dy))
                .with_hue_rotate(hue)
        },
    )))
}

/// New view collapses toward the origin and springs back full size
fn zoom(origin: &EffectOrigin) -> EffectPlan {
    let toward = (Length::Px(origin.point.x), Length::Px(origin.point.y));

    EffectPlan::new().track(new_layer(700, Easing::STANDARD).frames([
        EffectFrame::new()
            .with_scale(1.0)
            .with_translate(toward.0, toward.1)
            .with_blur(0.0)
            .with_opacity(1.0),
        EffectFrame::new()
            .with_scale(0.0)
            .with_translate(toward.0, toward.1)
            .with_blur(8.0)
            .with_opacity(0.5),
        EffectFrame::new()
            .with_scale(1.0)
            .with_translate(Length::ZERO, Length::ZERO)
            .with_blur(0.0)
            .with_opacity(1.0),
    ]))
}

fn slide(_origin: &EffectOrigin) -> EffectPlan {
    EffectPlan::new().track(
        new_layer(500, Easing::STANDARD)
            .frame(
                EffectFrame::new()
                    .with_translate(Length::Percent(-100.0), Length::ZERO)
                    .with_opacity(0.0),
            )
            .frame(
                EffectFrame::new()
                    .with_translate(Length::Percent(0.0), Length::ZERO)
                    .with_opacity(1.0),
            ),
    )
}

/// Two full turns, shrinking to nothing halfway
fn rotate(_origin: &EffectOrigin) -> EffectPlan {
    EffectPlan::new().track(new_layer(800, Easing::STANDARD).frames([
        EffectFrame::new().with_rotate(0.0).with_scale(1.0).with_blur(0.0),
        EffectFrame::new().with_rotate(360.0).with_scale(0.0).with_blur(4.0),
        EffectFrame::new().with_rotate(720.0).with_scale(1.0).with_blur(0.0),
    ]))
}

/// Oversized percentage circle so the ripple overshoots the corners
fn ripple(origin: &EffectOrigin) -> EffectPlan {
    EffectPlan::new().track(
        new_layer(900, Easing::STANDARD)
            .frame(
                EffectFrame::new()
                    .with_clip(circle_at(origin, Length::Percent(0.0)))
                    .with_scale(0.8)
                    .with_blur(8.0),
            )
            .frame(
                EffectFrame::new()
                    .with_clip(circle_at(origin, Length::Percent(150.0)))
                    .with_scale(1.0)
                    .with_blur(0.0),
            ),
    )
}

fn neon(_origin: &EffectOrigin) -> EffectPlan {
    let rest = EffectFrame::new()
        .with_brightness(1.0)
        .with_contrast(1.0)
        .with_scale(1.0);

    EffectPlan::new().track(new_layer(600, Easing::STANDARD).frames([
        rest.clone(),
        EffectFrame::new()
            .with_brightness(1.5)
            .with_contrast(1.2)
            .with_glow(10.0, "rgba(255,255,255,0.8)")
            .with_scale(1.05),
        rest,
    ]))
}

/// Top-down wipe with a green-shifted flicker at its midpoint
fn matrix(_origin: &EffectOrigin) -> EffectPlan {
    let closed = ClipPath::polygon(&TOP_EDGE);
    let open = ClipPath::polygon(&FULL);
    let halfway = ClipPath::lerp(&closed, &open, 0.5);

    EffectPlan::new().track(new_layer(500, Easing::STANDARD).frames([
        EffectFrame::new()
            .with_clip(closed)
            .with_blur(0.0)
            .with_brightness(1.0)
            .with_hue_rotate(0.0)
            .with_scale(1.0),
        EffectFrame::new()
            .with_clip(halfway)
            .with_blur(2.0)
            .with_brightness(1.1)
            .with_hue_rotate(45.0)
            .with_scale(1.02),
        EffectFrame::new()
            .with_clip(open)
            .with_blur(0.0)
            .with_brightness(1.0)
            .with_hue_rotate(0.0)
            .with_scale(1.0),
    ]))
}

/// Whole page blurs, then a sharp top-to-bottom reveal
fn verci(_origin: &EffectOrigin) -> EffectPlan {
    EffectPlan::new()
        .track(
            old_layer(300, Easing::EaseIn)
                .frame(EffectFrame::new().with_blur(0.0))
                .frame(EffectFrame::new().with_blur(12.0)),
        )
        .track(
            new_layer(700, Easing::STANDARD)
                .frame(
                    EffectFrame::new()
                        .with_clip(ClipPath::polygon(&TOP_EDGE))
                        .with_blur(12.0),
                )
                .frame(
                    EffectFrame::new()
                        .with_clip(ClipPath::polygon(&FULL))
                        .with_blur(0.0),
                ),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use pretty_assertions::assert_eq;

    fn origin() -> EffectOrigin {
        EffectOrigin {
            point: Point::new(100.0, 50.0),
            max_radius: 890.0,
        }
    }

    #[test]
    fn radial_grows_circle_to_max_radius() {
        let plan = radial(&origin());
        let track = &plan.tracks()[0];
        assert_eq!(track.layer, SnapshotLayer::New);
        assert_eq!(
            track.keyframes()[0].clip.as_ref().map(ToString::to_string).as_deref(),
            Some("circle(0px at 100px 50px)")
        );
        assert_eq!(
            track.keyframes()[1].clip.as_ref().map(ToString::to_string).as_deref(),
            Some("circle(890px at 100px 50px)")
        );
    }

    #[test]
    fn two_layer_effects_distort_the_old_snapshot() {
        for effect in [radial_blur, wave, verci] {
            let plan = effect(&origin());
            let layers: Vec<_> = plan.tracks().iter().map(|t| t.layer).collect();
            assert_eq!(layers, vec![SnapshotLayer::Old, SnapshotLayer::New]);
        }
    }

    #[test]
    fn glitch_lands_back_on_an_unclipped_frame() {
        let plan = glitch(&origin());
        let track = &plan.tracks()[0];
        assert_eq!(track.keyframes().len(), 6);
        assert_eq!(track.sample(1.0).clip, Some(ClipPath::inset([0.0; 4])));
        assert_eq!(
            track.keyframes()[2].filter.as_ref().and_then(|f| f.hue_rotate),
            Some(180.0)
        );
    }

    #[test]
    fn every_plan_ends_fully_revealed() {
        for kind in TransitionKind::ALL {
            let plan = kind.config().plan(Point::new(10.0, 10.0), 500.0);
            assert!(!plan.is_empty(), "{kind}");
            for track in plan.tracks() {
                let last = track.sample(1.0);
                assert!((last.resolved_opacity() - 1.0).abs() < 1e-4, "{kind}");
                if track.layer == SnapshotLayer::New {
                    assert!(last.resolved_blur().abs() < 1e-4, "{kind}");
                    assert!((last.resolved_scale() - 1.0).abs() < 1e-4, "{kind}");
                }
            }
        }
    }
}
