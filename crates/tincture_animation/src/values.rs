//! Animatable visual values
//!
//! Each value renders to the CSS syntax a browser accepts for the matching
//! property and interpolates the way CSS does: compatible values blend
//! component-wise, incompatible ones flip at the midpoint.

use smallvec::SmallVec;
use std::fmt;

/// A length in pixels or as a percentage of the reference box
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Length {
    Px(f32),
    Percent(f32),
}

impl Length {
    pub const ZERO: Length = Length::Px(0.0);

    /// Interpolate between two lengths; mixed units switch discretely
    pub fn lerp(from: Self, to: Self, t: f32) -> Self {
        match (from, to) {
            (Length::Px(a), Length::Px(b)) => Length::Px(lerp(a, b, t)),
            (Length::Percent(a), Length::Percent(b)) => Length::Percent(lerp(a, b, t)),
            _ => discrete(from, to, t),
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Length::Px(v) => write!(f, "{}px", round(*v)),
            Length::Percent(v) => write!(f, "{}%", round(*v)),
        }
    }
}

/// A `clip-path` basic shape
#[derive(Clone, Debug, PartialEq)]
pub enum ClipPath {
    /// `circle(<radius> at <x>px <y>px)`
    Circle { radius: Length, at: (f32, f32) },
    /// `polygon(<x> <y>, ...)`
    Polygon(SmallVec<[(Length, Length); 4]>),
    /// `inset(<top> <right> <bottom> <left>)`
    Inset([Length; 4]),
}

impl ClipPath {
    /// Circle centred on a pixel position
    pub fn circle(radius: Length, x: f32, y: f32) -> Self {
        ClipPath::Circle { radius, at: (x, y) }
    }

    /// Polygon from percentage vertices
    pub fn polygon(points: &[(f32, f32)]) -> Self {
        ClipPath::Polygon(
            points
                .iter()
                .map(|&(x, y)| (Length::Percent(x), Length::Percent(y)))
                .collect(),
        )
    }

    /// Inset from percentage edges `[top, right, bottom, left]`
    pub fn inset(edges: [f32; 4]) -> Self {
        ClipPath::Inset(edges.map(Length::Percent))
    }

    pub fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        match (from, to) {
            (
                ClipPath::Circle { radius: r0, at: a0 },
                ClipPath::Circle { radius: r1, at: a1 },
            ) => ClipPath::Circle {
                radius: Length::lerp(*r0, *r1, t),
                at: (lerp(a0.0, a1.0, t), lerp(a0.1, a1.1, t)),
            },
            (ClipPath::Polygon(p0), ClipPath::Polygon(p1)) if p0.len() == p1.len() => {
                ClipPath::Polygon(
                    p0.iter()
                        .zip(p1.iter())
                        .map(|(a, b)| (Length::lerp(a.0, b.0, t), Length::lerp(a.1, b.1, t)))
                        .collect(),
                )
            }
            (ClipPath::Inset(e0), ClipPath::Inset(e1)) => ClipPath::Inset([
                Length::lerp(e0[0], e1[0], t),
                Length::lerp(e0[1], e1[1], t),
                Length::lerp(e0[2], e1[2], t),
                Length::lerp(e0[3], e1[3], t),
            ]),
            _ => discrete(from, to, t).clone(),
        }
    }
}

impl fmt::Display for ClipPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClipPath::Circle { radius, at } => {
                write!(f, "circle({radius} at {}px {}px)", round(at.0), round(at.1))
            }
            ClipPath::Polygon(points) => {
                f.write_str("polygon(")?;
                for (i, (x, y)) in points.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{x} {y}")?;
                }
                f.write_str(")")
            }
            ClipPath::Inset([top, right, bottom, left]) => {
                write!(f, "inset({top} {right} {bottom} {left})")
            }
        }
    }
}

/// A glowing `drop-shadow` centred under the layer
#[derive(Clone, Debug, PartialEq)]
pub struct Glow {
    pub radius: f32,
    pub color: String,
}

/// A `filter` function list. Unset functions are omitted from the output.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Filter {
    /// Blur radius in pixels
    pub blur: Option<f32>,
    pub brightness: Option<f32>,
    pub saturate: Option<f32>,
    pub contrast: Option<f32>,
    /// Hue rotation in degrees
    pub hue_rotate: Option<f32>,
    pub glow: Option<Glow>,
}

impl Filter {
    pub fn is_empty(&self) -> bool {
        self.blur.is_none()
            && self.brightness.is_none()
            && self.saturate.is_none()
            && self.contrast.is_none()
            && self.hue_rotate.is_none()
            && self.glow.is_none()
    }

    pub fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        Self {
            blur: lerp_opt(from.blur, to.blur, t),
            brightness: lerp_opt(from.brightness, to.brightness, t),
            saturate: lerp_opt(from.saturate, to.saturate, t),
            contrast: lerp_opt(from.contrast, to.contrast, t),
            hue_rotate: lerp_opt(from.hue_rotate, to.hue_rotate, t),
            glow: lerp_glow(from.glow.as_ref(), to.glow.as_ref(), t),
        }
    }
}

/// A missing glow blends as a zero-radius shadow of the other side's colour
fn lerp_glow(from: Option<&Glow>, to: Option<&Glow>, t: f32) -> Option<Glow> {
    match (from, to) {
        (None, None) => None,
        (Some(a), Some(b)) => Some(Glow {
            radius: lerp(a.radius, b.radius, t),
            color: discrete(&a.color, &b.color, t).clone(),
        }),
        (Some(a), None) => Some(Glow {
            radius: lerp(a.radius, 0.0, t),
            color: a.color.clone(),
        }),
        (None, Some(b)) => Some(Glow {
            radius: lerp(0.0, b.radius, t),
            color: b.color.clone(),
        }),
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        let mut parts: SmallVec<[String; 6]> = SmallVec::new();
        if let Some(v) = self.blur {
            parts.push(format!("blur({}px)", round(v)));
        }
        if let Some(v) = self.brightness {
            parts.push(format!("brightness({})", round(v)));
        }
        if let Some(v) = self.saturate {
            parts.push(format!("saturate({})", round(v)));
        }
        if let Some(v) = self.contrast {
            parts.push(format!("contrast({})", round(v)));
        }
        if let Some(v) = self.hue_rotate {
            parts.push(format!("hue-rotate({}deg)", round(v)));
        }
        if let Some(glow) = &self.glow {
            parts.push(format!(
                "drop-shadow(0 0 {}px {})",
                round(glow.radius),
                glow.color
            ));
        }
        f.write_str(&parts.join(" "))
    }
}

/// A 2D `transform` list rendered as `rotate() scale() translate()`
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Transform {
    pub rotate: Option<f32>,
    pub scale: Option<f32>,
    pub translate: Option<(Length, Length)>,
}

impl Transform {
    pub fn is_empty(&self) -> bool {
        self.rotate.is_none() && self.scale.is_none() && self.translate.is_none()
    }

    pub fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        let translate = match (from.translate, to.translate) {
            (Some(a), Some(b)) => Some((Length::lerp(a.0, b.0, t), Length::lerp(a.1, b.1, t))),
            (Some(a), None) => Some((
                Length::lerp(a.0, Length::ZERO, t),
                Length::lerp(a.1, Length::ZERO, t),
            )),
            (None, Some(b)) => Some((
                Length::lerp(Length::ZERO, b.0, t),
                Length::lerp(Length::ZERO, b.1, t),
            )),
            (None, None) => None,
        };
        Self {
            rotate: lerp_opt(from.rotate, to.rotate, t),
            scale: lerp_opt(from.scale, to.scale, t),
            translate,
        }
    }

    /// Resolved translation in pixels against a reference box
    pub fn resolved_translate(&self, width: f32, height: f32) -> (f32, f32) {
        let resolve = |len: Length, basis: f32| match len {
            Length::Px(v) => v,
            Length::Percent(p) => basis * p / 100.0,
        };
        self.translate
            .map(|(x, y)| (resolve(x, width), resolve(y, height)))
            .unwrap_or((0.0, 0.0))
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        let mut parts: SmallVec<[String; 3]> = SmallVec::new();
        if let Some(v) = self.rotate {
            parts.push(format!("rotate({}deg)", round(v)));
        }
        if let Some(v) = self.scale {
            parts.push(format!("scale({})", round(v)));
        }
        if let Some((x, y)) = self.translate {
            parts.push(format!("translate({x}, {y})"));
        }
        f.write_str(&parts.join(" "))
    }
}

#[inline]
pub(crate) fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Helper to interpolate optional values
pub(crate) fn lerp_opt(a: Option<f32>, b: Option<f32>, t: f32) -> Option<f32> {
    match (a, b) {
        (Some(a), Some(b)) => Some(lerp(a, b, t)),
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        (None, None) => None,
    }
}

/// CSS discrete interpolation flips at the midpoint
pub(crate) fn discrete<T>(from: T, to: T, t: f32) -> T {
    if t < 0.5 {
        from
    } else {
        to
    }
}

/// Keep rendered numbers short and stable (3 decimal places, no `-0`)
fn round(v: f32) -> f32 {
    let r = (v * 1000.0).round() / 1000.0;
    if r == 0.0 {
        0.0
    } else {
        r
    }
}
