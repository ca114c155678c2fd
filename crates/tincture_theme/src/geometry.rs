//! Pointer geometry for transition origins

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A position in viewport pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// Parses `"X,Y"`
impl FromStr for Point {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s
            .split_once(',')
            .ok_or_else(|| format!("expected X,Y but got {s:?}"))?;
        let x = x.trim().parse().map_err(|e| format!("bad x in {s:?}: {e}"))?;
        let y = y.trim().parse().map_err(|e| format!("bad y in {s:?}: {e}"))?;
        Ok(Point { x, y })
    }
}

/// Bounding box of the control that triggered a change
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }
}

/// Visible page area in pixels
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 800.0)
    }
}

/// Parses `"WxH"`
impl FromStr for Viewport {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("expected WxH but got {s:?}"))?;
        let width = w.trim().parse().map_err(|e| format!("bad width in {s:?}: {e}"))?;
        let height = h.trim().parse().map_err(|e| format!("bad height in {s:?}: {e}"))?;
        Ok(Viewport { width, height })
    }
}

/// Distance from `origin` to the farthest viewport corner.
///
/// A circle of this radius centred on the origin always covers the whole
/// viewport, wherever the origin sits.
pub fn max_effect_radius(origin: Point, viewport: Viewport) -> f32 {
    let horizontal = origin.x.max(viewport.width - origin.x);
    let vertical = origin.y.max(viewport.height - origin.y);
    horizontal.hypot(vertical)
}
