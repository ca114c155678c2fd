//! Effect keyframes
//!
//! A keyframe holds the subset of visual properties an effect animates on a
//! snapshot layer. Properties left unset keep the layer's resting value.

use crate::values::{lerp_opt, ClipPath, Filter, Glow, Length, Transform};

/// Properties that can be animated on a snapshot layer
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EffectFrame {
    /// Opacity (0.0 to 1.0)
    pub opacity: Option<f32>,
    pub transform: Option<Transform>,
    pub filter: Option<Filter>,
    pub clip: Option<ClipPath>,
}

impl EffectFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set opacity
    pub fn with_opacity(mut self, value: f32) -> Self {
        self.opacity = Some(value);
        self
    }

    /// Builder: set uniform scale
    pub fn with_scale(mut self, value: f32) -> Self {
        self.transform.get_or_insert_with(Transform::default).scale = Some(value);
        self
    }

    /// Builder: set translation
    pub fn with_translate(mut self, x: Length, y: Length) -> Self {
        self.transform.get_or_insert_with(Transform::default).translate = Some((x, y));
        self
    }

    /// Builder: set rotation in degrees
    pub fn with_rotate(mut self, degrees: f32) -> Self {
        self.transform.get_or_insert_with(Transform::default).rotate = Some(degrees);
        self
    }

    /// Builder: set blur radius in pixels
    pub fn with_blur(mut self, px: f32) -> Self {
        self.filter_mut().blur = Some(px);
        self
    }

    pub fn with_brightness(mut self, value: f32) -> Self {
        self.filter_mut().brightness = Some(value);
        self
    }

    pub fn with_saturate(mut self, value: f32) -> Self {
        self.filter_mut().saturate = Some(value);
        self
    }

    pub fn with_contrast(mut self, value: f32) -> Self {
        self.filter_mut().contrast = Some(value);
        self
    }

    /// Builder: set hue rotation in degrees
    pub fn with_hue_rotate(mut self, degrees: f32) -> Self {
        self.filter_mut().hue_rotate = Some(degrees);
        self
    }

    /// Builder: add a centred glow
    pub fn with_glow(mut self, radius: f32, color: impl Into<String>) -> Self {
        self.filter_mut().glow = Some(Glow {
            radius,
            color: color.into(),
        });
        self
    }

    /// Builder: set the clip shape
    pub fn with_clip(mut self, clip: ClipPath) -> Self {
        self.clip = Some(clip);
        self
    }

    fn filter_mut(&mut self) -> &mut Filter {
        self.filter.get_or_insert_with(Filter::default)
    }

    /// Interpolate between two property sets
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            opacity: lerp_opt(self.opacity, other.opacity, t),
            transform: match (&self.transform, &other.transform) {
                (Some(a), Some(b)) => Some(Transform::lerp(a, b, t)),
                (a, b) => a.clone().or_else(|| b.clone()),
            },
            filter: match (&self.filter, &other.filter) {
                (Some(a), Some(b)) => Some(Filter::lerp(a, b, t)),
                (a, b) => a.clone().or_else(|| b.clone()),
            },
            clip: match (&self.clip, &other.clip) {
                (Some(a), Some(b)) => Some(ClipPath::lerp(a, b, t)),
                (a, b) => a.clone().or_else(|| b.clone()),
            },
        }
    }

    /// Get the resolved opacity (defaults to 1.0 if not set)
    pub fn resolved_opacity(&self) -> f32 {
        self.opacity.unwrap_or(1.0)
    }

    /// Get the resolved scale (defaults to 1.0 if not set)
    pub fn resolved_scale(&self) -> f32 {
        self.transform
            .as_ref()
            .and_then(|t| t.scale)
            .unwrap_or(1.0)
    }

    /// Get the resolved blur radius (defaults to 0.0 if not set)
    pub fn resolved_blur(&self) -> f32 {
        self.filter.as_ref().and_then(|f| f.blur).unwrap_or(0.0)
    }

    /// CSS declarations for the properties this frame sets
    pub fn css_declarations(&self) -> Vec<(&'static str, String)> {
        let mut out = Vec::with_capacity(4);
        if let Some(opacity) = self.opacity {
            out.push(("opacity", opacity.to_string()));
        }
        if let Some(transform) = &self.transform {
            out.push(("transform", transform.to_string()));
        }
        if let Some(filter) = &self.filter {
            out.push(("filter", filter.to_string()));
        }
        if let Some(clip) = &self.clip {
            out.push(("clip-path", clip.to_string()));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builders_merge_into_one_filter() {
        let frame = EffectFrame::new().with_blur(12.0).with_brightness(1.2);
        let filter = frame.filter.expect("filter");
        assert_eq!(filter.blur, Some(12.0));
        assert_eq!(filter.brightness, Some(1.2));
    }

    #[test]
    fn test_lerp_keeps_one_sided_properties() {
        let from = EffectFrame::new().with_opacity(0.0);
        let to = EffectFrame::new().with_opacity(1.0).with_scale(2.0);
        let mid = from.lerp(&to, 0.5);
        assert_eq!(mid.resolved_opacity(), 0.5);
        assert_eq!(mid.resolved_scale(), 2.0);
    }

    #[test]
    fn test_css_declarations() {
        let frame = EffectFrame::new()
            .with_opacity(0.5)
            .with_clip(ClipPath::inset([0.0; 4]));
        assert_eq!(
            frame.css_declarations(),
            vec![
                ("opacity", "0.5".to_string()),
                ("clip-path", "inset(0% 0% 0% 0%)".to_string()),
            ]
        );
    }
}
