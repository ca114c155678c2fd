//! Theme definitions
//!
//! A [`Theme`] is a named pair of [`ThemeVariant`]s, one per [`Mode`]. Variants
//! are plain string token maps so that catalogs can be written by hand in TOML
//! or JSON; consumers must tolerate keys missing from either variant.

use crate::error::ParseIdError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Light or dark variant selector, orthogonal to theme identity
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Light,
    Dark,
}

impl Mode {
    /// Get the opposite mode
    pub fn toggle(self) -> Self {
        match self {
            Mode::Light => Mode::Dark,
            Mode::Dark => Mode::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Mode::Dark
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Light => "light",
            Mode::Dark => "dark",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Mode::Light),
            "dark" => Ok(Mode::Dark),
            other => Err(ParseIdError::new("mode", other)),
        }
    }
}

/// Font family per typographic role
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sans: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serif: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mono: Option<String>,
}

impl FontSet {
    /// Set roles in `sans`, `serif`, `mono` order
    pub fn roles(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("sans", self.sans.as_deref()),
            ("serif", self.serif.as_deref()),
            ("mono", self.mono.as_deref()),
        ]
        .into_iter()
        .filter_map(|(role, family)| family.map(|f| (role, f)))
    }
}

/// Corner radius: a single base value or a scale keyed by size role
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Radius {
    Uniform(String),
    Scale(IndexMap<String, String>),
}

/// One mode's worth of visual tokens
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeVariant {
    /// Color tokens, typically `"H S% L%"` component triples
    #[serde(default)]
    pub colors: IndexMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fonts: Option<FontSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<Radius>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadows: Option<IndexMap<String, String>>,
}

impl ThemeVariant {
    /// Create a variant from color token pairs
    pub fn new(colors: &[(&str, &str)]) -> Self {
        Self {
            colors: colors
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            ..Default::default()
        }
    }

    /// Builder: set font families
    pub fn with_fonts(mut self, fonts: FontSet) -> Self {
        self.fonts = Some(fonts);
        self
    }

    /// Builder: set corner radius
    pub fn with_radius(mut self, radius: Radius) -> Self {
        self.radius = Some(radius);
        self
    }

    /// Builder: set shadow tokens
    pub fn with_shadows(mut self, shadows: &[(&str, &str)]) -> Self {
        self.shadows = Some(
            shadows
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        );
        self
    }

    /// Get a color token value
    pub fn color(&self, token: &str) -> Option<&str> {
        self.colors.get(token).map(String::as_str)
    }

    /// Every style variable this variant defines, in declaration order.
    ///
    /// Names include the leading `--`. Colors map to `--<token>`, fonts to
    /// `--font-<role>`, radius to `--radius` or `--radius-<role>`, and shadows
    /// to `--shadow-<role>` (the `default` role, in any case, maps to plain
    /// `--shadow`).
    pub fn css_variables(&self) -> Vec<(String, String)> {
        let mut vars = Vec::with_capacity(self.colors.len() + 8);

        for (token, value) in &self.colors {
            vars.push((format!("--{token}"), value.clone()));
        }

        if let Some(fonts) = &self.fonts {
            for (role, family) in fonts.roles() {
                vars.push((format!("--font-{role}"), family.to_string()));
            }
        }

        match &self.radius {
            Some(Radius::Uniform(value)) => vars.push(("--radius".to_string(), value.clone())),
            Some(Radius::Scale(scale)) => {
                for (role, value) in scale {
                    vars.push((format!("--radius-{role}"), value.clone()));
                }
            }
            None => {}
        }

        if let Some(shadows) = &self.shadows {
            for (role, value) in shadows {
                let name = if role.eq_ignore_ascii_case("default") {
                    "--shadow".to_string()
                } else {
                    format!("--shadow-{role}")
                };
                vars.push((name, value.clone()));
            }
        }

        vars
    }
}

/// A named bundle of light and dark token sets
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    /// Unique identity, also used as the root marker class
    pub name: String,
    /// Display label (falls back to the name when empty)
    #[serde(default)]
    pub label: String,
    pub light: ThemeVariant,
    pub dark: ThemeVariant,
}

impl Theme {
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        light: ThemeVariant,
        dark: ThemeVariant,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            light,
            dark,
        }
    }

    pub fn label(&self) -> &str {
        if self.label.is_empty() {
            &self.name
        } else {
            &self.label
        }
    }

    /// Get the variant for a mode
    pub fn variant(&self, mode: Mode) -> &ThemeVariant {
        match mode {
            Mode::Light => &self.light,
            Mode::Dark => &self.dark,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn mode_round_trips_through_strings() {
        assert_eq!("dark".parse::<Mode>(), Ok(Mode::Dark));
        assert_eq!(Mode::Light.toggle(), Mode::Dark);
        assert!("sepia".parse::<Mode>().is_err());
    }

    #[test]
    fn css_variables_cover_every_token_family() {
        let variant = ThemeVariant::new(&[("background", "0 0% 100%")])
            .with_fonts(FontSet {
                mono: Some("JetBrains Mono".into()),
                ..Default::default()
            })
            .with_radius(Radius::Scale(IndexMap::from([(
                "lg".to_string(),
                "1rem".to_string(),
            )])))
            .with_shadows(&[("default", "0 1px 3px black"), ("lg", "0 10px 15px black")]);

        assert_eq!(
            variant.css_variables(),
            vec![
                ("--background".to_string(), "0 0% 100%".to_string()),
                ("--font-mono".to_string(), "JetBrains Mono".to_string()),
                ("--radius-lg".to_string(), "1rem".to_string()),
                ("--shadow".to_string(), "0 1px 3px black".to_string()),
                ("--shadow-lg".to_string(), "0 10px 15px black".to_string()),
            ]
        );
    }

    #[test]
    fn uniform_radius_deserializes_from_string() {
        let variant: ThemeVariant =
            serde_json::from_str(r#"{"colors": {}, "radius": "0.5rem"}"#).unwrap();
        assert_eq!(variant.radius, Some(Radius::Uniform("0.5rem".into())));
        assert_eq!(
            variant.css_variables(),
            vec![("--radius".to_string(), "0.5rem".to_string())]
        );
    }
}
