//! Theme catalog
//!
//! The catalog is the ordered, read-only list of themes the application
//! offers. It is supplied as configuration and never mutated while the
//! store is running; share it behind an `Arc`.

use crate::error::CatalogError;
use crate::presets::ThemePreset;
use crate::theme::Theme;
use rustc_hash::FxHashSet;
use serde::Deserialize;

/// Name of the theme consumers fall back to when a lookup fails
pub const DEFAULT_THEME: &str = "default";

/// Ordered collection of uniquely named themes
#[derive(Clone, Debug, PartialEq)]
pub struct ThemeCatalog {
    themes: Vec<Theme>,
}

/// On-disk TOML layout: `[[themes]]` tables
#[derive(Deserialize)]
struct CatalogFile {
    themes: Vec<Theme>,
}

impl ThemeCatalog {
    /// Build a catalog, rejecting empty lists and duplicate or empty names
    pub fn new(themes: Vec<Theme>) -> Result<Self, CatalogError> {
        if themes.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = FxHashSet::default();
        for theme in &themes {
            if theme.name.is_empty() {
                return Err(CatalogError::UnnamedTheme);
            }
            if !seen.insert(theme.name.as_str()) {
                return Err(CatalogError::DuplicateTheme(theme.name.clone()));
            }
        }
        Ok(Self { themes })
    }

    /// Catalog of every built-in preset
    pub fn builtin() -> Self {
        Self {
            themes: ThemePreset::all().iter().map(|p| p.theme()).collect(),
        }
    }

    /// Parse a TOML catalog (`[[themes]]` array of tables)
    pub fn from_toml_str(src: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(src)?;
        Self::new(file.themes)
    }

    /// Parse a JSON catalog (a top-level array of themes)
    pub fn from_json_str(src: &str) -> Result<Self, CatalogError> {
        let themes: Vec<Theme> = serde_json::from_str(src)?;
        Self::new(themes)
    }

    /// Merge another catalog into this one.
    ///
    /// Themes whose name already exists replace the existing entry in place;
    /// new names are appended in their original order.
    pub fn merge(&mut self, other: ThemeCatalog) {
        for theme in other.themes {
            match self.themes.iter_mut().find(|t| t.name == theme.name) {
                Some(existing) => {
                    tracing::debug!("ThemeCatalog::merge - replacing theme {:?}", theme.name);
                    *existing = theme;
                }
                None => self.themes.push(theme),
            }
        }
    }

    /// Look up a theme by name
    pub fn get(&self, name: &str) -> Option<&Theme> {
        self.themes.iter().find(|t| t.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Resolve a theme by name, falling back to [`DEFAULT_THEME`] and then
    /// to the first theme in the catalog
    pub fn resolve(&self, name: &str) -> &Theme {
        self.get(name)
            .or_else(|| self.get(DEFAULT_THEME))
            .unwrap_or(&self.themes[0])
    }

    /// Theme names in catalog order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.themes.iter().map(|t| t.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Theme> {
        self.themes.iter()
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    /// Always false for a constructed catalog; present for API symmetry
    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }
}

impl Default for ThemeCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{Mode, ThemeVariant};
    use pretty_assertions::assert_eq;

    fn bare(name: &str) -> Theme {
        Theme::new(name, "", ThemeVariant::default(), ThemeVariant::default())
    }

    #[test]
    fn rejects_empty_and_duplicate_catalogs() {
        assert!(matches!(ThemeCatalog::new(vec![]), Err(CatalogError::Empty)));
        assert!(matches!(
            ThemeCatalog::new(vec![bare("a"), bare("a")]),
            Err(CatalogError::DuplicateTheme(name)) if name == "a"
        ));
        assert!(matches!(
            ThemeCatalog::new(vec![bare("")]),
            Err(CatalogError::UnnamedTheme)
        ));
    }

    #[test]
    fn resolve_falls_back_to_default_then_first() {
        let catalog = ThemeCatalog::builtin();
        assert_eq!(catalog.resolve("missing").name, DEFAULT_THEME);

        let custom = ThemeCatalog::new(vec![bare("ocean"), bare("forest")]).unwrap();
        assert_eq!(custom.resolve("missing").name, "ocean");
        assert_eq!(custom.resolve("forest").name, "forest");
    }

    #[test]
    fn parses_toml_catalog() {
        let src = r#"
[[themes]]
name = "ocean"
label = "Ocean"

[themes.light.colors]
background = "200 100% 97%"
foreground = "200 50% 10%"

[themes.dark]
radius = "0.75rem"

[themes.dark.colors]
background = "200 50% 8%"
"#;
        let catalog = ThemeCatalog::from_toml_str(src).unwrap();
        let ocean = catalog.get("ocean").unwrap();
        assert_eq!(ocean.label(), "Ocean");
        assert_eq!(ocean.variant(Mode::Light).color("foreground"), Some("200 50% 10%"));
        assert_eq!(ocean.variant(Mode::Dark).color("foreground"), None);
    }

    #[test]
    fn parses_json_catalog_and_requires_both_variants() {
        let ok = r#"[{"name": "mono", "light": {"colors": {}}, "dark": {"colors": {}}}]"#;
        assert_eq!(ThemeCatalog::from_json_str(ok).unwrap().len(), 1);

        let missing_dark = r#"[{"name": "mono", "light": {"colors": {}}}]"#;
        assert!(matches!(
            ThemeCatalog::from_json_str(missing_dark),
            Err(CatalogError::Json(_))
        ));
    }

    #[test]
    fn merge_replaces_by_name_and_appends_new() {
        let mut catalog = ThemeCatalog::builtin();
        let before = catalog.len();
        let mut replacement = bare("slate");
        replacement.label = "Custom Slate".into();
        catalog.merge(ThemeCatalog::new(vec![replacement, bare("ocean")]).unwrap());

        assert_eq!(catalog.len(), before + 1);
        assert_eq!(catalog.get("slate").unwrap().label(), "Custom Slate");
        assert_eq!(catalog.names().last(), Some("ocean"));
    }
}
