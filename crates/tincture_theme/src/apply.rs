//! Writing a resolved theme onto the root
//!
//! Both the pre-paint initializer and the store go through [`apply_theme`],
//! so a later hydration with the same state finds nothing left to write.

use crate::catalog::ThemeCatalog;
use crate::root::{CriticalProperty, StyleRoot};
use crate::theme::{Mode, ThemeVariant};

/// Marker class carried by the root in dark mode
pub const DARK_CLASS: &str = "dark";

/// Apply `theme` in `mode` to the root.
///
/// Removes the markers of every other catalog theme, marks the active theme,
/// toggles [`DARK_CLASS`], writes every variable the variant defines, and sets
/// the critical background and foreground. Values already in place are not
/// rewritten. An unknown theme name leaves the root untouched and returns
/// `false`.
pub fn apply_theme(
    root: &mut dyn StyleRoot,
    catalog: &ThemeCatalog,
    theme: &str,
    mode: Mode,
) -> bool {
    let Some(active) = catalog.get(theme) else {
        tracing::debug!("apply_theme - unknown theme {theme:?}, leaving root unchanged");
        return false;
    };

    for name in catalog.names() {
        if name != theme && root.has_class(name) {
            root.remove_class(name);
        }
    }
    mark_root(root, theme, mode);
    write_variant(root, active.variant(mode), mode);
    true
}

/// Set the theme marker and toggle the dark marker
pub(crate) fn mark_root(root: &mut dyn StyleRoot, theme: &str, mode: Mode) {
    if !root.has_class(theme) {
        root.add_class(theme);
    }
    match (mode.is_dark(), root.has_class(DARK_CLASS)) {
        (true, false) => root.add_class(DARK_CLASS),
        (false, true) => root.remove_class(DARK_CLASS),
        _ => {}
    }
}

/// Write the variant's variables and critical colors
pub(crate) fn write_variant(root: &mut dyn StyleRoot, variant: &ThemeVariant, mode: Mode) {
    for (name, value) in variant.css_variables() {
        if root.property(&name).as_deref() != Some(value.as_str()) {
            root.set_property(&name, &value);
        }
    }
    for property in CriticalProperty::ALL {
        let value = critical_color(variant, property, mode);
        if root.critical(property).as_deref() != Some(value.as_str()) {
            root.set_critical(property, &value);
        }
    }
}

/// Resolved critical color, falling back to black on white or white on black
pub fn critical_color(variant: &ThemeVariant, property: CriticalProperty, mode: Mode) -> String {
    match variant.color(property.token()) {
        Some(value) => css_color(value),
        None => match (property, mode) {
            (CriticalProperty::Background, Mode::Dark) => "#000".to_string(),
            (CriticalProperty::Background, Mode::Light) => "#fff".to_string(),
            (CriticalProperty::Foreground, Mode::Dark) => "#fff".to_string(),
            (CriticalProperty::Foreground, Mode::Light) => "#000".to_string(),
        },
    }
}

/// Turn a token value into a CSS color.
///
/// Bare `H S% L%` component triples are wrapped in `hsl(..)`; anything else
/// is already a color and passes through.
pub fn css_color(value: &str) -> String {
    let mut parts = value.split_whitespace();
    let triple = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(h), Some(s), Some(l), None) => {
            is_number(h) && is_percentage(s) && is_percentage(l)
        }
        _ => false,
    };
    if triple {
        format!("hsl({})", value.split_whitespace().collect::<Vec<_>>().join(" "))
    } else {
        value.to_string()
    }
}

fn is_number(s: &str) -> bool {
    s.parse::<f32>().is_ok()
}

fn is_percentage(s: &str) -> bool {
    s.strip_suffix('%').is_some_and(is_number)
}
