//! Document root style surface
//!
//! The presentation layer observes theme changes only through the root:
//! marker classes, `--` style variables, and two critical properties that are
//! set directly so the first paint never flashes unstyled.

use indexmap::IndexMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

/// Root properties written directly, outside the variable namespace
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CriticalProperty {
    Background,
    Foreground,
}

impl CriticalProperty {
    pub const ALL: [CriticalProperty; 2] = [CriticalProperty::Background, CriticalProperty::Foreground];

    /// CSS property name
    pub fn css_name(self) -> &'static str {
        match self {
            CriticalProperty::Background => "background-color",
            CriticalProperty::Foreground => "color",
        }
    }

    /// Color token this property is derived from
    pub fn token(self) -> &'static str {
        match self {
            CriticalProperty::Background => "background",
            CriticalProperty::Foreground => "foreground",
        }
    }
}

impl fmt::Display for CriticalProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_name())
    }
}

/// The document root element
pub trait StyleRoot {
    fn add_class(&mut self, class: &str);
    fn remove_class(&mut self, class: &str);
    fn has_class(&self, class: &str) -> bool;
    /// Marker classes in the order they were added
    fn classes(&self) -> Vec<String>;

    /// Set a style variable (`name` includes the leading `--`)
    fn set_property(&mut self, name: &str, value: &str);
    fn property(&self, name: &str) -> Option<String>;

    fn set_critical(&mut self, property: CriticalProperty, value: &str);
    fn critical(&self, property: CriticalProperty) -> Option<String>;
}

#[derive(Debug, Default)]
struct RootInner {
    classes: Vec<String>,
    properties: IndexMap<String, String>,
    background: Option<String>,
    foreground: Option<String>,
    writes: u64,
}

impl RootInner {
    fn critical_slot(&mut self, property: CriticalProperty) -> &mut Option<String> {
        match property {
            CriticalProperty::Background => &mut self.background,
            CriticalProperty::Foreground => &mut self.foreground,
        }
    }
}

/// Headless root.
///
/// Clones share state. Every mutating call bumps a write counter, which
/// lets callers verify that re-applying the same state writes nothing.
#[derive(Clone, Debug, Default)]
pub struct MemoryRoot {
    inner: Arc<RwLock<RootInner>>,
}

impl MemoryRoot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of mutating calls made so far
    pub fn writes(&self) -> u64 {
        self.read(|inner| inner.writes)
    }

    /// Every style variable in insertion order
    pub fn properties(&self) -> Vec<(String, String)> {
        self.read(|inner| {
            inner
                .properties
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect()
        })
    }

    /// Render the root as a CSS rule
    pub fn to_css(&self) -> String {
        let mut css = String::from(":root {\n");
        for property in CriticalProperty::ALL {
            if let Some(value) = self.critical(property) {
                css.push_str(&format!("  {}: {value};\n", property.css_name()));
            }
        }
        for (name, value) in self.properties() {
            css.push_str(&format!("  {name}: {value};\n"));
        }
        css.push_str("}\n");
        css
    }

    fn read<T>(&self, f: impl FnOnce(&RootInner) -> T) -> T {
        f(&self.inner.read().unwrap_or_else(PoisonError::into_inner))
    }

    fn write(&self, f: impl FnOnce(&mut RootInner)) {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner.writes += 1;
        f(&mut inner);
    }
}

impl StyleRoot for MemoryRoot {
    fn add_class(&mut self, class: &str) {
        self.write(|inner| {
            if !inner.classes.iter().any(|c| c == class) {
                inner.classes.push(class.to_string());
            }
        });
    }

    fn remove_class(&mut self, class: &str) {
        self.write(|inner| inner.classes.retain(|c| c != class));
    }

    fn has_class(&self, class: &str) -> bool {
        self.read(|inner| inner.classes.iter().any(|c| c == class))
    }

    fn classes(&self) -> Vec<String> {
        self.read(|inner| inner.classes.clone())
    }

    fn set_property(&mut self, name: &str, value: &str) {
        self.write(|inner| {
            inner.properties.insert(name.to_string(), value.to_string());
        });
    }

    fn property(&self, name: &str) -> Option<String> {
        self.read(|inner| inner.properties.get(name).cloned())
    }

    fn set_critical(&mut self, property: CriticalProperty, value: &str) {
        self.write(|inner| *inner.critical_slot(property) = Some(value.to_string()));
    }

    fn critical(&self, property: CriticalProperty) -> Option<String> {
        self.read(|inner| match property {
            CriticalProperty::Background => inner.background.clone(),
            CriticalProperty::Foreground => inner.foreground.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn classes_are_a_set_in_insertion_order() {
        let mut root = MemoryRoot::new();
        root.add_class("slate");
        root.add_class("dark");
        root.add_class("slate");
        assert_eq!(root.classes(), vec!["slate", "dark"]);
        root.remove_class("slate");
        assert!(!root.has_class("slate"));
        assert_eq!(root.writes(), 4);
    }

    #[test]
    fn renders_critical_properties_before_variables() {
        let mut root = MemoryRoot::new();
        root.set_property("--background", "0 0% 100%");
        root.set_critical(CriticalProperty::Background, "hsl(0 0% 100%)");
        assert_eq!(
            root.to_css(),
            ":root {\n  background-color: hsl(0 0% 100%);\n  --background: 0 0% 100%;\n}\n"
        );
    }
}
