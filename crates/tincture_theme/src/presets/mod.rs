//! Built-in theme presets inspired by shadcn base color presets.

use crate::theme::{FontSet, Radius, Theme, ThemeVariant};
use indexmap::IndexMap;
use std::fmt::{Display, Formatter};

/// Built-in theme preset catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ThemePreset {
    /// Minimal neutral theme every catalog falls back to.
    Default,
    /// shadcn-inspired slate preset.
    Slate,
    /// shadcn-inspired zinc preset.
    Zinc,
    /// shadcn-inspired rose preset.
    Rose,
    /// Catppuccin Latte (light) and Mocha (dark), with fonts, radii and shadows.
    Catppuccin,
}

impl ThemePreset {
    /// Stable preset id, also the theme name.
    pub fn id(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Slate => "slate",
            Self::Zinc => "zinc",
            Self::Rose => "rose",
            Self::Catppuccin => "catppuccin",
        }
    }

    /// User-facing display name.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::Slate => "Slate",
            Self::Zinc => "Zinc",
            Self::Rose => "Rose",
            Self::Catppuccin => "Catppuccin",
        }
    }

    /// Full preset list.
    pub fn all() -> &'static [ThemePreset] {
        const PRESETS: [ThemePreset; 5] = [
            ThemePreset::Default,
            ThemePreset::Slate,
            ThemePreset::Zinc,
            ThemePreset::Rose,
            ThemePreset::Catppuccin,
        ];
        &PRESETS
    }

    /// Build the light/dark theme for this preset.
    pub fn theme(self) -> Theme {
        let (light, dark) = match self {
            Self::Default => (neutral_light().variant(), neutral_dark().variant()),
            Self::Slate => (slate_light().variant(), slate_dark().variant()),
            Self::Zinc => (zinc_light().variant(), zinc_dark().variant()),
            Self::Rose => (rose_light().variant(), rose_dark().variant()),
            Self::Catppuccin => (catppuccin_latte(), catppuccin_mocha()),
        };
        Theme::new(self.id(), self.display_name(), light, dark)
    }
}

impl Display for ThemePreset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// The fifteen semantic colors of a shadcn base palette
#[derive(Clone, Copy)]
struct BasePalette {
    background: &'static str,
    foreground: &'static str,
    primary: &'static str,
    primary_foreground: &'static str,
    secondary: &'static str,
    secondary_foreground: &'static str,
    muted: &'static str,
    muted_foreground: &'static str,
    accent: &'static str,
    accent_foreground: &'static str,
    destructive: &'static str,
    destructive_foreground: &'static str,
    border: &'static str,
    input: &'static str,
    ring: &'static str,
}

impl BasePalette {
    fn variant(self) -> ThemeVariant {
        ThemeVariant::new(&[
            ("background", self.background),
            ("foreground", self.foreground),
            ("primary", self.primary),
            ("primary-foreground", self.primary_foreground),
            ("secondary", self.secondary),
            ("secondary-foreground", self.secondary_foreground),
            ("muted", self.muted),
            ("muted-foreground", self.muted_foreground),
            ("accent", self.accent),
            ("accent-foreground", self.accent_foreground),
            ("destructive", self.destructive),
            ("destructive-foreground", self.destructive_foreground),
            ("border", self.border),
            ("input", self.input),
            ("ring", self.ring),
        ])
    }
}

fn neutral_light() -> BasePalette {
    BasePalette {
        background: "0 0% 100%",
        foreground: "0 0% 3.9%",
        primary: "0 0% 9%",
        primary_foreground: "0 0% 98%",
        secondary: "0 0% 96.1%",
        secondary_foreground: "0 0% 9%",
        muted: "0 0% 96.1%",
        muted_foreground: "0 0% 45.1%",
        accent: "0 0% 96.1%",
        accent_foreground: "0 0% 9%",
        destructive: "0 84.2% 60.2%",
        destructive_foreground: "0 0% 98%",
        border: "0 0% 89.8%",
        input: "0 0% 89.8%",
        ring: "0 0% 3.9%",
    }
}

fn neutral_dark() -> BasePalette {
    BasePalette {
        background: "0 0% 3.9%",
        foreground: "0 0% 98%",
        primary: "0 0% 98%",
        primary_foreground: "0 0% 9%",
        secondary: "0 0% 14.9%",
        secondary_foreground: "0 0% 98%",
        muted: "0 0% 14.9%",
        muted_foreground: "0 0% 63.9%",
        accent: "0 0% 14.9%",
        accent_foreground: "0 0% 98%",
        destructive: "0 62.8% 30.6%",
        destructive_foreground: "0 0% 98%",
        border: "0 0% 14.9%",
        input: "0 0% 14.9%",
        ring: "0 0% 83.1%",
    }
}

fn slate_light() -> BasePalette {
    BasePalette {
        background: "0 0% 100%",
        foreground: "222.2 84% 4.9%",
        primary: "222.2 47.4% 11.2%",
        primary_foreground: "210 40% 98%",
        secondary: "210 40% 96.1%",
        secondary_foreground: "222.2 47.4% 11.2%",
        muted: "210 40% 96.1%",
        muted_foreground: "215.4 16.3% 46.9%",
        accent: "210 40% 96.1%",
        accent_foreground: "222.2 47.4% 11.2%",
        destructive: "0 84.2% 60.2%",
        destructive_foreground: "210 40% 98%",
        border: "214.3 31.8% 91.4%",
        input: "214.3 31.8% 91.4%",
        ring: "222.2 84% 4.9%",
    }
}

fn slate_dark() -> BasePalette {
    BasePalette {
        background: "222.2 84% 4.9%",
        foreground: "210 40% 98%",
        primary: "210 40% 98%",
        primary_foreground: "222.2 47.4% 11.2%",
        secondary: "217.2 32.6% 17.5%",
        secondary_foreground: "210 40% 98%",
        muted: "217.2 32.6% 17.5%",
        muted_foreground: "215 20.2% 65.1%",
        accent: "217.2 32.6% 17.5%",
        accent_foreground: "210 40% 98%",
        destructive: "0 62.8% 30.6%",
        destructive_foreground: "210 40% 98%",
        border: "217.2 32.6% 17.5%",
        input: "217.2 32.6% 17.5%",
        ring: "212.7 26.8% 83.9%",
    }
}

fn zinc_light() -> BasePalette {
    BasePalette {
        background: "0 0% 100%",
        foreground: "240 10% 3.9%",
        primary: "240 5.9% 10%",
        primary_foreground: "0 0% 98%",
        secondary: "240 4.8% 95.9%",
        secondary_foreground: "240 5.9% 10%",
        muted: "240 4.8% 95.9%",
        muted_foreground: "240 3.8% 46.1%",
        accent: "240 4.8% 95.9%",
        accent_foreground: "240 5.9% 10%",
        destructive: "0 84.2% 60.2%",
        destructive_foreground: "0 0% 98%",
        border: "240 5.9% 90%",
        input: "240 5.9% 90%",
        ring: "240 10% 3.9%",
    }
}

fn zinc_dark() -> BasePalette {
    BasePalette {
        background: "240 10% 3.9%",
        foreground: "0 0% 98%",
        primary: "0 0% 98%",
        primary_foreground: "240 5.9% 10%",
        secondary: "240 3.7% 15.9%",
        secondary_foreground: "0 0% 98%",
        muted: "240 3.7% 15.9%",
        muted_foreground: "240 5% 64.9%",
        accent: "240 3.7% 15.9%",
        accent_foreground: "0 0% 98%",
        destructive: "0 62.8% 30.6%",
        destructive_foreground: "0 0% 98%",
        border: "240 3.7% 15.9%",
        input: "240 3.7% 15.9%",
        ring: "240 4.9% 83.9%",
    }
}

fn rose_light() -> BasePalette {
    BasePalette {
        primary: "346.8 77.2% 49.8%",
        primary_foreground: "355.7 100% 97.3%",
        ring: "346.8 77.2% 49.8%",
        ..zinc_light()
    }
}

fn rose_dark() -> BasePalette {
    BasePalette {
        background: "20 14.3% 4.1%",
        foreground: "0 0% 95%",
        primary: "346.8 77.2% 49.8%",
        primary_foreground: "355.7 100% 97.3%",
        muted: "0 0% 15%",
        accent: "12 6.5% 15.1%",
        destructive_foreground: "0 85.7% 97.3%",
        ring: "346.8 77.2% 49.8%",
        ..zinc_dark()
    }
}

fn catppuccin_fonts() -> FontSet {
    FontSet {
        sans: Some("Inter, ui-sans-serif, system-ui, sans-serif".into()),
        serif: Some("Lora, ui-serif, Georgia, serif".into()),
        mono: Some("JetBrains Mono, ui-monospace, monospace".into()),
    }
}

fn catppuccin_radii() -> Radius {
    Radius::Scale(IndexMap::from([
        ("sm".to_string(), "6px".to_string()),
        ("md".to_string(), "10px".to_string()),
        ("lg".to_string(), "14px".to_string()),
    ]))
}

/// Catppuccin Latte (light)
fn catppuccin_latte() -> ThemeVariant {
    BasePalette {
        background: "220 23% 95%",
        foreground: "234 16% 35%",
        primary: "220 91% 54%",
        primary_foreground: "220 23% 95%",
        secondary: "266 85% 58%",
        secondary_foreground: "220 23% 95%",
        muted: "220 22% 92%",
        muted_foreground: "233 10% 47%",
        accent: "223 16% 83%",
        accent_foreground: "234 16% 35%",
        destructive: "347 87% 44%",
        destructive_foreground: "220 23% 95%",
        border: "223 16% 83%",
        input: "223 16% 83%",
        ring: "220 91% 54%",
    }
    .variant()
    .with_fonts(catppuccin_fonts())
    .with_radius(catppuccin_radii())
    .with_shadows(&[
        ("sm", "0 1px 2px 0 rgb(0 0 0 / 0.05)"),
        ("default", "0 1px 3px 0 rgb(0 0 0 / 0.1)"),
        ("md", "0 4px 6px -1px rgb(0 0 0 / 0.1)"),
        ("lg", "0 10px 15px -3px rgb(0 0 0 / 0.1)"),
    ])
}

/// Catppuccin Mocha (dark)
fn catppuccin_mocha() -> ThemeVariant {
    BasePalette {
        background: "240 21% 15%",
        foreground: "226 64% 88%",
        primary: "217 92% 76%",
        primary_foreground: "240 21% 15%",
        secondary: "267 84% 81%",
        secondary_foreground: "240 21% 15%",
        muted: "240 21% 12%",
        muted_foreground: "228 24% 72%",
        accent: "237 16% 23%",
        accent_foreground: "226 64% 88%",
        destructive: "343 81% 75%",
        destructive_foreground: "240 21% 15%",
        border: "237 16% 23%",
        input: "237 16% 23%",
        ring: "217 92% 76%",
    }
    .variant()
    .with_fonts(catppuccin_fonts())
    .with_radius(catppuccin_radii())
    .with_shadows(&[
        ("sm", "0 1px 2px 0 rgb(0 0 0 / 0.2)"),
        ("default", "0 1px 3px 0 rgb(0 0 0 / 0.3)"),
        ("md", "0 4px 6px -1px rgb(0 0 0 / 0.3)"),
        ("lg", "0 10px 15px -3px rgb(0 0 0 / 0.3)"),
    ])
}
