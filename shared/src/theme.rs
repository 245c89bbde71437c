//! Wheel themes
//!
//! One parameterized look instead of per-variant page copies. Presets are
//! looked up by name so a preference file only needs to store the name.

use serde::{Deserialize, Serialize};

use crate::palette::{Palette, Rgb};

/// Name of the theme used when a stored name is unknown
pub const DEFAULT_THEME: &str = "fll_navy";

/// Every color the wheel and its chrome need
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    /// Page background, also used for the wheel hub
    pub background: Rgb,
    /// Primary text on the background
    pub foreground: Rgb,
    /// Slice colors
    pub palette: Palette,
    /// Fill of the focused (winning) slice
    pub highlight: Rgb,
    /// Fixed pointer arrow
    pub pointer: Rgb,
    pub hub: Rgb,
    /// Stroke between slices
    pub slice_border: Rgb,
    /// Buttons and emphasis
    pub accent: Rgb,
}

impl Default for Theme {
    fn default() -> Self {
        Self::fll_navy()
    }
}

impl Theme {
    /// Deep navy page with the four brick colors
    pub fn fll_navy() -> Self {
        let navy = Rgb::new(0x00, 0x11, 0x2A);
        Self {
            name: "fll_navy".to_string(),
            background: navy,
            foreground: Rgb::WHITE,
            palette: Palette::new([
                Rgb::new(0xD3, 0x2F, 0x2F),
                Rgb::new(0x19, 0x76, 0xD2),
                Rgb::new(0xFB, 0xC0, 0x2D),
                Rgb::new(0x38, 0x8E, 0x3C),
            ]),
            highlight: Rgb::new(0xFF, 0xD5, 0x4F),
            pointer: Rgb::new(0xFF, 0x52, 0x52),
            hub: navy,
            slice_border: Rgb::WHITE,
            accent: Rgb::new(0xFB, 0xC0, 0x2D),
        }
    }

    /// Light page with muted slices
    pub fn studio_light() -> Self {
        let paper = Rgb::new(0xF5, 0xF5, 0xF0);
        Self {
            name: "studio_light".to_string(),
            background: paper,
            foreground: Rgb::new(0x21, 0x21, 0x21),
            palette: Palette::new([
                Rgb::new(0xE5, 0x73, 0x73),
                Rgb::new(0x64, 0xB5, 0xF6),
                Rgb::new(0xFF, 0xD5, 0x4F),
                Rgb::new(0x81, 0xC7, 0x84),
            ]),
            highlight: Rgb::new(0xFF, 0x8F, 0x00),
            pointer: Rgb::new(0x37, 0x47, 0x4F),
            hub: paper,
            slice_border: Rgb::new(0x42, 0x42, 0x42),
            accent: Rgb::new(0x1E, 0x88, 0xE5),
        }
    }

    /// Black page with saturated neon slices
    pub fn arcade() -> Self {
        let black = Rgb::new(0x0B, 0x0B, 0x12);
        Self {
            name: "arcade".to_string(),
            background: black,
            foreground: Rgb::new(0xE0, 0xF7, 0xFA),
            palette: Palette::new([
                Rgb::new(0xFF, 0x40, 0x81),
                Rgb::new(0x00, 0xE5, 0xFF),
                Rgb::new(0xC6, 0xFF, 0x00),
                Rgb::new(0x7C, 0x4D, 0xFF),
            ]),
            highlight: Rgb::WHITE,
            pointer: Rgb::new(0xFF, 0xEA, 0x00),
            hub: black,
            slice_border: black,
            accent: Rgb::new(0xFF, 0x40, 0x81),
        }
    }

    /// All built-in presets, default first
    pub fn presets() -> Vec<Theme> {
        vec![Self::fll_navy(), Self::studio_light(), Self::arcade()]
    }

    /// Look up a preset by name
    pub fn preset(name: &str) -> Option<Theme> {
        Self::presets().into_iter().find(|t| t.name == name)
    }

    /// Look up a preset by name, falling back to the default theme
    pub fn preset_or_default(name: &str) -> Theme {
        Self::preset(name).unwrap_or_else(|| {
            log::warn!("Unknown theme {:?}, using {}", name, DEFAULT_THEME);
            Self::default()
        })
    }

    /// Human-readable name for pickers
    pub fn display_name(&self) -> String {
        self.name
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_lookup() {
        assert_eq!(Theme::preset("arcade").unwrap().name, "arcade");
        assert!(Theme::preset("missing").is_none());
        assert_eq!(Theme::preset_or_default("missing"), Theme::fll_navy());
    }

    #[test]
    fn test_preset_names_unique() {
        let presets = Theme::presets();
        for (i, a) in presets.iter().enumerate() {
            for b in &presets[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
        assert_eq!(presets[0].name, DEFAULT_THEME);
    }

    #[test]
    fn test_display_name() {
        assert_eq!(Theme::studio_light().display_name(), "Studio Light");
    }

    #[test]
    fn test_theme_toml_uses_hex_strings() {
        let text = toml::to_string(&Theme::fll_navy()).unwrap();
        assert!(text.contains("background = \"#00112A\""));
        let back: Theme = toml::from_str(&text).unwrap();
        assert_eq!(back, Theme::fll_navy());
    }
}
