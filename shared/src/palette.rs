//! Slice colors and label contrast
//!
//! Colors are a pure function of slice position, so the wheel and the entry
//! chips agree every time the list is redrawn.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Luminance above which labels switch to dark text
pub const CONTRAST_THRESHOLD: f64 = 160.0;

/// Error returned when a hex color string is malformed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid hex color: {0:?}")]
pub struct ParseColorError(pub String);

/// An opaque 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` or `#RGB` (the leading `#` is optional)
    pub fn from_hex(hex: &str) -> Result<Self, ParseColorError> {
        let err = || ParseColorError(hex.to_string());
        let digits = hex.trim().trim_start_matches('#');
        if !digits.is_ascii() {
            return Err(err());
        }

        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| err());
        match digits.len() {
            6 => Ok(Self::new(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            3 => {
                // #abc expands to #aabbcc
                let short = |i: usize| channel(&digits[i..i + 1]).map(|v| v * 17);
                Ok(Self::new(short(0)?, short(1)?, short(2)?))
            }
            _ => Err(err()),
        }
    }

    /// Perceived luminance on the 0-255 channel scale
    pub fn luminance(&self) -> f64 {
        // Integer weights (x10 000) keep grays exact at the threshold
        let weighted = 2126 * self.r as u32 + 7152 * self.g as u32 + 722 * self.b as u32;
        weighted as f64 / 10_000.0
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Rgb {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_string()
    }
}

/// Four slice colors cycled by position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub colors: [Rgb; 4],
}

impl Palette {
    pub const fn new(colors: [Rgb; 4]) -> Self {
        Self { colors }
    }

    /// Color of the slice at `index`
    ///
    /// The cycle is `index mod 4`. The total count does not shift the cycle;
    /// it is accepted so callers can pass the full slice context.
    pub fn color_for(&self, index: usize, _total_count: usize) -> Rgb {
        self.colors[index % self.colors.len()]
    }
}

/// Dark or light label color for legibility over `background`
pub fn contrast_text_color(background: Rgb) -> Rgb {
    if background.luminance() > CONTRAST_THRESHOLD {
        Rgb::BLACK
    } else {
        Rgb::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lego() -> Palette {
        Palette::new([
            Rgb::new(0xD3, 0x2F, 0x2F),
            Rgb::new(0x19, 0x76, 0xD2),
            Rgb::new(0xFB, 0xC0, 0x2D),
            Rgb::new(0x38, 0x8E, 0x3C),
        ])
    }

    #[test]
    fn test_hex_parsing() {
        assert_eq!(Rgb::from_hex("#D32F2F").unwrap(), Rgb::new(211, 47, 47));
        assert_eq!(Rgb::from_hex("00112a").unwrap(), Rgb::new(0, 17, 42));
        assert_eq!(Rgb::from_hex("#fff").unwrap(), Rgb::WHITE);
        assert!(Rgb::from_hex("#12345").is_err());
        assert!(Rgb::from_hex("#GGGGGG").is_err());
        assert!(Rgb::from_hex("#ééé").is_err());
    }

    #[test]
    fn test_hex_display() {
        assert_eq!(Rgb::new(0, 17, 42).to_string(), "#00112A");
    }

    #[test]
    fn test_color_cycle_is_stable() {
        let palette = lego();
        for n in 1..12 {
            for i in 0..n {
                assert_eq!(palette.color_for(i, n), palette.color_for(i, n));
                assert_eq!(palette.color_for(i, n), palette.color_for(i + 4, n));
            }
        }
        assert_eq!(palette.color_for(5, 6), palette.colors[1]);
    }

    #[test]
    fn test_contrast_extremes() {
        assert_eq!(contrast_text_color(Rgb::from_hex("#FFFFFF").unwrap()), Rgb::BLACK);
        assert_eq!(contrast_text_color(Rgb::from_hex("#000000").unwrap()), Rgb::WHITE);
    }

    #[test]
    fn test_contrast_threshold_grays() {
        // Gray channels weigh to exactly the channel value
        assert_eq!(contrast_text_color(Rgb::new(158, 158, 158)), Rgb::WHITE);
        assert_eq!(contrast_text_color(Rgb::new(162, 162, 162)), Rgb::BLACK);

        // Exactly on the threshold is not above it
        assert_eq!(Rgb::new(160, 160, 160).luminance(), CONTRAST_THRESHOLD);
        assert_eq!(contrast_text_color(Rgb::new(160, 160, 160)), Rgb::WHITE);
        assert_eq!(contrast_text_color(Rgb::new(161, 161, 161)), Rgb::BLACK);
    }

    #[test]
    fn test_contrast_on_palette() {
        let palette = lego();
        // Yellow slice gets dark text, the rest light
        assert_eq!(contrast_text_color(palette.colors[2]), Rgb::BLACK);
        assert_eq!(contrast_text_color(palette.colors[0]), Rgb::WHITE);
        assert_eq!(contrast_text_color(palette.colors[1]), Rgb::WHITE);
    }
}
