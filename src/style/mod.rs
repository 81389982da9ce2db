//! # Style Primitives
//!
//! The handful of visual properties a quote printout needs: colors, a font
//! descriptor, and horizontal alignment. There is no cascade here. Every
//! block renderer picks its styles straight from the [`LayoutConfig`].
//!
//! [`LayoutConfig`]: crate::model::LayoutConfig

use serde::{Deserialize, Serialize};

/// An RGBA color with components in 0.0-1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64, // 0.0 - 1.0
    pub g: f64,
    pub b: f64,
    #[serde(default = "opaque")]
    pub a: f64,
}

fn opaque() -> f64 {
    1.0
}

impl Color {
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };

    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn hex(hex: &str) -> Self {
        let hex = hex.trim_start_matches('#');
        let (r, g, b) = match hex.len() {
            3 => {
                let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).unwrap_or(0);
                let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).unwrap_or(0);
                let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).unwrap_or(0);
                (r, g, b)
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(0);
                let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(0);
                let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(0);
                (r, g, b)
            }
            _ => (0, 0, 0),
        };
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: 1.0,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

/// The font families the engine can measure and the PDF writer can reference
/// without embedding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontFamily {
    #[default]
    Helvetica,
    /// Fixed-pitch. Every glyph advances 600/1000 em.
    Courier,
}

/// Font family, weight, and size for one text run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontSpec {
    pub family: FontFamily,
    pub bold: bool,
    pub size: f64,
}

impl FontSpec {
    pub fn regular(family: FontFamily, size: f64) -> Self {
        Self {
            family,
            bold: false,
            size,
        }
    }

    pub fn bold(family: FontFamily, size: f64) -> Self {
        Self {
            family,
            bold: true,
            size,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    #[default]
    Left,
    Right,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_six_digits() {
        let c = Color::hex("#ff8000");
        assert!((c.r - 1.0).abs() < 1e-9);
        assert!((c.g - 128.0 / 255.0).abs() < 1e-9);
        assert_eq!(c.b, 0.0);
    }

    #[test]
    fn test_hex_three_digits_expands() {
        assert_eq!(Color::hex("fff"), Color::WHITE);
    }

    #[test]
    fn test_hex_garbage_is_black() {
        assert_eq!(Color::hex("nope"), Color::BLACK);
    }

    #[test]
    fn test_color_alpha_defaults_to_opaque() {
        let c: Color = serde_json::from_str(r#"{"r":0.5,"g":0.5,"b":0.5}"#).unwrap();
        assert_eq!(c.a, 1.0);
    }
}
