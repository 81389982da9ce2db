//! # Font Management
//!
//! Text measurement against the standard PDF fonts. The printout only uses
//! Helvetica and Courier in regular and bold, which every PDF reader ships,
//! so nothing is embedded and measurement needs no font files.

pub mod encoding;
pub mod metrics;

pub use metrics::StandardFontMetrics;

use crate::style::{FontFamily, FontSpec};

/// The standard PDF fonts the engine can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
    Courier,
    CourierBold,
}

impl StandardFont {
    /// The PDF name for this font.
    pub fn pdf_name(&self) -> &'static str {
        match self {
            Self::Helvetica => "Helvetica",
            Self::HelveticaBold => "Helvetica-Bold",
            Self::Courier => "Courier",
            Self::CourierBold => "Courier-Bold",
        }
    }

    pub fn metrics(&self) -> &'static StandardFontMetrics {
        match self {
            Self::Helvetica => &metrics::HELVETICA,
            Self::HelveticaBold => &metrics::HELVETICA_BOLD,
            Self::Courier | Self::CourierBold => &metrics::COURIER,
        }
    }

    pub fn for_spec(font: &FontSpec) -> Self {
        match (font.family, font.bold) {
            (FontFamily::Helvetica, false) => Self::Helvetica,
            (FontFamily::Helvetica, true) => Self::HelveticaBold,
            (FontFamily::Courier, false) => Self::Courier,
            (FontFamily::Courier, true) => Self::CourierBold,
        }
    }
}

/// Shared font context used by layout and PDF serialization.
#[derive(Debug, Clone, Copy, Default)]
pub struct FontContext;

impl FontContext {
    pub fn new() -> Self {
        Self
    }

    /// Get the advance width of a single character in points.
    pub fn char_width(&self, ch: char, font: &FontSpec) -> f64 {
        StandardFont::for_spec(font)
            .metrics()
            .char_width(ch, font.size)
    }

    /// Measure the width of a string in points.
    pub fn measure_string(&self, text: &str, font: &FontSpec) -> f64 {
        StandardFont::for_spec(font)
            .metrics()
            .measure_string(text, font.size)
    }

    /// Distance from the top of a line box to the baseline, in points.
    pub fn ascent(&self, font: &FontSpec) -> f64 {
        StandardFont::for_spec(font).metrics().ascender as f64 * font.size / 1000.0
    }
}
