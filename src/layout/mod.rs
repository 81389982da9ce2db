//! # Page-Aware Layout Engine
//!
//! A quote never exists on an infinite canvas. Layout runs in two phases:
//!
//! 1. **Content.** A [`PageCursor`] opens a page with known usable height.
//!    Each [`Block`] asks the cursor for room before placing anything. When
//!    the next unit does not fit, the cursor closes the page and opens
//!    another. The item table places one row at a time and re-emits its
//!    header at the top of every continuation page.
//! 2. **Footer.** Only now is the page count known, so a pure stamping pass
//!    maps over the finished pages and adds "Page i of N" plus the
//!    organization contact line to each.
//!
//! Coordinates are points from the top-left corner of the page.

pub mod blocks;
pub mod cursor;
pub mod footer;
pub mod table;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::font::FontContext;
use crate::logo::Logo;
use crate::letterhead::Branding;
use crate::model::{Document, LayoutConfig};
use crate::style::{Color, FontSpec, TextAlign};

pub use blocks::{Block, RenderContext};
pub use cursor::PageCursor;
pub use footer::FooterStamp;

/// A fully laid-out page ready for serialization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutPage {
    pub width: f64,
    pub height: f64,
    /// In placement order.
    pub elements: Vec<LayoutElement>,
}

impl LayoutPage {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            elements: Vec::new(),
        }
    }

    /// Elements produced by one part of the document.
    pub fn elements_with_role(&self, role: ElementRole) -> impl Iterator<Item = &LayoutElement> {
        self.elements.iter().filter(move |e| e.role == role)
    }

    /// Text of every text element with the given role, in placement order.
    pub fn texts(&self, role: ElementRole) -> Vec<&str> {
        self.elements_with_role(role)
            .filter_map(LayoutElement::text)
            .collect()
    }
}

/// A positioned drawing primitive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutElement {
    /// Absolute position on the page (top-left corner).
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub role: ElementRole,
    pub draw: DrawCommand,
}

impl LayoutElement {
    /// A single line of text whose box starts at (`x`, `y`).
    pub fn text(&self) -> Option<&str> {
        match &self.draw {
            DrawCommand::Text { text, .. } => Some(text),
            _ => None,
        }
    }

    pub fn fill(&self) -> Option<Color> {
        match &self.draw {
            DrawCommand::Rect { fill } => Some(*fill),
            _ => None,
        }
    }
}

/// Which part of the document placed an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ElementRole {
    Letterhead,
    Heading,
    Field,
    TableHeader,
    TableRow,
    Summary,
    Notes,
    Footer,
}

/// What to actually draw for this element.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum DrawCommand {
    /// One line of text. The baseline sits one font ascent below `y`.
    Text {
        text: String,
        font: FontSpec,
        color: Color,
    },
    /// A filled rectangle (row shading, header band, rules).
    Rect { fill: Color },
    Image { image: Logo },
}

/// Everything a render needs besides the document itself.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub config: LayoutConfig,
    /// Printed in the footer when set. Nothing else in the output depends on time.
    pub generated_at: Option<NaiveDateTime>,
}

/// The main layout engine. Holds no per-render state.
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    fonts: FontContext,
}

impl LayoutEngine {
    pub fn new() -> Self {
        Self {
            fonts: FontContext::new(),
        }
    }

    /// Lay out a document into pages, footers included.
    pub fn layout(
        &self,
        document: &Document,
        branding: &Branding,
        options: &RenderOptions,
    ) -> Vec<LayoutPage> {
        let ctx = RenderContext {
            config: &options.config,
            fonts: &self.fonts,
            branding,
        };

        if !document.summary.is_consistent() {
            log::warn!(
                "Quote {}: subtotal {} - discount {} != total {}; rendering as given",
                document.id,
                document.summary.subtotal,
                document.summary.discount,
                document.summary.total
            );
        }

        let pages = self.layout_content(document, &ctx);
        log::debug!("Content phase finished with {} page(s)", pages.len());

        let stamp = FooterStamp::new(branding, options);
        let pages = footer::stamp_footers(pages, &stamp, &ctx);
        log::info!(
            "Laid out quote {} ({} items) on {} page(s)",
            document.id,
            document.items.len(),
            pages.len()
        );
        pages
    }

    /// Phase one: every block in order, pages allocated on overflow.
    fn layout_content(&self, document: &Document, ctx: &RenderContext) -> Vec<LayoutPage> {
        let mut cursor = PageCursor::new(ctx.config);
        for (i, block) in Block::sequence(document).iter().enumerate() {
            if i > 0 {
                cursor.skip(ctx.config.section_gap);
            }
            block.render(ctx, &mut cursor);
        }
        cursor.finish()
    }
}

/// Build a single-line text element. `x` is the left edge for
/// [`TextAlign::Left`] and the right edge for [`TextAlign::Right`].
#[allow(clippy::too_many_arguments)]
pub(crate) fn text_element(
    fonts: &FontContext,
    text: &str,
    x: f64,
    y: f64,
    font: FontSpec,
    color: Color,
    align: TextAlign,
    role: ElementRole,
) -> LayoutElement {
    let width = fonts.measure_string(text, &font);
    let x = match align {
        TextAlign::Left => x,
        TextAlign::Right => x - width,
    };
    LayoutElement {
        x,
        y,
        width,
        height: font.size,
        role,
        draw: DrawCommand::Text {
            text: text.to_string(),
            font,
            color,
        },
    }
}

pub(crate) fn rect_element(
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    fill: Color,
    role: ElementRole,
) -> LayoutElement {
    LayoutElement {
        x,
        y,
        width,
        height,
        role,
        draw: DrawCommand::Rect { fill },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FinancialSummary, LineItem, Party, Vehicle};
    use chrono::NaiveDate;

    fn doc(items: usize) -> Document {
        Document {
            id: "Q-1".to_string(),
            status: "Open".to_string(),
            created_at: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            expires_at: None,
            party: Party {
                name: "Client".to_string(),
                ..Party::default()
            },
            vehicle: Vehicle {
                make: "Fiat".to_string(),
                model: "Uno".to_string(),
                ..Vehicle::default()
            },
            items: (0..items)
                .map(|i| LineItem::new(&format!("Item {i}"), 1.0, 10.0))
                .collect(),
            summary: FinancialSummary {
                subtotal: 10.0 * items as f64,
                discount: 0.0,
                total: 10.0 * items as f64,
            },
            notes: None,
        }
    }

    #[test]
    fn test_right_aligned_text_ends_at_x() {
        let fonts = FontContext::new();
        let font = FontSpec::regular(crate::style::FontFamily::Helvetica, 10.0);
        let el = text_element(
            &fonts,
            "123.00",
            300.0,
            50.0,
            font,
            Color::BLACK,
            TextAlign::Right,
            ElementRole::TableRow,
        );
        assert!((el.x + el.width - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_unencodable_text_is_measured_as_written() {
        let fonts = FontContext::new();
        let font = FontSpec::bold(crate::style::FontFamily::Helvetica, 10.0);
        let el = text_element(
            &fonts,
            "Total \u{65e5}\u{672c}",
            300.0,
            50.0,
            font,
            Color::BLACK,
            TextAlign::Right,
            ElementRole::Summary,
        );
        let written = fonts.measure_string("Total ??", &font);
        assert!((el.width - written).abs() < 1e-9);
        assert!((el.x - (300.0 - written)).abs() < 1e-9);
    }

    #[test]
    fn test_layout_is_idempotent() {
        let engine = LayoutEngine::new();
        let options = RenderOptions::default();
        let d = doc(60);
        let a = engine.layout(&d, &Branding::Generic, &options);
        let b = engine.layout(&d, &Branding::Generic, &options);
        assert_eq!(a, b);
        assert!(a.len() > 1);
    }

    #[test]
    fn test_pages_use_configured_size() {
        let engine = LayoutEngine::new();
        let mut options = RenderOptions::default();
        options.config.page.size = crate::model::PageSize::Letter;
        let pages = engine.layout(&doc(1), &Branding::Generic, &options);
        assert_eq!((pages[0].width, pages[0].height), (612.0, 792.0));
    }

    #[test]
    fn test_inconsistent_summary_renders_as_given() {
        let engine = LayoutEngine::new();
        let mut d = doc(2);
        d.summary.total = 999.0;
        let pages = engine.layout(&d, &Branding::Generic, &RenderOptions::default());
        let summary = pages.last().unwrap().texts(ElementRole::Summary);
        assert!(summary.contains(&"$999.00"), "{summary:?}");
    }
}
