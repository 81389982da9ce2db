//! # Quotepage
//!
//! A page-native layout engine for quotes and estimates.
//!
//! A quote's line-item list has no fixed length, so the printout does not
//! either. Instead of drawing onto one tall canvas and slicing it afterwards,
//! **content flows into pages**: every block asks for room before it places
//! anything, the item table re-emits its header on each continuation page,
//! and row shading keeps its rhythm across breaks. Once the last page is
//! closed, a second pass stamps every footer with "Page i of N".
//!
//! ## Architecture
//!
//! ```text
//! Input (JSON/API)
//!       ↓
//!   [model]       Document, line items, summary, layout config
//!       ↓
//!   [letterhead]  Optional organization branding, resolved up front
//!       ↓
//!   [layout]      Page cursor, block renderers, footer pass
//!       ↓
//!   [pdf]         Serialize to PDF bytes
//! ```

pub mod error;
pub mod font;
pub mod layout;
pub mod letterhead;
pub mod logo;
pub mod model;
pub mod pdf;
pub mod style;
pub mod text;

pub use error::QuoteError;
pub use layout::{LayoutEngine, LayoutPage, RenderOptions};
pub use letterhead::{Branding, Letterhead, LetterheadSource};
pub use model::{Document, LayoutConfig};

use pdf::{PdfMetadata, PdfWriter};

/// Lay out a document into pages, footers included.
pub fn layout(document: &Document, branding: &Branding, options: &RenderOptions) -> Vec<LayoutPage> {
    LayoutEngine::new().layout(document, branding, options)
}

/// Render a document to PDF bytes.
///
/// This is the primary entry point. The same document, branding, and options
/// always produce the same bytes.
pub fn render_pdf(document: &Document, branding: &Branding, options: &RenderOptions) -> Vec<u8> {
    let pages = layout(document, branding, options);
    let metadata = PdfMetadata {
        title: Some(format!("{} #{}", options.config.labels.quote, document.id)),
        author: match branding {
            Branding::Organization(org) if !org.letterhead.name.trim().is_empty() => {
                Some(org.letterhead.name.clone())
            }
            _ => None,
        },
    };
    PdfWriter::new().write(&pages, &metadata)
}

/// Lay out a document and write the pages as pretty-printed JSON.
pub fn render_layout_json(
    document: &Document,
    branding: &Branding,
    options: &RenderOptions,
) -> Result<Vec<u8>, QuoteError> {
    let pages = layout(document, branding, options);
    serde_json::to_vec_pretty(&pages).map_err(QuoteError::Serialize)
}

/// Render a document described as JSON to PDF bytes.
pub fn render_json(
    json: &str,
    branding: &Branding,
    options: &RenderOptions,
) -> Result<Vec<u8>, QuoteError> {
    let document: Document = serde_json::from_str(json)?;
    Ok(render_pdf(&document, branding, options))
}
