//! Engine configuration: page geometry, vertical rhythm, type sizes, number
//! and date formatting, and every caption the printout shows.
//!
//! Every field has a default, so `{}` is a valid config file and a partial
//! file only overrides what it names.

use serde::{Deserialize, Serialize};

use super::PageConfig;
use crate::style::{Color, FontFamily};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    pub page: PageConfig,
    /// Band above the bottom margin reserved for the footer stamp.
    pub footer_height: f64,
    /// Height of a single-line table row (header and data rows).
    pub row_height: f64,
    /// Extra height per additional wrapped line, in paragraphs and table cells.
    pub line_height: f64,
    /// Vertical increment per label/value pair.
    pub field_height: f64,
    /// Space inserted before each block after the first.
    pub section_gap: f64,
    pub cell_padding: f64,

    pub font_family: FontFamily,
    pub title_size: f64,
    pub heading_size: f64,
    pub body_size: f64,
    pub small_size: f64,

    /// Box the letterhead logo is scaled into, keeping its aspect ratio.
    pub logo_width: f64,
    pub logo_height: f64,

    /// Relative widths of Description, Qty, Unit price, Total.
    pub columns: [f64; 4],

    pub header_fill: Color,
    pub header_text: Color,
    pub even_row_fill: Color,
    pub odd_row_fill: Color,
    pub total_fill: Color,
    pub muted_text: Color,
    pub rule_color: Color,

    pub currency_symbol: String,
    pub thousands_separator: String,
    pub decimal_separator: String,
    /// `chrono` strftime pattern for document dates.
    pub date_format: String,
    /// `chrono` strftime pattern for the "generated at" footer stamp.
    pub timestamp_format: String,
    /// Footer page label. `{page}` is 1-based, `{pages}` is the page count.
    pub page_label: String,
    /// Heading used when no letterhead is available.
    pub generic_title: String,
    pub labels: Labels,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page: PageConfig::default(),
            footer_height: 36.0,
            row_height: 18.0,
            line_height: 12.0,
            field_height: 15.0,
            section_gap: 14.0,
            cell_padding: 4.0,
            font_family: FontFamily::Helvetica,
            title_size: 18.0,
            heading_size: 11.0,
            body_size: 9.0,
            small_size: 7.5,
            logo_width: 120.0,
            logo_height: 48.0,
            columns: [0.52, 0.12, 0.18, 0.18],
            header_fill: Color::hex("#2f3b4c"),
            header_text: Color::WHITE,
            even_row_fill: Color::hex("#f2f4f7"),
            odd_row_fill: Color::WHITE,
            total_fill: Color::hex("#dfe6ee"),
            muted_text: Color::hex("#666666"),
            rule_color: Color::hex("#c8ced6"),
            currency_symbol: "$".to_string(),
            thousands_separator: ",".to_string(),
            decimal_separator: ".".to_string(),
            date_format: "%Y-%m-%d".to_string(),
            timestamp_format: "%Y-%m-%d %H:%M".to_string(),
            page_label: "Page {page} of {pages}".to_string(),
            generic_title: "Quote".to_string(),
            labels: Labels::default(),
        }
    }
}

impl LayoutConfig {
    /// Page (width, height) in points.
    pub fn page_dimensions(&self) -> (f64, f64) {
        self.page.size.dimensions()
    }

    pub fn content_x(&self) -> f64 {
        self.page.margin.left
    }

    pub fn content_width(&self) -> f64 {
        let (page_w, _) = self.page_dimensions();
        page_w - self.page.margin.horizontal()
    }

    /// Absolute x of each column's left edge and its width.
    pub fn column_spans(&self) -> [(f64, f64); 4] {
        let total: f64 = self.columns.iter().sum();
        let width = self.content_width();
        let mut x = self.content_x();
        let mut spans = [(0.0, 0.0); 4];
        for (span, fraction) in spans.iter_mut().zip(self.columns.iter()) {
            let w = if total > 0.0 {
                width * fraction / total
            } else {
                width / 4.0
            };
            *span = (x, w);
            x += w;
        }
        spans
    }

    /// Substitute the page placeholders in the footer label.
    pub fn format_page_label(&self, page: usize, pages: usize) -> String {
        self.page_label
            .replace("{page}", &page.to_string())
            .replace("{pages}", &pages.to_string())
    }
}

/// Captions printed next to values. Override them to localize the printout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Labels {
    pub quote: String,
    pub status: String,
    pub created: String,
    pub expires: String,
    pub client: String,
    pub name: String,
    pub tax_id: String,
    pub phone: String,
    pub email: String,
    pub vehicle: String,
    pub model: String,
    pub year: String,
    pub plate: String,
    pub description: String,
    pub quantity: String,
    pub unit_price: String,
    pub line_total: String,
    pub subtotal: String,
    pub discount: String,
    pub total: String,
    pub notes: String,
    pub generated: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            quote: "Quote".to_string(),
            status: "Status".to_string(),
            created: "Date".to_string(),
            expires: "Valid until".to_string(),
            client: "Client".to_string(),
            name: "Name".to_string(),
            tax_id: "Tax ID".to_string(),
            phone: "Phone".to_string(),
            email: "Email".to_string(),
            vehicle: "Vehicle".to_string(),
            model: "Model".to_string(),
            year: "Year".to_string(),
            plate: "Plate".to_string(),
            description: "Description".to_string(),
            quantity: "Qty".to_string(),
            unit_price: "Unit price".to_string(),
            line_total: "Total".to_string(),
            subtotal: "Subtotal".to_string(),
            discount: "Discount".to_string(),
            total: "Total".to_string(),
            notes: "Notes".to_string(),
            generated: "Generated".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_is_default() {
        let cfg: LayoutConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, LayoutConfig::default());
    }

    #[test]
    fn test_partial_json_overrides_only_named_fields() {
        let cfg: LayoutConfig = serde_json::from_str(
            r#"{ "rowHeight": 24, "labels": { "total": "Total geral" } }"#,
        )
        .unwrap();
        assert_eq!(cfg.row_height, 24.0);
        assert_eq!(cfg.labels.total, "Total geral");
        assert_eq!(cfg.labels.subtotal, "Subtotal");
        assert_eq!(cfg.line_height, LayoutConfig::default().line_height);
    }

    #[test]
    fn test_column_spans_cover_content_width() {
        let cfg = LayoutConfig::default();
        let spans = cfg.column_spans();
        assert!((spans[0].0 - cfg.content_x()).abs() < 1e-9);
        let (last_x, last_w) = spans[3];
        assert!((last_x + last_w - (cfg.content_x() + cfg.content_width())).abs() < 1e-6);
    }

    #[test]
    fn test_page_label_placeholders() {
        let cfg = LayoutConfig::default();
        assert_eq!(cfg.format_page_label(2, 3), "Page 2 of 3");
    }
}
