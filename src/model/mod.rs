//! # Document Model
//!
//! The input representation for the layout engine. A [`Document`] is one
//! quote/estimate as the surrounding application already loaded and validated
//! it: who it is for, which vehicle it concerns, the priced line items, and
//! the totals. The engine only reads it.
//!
//! Monetary values arrive pre-computed. A line total is never recomputed from
//! quantity and unit price, and the summary is rendered exactly as given.

pub mod config;

pub use config::{Labels, LayoutConfig};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A complete quote ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Human-facing identifier, e.g. "2026-0042".
    pub id: String,
    /// Status label as the application names it ("Open", "Approved", ...).
    pub status: String,
    pub created_at: NaiveDate,
    #[serde(default)]
    pub expires_at: Option<NaiveDate>,
    pub party: Party,
    pub vehicle: Vehicle,
    /// Display order is insertion order.
    #[serde(default)]
    pub items: Vec<LineItem>,
    pub summary: FinancialSummary,
    #[serde(default)]
    pub notes: Option<String>,
}

/// The client the quote is addressed to.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    pub name: String,
    #[serde(default)]
    pub tax_id: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// The asset the work is quoted for.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub make: String,
    pub model: String,
    #[serde(default)]
    pub plate: Option<String>,
    #[serde(default)]
    pub year: Option<u16>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
    /// quantity × unit price, computed by the caller.
    pub line_total: f64,
}

impl LineItem {
    /// Build an item whose line total is the plain product.
    pub fn new(description: &str, quantity: f64, unit_price: f64) -> Self {
        Self {
            description: description.to_string(),
            quantity,
            unit_price,
            line_total: quantity * unit_price,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    pub subtotal: f64,
    #[serde(default)]
    pub discount: f64,
    pub total: f64,
}

impl FinancialSummary {
    /// Whether `subtotal - discount` matches `total` to the cent.
    ///
    /// Informational only: the engine renders inconsistent summaries as given.
    pub fn is_consistent(&self) -> bool {
        ((self.subtotal - self.discount) - self.total).abs() < 0.005
    }
}

/// Page geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub size: PageSize,
    /// Page margins in points (1/72 inch).
    pub margin: Edges,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            size: PageSize::A4,
            margin: Edges::uniform(40.0),
        }
    }
}

/// Standard page sizes in points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum PageSize {
    #[default]
    A4,
    A5,
    Letter,
    Legal,
    Custom {
        width: f64,
        height: f64,
    },
}

impl PageSize {
    /// Returns (width, height) in points.
    pub fn dimensions(&self) -> (f64, f64) {
        match self {
            PageSize::A4 => (595.28, 841.89),
            PageSize::A5 => (419.53, 595.28),
            PageSize::Letter => (612.0, 792.0),
            PageSize::Legal => (612.0, 1008.0),
            PageSize::Custom { width, height } => (*width, *height),
        }
    }
}

/// Edge values (top, right, bottom, left) used for margins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Edges {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Edges {
    pub fn uniform(v: f64) -> Self {
        Self {
            top: v,
            right: v,
            bottom: v,
            left: v,
        }
    }

    pub fn symmetric(vertical: f64, horizontal: f64) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_item_new_multiplies() {
        let item = LineItem::new("Oil filter", 2.0, 12.5);
        assert_eq!(item.line_total, 25.0);
    }

    #[test]
    fn test_summary_consistency_is_tolerant_to_rounding() {
        let ok = FinancialSummary {
            subtotal: 100.10,
            discount: 0.10,
            total: 100.0,
        };
        assert!(ok.is_consistent());
        let off = FinancialSummary {
            subtotal: 100.0,
            discount: 10.0,
            total: 95.0,
        };
        assert!(!off.is_consistent());
    }

    #[test]
    fn test_document_from_camel_case_json() {
        let json = r#"{
            "id": "2026-0007",
            "status": "Open",
            "createdAt": "2026-03-01",
            "party": { "name": "Ana Souza", "taxId": "123" },
            "vehicle": { "make": "Fiat", "model": "Uno" },
            "items": [
                { "description": "Brake pads", "quantity": 1, "unitPrice": 80, "lineTotal": 80 }
            ],
            "summary": { "subtotal": 80, "total": 80 }
        }"#;
        let doc: Document = serde_json::from_str(json).unwrap();
        assert_eq!(doc.party.tax_id.as_deref(), Some("123"));
        assert_eq!(doc.expires_at, None);
        assert_eq!(doc.summary.discount, 0.0);
        assert_eq!(doc.items.len(), 1);
    }

    #[test]
    fn test_page_config_defaults_to_a4() {
        let cfg: PageConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.size.dimensions(), (595.28, 841.89));
        assert_eq!(cfg.margin, Edges::uniform(40.0));
    }
}
