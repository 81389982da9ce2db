//! # Item Table
//!
//! Rows stream into pages one at a time. A row that does not fit on the
//! current page moves to the next one, and the column header is emitted again
//! at the top of that page before the row. Row shading alternates on the
//! row's position in the whole item list, so a page break never shifts the
//! stripe pattern.
//!
//! The header is never the last thing on a page: it is only placed when the
//! row after it fits too.

use super::blocks::RenderContext;
use super::{rect_element, text_element, ElementRole, PageCursor};
use crate::model::LineItem;
use crate::style::{Color, TextAlign};
use crate::text::{self, format};

/// One laid-out row before it is placed: wrapped description plus the three
/// formatted numeric cells.
struct PreparedRow {
    lines: Vec<String>,
    cells: [String; 3],
    height: f64,
}

pub fn render_table(ctx: &RenderContext, cursor: &mut PageCursor, items: &[LineItem]) {
    let cfg = ctx.config;
    let first_row = items.first().map(|item| prepare_row(ctx, item).height).unwrap_or(0.0);
    cursor.ensure(cfg.row_height + first_row);
    render_header(ctx, cursor);

    let mut fresh_header = true;
    for (index, item) in items.iter().enumerate() {
        let row = prepare_row(ctx, item);
        if !cursor.fits(row.height) && !fresh_header {
            cursor.new_page();
            log::debug!(
                "Table continues on page {} at row {}",
                cursor.page_index() + 1,
                index + 1
            );
            render_header(ctx, cursor);
        }
        render_row(ctx, cursor, index, &row);
        fresh_header = false;
    }
}

/// Row height grows by one line height per extra description line.
pub fn row_height(ctx: &RenderContext, item: &LineItem) -> f64 {
    prepare_row(ctx, item).height
}

fn prepare_row(ctx: &RenderContext, item: &LineItem) -> PreparedRow {
    let cfg = ctx.config;
    let (_, desc_width) = cfg.column_spans()[0];
    let max_width = (desc_width - 2.0 * cfg.cell_padding).max(0.0);
    // Trailing newlines would wrap into empty lines and grow the row.
    let description = item.description.trim_end();
    let lines: Vec<String> = text::wrap(ctx.fonts, description, max_width, ctx.body_font()).collect();
    let extra = lines.len().saturating_sub(1) as f64;
    PreparedRow {
        height: cfg.row_height + extra * cfg.line_height,
        cells: [
            format::quantity(item.quantity, cfg),
            format::money(item.unit_price, cfg),
            format::money(item.line_total, cfg),
        ],
        lines,
    }
}

fn render_header(ctx: &RenderContext, cursor: &mut PageCursor) {
    let cfg = ctx.config;
    let labels = &cfg.labels;
    let spans = cfg.column_spans();
    let h = cfg.row_height;
    let y = cursor.take(h);
    cursor.push(rect_element(
        cfg.content_x(),
        y,
        cfg.content_width(),
        h,
        cfg.header_fill,
        ElementRole::TableHeader,
    ));

    let font = ctx.body_bold();
    let ty = y + (h - font.size) / 2.0;
    let titles = [
        &labels.description,
        &labels.quantity,
        &labels.unit_price,
        &labels.line_total,
    ];
    for (i, (title, (x, w))) in titles.iter().zip(spans).enumerate() {
        let (anchor, align) = cell_anchor(i, x, w, cfg.cell_padding);
        cursor.push(text_element(
            ctx.fonts,
            title,
            anchor,
            ty,
            font,
            cfg.header_text,
            align,
            ElementRole::TableHeader,
        ));
    }
}

fn render_row(ctx: &RenderContext, cursor: &mut PageCursor, index: usize, row: &PreparedRow) {
    let cfg = ctx.config;
    let spans = cfg.column_spans();
    let y = cursor.take(row.height);
    let fill = if index % 2 == 0 {
        cfg.even_row_fill
    } else {
        cfg.odd_row_fill
    };
    cursor.push(rect_element(
        cfg.content_x(),
        y,
        cfg.content_width(),
        row.height,
        fill,
        ElementRole::TableRow,
    ));

    let font = ctx.body_font();
    let ty = y + (cfg.row_height - font.size) / 2.0;
    for (i, cell) in row.cells.iter().enumerate() {
        let (x, w) = spans[i + 1];
        let (anchor, align) = cell_anchor(i + 1, x, w, cfg.cell_padding);
        cursor.push(text_element(
            ctx.fonts,
            cell,
            anchor,
            ty,
            font,
            Color::BLACK,
            align,
            ElementRole::TableRow,
        ));
    }

    let (x, w) = spans[0];
    let (anchor, align) = cell_anchor(0, x, w, cfg.cell_padding);
    for (i, line) in row.lines.iter().enumerate() {
        if line.is_empty() {
            continue;
        }
        cursor.push(text_element(
            ctx.fonts,
            line,
            anchor,
            ty + i as f64 * cfg.line_height,
            font,
            Color::BLACK,
            align,
            ElementRole::TableRow,
        ));
    }
}

/// Description is left-aligned, numeric columns are right-aligned.
fn cell_anchor(column: usize, x: f64, width: f64, padding: f64) -> (f64, TextAlign) {
    if column == 0 {
        (x + padding, TextAlign::Left)
    } else {
        (x + width - padding, TextAlign::Right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FontContext;
    use crate::layout::{LayoutElement, LayoutPage};
    use crate::letterhead::Branding;
    use crate::model::{Edges, LayoutConfig, PageConfig, PageSize};

    /// 100pt usable band with 18pt rows: header + 4 rows per page.
    fn small_config() -> LayoutConfig {
        LayoutConfig {
            page: PageConfig {
                size: PageSize::Custom {
                    width: 400.0,
                    height: 140.0,
                },
                margin: Edges::uniform(10.0),
            },
            footer_height: 20.0,
            ..LayoutConfig::default()
        }
    }

    fn items(n: usize) -> Vec<LineItem> {
        (1..=n)
            .map(|i| LineItem::new(&format!("Part {i}"), 1.0, 5.0))
            .collect()
    }

    fn render(config: &LayoutConfig, items: &[LineItem], used: f64) -> Vec<LayoutPage> {
        let fonts = FontContext::new();
        let branding = Branding::Generic;
        let ctx = RenderContext {
            config,
            fonts: &fonts,
            branding: &branding,
        };
        let mut cursor = PageCursor::new(config);
        if used > 0.0 {
            cursor.reserve(used);
        }
        render_table(&ctx, &mut cursor, items);
        cursor.finish()
    }

    fn descriptions(page: &LayoutPage) -> Vec<&str> {
        page.texts(ElementRole::TableRow)
            .into_iter()
            .filter(|t| t.starts_with("Part"))
            .collect()
    }

    #[test]
    fn test_header_repeats_on_every_table_page() {
        let cfg = small_config();
        let pages = render(&cfg, &items(10), 0.0);
        assert_eq!(pages.len(), 3);
        for page in &pages {
            assert_eq!(
                page.texts(ElementRole::TableHeader),
                vec!["Description", "Qty", "Unit price", "Total"]
            );
        }
        assert_eq!(descriptions(&pages[0]).len(), 4);
        assert_eq!(descriptions(&pages[1]).len(), 4);
        assert_eq!(descriptions(&pages[2]), vec!["Part 9", "Part 10"]);
    }

    #[test]
    fn test_header_is_first_on_continuation_pages() {
        let pages = render(&small_config(), &items(6), 0.0);
        let first = &pages[1].elements[0];
        assert_eq!(first.role, ElementRole::TableHeader);
        assert_eq!(first.y, 10.0);
    }

    #[test]
    fn test_shading_follows_global_row_index() {
        let cfg = small_config();
        let pages = render(&cfg, &items(10), 0.0);
        let fills: Vec<Color> = pages
            .iter()
            .flat_map(|p| p.elements_with_role(ElementRole::TableRow))
            .filter_map(LayoutElement::fill)
            .collect();
        assert_eq!(fills.len(), 10);
        for (i, fill) in fills.iter().enumerate() {
            let expected = if i % 2 == 0 {
                cfg.even_row_fill
            } else {
                cfg.odd_row_fill
            };
            assert_eq!(*fill, expected, "row {i}");
        }
    }

    #[test]
    fn test_header_moves_with_first_row() {
        // 30pt left: the header fits, header + first row does not.
        let pages = render(&small_config(), &items(1), 70.0);
        assert_eq!(pages.len(), 2);
        assert!(pages[0].texts(ElementRole::TableHeader).is_empty());
        assert_eq!(descriptions(&pages[1]), vec!["Part 1"]);
    }

    #[test]
    fn test_empty_table_still_has_header() {
        let pages = render(&small_config(), &[], 0.0);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].texts(ElementRole::TableHeader).len(), 4);
        assert!(pages[0].texts(ElementRole::TableRow).is_empty());
    }

    #[test]
    fn test_long_description_grows_row() {
        let cfg = small_config();
        let fonts = FontContext::new();
        let branding = Branding::Generic;
        let ctx = RenderContext {
            config: &cfg,
            fonts: &fonts,
            branding: &branding,
        };
        let short = LineItem::new("Oil", 1.0, 1.0);
        assert_eq!(row_height(&ctx, &short), cfg.row_height);

        let long = LineItem::new(&"replace worn brake pads ".repeat(12), 1.0, 1.0);
        let lines = text::wrap(
            &fonts,
            &long.description,
            cfg.column_spans()[0].1 - 2.0 * cfg.cell_padding,
            ctx.body_font(),
        )
        .count();
        assert!(lines > 1);
        assert_eq!(
            row_height(&ctx, &long),
            cfg.row_height + (lines - 1) as f64 * cfg.line_height
        );
    }

    #[test]
    fn test_trailing_newline_does_not_grow_row() {
        let cfg = small_config();
        let fonts = FontContext::new();
        let branding = Branding::Generic;
        let ctx = RenderContext {
            config: &cfg,
            fonts: &fonts,
            branding: &branding,
        };
        assert_eq!(row_height(&ctx, &LineItem::new("Oil\n", 1.0, 1.0)), cfg.row_height);
        assert_eq!(row_height(&ctx, &LineItem::new("Oil \n\n  ", 1.0, 1.0)), cfg.row_height);

        let pages = render(&cfg, &[LineItem::new("Oil\n", 1.0, 1.0)], 0.0);
        let rows: Vec<&LayoutElement> = pages[0]
            .elements_with_role(ElementRole::TableRow)
            .filter(|e| e.fill().is_some())
            .collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].height, cfg.row_height);
    }

    #[test]
    fn test_numeric_cells_are_right_aligned() {
        let cfg = small_config();
        let pages = render(&cfg, &[LineItem::new("Filter", 2.0, 12.5)], 0.0);
        let spans = cfg.column_spans();
        let right = spans[3].0 + spans[3].1 - cfg.cell_padding;
        let total = pages[0]
            .elements_with_role(ElementRole::TableRow)
            .find(|e| e.text() == Some("$25.00"))
            .unwrap();
        assert!((total.x + total.width - right).abs() < 1e-6);
        assert!(pages[0].texts(ElementRole::TableRow).contains(&"2"));
    }
}
