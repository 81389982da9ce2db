//! Block renderers.
//!
//! A quote is a fixed sequence of blocks. Each block kind is one variant of
//! [`Block`], and [`Block::render`] is the only way a block reaches the page:
//! it reads the shared [`RenderContext`], asks the cursor for room, and pushes
//! positioned elements.

use super::{rect_element, table, text_element, DrawCommand, ElementRole, LayoutElement, PageCursor};
use crate::font::FontContext;
use crate::letterhead::Branding;
use crate::model::{Document, FinancialSummary, LayoutConfig, LineItem, Party, Vehicle};
use crate::style::{Color, FontSpec, TextAlign};
use crate::text::{self, format};

/// Read-only state shared by every renderer during one layout.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub config: &'a LayoutConfig,
    pub fonts: &'a FontContext,
    pub branding: &'a Branding,
}

impl RenderContext<'_> {
    pub fn body_font(&self) -> FontSpec {
        FontSpec::regular(self.config.font_family, self.config.body_size)
    }

    pub fn body_bold(&self) -> FontSpec {
        FontSpec::bold(self.config.font_family, self.config.body_size)
    }

    fn heading_height(&self) -> f64 {
        self.config.heading_size * 1.6
    }
}

/// One typed unit of document content.
#[derive(Debug, Clone, Copy)]
pub enum Block<'a> {
    /// Branding header, document title, status and dates.
    Metadata(&'a Document),
    Party {
        party: &'a Party,
        vehicle: &'a Vehicle,
    },
    Table(&'a [LineItem]),
    Summary(&'a FinancialSummary),
    /// Non-blank free text.
    Notes(&'a str),
}

impl<'a> Block<'a> {
    /// The fixed content order: metadata, party, table, summary, notes.
    pub fn sequence(document: &'a Document) -> Vec<Block<'a>> {
        let mut blocks = vec![
            Block::Metadata(document),
            Block::Party {
                party: &document.party,
                vehicle: &document.vehicle,
            },
            Block::Table(&document.items),
            Block::Summary(&document.summary),
        ];
        if let Some(notes) = document.notes.as_deref().map(str::trim) {
            if !notes.is_empty() {
                blocks.push(Block::Notes(notes));
            }
        }
        blocks
    }

    pub fn render(&self, ctx: &RenderContext, cursor: &mut PageCursor) {
        match self {
            Block::Metadata(document) => render_metadata(ctx, cursor, document),
            Block::Party { party, vehicle } => render_party(ctx, cursor, party, vehicle),
            Block::Table(items) => table::render_table(ctx, cursor, items),
            Block::Summary(summary) => render_summary(ctx, cursor, summary),
            Block::Notes(notes) => render_notes(ctx, cursor, notes),
        }
    }
}

fn render_metadata(ctx: &RenderContext, cursor: &mut PageCursor, document: &Document) {
    let cfg = ctx.config;
    let labels = &cfg.labels;

    render_branding(ctx, cursor);
    cursor.skip(cfg.section_gap / 2.0);

    render_heading(ctx, cursor, &format!("{} #{}", labels.quote, document.id));
    let mut fields = vec![
        (labels.status.as_str(), document.status.clone()),
        (labels.created.as_str(), format::date(document.created_at, cfg)),
    ];
    if let Some(expires) = document.expires_at {
        fields.push((labels.expires.as_str(), format::date(expires, cfg)));
    }
    render_fields(ctx, cursor, &fields);
}

/// Organization name, secondary name, and logo; or the generic title.
fn render_branding(ctx: &RenderContext, cursor: &mut PageCursor) {
    let cfg = ctx.config;
    let top = cursor.y();
    let mut logo_bottom = top;

    if let Some(logo) = ctx.branding.logo() {
        let (w, h) = logo.fit_box(cfg.logo_width, cfg.logo_height);
        if w > 0.0 && h > 0.0 {
            cursor.push(LayoutElement {
                x: cfg.content_x() + cfg.content_width() - w,
                y: top,
                width: w,
                height: h,
                role: ElementRole::Letterhead,
                draw: DrawCommand::Image {
                    image: logo.clone(),
                },
            });
            logo_bottom = top + h;
        }
    }

    let title_font = FontSpec::bold(cfg.font_family, cfg.title_size);
    let line = cfg.title_size * 1.3;
    let y = cursor.reserve(line);
    cursor.push(text_element(
        ctx.fonts,
        ctx.branding.title(cfg),
        cfg.content_x(),
        y + (line - title_font.size) / 2.0,
        title_font,
        Color::BLACK,
        TextAlign::Left,
        ElementRole::Letterhead,
    ));

    if let Some(secondary) = ctx.branding.secondary_name() {
        let y = cursor.reserve(cfg.field_height);
        let font = ctx.body_font();
        cursor.push(text_element(
            ctx.fonts,
            secondary,
            cfg.content_x(),
            y + (cfg.field_height - font.size) / 2.0,
            font,
            cfg.muted_text,
            TextAlign::Left,
            ElementRole::Letterhead,
        ));
    }

    cursor.advance_to(logo_bottom);
}

fn render_party(ctx: &RenderContext, cursor: &mut PageCursor, party: &Party, vehicle: &Vehicle) {
    let cfg = ctx.config;
    let labels = &cfg.labels;

    render_heading(ctx, cursor, &labels.client);
    let mut fields = vec![(labels.name.as_str(), party.name.clone())];
    let optional = [
        (labels.tax_id.as_str(), &party.tax_id),
        (labels.phone.as_str(), &party.phone),
        (labels.email.as_str(), &party.email),
    ];
    for (label, value) in optional {
        if let Some(value) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
            fields.push((label, value.to_string()));
        }
    }
    render_fields(ctx, cursor, &fields);

    cursor.skip(cfg.section_gap / 2.0);
    render_heading(ctx, cursor, &labels.vehicle);
    let model = format!("{} {}", vehicle.make.trim(), vehicle.model.trim());
    let mut fields = vec![(labels.model.as_str(), model.trim().to_string())];
    if let Some(year) = vehicle.year {
        fields.push((labels.year.as_str(), year.to_string()));
    }
    if let Some(plate) = vehicle.plate.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
        fields.push((labels.plate.as_str(), plate.to_string()));
    }
    render_fields(ctx, cursor, &fields);
}

/// Subtotal, discount when non-zero, and an emphasized total, right-aligned
/// under the two money columns.
fn render_summary(ctx: &RenderContext, cursor: &mut PageCursor, summary: &FinancialSummary) {
    let cfg = ctx.config;
    let labels = &cfg.labels;
    let spans = cfg.column_spans();
    let band_x = spans[2].0;
    let band_width = spans[2].1 + spans[3].1;
    let label_right = spans[2].0 + spans[2].1 - cfg.cell_padding;
    let value_right = spans[3].0 + spans[3].1 - cfg.cell_padding;

    let mut rows = vec![(labels.subtotal.as_str(), format::money(summary.subtotal, cfg), false)];
    if summary.discount > 0.0 {
        rows.push((labels.discount.as_str(), format::money(-summary.discount, cfg), false));
    }
    rows.push((labels.total.as_str(), format::money(summary.total, cfg), true));

    let h = cfg.row_height;
    cursor.ensure(h * rows.len() as f64);

    for (label, value, emphasized) in rows {
        let y = cursor.reserve(h);
        let font = if emphasized {
            cursor.push(rect_element(band_x, y, band_width, h, cfg.total_fill, ElementRole::Summary));
            ctx.body_bold()
        } else {
            ctx.body_font()
        };
        let ty = y + (h - font.size) / 2.0;
        for (text, right) in [(label, label_right), (value.as_str(), value_right)] {
            cursor.push(text_element(
                ctx.fonts,
                text,
                right,
                ty,
                font,
                Color::BLACK,
                TextAlign::Right,
                ElementRole::Summary,
            ));
        }
    }
}

fn render_notes(ctx: &RenderContext, cursor: &mut PageCursor, notes: &str) {
    render_heading(ctx, cursor, &ctx.config.labels.notes);
    render_paragraph(ctx, cursor, notes, ctx.body_font(), Color::BLACK, ElementRole::Notes);
}

/// Section heading, kept on the same page as the first line that follows it.
pub fn render_heading(ctx: &RenderContext, cursor: &mut PageCursor, text: &str) {
    let h = ctx.heading_height();
    cursor.ensure(h + ctx.config.field_height);
    let y = cursor.reserve(h);
    let font = FontSpec::bold(ctx.config.font_family, ctx.config.heading_size);
    cursor.push(text_element(
        ctx.fonts,
        text,
        ctx.config.content_x(),
        y + (h - font.size) / 2.0,
        font,
        Color::BLACK,
        TextAlign::Left,
        ElementRole::Heading,
    ));
}

/// Label/value pairs, one per `field_height` row. Values share a column
/// just past the widest label.
pub fn render_fields(ctx: &RenderContext, cursor: &mut PageCursor, fields: &[(&str, String)]) {
    let cfg = ctx.config;
    let label_font = ctx.body_bold();
    let value_font = ctx.body_font();
    let label_width = fields
        .iter()
        .map(|(label, _)| ctx.fonts.measure_string(label, &label_font))
        .fold(0.0, f64::max);
    let value_x = cfg.content_x() + label_width + 12.0;

    for (label, value) in fields {
        let y = cursor.reserve(cfg.field_height);
        let ty = y + (cfg.field_height - value_font.size) / 2.0;
        cursor.push(text_element(
            ctx.fonts,
            label,
            cfg.content_x(),
            ty,
            label_font,
            cfg.muted_text,
            TextAlign::Left,
            ElementRole::Field,
        ));
        cursor.push(text_element(
            ctx.fonts,
            value,
            value_x,
            ty,
            value_font,
            Color::BLACK,
            TextAlign::Left,
            ElementRole::Field,
        ));
    }
}

/// Wrap `text` to the content width and place it line by line. Space is
/// checked before every line, so a paragraph can continue on the next page.
pub fn render_paragraph(
    ctx: &RenderContext,
    cursor: &mut PageCursor,
    text: &str,
    font: FontSpec,
    color: Color,
    role: ElementRole,
) {
    let cfg = ctx.config;
    let lh = cfg.line_height;
    for line in text::wrap(ctx.fonts, text, cfg.content_width(), font) {
        // Blank lines are spacing: swallowed at the top of a continuation page.
        if line.is_empty() {
            cursor.skip(lh);
            continue;
        }
        let y = cursor.reserve(lh);
        cursor.push(text_element(
            ctx.fonts,
            &line,
            cfg.content_x(),
            y + (lh - font.size) / 2.0,
            font,
            color,
            TextAlign::Left,
            role,
        ));
    }
}
