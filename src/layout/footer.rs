//! # Footer Stamping
//!
//! The second layout phase. Runs once the content phase has closed its last
//! page, so the page count is final. Each page gets a thin rule, the
//! organization contact line, the "Page i of N" label, and an optional
//! generation timestamp, all inside the band the cursor kept free above the
//! bottom margin.
//!
//! Stamping only appends elements. Nothing placed during the content phase
//! moves.

use super::blocks::RenderContext;
use super::{rect_element, text_element, ElementRole, LayoutPage, RenderOptions};
use crate::letterhead::Branding;
use crate::style::{FontSpec, TextAlign};
use crate::text::format;

/// Per-document footer text that does not depend on the page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FooterStamp {
    pub contact: Option<String>,
    pub generated: Option<String>,
}

impl FooterStamp {
    pub fn new(branding: &Branding, options: &RenderOptions) -> Self {
        let cfg = &options.config;
        Self {
            contact: branding.contact_line(),
            generated: options
                .generated_at
                .map(|at| format!("{} {}", cfg.labels.generated, format::timestamp(at, cfg))),
        }
    }
}

/// Add the footer to every page. `pages.len()` is the N in "Page i of N".
pub fn stamp_footers(
    pages: Vec<LayoutPage>,
    stamp: &FooterStamp,
    ctx: &RenderContext,
) -> Vec<LayoutPage> {
    let total = pages.len();
    pages
        .into_iter()
        .enumerate()
        .map(|(i, page)| stamp_page(page, i + 1, total, stamp, ctx))
        .collect()
}

fn stamp_page(
    mut page: LayoutPage,
    number: usize,
    total: usize,
    stamp: &FooterStamp,
    ctx: &RenderContext,
) -> LayoutPage {
    let cfg = ctx.config;
    let band_top = page.height - cfg.page.margin.bottom - cfg.footer_height;
    let left = cfg.content_x();
    let right = left + cfg.content_width();
    let font = FontSpec::regular(cfg.font_family, cfg.small_size);

    page.elements.push(rect_element(
        left,
        band_top + 6.0,
        cfg.content_width(),
        0.5,
        cfg.rule_color,
        ElementRole::Footer,
    ));

    let line_y = band_top + 12.0;
    if let Some(contact) = &stamp.contact {
        page.elements.push(text_element(
            ctx.fonts,
            contact,
            left,
            line_y,
            font,
            cfg.muted_text,
            TextAlign::Left,
            ElementRole::Footer,
        ));
    }
    page.elements.push(text_element(
        ctx.fonts,
        &cfg.format_page_label(number, total),
        right,
        line_y,
        font,
        cfg.muted_text,
        TextAlign::Right,
        ElementRole::Footer,
    ));

    if let Some(generated) = &stamp.generated {
        page.elements.push(text_element(
            ctx.fonts,
            generated,
            left,
            line_y + cfg.small_size * 1.4,
            font,
            cfg.muted_text,
            TextAlign::Left,
            ElementRole::Footer,
        ));
    }
    page
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FontContext;
    use crate::letterhead::Letterhead;
    use crate::model::LayoutConfig;
    use chrono::NaiveDate;

    fn blank_pages(config: &LayoutConfig, n: usize) -> Vec<LayoutPage> {
        let (w, h) = config.page_dimensions();
        (0..n).map(|_| LayoutPage::new(w, h)).collect()
    }

    fn stamp(pages: Vec<LayoutPage>, branding: &Branding, options: &RenderOptions) -> Vec<LayoutPage> {
        let fonts = FontContext::new();
        let ctx = RenderContext {
            config: &options.config,
            fonts: &fonts,
            branding,
        };
        stamp_footers(pages, &FooterStamp::new(branding, options), &ctx)
    }

    #[test]
    fn test_every_page_knows_the_total() {
        let options = RenderOptions::default();
        let pages = stamp(blank_pages(&options.config, 3), &Branding::Generic, &options);
        for (i, page) in pages.iter().enumerate() {
            assert_eq!(
                page.texts(ElementRole::Footer),
                vec![format!("Page {} of 3", i + 1)]
            );
        }
    }

    #[test]
    fn test_generic_branding_has_no_contact_line() {
        let stamp = FooterStamp::new(&Branding::Generic, &RenderOptions::default());
        assert_eq!(stamp, FooterStamp::default());
    }

    #[test]
    fn test_contact_and_timestamp_are_stamped() {
        let branding = Branding::from_letterhead(Letterhead {
            name: "Acme".to_string(),
            phone: Some("555-0100".to_string()),
            ..Letterhead::default()
        });
        let options = RenderOptions {
            generated_at: NaiveDate::from_ymd_opt(2026, 3, 9)
                .and_then(|d| d.and_hms_opt(14, 30, 0)),
            ..RenderOptions::default()
        };
        let pages = stamp(blank_pages(&options.config, 1), &branding, &options);
        assert_eq!(
            pages[0].texts(ElementRole::Footer),
            vec!["555-0100", "Page 1 of 1", "Generated 2026-03-09 14:30"]
        );
    }

    #[test]
    fn test_footer_stays_inside_reserved_band() {
        let options = RenderOptions {
            generated_at: NaiveDate::from_ymd_opt(2026, 1, 1).and_then(|d| d.and_hms_opt(0, 0, 0)),
            ..RenderOptions::default()
        };
        let cfg = &options.config;
        let pages = stamp(blank_pages(cfg, 1), &Branding::Generic, &options);
        let band_top = pages[0].height - cfg.page.margin.bottom - cfg.footer_height;
        let band_bottom = pages[0].height - cfg.page.margin.bottom;
        for el in pages[0].elements_with_role(ElementRole::Footer) {
            assert!(el.y >= band_top && el.y + el.height <= band_bottom, "{el:?}");
        }
    }

    #[test]
    fn test_custom_page_label() {
        let mut options = RenderOptions::default();
        options.config.page_label = "{page}/{pages}".to_string();
        let pages = stamp(blank_pages(&options.config, 2), &Branding::Generic, &options);
        assert_eq!(pages[1].texts(ElementRole::Footer), vec!["2/2"]);
    }
}
