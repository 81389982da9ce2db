//! The page cursor: where the next unit of content goes, and when it has to
//! go on a new page.
//!
//! The usable band of every page runs from the top margin down to the bottom
//! margin minus the footer band. The cursor's `y` never leaves that band.

use super::{LayoutElement, LayoutPage};
use crate::model::LayoutConfig;

const EPSILON: f64 = 1e-6;

/// Tracks the current page and vertical offset during the content phase.
#[derive(Debug, Clone)]
pub struct PageCursor {
    page_width: f64,
    page_height: f64,
    /// First usable y on every page.
    top: f64,
    /// Last usable y on every page.
    bottom: f64,
    y: f64,
    /// Every page opened so far. The last one is the current page.
    pages: Vec<LayoutPage>,
}

impl PageCursor {
    /// Open the first page.
    pub fn new(config: &LayoutConfig) -> Self {
        let (page_width, page_height) = config.page_dimensions();
        let top = config.page.margin.top;
        let bottom = (page_height - config.page.margin.bottom - config.footer_height).max(top);
        Self {
            page_width,
            page_height,
            top,
            bottom,
            y: top,
            pages: vec![LayoutPage::new(page_width, page_height)],
        }
    }

    /// 0-based index of the current page.
    pub fn page_index(&self) -> usize {
        self.pages.len() - 1
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn top(&self) -> f64 {
        self.top
    }

    pub fn bottom(&self) -> f64 {
        self.bottom
    }

    /// Height of the usable band on an empty page.
    pub fn page_capacity(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn remaining_height(&self) -> f64 {
        (self.bottom - self.y).max(0.0)
    }

    pub fn fits(&self, height: f64) -> bool {
        height <= self.remaining_height() + EPSILON
    }

    /// Nothing has been placed below the top margin of the current page yet.
    pub fn at_page_top(&self) -> bool {
        self.y <= self.top + EPSILON
    }

    /// Close the current page and continue at the top of a fresh one.
    pub fn new_page(&mut self) {
        self.pages
            .push(LayoutPage::new(self.page_width, self.page_height));
        self.y = self.top;
        log::debug!("Opened page {}", self.pages.len());
    }

    /// Start a new page if `height` does not fit here. A fresh page is never
    /// abandoned: content taller than a whole page stays where it is.
    /// Returns whether a page break happened.
    pub fn ensure(&mut self, height: f64) -> bool {
        if self.fits(height) || self.at_page_top() {
            return false;
        }
        self.new_page();
        true
    }

    /// Claim `height` points, breaking the page first if needed. Returns the
    /// top of the claimed slot.
    pub fn reserve(&mut self, height: f64) -> f64 {
        self.ensure(height);
        self.take(height)
    }

    /// Claim `height` points on the current page without breaking.
    ///
    /// Used right after a repeated table header, where breaking again would
    /// leave a header with no rows under it.
    pub fn take(&mut self, height: f64) -> f64 {
        let slot = self.y;
        if !self.fits(height) {
            log::warn!(
                "{:.1}pt of content overflows page {} ({:.1}pt left)",
                height,
                self.pages.len(),
                self.remaining_height()
            );
        }
        self.y = (self.y + height).min(self.bottom);
        slot
    }

    /// Vertical spacing. Swallowed at the top of a page so continuation
    /// pages start flush with the top margin.
    pub fn skip(&mut self, height: f64) {
        if self.at_page_top() {
            return;
        }
        self.y = (self.y + height).min(self.bottom);
    }

    /// Move down to `y` if it is below the cursor (e.g. past a tall logo).
    pub fn advance_to(&mut self, y: f64) {
        if y > self.y {
            self.y = y.min(self.bottom);
        }
    }

    /// Place an element on the current page.
    pub fn push(&mut self, element: LayoutElement) {
        if let Some(page) = self.pages.last_mut() {
            page.elements.push(element);
        }
    }

    /// End the content phase and hand over the pages.
    pub fn finish(self) -> Vec<LayoutPage> {
        self.pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Edges, PageConfig, PageSize};

    /// 100pt usable band: top 10, bottom 110.
    fn small_config() -> LayoutConfig {
        LayoutConfig {
            page: PageConfig {
                size: PageSize::Custom {
                    width: 200.0,
                    height: 140.0,
                },
                margin: Edges::uniform(10.0),
            },
            footer_height: 20.0,
            ..LayoutConfig::default()
        }
    }

    #[test]
    fn test_starts_at_top_margin() {
        let cursor = PageCursor::new(&small_config());
        assert_eq!(cursor.y(), 10.0);
        assert_eq!(cursor.bottom(), 110.0);
        assert_eq!(cursor.page_capacity(), 100.0);
        assert_eq!(cursor.page_index(), 0);
    }

    #[test]
    fn test_reserve_within_page() {
        let mut cursor = PageCursor::new(&small_config());
        assert_eq!(cursor.reserve(30.0), 10.0);
        assert_eq!(cursor.reserve(30.0), 40.0);
        assert_eq!(cursor.y(), 70.0);
        assert_eq!(cursor.remaining_height(), 40.0);
        assert_eq!(cursor.page_index(), 0);
    }

    #[test]
    fn test_exact_fit_does_not_break() {
        let mut cursor = PageCursor::new(&small_config());
        cursor.reserve(60.0);
        assert_eq!(cursor.reserve(40.0), 70.0);
        assert_eq!(cursor.page_index(), 0);
        assert_eq!(cursor.remaining_height(), 0.0);
    }

    #[test]
    fn test_overflow_opens_new_page_at_top() {
        let mut cursor = PageCursor::new(&small_config());
        cursor.reserve(80.0);
        let slot = cursor.reserve(30.0);
        assert_eq!(cursor.page_index(), 1);
        assert_eq!(slot, 10.0);
        assert_eq!(cursor.y(), 40.0);
    }

    #[test]
    fn test_oversized_request_stays_on_fresh_page_and_clamps() {
        let mut cursor = PageCursor::new(&small_config());
        let slot = cursor.reserve(500.0);
        assert_eq!(slot, 10.0);
        assert_eq!(cursor.page_index(), 0);
        assert_eq!(cursor.y(), cursor.bottom());
    }

    #[test]
    fn test_y_stays_within_band() {
        let mut cursor = PageCursor::new(&small_config());
        for h in [7.0, 33.0, 90.0, 12.5, 250.0, 1.0, 64.0] {
            cursor.reserve(h);
            assert!(cursor.y() >= cursor.top() && cursor.y() <= cursor.bottom());
        }
    }

    #[test]
    fn test_skip_is_swallowed_at_page_top() {
        let mut cursor = PageCursor::new(&small_config());
        cursor.skip(15.0);
        assert_eq!(cursor.y(), 10.0);
        cursor.reserve(5.0);
        cursor.skip(15.0);
        assert_eq!(cursor.y(), 30.0);
    }

    #[test]
    fn test_take_never_breaks() {
        let mut cursor = PageCursor::new(&small_config());
        cursor.reserve(90.0);
        cursor.take(30.0);
        assert_eq!(cursor.page_index(), 0);
        assert_eq!(cursor.y(), 110.0);
    }

    #[test]
    fn test_elements_land_on_current_page() {
        let mut cursor = PageCursor::new(&small_config());
        let fill = crate::style::Color::BLACK;
        cursor.push(crate::layout::rect_element(0.0, 10.0, 5.0, 5.0, fill, crate::layout::ElementRole::Field));
        cursor.new_page();
        cursor.push(crate::layout::rect_element(0.0, 10.0, 5.0, 5.0, fill, crate::layout::ElementRole::Field));
        cursor.push(crate::layout::rect_element(0.0, 20.0, 5.0, 5.0, fill, crate::layout::ElementRole::Field));
        let pages = cursor.finish();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].elements.len(), 1);
        assert_eq!(pages[1].elements.len(), 2);
    }
}
