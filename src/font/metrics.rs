//! Advance widths for the standard PDF fonts the engine uses, taken from the
//! Adobe Core14 AFM files. Widths are in 1/1000 em for the printable ASCII
//! range (0x20-0x7E).

use super::encoding;

/// Width table plus vertical metrics for one standard font.
pub struct StandardFontMetrics {
    widths: Option<&'static [u16; 95]>,
    /// Advance used outside the table (and for every glyph when `widths` is
    /// `None`, i.e. fixed-pitch fonts).
    default_width: u16,
    pub ascender: i16,
    pub descender: i16,
}

impl StandardFontMetrics {
    /// Advance width of one character in points.
    pub fn char_width(&self, ch: char, font_size: f64) -> f64 {
        self.units(ch) as f64 * font_size / 1000.0
    }

    /// Width of a string in points.
    pub fn measure_string(&self, text: &str, font_size: f64) -> f64 {
        let units: u32 = text.chars().map(|ch| self.units(ch) as u32).sum();
        units as f64 * font_size / 1000.0
    }

    fn units(&self, ch: char) -> u16 {
        let Some(widths) = self.widths else {
            return self.default_width;
        };
        // Measure the glyph that gets written, not the one that was asked for.
        let ch = fold_latin1(encoding::drawn_char(ch));
        let cp = ch as u32;
        if (0x20..=0x7E).contains(&cp) {
            widths[(cp - 0x20) as usize]
        } else {
            self.default_width
        }
    }
}

/// Map accented Latin-1 letters to their base letter. The accented glyphs in
/// Helvetica share the advance of the unaccented letter.
fn fold_latin1(ch: char) -> char {
    match ch {
        'À'..='Å' => 'A',
        'Ç' => 'C',
        'È'..='Ë' => 'E',
        'Ì'..='Ï' => 'I',
        'Ñ' => 'N',
        'Ò'..='Ö' | 'Ø' => 'O',
        'Ù'..='Ü' => 'U',
        'Ý' => 'Y',
        'à'..='å' => 'a',
        'ç' => 'c',
        'è'..='ë' => 'e',
        'ì'..='ï' => 'i',
        'ñ' => 'n',
        'ò'..='ö' | 'ø' => 'o',
        'ù'..='ü' => 'u',
        'ý' | 'ÿ' => 'y',
        '\u{a0}' => ' ',
        _ => ch,
    }
}

#[rustfmt::skip]
static HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    278, 278, 584, 584, 584, 556, 1015,
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    278, 278, 278, 469, 556, 333,
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    334, 260, 334, 584,
];

#[rustfmt::skip]
static HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

pub static HELVETICA: StandardFontMetrics = StandardFontMetrics {
    widths: Some(&HELVETICA_WIDTHS),
    default_width: 556,
    ascender: 718,
    descender: -207,
};

pub static HELVETICA_BOLD: StandardFontMetrics = StandardFontMetrics {
    widths: Some(&HELVETICA_BOLD_WIDTHS),
    default_width: 611,
    ascender: 718,
    descender: -207,
};

pub static COURIER: StandardFontMetrics = StandardFontMetrics {
    widths: None,
    default_width: 600,
    ascender: 629,
    descender: -157,
};
