//! # Text Layout
//!
//! Line wrapping and value formatting.
//!
//! Wrapping is greedy and breaks only at whitespace. There is no hyphenation:
//! a word wider than the column sits alone on its line and overflows. The
//! result is lazy, so a renderer can stop pulling lines when it runs out of
//! page, and it is `Clone`, so an unconsumed copy replays the same lines.

pub mod format;

use crate::font::FontContext;
use crate::style::FontSpec;

/// Wrap `text` into lines no wider than `max_width` under `font`.
///
/// Newlines are hard breaks. An empty string yields exactly one empty line.
pub fn wrap<'a>(
    fonts: &'a FontContext,
    text: &'a str,
    max_width: f64,
    font: FontSpec,
) -> WrapLines<'a> {
    WrapLines {
        fonts,
        rest: Some(text),
        max_width,
        font,
    }
}

/// Lazy iterator over the wrapped lines of one string.
#[derive(Debug, Clone)]
pub struct WrapLines<'a> {
    fonts: &'a FontContext,
    /// Unconsumed input. `None` once the last line has been produced.
    rest: Option<&'a str>,
    max_width: f64,
    font: FontSpec,
}

impl Iterator for WrapLines<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let rest = self.rest?;
        let (hard_line, tail) = match rest.find('\n') {
            Some(i) => (&rest[..i], Some(&rest[i + 1..])),
            None => (rest, None),
        };

        let space_width = self.fonts.char_width(' ', &self.font);
        let mut line = String::new();
        let mut line_width = 0.0;
        let mut consumed = hard_line.len();

        for (start, word) in words(hard_line) {
            let word_width = self.fonts.measure_string(word, &self.font);
            if line.is_empty() {
                line.push_str(word);
                line_width = word_width;
                continue;
            }
            if line_width + space_width + word_width > self.max_width {
                consumed = start;
                break;
            }
            line.push(' ');
            line.push_str(word);
            line_width += space_width + word_width;
        }

        self.rest = if consumed == hard_line.len() {
            tail
        } else {
            Some(&rest[consumed..])
        };
        Some(line)
    }
}

/// Whitespace-separated words with their byte offsets.
fn words(line: &str) -> impl Iterator<Item = (usize, &str)> {
    let mut start = None;
    let mut chars = line.char_indices().chain(std::iter::once((line.len(), ' ')));
    std::iter::from_fn(move || {
        for (i, ch) in chars.by_ref() {
            match (start, ch.is_whitespace()) {
                (None, false) => start = Some(i),
                (Some(s), true) => {
                    start = None;
                    return Some((s, &line[s..i]));
                }
                _ => {}
            }
        }
        None
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::FontFamily;

    fn courier() -> FontSpec {
        // 6pt per character
        FontSpec::regular(FontFamily::Courier, 10.0)
    }

    fn lines(text: &str, width: f64) -> Vec<String> {
        let fonts = FontContext::new();
        wrap(&fonts, text, width, courier()).collect()
    }

    #[test]
    fn test_empty_string_is_one_empty_line() {
        assert_eq!(lines("", 100.0), vec![String::new()]);
    }

    #[test]
    fn test_short_string_is_one_identical_line() {
        assert_eq!(lines("brake pads", 100.0), vec!["brake pads".to_string()]);
    }

    #[test]
    fn test_breaks_at_whitespace_only() {
        // 60pt = 10 characters
        assert_eq!(
            lines("aaaa bbbb cccc dddd", 60.0),
            vec!["aaaa bbbb", "cccc dddd"]
        );
    }

    #[test]
    fn test_exact_fit_stays_on_line() {
        assert_eq!(lines("aaaa bbbbb", 60.0), vec!["aaaa bbbbb"]);
    }

    #[test]
    fn test_long_word_gets_its_own_line() {
        assert_eq!(
            lines("ab abcdefghijklmnop cd", 60.0),
            vec!["ab", "abcdefghijklmnop", "cd"]
        );
    }

    #[test]
    fn test_whitespace_runs_collapse() {
        assert_eq!(lines("  one \t  two  ", 100.0), vec!["one two"]);
    }

    #[test]
    fn test_whitespace_only_is_one_empty_line() {
        assert_eq!(lines("   ", 100.0), vec![String::new()]);
    }

    #[test]
    fn test_newlines_are_hard_breaks() {
        assert_eq!(
            lines("first\n\nthird", 100.0),
            vec!["first", "", "third"]
        );
    }

    #[test]
    fn test_every_line_fits() {
        let fonts = FontContext::new();
        let text = "the quick brown fox jumps over the lazy dog ".repeat(10);
        for line in wrap(&fonts, &text, 90.0, courier()) {
            assert!(fonts.measure_string(&line, &courier()) <= 90.0, "{line:?}");
        }
    }

    #[test]
    fn test_clone_restarts() {
        let fonts = FontContext::new();
        let wrapped = wrap(&fonts, "aaaa bbbb cccc dddd", 60.0, courier());
        let first: Vec<String> = wrapped.clone().collect();
        let second: Vec<String> = wrapped.collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn test_is_lazy() {
        let fonts = FontContext::new();
        let text = "word ".repeat(1000);
        let mut it = wrap(&fonts, &text, 60.0, courier());
        assert_eq!(it.next().as_deref(), Some("word word"));
        assert_eq!(it.next().as_deref(), Some("word word"));
    }

    #[test]
    fn test_words_reports_offsets() {
        let found: Vec<(usize, &str)> = words(" ab  cd").collect();
        assert_eq!(found, vec![(1, "ab"), (5, "cd")]);
    }
}
