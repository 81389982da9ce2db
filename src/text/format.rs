//! Display formatting for money, quantities, and dates.

use chrono::{NaiveDate, NaiveDateTime};

use crate::model::LayoutConfig;

/// Format an amount with the configured currency symbol and separators,
/// always with two decimals: `$1,234.50`, `-$3.00`.
pub fn money(value: f64, config: &LayoutConfig) -> String {
    let sign = if value < 0.0 && value.abs() >= 0.005 { "-" } else { "" };
    format!(
        "{}{}{}",
        sign,
        config.currency_symbol,
        grouped(value.abs(), 2, config)
    )
}

/// Format a quantity without trailing zeros: `2`, `1.5`, `0.25`.
pub fn quantity(value: f64, config: &LayoutConfig) -> String {
    let fixed = format!("{:.3}", value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    match trimmed.split_once('.') {
        Some((int, frac)) => format!("{}{}{}", int, config.decimal_separator, frac),
        None => trimmed.to_string(),
    }
}

pub fn date(value: NaiveDate, config: &LayoutConfig) -> String {
    value.format(&config.date_format).to_string()
}

pub fn timestamp(value: NaiveDateTime, config: &LayoutConfig) -> String {
    value.format(&config.timestamp_format).to_string()
}

/// Fixed decimals with thousands grouping on the integer part.
fn grouped(value: f64, decimals: usize, config: &LayoutConfig) -> String {
    let fixed = format!("{:.*}", decimals, value);
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let digits: Vec<char> = int_part.chars().collect();
    let mut out = String::new();
    for (i, d) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push_str(&config.thousands_separator);
        }
        out.push(*d);
    }
    if let Some(frac) = frac_part {
        out.push_str(&config.decimal_separator);
        out.push_str(frac);
    }
    out
}
