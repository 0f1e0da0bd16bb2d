//! Number formatting for the ticker, following `en` locale conventions.
//!
//! `format_currency` and `format_percentage` return `None` for zero and
//! missing input alike; callers render nothing in that case.

use rust_decimal::{Decimal, RoundingStrategy};

/// Significant digits kept by compact notation.
const SUPPLY_SIGNIFICANT_DIGITS: i32 = 4;

const COMPACT_SUFFIXES: [&str; 5] = ["", "K", "M", "B", "T"];

pub const PRICE_MIN_FRACTION_DIGITS: u32 = 2;
pub const PRICE_MAX_FRACTION_DIGITS: u32 = 7;

/// Compact notation with at most four significant digits: 1234567 → "1.235M".
pub fn format_supply(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let text = if value > 0.0 { "∞" } else { "-∞" };
        return text.to_string();
    }

    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();
    if abs == 0.0 {
        return "0".to_string();
    }

    let max_tier = COMPACT_SUFFIXES.len() - 1;
    let mut tier = if abs >= 1_000.0 {
        ((abs.log10() / 3.0).floor() as usize).min(max_tier)
    } else {
        0
    };

    let (mut rounded, mut decimals) = round_significant(abs / 1_000f64.powi(tier as i32));
    // 999_950 rounds to 1000K, which reads as 1M
    if rounded >= 1_000.0 && tier < max_tier {
        tier += 1;
        (rounded, decimals) = round_significant(abs / 1_000f64.powi(tier as i32));
    }

    let text = format!("{:.*}", decimals, rounded);
    let text = trim_fraction_zeros(&text);
    let (int_part, frac_part) = match text.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (text, None),
    };

    let mut out = String::with_capacity(text.len() + 4);
    out.push_str(sign);
    out.push_str(&group_thousands(int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out.push_str(COMPACT_SUFFIXES[tier]);
    out
}

/// USD currency with the default 2..=7 fraction digits.
pub fn format_currency(value: Option<Decimal>) -> Option<String> {
    format_currency_with(value, PRICE_MIN_FRACTION_DIGITS, PRICE_MAX_FRACTION_DIGITS)
}

pub fn format_currency_with(value: Option<Decimal>, min_digits: u32, max_digits: u32) -> Option<String> {
    let value = value.filter(|v| !v.is_zero())?;
    let min_digits = min_digits.min(max_digits);

    let rounded = value
        .round_dp_with_strategy(max_digits, RoundingStrategy::MidpointAwayFromZero)
        .abs()
        .normalize();
    let text = rounded.to_string();
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));

    let mut frac = frac_part.to_string();
    while frac.len() < min_digits as usize {
        frac.push('0');
    }

    let mut out = String::with_capacity(text.len() + 8);
    if value.is_sign_negative() {
        out.push('-');
    }
    out.push('$');
    out.push_str(&group_thousands(int_part));
    if !frac.is_empty() {
        out.push('.');
        out.push_str(&frac);
    }
    Some(out)
}

/// The value as-is followed by "%", e.g. -1.5 → "-1.5%".
pub fn format_percentage(value: Option<f64>) -> Option<String> {
    let value = value.filter(|v| *v != 0.0 && !v.is_nan())?;
    Some(format!("{value}%"))
}

/// Rounds half away from zero to four significant digits and returns the
/// number of fraction digits that rounding kept.
fn round_significant(value: f64) -> (f64, usize) {
    let magnitude = value.log10().floor() as i32;
    let decimals = SUPPLY_SIGNIFICANT_DIGITS - 1 - magnitude;
    let factor = 10f64.powi(decimals);
    let rounded = (value * factor).round() / factor;
    (rounded, decimals.max(0) as usize)
}

fn trim_fraction_zeros(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
