//! Common helpers for price calculations.
//!
//! Rounding, integer conversion and the lenient area parsing used by the
//! pricing engine.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Rounds a decimal value to the nearest whole unit using half-up rounding.
///
/// Values exactly halfway round away from zero, which for the non-negative
/// amounts the engine produces is the same as rounding up.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use quote_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(39949.5)), dec!(39950));
/// assert_eq!(round_half_up(dec!(39949.49)), dec!(39949));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds half-up and converts to `i64`, saturating at the `i64` bounds.
pub fn to_whole_units(value: Decimal) -> i64 {
    let rounded = round_half_up(value);
    rounded.to_i64().unwrap_or(if rounded.is_sign_negative() {
        i64::MIN
    } else {
        i64::MAX
    })
}

/// Parses the leading integer of `input` the way a browser `parseInt` does.
///
/// Leading whitespace and a single sign are accepted, parsing stops at the
/// first non-digit, and `None` is returned when no digit is found. Values
/// that do not fit in an `i64` are treated as unparseable.
///
/// # Examples
///
/// ```
/// use quote_core::calculations::common::parse_leading_int;
///
/// assert_eq!(parse_leading_int(" 120 m²"), Some(120));
/// assert_eq!(parse_leading_int("85.5"), Some(85));
/// assert_eq!(parse_leading_int("m² 120"), None);
/// ```
pub fn parse_leading_int(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    let magnitude: i64 = rest[..digits_len].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Formats an integer with a space between groups of three digits.
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}
