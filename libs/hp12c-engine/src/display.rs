//! Display formatting
//!
//! The display uses the continental convention: `.` groups thousands and `,`
//! separates decimals, e.g. `1.234.567,89`.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::value::Value;

pub const GROUP_SEPARATOR: char = '.';
pub const DECIMAL_SEPARATOR: char = ',';
pub const ERROR_TEXT: &str = "Error";

/// Largest number of decimal places the display can show
pub const MAX_DECIMAL_PLACES: u8 = 9;

/// Render a committed value with `places` decimals
///
/// Rounds half to even, groups the integer part by thousands and never shows
/// a negative zero.
pub fn format_value(value: Value, places: u8) -> String {
    let Value::Number(number) = value else {
        return ERROR_TEXT.to_string();
    };

    let places = places.min(MAX_DECIMAL_PLACES);
    let rounded = number.round_dp_with_strategy(u32::from(places), RoundingStrategy::MidpointNearestEven);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();

    let plain = rounded.abs().to_string();
    let (integer, fraction) = plain.split_once('.').unwrap_or((plain.as_str(), ""));

    let mut out = String::with_capacity(plain.len() + plain.len() / 3 + 2);
    if negative {
        out.push('-');
    }
    out.push_str(&group_thousands(integer));
    if places > 0 {
        out.push(DECIMAL_SEPARATOR);
        out.push_str(fraction);
        for _ in fraction.len()..usize::from(places) {
            out.push('0');
        }
    }
    out
}

/// Insert a group separator every three digits from the right
pub fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(GROUP_SEPARATOR);
        }
        out.push(c);
    }
    out
}

/// Render a bare decimal, as used for register listings
pub fn format_decimal(number: Decimal, places: u8) -> String {
    format_value(Value::Number(number), places)
}
