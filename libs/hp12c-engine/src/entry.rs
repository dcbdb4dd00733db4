//! Number entry buffer
//!
//! Keeps what the user is typing apart from the committed stack. The buffer
//! is a small state machine:
//!
//! ```text
//! Idle --digit/separator--> Mantissa --EEX--> Exponent
//!   \-------------------EEX (seeds "0")-------^
//! ```
//!
//! Any non-entry key commits the buffer with [`EntryBuffer::take`], which
//! returns it to `Idle`.

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::display::{group_thousands, DECIMAL_SEPARATOR};
use crate::error::{EngineError, Result};

/// Exponent characters kept after EEX, the seeded "0" included
pub const MAX_EXPONENT_DIGITS: usize = 2;

/// Significant digits kept from a typed literal; the rest are rounded away
const SIGNIFICANT_DIGITS: usize = 28;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Mantissa {
    negative: bool,
    digits: String,
    /// Number of integer digits, set once the separator has been typed
    separator_at: Option<usize>,
}

impl Mantissa {
    fn starting_with(digit: u8) -> Self {
        Self {
            negative: false,
            digits: digit_char(digit).to_string(),
            separator_at: None,
        }
    }

    /// A leading separator reads as "0,"
    fn starting_with_separator() -> Self {
        Self {
            negative: false,
            digits: "0".to_string(),
            separator_at: Some(1),
        }
    }

    fn is_plain_zero(&self) -> bool {
        self.digits == "0" && self.separator_at.is_none()
    }

    fn split(&self) -> (&str, Option<&str>) {
        match self.separator_at {
            Some(at) => (&self.digits[..at], Some(&self.digits[at..])),
            None => (&self.digits, None),
        }
    }

    fn render(&self) -> String {
        let (integer, fraction) = self.split();
        let mut out = String::new();
        if self.negative {
            out.push('-');
        }
        out.push_str(&group_thousands(integer));
        if let Some(fraction) = fraction {
            out.push(DECIMAL_SEPARATOR);
            out.push_str(fraction);
        }
        out
    }

    fn to_decimal(&self) -> Result<Decimal> {
        let (integer, fraction) = self.split();
        let integer = match integer.trim_start_matches('0') {
            "" => "0",
            trimmed => trimmed,
        };
        let fraction = fraction.unwrap_or_default();
        let kept = fraction.len().min(SIGNIFICANT_DIGITS.saturating_sub(integer.len()));
        let literal = if kept == 0 {
            integer.to_string()
        } else {
            format!("{}.{}", integer, &fraction[..kept])
        };
        let mut magnitude = Decimal::from_str(&literal)
            .map_err(|e| EngineError::invalid_entry(format!("{}: {}", literal, e)))?;
        if fraction[kept..].starts_with(|c: char| c >= '5') {
            magnitude = magnitude
                .checked_add(Decimal::new(1, kept as u32))
                .ok_or_else(|| EngineError::invalid_entry(format!("{} out of range", literal)))?;
        }
        Ok(if self.negative && !magnitude.is_zero() {
            -magnitude
        } else {
            magnitude
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Exponent {
    negative: bool,
    /// Starts as "0"; typed digits are appended up to the cap
    digits: String,
}

impl Exponent {
    fn seeded() -> Self {
        Self {
            negative: false,
            digits: "0".to_string(),
        }
    }

    fn render(&self) -> String {
        let sign = if self.negative { "-" } else { "" };
        format!("{}{:0>width$}", sign, self.digits, width = MAX_EXPONENT_DIGITS)
    }

    fn power(&self) -> i32 {
        let magnitude = self.digits.parse::<i32>().unwrap_or(0);
        if self.negative {
            -magnitude
        } else {
            magnitude
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum State {
    #[default]
    Idle,
    Mantissa(Mantissa),
    Exponent(Mantissa, Exponent),
}

/// Literal being typed on the keypad
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryBuffer {
    state: State,
}

impl EntryBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.state, State::Idle)
    }

    /// Append a digit to the mantissa or, after EEX, to the exponent
    pub fn push_digit(&mut self, digit: u8) {
        debug_assert!(digit <= 9);
        match &mut self.state {
            State::Idle => self.state = State::Mantissa(Mantissa::starting_with(digit)),
            State::Mantissa(m) => m.digits.push(digit_char(digit)),
            State::Exponent(_, e) => {
                if e.digits.len() < MAX_EXPONENT_DIGITS {
                    e.digits.push(digit_char(digit));
                }
            },
        }
    }

    /// Type the decimal separator; a second one is ignored, as is one typed
    /// while entering the exponent
    pub fn push_separator(&mut self) {
        match &mut self.state {
            State::Idle => self.state = State::Mantissa(Mantissa::starting_with_separator()),
            State::Mantissa(m) => {
                if m.separator_at.is_none() {
                    m.separator_at = Some(m.digits.len());
                }
            },
            State::Exponent(..) => {},
        }
    }

    /// CHS while typing; returns false when idle so the caller negates X instead
    pub fn change_sign(&mut self) -> bool {
        match &mut self.state {
            State::Idle => false,
            State::Mantissa(m) => {
                if m.negative {
                    m.negative = false;
                } else if !m.is_plain_zero() {
                    m.negative = true;
                }
                true
            },
            State::Exponent(_, e) => {
                if e.negative {
                    e.negative = false;
                } else if e.digits != "0" {
                    e.negative = true;
                }
                true
            },
        }
    }

    /// EEX: start (or restart) the exponent, seeding a "0" mantissa when idle
    pub fn begin_exponent(&mut self) {
        let mantissa = match std::mem::take(&mut self.state) {
            State::Idle => Mantissa::starting_with(0),
            State::Mantissa(m) | State::Exponent(m, _) => m,
        };
        self.state = State::Exponent(mantissa, Exponent::seeded());
    }

    /// Drop the literal without committing it
    pub fn abandon(&mut self) {
        self.state = State::Idle;
    }

    /// Commit the literal and return to idle
    ///
    /// `None` when nothing was being typed, so calling it twice in a row is
    /// the same as calling it once.
    pub fn take(&mut self) -> Option<Result<Decimal>> {
        match std::mem::take(&mut self.state) {
            State::Idle => None,
            State::Mantissa(m) if m.digits.is_empty() => None,
            State::Mantissa(m) => Some(m.to_decimal()),
            State::Exponent(m, e) => Some(m.to_decimal().and_then(|d| scale_by_power_of_ten(d, e.power()))),
        }
    }

    /// What the display shows while typing, `None` when idle
    pub fn render(&self) -> Option<String> {
        match &self.state {
            State::Idle => None,
            State::Mantissa(m) => Some(m.render()),
            State::Exponent(m, e) => Some(format!("{} {}", m.render(), e.render())),
        }
    }
}

fn digit_char(digit: u8) -> char {
    char::from(b'0' + digit.min(9))
}

fn scale_by_power_of_ten(mut value: Decimal, power: i32) -> Result<Decimal> {
    for _ in 0..power.unsigned_abs() {
        value = if power > 0 {
            value.checked_mul(Decimal::TEN)
        } else {
            value.checked_div(Decimal::TEN)
        }
        .ok_or_else(|| EngineError::invalid_entry(format!("exponent {} out of range", power)))?;
    }
    Ok(value)
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn typed(keys: &str) -> EntryBuffer {
        let mut entry = EntryBuffer::new();
        for c in keys.chars() {
            match c {
                ',' => entry.push_separator(),
                'E' => entry.begin_exponent(),
                '~' => {
                    entry.change_sign();
                },
                d => entry.push_digit(d.to_digit(10).unwrap() as u8),
            }
        }
        entry
    }

    #[test]
    fn test_idle_buffer() {
        let mut entry = EntryBuffer::new();
        assert!(!entry.is_active());
        assert_eq!(entry.render(), None);
        assert_eq!(entry.take(), None);
    }

    #[test]
    fn test_digits_and_separator() {
        let mut entry = typed("1234,5");
        assert_eq!(entry.render().as_deref(), Some("1.234,5"));
        assert_eq!(entry.take(), Some(Ok(dec!(1234.5))));
        assert!(!entry.is_active());
    }

    #[test]
    fn test_leading_separator_reads_as_zero() {
        let mut entry = typed(",25");
        assert_eq!(entry.render().as_deref(), Some("0,25"));
        assert_eq!(entry.take(), Some(Ok(dec!(0.25))));
    }

    #[test]
    fn test_trailing_separator_is_shown_and_ignored_on_commit() {
        let mut entry = typed("12,");
        assert_eq!(entry.render().as_deref(), Some("12,"));
        assert_eq!(entry.take(), Some(Ok(dec!(12))));
    }

    #[test]
    fn test_second_separator_is_ignored() {
        let mut entry = typed("1,2,3");
        assert_eq!(entry.render().as_deref(), Some("1,23"));
    }

    #[test]
    fn test_raw_leading_zeros_are_kept() {
        let mut entry = typed("01,012020");
        assert_eq!(entry.render().as_deref(), Some("01,012020"));
        assert_eq!(entry.take(), Some(Ok(dec!(1.012020))));
    }

    #[test]
    fn test_change_sign_of_mantissa() {
        let mut entry = typed("5~");
        assert_eq!(entry.render().as_deref(), Some("-5"));
        entry.change_sign();
        assert_eq!(entry.render().as_deref(), Some("5"));

        let zero = typed("0~");
        assert_eq!(zero.render().as_deref(), Some("0"));
    }

    #[test]
    fn test_change_sign_when_idle_is_reported() {
        let mut entry = EntryBuffer::new();
        assert!(!entry.change_sign());
    }

    impl EntryBuffer {
        fn is_exponent(&self) -> bool {
            matches!(self.state, State::Exponent(..))
        }
    }

    #[test]
    fn test_exponent_entry() {
        let mut entry = typed("15E3");
        assert!(entry.is_exponent());
        assert_eq!(entry.render().as_deref(), Some("15 03"));
        assert_eq!(entry.take(), Some(Ok(dec!(15000))));
    }

    #[test]
    fn test_exponent_appends_to_seeded_zero() {
        // "0" then "1"; the third character is over the cap
        let mut entry = typed("1E12");
        assert_eq!(entry.render().as_deref(), Some("1 01"));
        assert_eq!(entry.take(), Some(Ok(dec!(10))));
    }

    #[test]
    fn test_eex_again_restarts_exponent() {
        let mut entry = typed("3E7E");
        assert_eq!(entry.render().as_deref(), Some("3 00"));
        assert_eq!(entry.take(), Some(Ok(dec!(3))));
    }

    #[test]
    fn test_signed_exponent_takes_no_more_digits() {
        let mut entry = typed("2E5~9");
        assert_eq!(entry.render().as_deref(), Some("2 -05"));
        assert_eq!(entry.take(), Some(Ok(dec!(0.00002))));
    }

    #[test]
    fn test_negative_exponent() {
        let mut entry = typed("25E2~");
        assert_eq!(entry.render().as_deref(), Some("25 -02"));
        assert_eq!(entry.take(), Some(Ok(dec!(0.25))));
    }

    #[test]
    fn test_seeded_exponent_zero_stays_unsigned() {
        let mut entry = typed("7E~");
        assert_eq!(entry.render().as_deref(), Some("7 00"));
        assert_eq!(entry.take(), Some(Ok(dec!(7))));
    }

    #[test]
    fn test_eex_when_idle_seeds_zero() {
        let entry = typed("E");
        assert!(entry.is_active());
        assert_eq!(entry.render().as_deref(), Some("0 00"));
    }

    #[test]
    fn test_exponent_overflow_is_an_error() {
        let mut entry = typed(&format!("{}E9", "9".repeat(28)));
        assert!(matches!(entry.take(), Some(Err(EngineError::InvalidEntry(_)))));
    }

    #[test]
    fn test_long_fraction_is_rounded() {
        let mut entry = typed(&format!("2,{}", "6".repeat(32)));
        assert_eq!(entry.take(), Some(Ok(dec!(2.666666666666666666666666667))));

        let mut entry = typed(&format!("1,{}", "3".repeat(32)));
        assert_eq!(entry.take(), Some(Ok(dec!(1.333333333333333333333333333))));
    }

    #[test]
    fn test_integer_beyond_range_is_an_error() {
        let mut entry = typed(&"9".repeat(30));
        assert!(matches!(entry.take(), Some(Err(EngineError::InvalidEntry(_)))));
    }

    #[test]
    fn test_abandon() {
        let mut entry = typed("42");
        entry.abandon();
        assert!(!entry.is_active());
        assert_eq!(entry.take(), None);
    }
}
