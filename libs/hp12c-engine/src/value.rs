//! Numeric value held by every register
//!
//! A [`Value`] is either a 28-digit decimal or the `Error` sentinel. Arithmetic
//! on values never panics: overflow, division by zero and any operation
//! involving `Error` produce `Error`.

use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Register content: a decimal number or the `Error` sentinel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value {
    Number(Decimal),
    Error,
}

impl Value {
    pub const ZERO: Value = Value::Number(Decimal::ZERO);

    /// The decimal payload, `None` for `Error`
    pub fn number(self) -> Option<Decimal> {
        match self {
            Value::Number(d) => Some(d),
            Value::Error => None,
        }
    }

    pub fn is_error(self) -> bool {
        matches!(self, Value::Error)
    }

    /// True only for a numeric zero (`Error` is not zero)
    pub fn is_zero(self) -> bool {
        matches!(self, Value::Number(d) if d.is_zero())
    }

    /// Apply a fallible decimal operation, mapping `None` to `Error`
    pub fn and_then(self, f: impl FnOnce(Decimal) -> Option<Decimal>) -> Value {
        self.number().and_then(f).into()
    }

    /// Combine two values with a fallible decimal operation
    pub fn zip_with(self, other: Value, f: impl FnOnce(Decimal, Decimal) -> Option<Decimal>) -> Value {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => f(a, b).into(),
            _ => Value::Error,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::ZERO
    }
}

impl From<Decimal> for Value {
    fn from(d: Decimal) -> Self {
        Value::Number(d)
    }
}

impl From<Option<Decimal>> for Value {
    fn from(d: Option<Decimal>) -> Self {
        d.map_or(Value::Error, Value::Number)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(Decimal::from(n))
    }
}

impl Add for Value {
    type Output = Value;

    fn add(self, rhs: Value) -> Value {
        self.zip_with(rhs, |a, b| a.checked_add(b))
    }
}

impl Sub for Value {
    type Output = Value;

    fn sub(self, rhs: Value) -> Value {
        self.zip_with(rhs, |a, b| a.checked_sub(b))
    }
}

impl Mul for Value {
    type Output = Value;

    fn mul(self, rhs: Value) -> Value {
        self.zip_with(rhs, |a, b| a.checked_mul(b))
    }
}

impl Div for Value {
    type Output = Value;

    fn div(self, rhs: Value) -> Value {
        self.zip_with(rhs, |a, b| a.checked_div(b))
    }
}

impl Neg for Value {
    type Output = Value;

    fn neg(self) -> Value {
        // rust_decimal keeps the sign bit of zero; the display never shows "-0"
        self.and_then(|d| Some(if d.is_zero() { Decimal::ZERO } else { -d }))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(d) => write!(f, "{}", d),
            Value::Error => f.write_str("Error"),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_arithmetic() {
        let a = Value::from(dec!(7.5));
        let b = Value::from(dec!(2.5));
        assert_eq!(a + b, Value::from(dec!(10)));
        assert_eq!(a - b, Value::from(dec!(5)));
        assert_eq!(a * b, Value::from(dec!(18.75)));
        assert_eq!(a / b, Value::from(dec!(3)));
    }

    #[test]
    fn test_error_propagates() {
        let a = Value::from(dec!(1));
        assert!((a + Value::Error).is_error());
        assert!((Value::Error * a).is_error());
        assert!((-Value::Error).is_error());
    }

    #[test]
    fn test_division_by_zero_is_error() {
        assert!((Value::from(dec!(5)) / Value::ZERO).is_error());
    }

    #[test]
    fn test_overflow_is_error() {
        let max = Value::from(Decimal::MAX);
        assert!((max + max).is_error());
        assert!((max * Value::from(dec!(2))).is_error());
    }

    #[test]
    fn test_negating_zero_stays_positive() {
        let z = -Value::ZERO;
        assert_eq!(z.number().map(|d| d.is_sign_negative()), Some(false));
    }

    #[test]
    fn test_display_and_serialize() {
        assert_eq!(Value::Error.to_string(), "Error");
        assert_eq!(Value::from(dec!(-1.25)).to_string(), "-1.25");
        assert_eq!(serde_json::to_string(&Value::Error).unwrap(), "\"Error\"");
        assert_eq!(
            serde_json::to_string(&Value::from(dec!(42))).unwrap(),
            "\"42\""
        );
    }
}
