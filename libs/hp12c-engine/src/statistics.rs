//! Two-variable statistics accumulators
//!
//! Σ+ feeds X as the x sample and Y as the y sample. Mean and sample
//! standard deviation are derived from the running sums on demand.

use rust_decimal::{Decimal, MathematicalOps};
use serde::Serialize;

use crate::value::Value;

/// n, Σx, Σx², Σy, Σy², Σxy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatRegisters {
    pub n: Value,
    pub sum_x: Value,
    pub sum_x2: Value,
    pub sum_y: Value,
    pub sum_y2: Value,
    pub sum_xy: Value,
}

impl StatRegisters {
    /// Σ+: add one (x, y) sample
    pub fn accumulate(&mut self, x: Value, y: Value) {
        self.n = self.n + Value::from(Decimal::ONE);
        self.sum_x = self.sum_x + x;
        self.sum_x2 = self.sum_x2 + x * x;
        self.sum_y = self.sum_y + y;
        self.sum_y2 = self.sum_y2 + y * y;
        self.sum_xy = self.sum_xy + x * y;
    }

    /// CLΣ
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// x̄ = Σx / n
    pub fn mean_x(&self) -> Value {
        mean(self.n, self.sum_x)
    }

    /// ȳ = Σy / n
    pub fn mean_y(&self) -> Value {
        mean(self.n, self.sum_y)
    }

    /// Sample standard deviation of the x samples
    pub fn std_dev_x(&self) -> Value {
        sample_std_dev(self.n, self.sum_x, self.sum_x2)
    }

    /// Sample standard deviation of the y samples
    pub fn std_dev_y(&self) -> Value {
        sample_std_dev(self.n, self.sum_y, self.sum_y2)
    }
}

fn mean(n: Value, sum: Value) -> Value {
    if n.is_zero() {
        return Value::Error;
    }
    sum / n
}

/// sqrt((n·Σx² − (Σx)²) / (n·(n−1)))
fn sample_std_dev(n: Value, sum: Value, sum_sq: Value) -> Value {
    let (Some(n), Some(sum), Some(sum_sq)) = (n.number(), sum.number(), sum_sq.number()) else {
        return Value::Error;
    };
    if n < Decimal::TWO {
        return Value::Error;
    }

    let variance = || {
        let numerator = n.checked_mul(sum_sq)?.checked_sub(sum.checked_mul(sum)?)?;
        let denominator = n.checked_mul(n - Decimal::ONE)?;
        if denominator.is_zero() {
            return None;
        }
        numerator.checked_div(denominator)
    };

    match variance() {
        Some(v) if v >= Decimal::ZERO => v.sqrt().into(),
        _ => Value::Error,
    }
}
