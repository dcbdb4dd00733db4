//! Depreciation schedules
//!
//! | Method | Inputs | Result |
//! |--------|--------|--------|
//! | SL | cost, salvage, life | `(cost − salvage) / life` |
//! | SOYD | cost, salvage, life, period | `(cost − salvage) · (life − period + 1) / (life·(life+1)/2)` |
//! | DB | cost, salvage, life, period, rate % | depreciation of `period` alone |
//!
//! Every invalid input combination gives `Value::Error`.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::debug;

use crate::value::Value;

/// Straight line
pub fn straight_line(cost: Value, salvage: Value, life: Value) -> Value {
    if life.is_zero() {
        return Value::Error;
    }
    (cost - salvage) / life
}

/// Sum of the years' digits
pub fn sum_of_years_digits(cost: Value, salvage: Value, life: Value, period: Value) -> Value {
    let (Some(life_d), Some(period_d)) = (life.number(), period.number()) else {
        return Value::Error;
    };
    if life_d.is_zero() || period_d.is_zero() || period_d > life_d {
        return Value::Error;
    }

    let digits_sum = life * (life + Value::from(Decimal::ONE)) / Value::from(Decimal::TWO);
    let remaining = life - period + Value::from(Decimal::ONE);
    (cost - salvage) * (remaining / digits_sum)
}

/// Declining balance, e.g. a `rate_percent` of 200 is double declining
///
/// Book value never drops below salvage; only the last period's charge is
/// returned.
pub fn declining_balance(cost: Value, salvage: Value, life: Value, period: Value, rate_percent: Value) -> Value {
    let (Some(cost), Some(salvage), Some(life), Some(period), Some(rate)) = (
        cost.number(),
        salvage.number(),
        life.number(),
        period.number(),
        rate_percent.number(),
    ) else {
        return Value::Error;
    };
    if life.is_zero() || period.is_zero() || period > life || rate <= Decimal::ZERO {
        return Value::Error;
    }
    // Periods are whole years; the loop bound is kept to u16 range
    let Some(periods) = period.trunc().to_u16() else {
        debug!(%period, "declining balance period out of range");
        return Value::Error;
    };

    let schedule = || {
        let factor = rate.checked_div(Decimal::ONE_HUNDRED)?.checked_div(life)?;
        let mut book_value = cost;
        let mut charge = Decimal::ZERO;
        for _ in 0..periods {
            if book_value <= salvage {
                return Some(Decimal::ZERO);
            }
            let mut current = book_value.checked_mul(factor)?;
            if book_value.checked_sub(current)? < salvage {
                current = book_value.checked_sub(salvage)?;
            }
            book_value = book_value.checked_sub(current)?;
            charge = current;
        }
        Some(charge)
    };
    schedule().into()
}
