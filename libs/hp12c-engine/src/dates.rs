//! Packed-decimal calendar dates
//!
//! Dates travel through the stack as numbers in `DD.MMYYYY` form
//! (`1.012020` is 1 January 2020). The separator-free `DDMMYYYY` integer
//! form is accepted too. Fractions of four digits are read as `MMYY` and any
//! year below 100 is taken as 19YY.

use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{EngineError, Result};
use crate::value::Value;

/// Scale of an encoded date: two month digits plus four year digits
const PACKED_SCALE: u32 = 6;

/// Read a packed date number
pub fn decode(value: Value) -> Result<NaiveDate> {
    let Value::Number(number) = value else {
        return Err(EngineError::invalid_date("Error value"));
    };
    if number.is_sign_negative() && !number.is_zero() {
        return Err(EngineError::invalid_date(number.to_string()));
    }

    let (day, month, year) = if number.fract().is_zero() {
        split_integer_form(number)?
    } else {
        split_dotted_form(number)?
    };

    let year = if year < 100 { year + 1900 } else { year };
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| EngineError::invalid_date(format!("{:02}.{:02}{}", day, month, year)))
}

/// Write a date in `DD.MMYYYY` form, always with six fraction digits
pub fn encode(date: NaiveDate) -> Decimal {
    let packed = i64::from(date.day()) * 1_000_000 + i64::from(date.month()) * 10_000 + i64::from(date.year());
    Decimal::new(packed, PACKED_SCALE)
}

/// ΔDYS: signed number of days from `from` to `to`
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// DATE: shift a date by a whole number of days, `None` past the calendar range
pub fn add_days(date: NaiveDate, days: Decimal) -> Option<NaiveDate> {
    let days = days.trunc().to_i64()?;
    let offset = Duration::try_days(days)?;
    let shifted = date.checked_add_signed(offset);
    if shifted.is_none() {
        debug!(date = %date, days, "date offset out of calendar range");
    }
    shifted
}

/// `DDMMYYYY` with leading zeros dropped by the number
fn split_integer_form(number: Decimal) -> Result<(u32, u32, i32)> {
    let packed = number
        .trunc()
        .to_u64()
        .filter(|n| *n <= 99_999_999)
        .ok_or_else(|| EngineError::invalid_date(number.to_string()))?;
    let day = (packed / 1_000_000) as u32;
    let month = (packed / 10_000 % 100) as u32;
    let year = (packed % 10_000) as i32;
    Ok((day, month, year))
}

/// `DD.MMYYYY`, or `DD.MMYY` when exactly four fraction digits are present
fn split_dotted_form(number: Decimal) -> Result<(u32, u32, i32)> {
    let invalid = || EngineError::invalid_date(number.to_string());

    let day = number.trunc().to_u32().ok_or_else(invalid)?;
    let text = number.fract().to_string();
    let fraction = text.split_once('.').map(|(_, f)| f).ok_or_else(invalid)?;

    let (month, year) = match fraction.len() {
        4 => (fraction[..2].to_string(), fraction[2..].to_string()),
        5.. => {
            let padded = format!("{:0<6}", fraction);
            (padded[..2].to_string(), padded[2..6].to_string())
        },
        _ => return Err(invalid()),
    };
    Ok((
        day,
        month.parse().map_err(|_| invalid())?,
        year.parse().map_err(|_| invalid())?,
    ))
}
