//! `DimDateID` column conversion.
//!
//! Warehouse tables encode dates in a `DimDateID` integer column. The stored
//! number is one day behind the calendar date it names, so the conversion
//! adds 1 before reading the digits as `YYYYMMDD`: `20230101` becomes
//! `2023-01-02`. Tables using a different encoding are not detected.

use chrono::NaiveDate;

use crate::db::{QueryResult, Value};
use crate::error::{DwError, Result};

/// Name of the column converted by [`apply_dim_date_id`].
pub const DIM_DATE_COLUMN: &str = "DimDateID";

/// Replaces the `DimDateID` column, if present, with dates in place.
///
/// `Null` values stay `Null`. Any other value that cannot be read as an
/// integer, or whose successor is not a valid `YYYYMMDD` date, fails.
pub fn apply_dim_date_id(result: &mut QueryResult) -> Result<()> {
    let Some(index) = result.column_index(DIM_DATE_COLUMN) else {
        return Ok(());
    };

    for row in &mut result.rows {
        if let Some(value) = row.get_mut(index) {
            *value = convert(value)?;
        }
    }

    result.columns[index].data_type = "date".to_string();
    Ok(())
}

fn convert(value: &Value) -> Result<Value> {
    if value.is_null() {
        return Ok(Value::Null);
    }

    let id = as_integer(value).ok_or_else(|| {
        DwError::query(format!("{DIM_DATE_COLUMN} value '{value}' is not numeric"))
    })?;

    let shifted = id.checked_add(1).ok_or_else(|| {
        DwError::query(format!("{DIM_DATE_COLUMN} value {id} is out of range"))
    })?;
    parse_yyyymmdd(shifted).map(Value::Date).ok_or_else(|| {
        DwError::query(format!(
            "{DIM_DATE_COLUMN} value {id} (+1 = {shifted}) is not a valid YYYYMMDD date"
        ))
    })
}

fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Int(i) => Some(*i),
        Value::Float(f) => float_to_integer(*f),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(float_to_integer))
        }
        _ => None,
    }
}

/// Integral floats inside the `i64` range; `as` would saturate outside it.
fn float_to_integer(f: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, which is itself out of range.
    let in_range = f >= i64::MIN as f64 && f < i64::MAX as f64;
    (in_range && f.fract() == 0.0).then_some(f as i64)
}

fn parse_yyyymmdd(n: i64) -> Option<NaiveDate> {
    if !(10_000_000..=99_999_999).contains(&n) {
        return None;
    }

    let year = (n / 10_000) as i32;
    let month = ((n / 100) % 100) as u32;
    let day = (n % 100) as u32;
    NaiveDate::from_ymd_opt(year, month, day)
}
