//! Date normalization for import cells
//! ISO-like strings and spreadsheet day serials → YYYY-MM-DD

use crate::types::CellValue;
use chrono::{NaiveDate, TimeDelta};
use tracing::warn;

/// Day serial of 1970-01-01 in the spreadsheet date system (day 0 = 1899-12-30)
pub const UNIX_EPOCH_SERIAL: f64 = 25569.0;

const MS_PER_DAY: i64 = 86_400_000;

/// Largest instant (in ms from the Unix epoch) a date cell may resolve to
const MAX_TIME_MS: f64 = 8.64e15;

/// A date cell, classified before normalization
#[derive(Debug, Clone, PartialEq)]
pub enum DateInput {
    /// Blank or falsy cell
    Empty,
    /// Text such as `2023-05-01` or `2023-05-01T00:00:00.000Z`
    Text(String),
    /// Spreadsheet day serial, fractional part = time of day
    Serial(f64),
}

impl From<&CellValue> for DateInput {
    fn from(cell: &CellValue) -> Self {
        match cell {
            CellValue::Empty | CellValue::Bool(_) => DateInput::Empty,
            CellValue::Text(s) if s.is_empty() => DateInput::Empty,
            CellValue::Text(s) => DateInput::Text(s.clone()),
            CellValue::Number(n) if *n == 0.0 || n.is_nan() => DateInput::Empty,
            CellValue::Number(n) => DateInput::Serial(*n),
        }
    }
}

impl From<Option<&CellValue>> for DateInput {
    fn from(cell: Option<&CellValue>) -> Self {
        cell.map(DateInput::from).unwrap_or(DateInput::Empty)
    }
}

/// Normalize a date cell to `YYYY-MM-DD`, or `""` when there is no date.
///
/// Text keeps everything before the first `T`. Serials are converted with
/// [`serial_to_date`]; a serial outside the calendar range yields `""`.
pub fn normalize_date(input: &DateInput) -> String {
    match input {
        DateInput::Empty => String::new(),
        DateInput::Text(s) => s.split('T').next().unwrap_or_default().to_string(),
        DateInput::Serial(serial) => match serial_to_date(*serial) {
            Some(date) => date.format("%Y-%m-%d").to_string(),
            None => {
                warn!(serial, "date serial out of range, leaving field empty");
                String::new()
            }
        },
    }
}

/// Convert a spreadsheet day serial to a UTC calendar date.
///
/// `1970-01-01 + (serial - 25569)` days, with the fractional day truncated to
/// whole milliseconds and then floored to the day. This is the plain linear
/// mapping: serial 60 is 1900-02-28, not the spreadsheet's phantom 1900-02-29.
pub fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() {
        return None;
    }

    let ms = ((serial - UNIX_EPOCH_SERIAL) * MS_PER_DAY as f64).trunc();
    if ms.abs() > MAX_TIME_MS {
        return None;
    }

    let days = (ms as i64).div_euclid(MS_PER_DAY);
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1)?;
    epoch.checked_add_signed(TimeDelta::try_days(days)?)
}
