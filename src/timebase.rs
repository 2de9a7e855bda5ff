use chrono::{Datelike, NaiveDate};

use crate::constants::{JD_MJD_OFFSET, MJD_EPOCH_DAYS_CE, SECONDS_PER_DAY, UNIX_EPOCH_MJD};
use crate::error::{Result, ScrapeError};

/// Convert a `YYYY/MM/DD` calendar date to Modified Julian Day.
///
/// The date is taken as midnight UTC, so the result is always a whole
/// number of days. Anything that does not split into exactly three
/// integer components, or names an invalid Gregorian date, is rejected.
pub fn calendar_to_mjd(date: &str) -> Result<f64> {
    let parts: Vec<&str> = date.split('/').collect();
    if parts.len() != 3 {
        return Err(ScrapeError::MalformedDate(format!(
            "expected YYYY/MM/DD, got '{date}'"
        )));
    }
    let year: i32 = parts[0]
        .trim()
        .parse()
        .map_err(|_| ScrapeError::MalformedDate(format!("non-integer year in '{date}'")))?;
    let month: u32 = parts[1]
        .trim()
        .parse()
        .map_err(|_| ScrapeError::MalformedDate(format!("non-integer month in '{date}'")))?;
    let day: u32 = parts[2]
        .trim()
        .parse()
        .map_err(|_| ScrapeError::MalformedDate(format!("non-integer day in '{date}'")))?;

    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        ScrapeError::MalformedDate(format!("{year:04}/{month:02}/{day:02} is not a valid date"))
    })?;

    Ok((date.num_days_from_ce() - MJD_EPOCH_DAYS_CE) as f64)
}

/// Convert a raw timestamp with a unit tag to Modified Julian Day.
///
/// Units are matched case-insensitively. Unknown units are an error;
/// a timestamp is never silently assumed to already be MJD.
pub fn to_mjd(value: f64, unit: &str) -> Result<f64> {
    let mjd = match unit.to_ascii_lowercase().as_str() {
        "mjd" => value,
        "jd" => value - JD_MJD_OFFSET,
        "unix" => UNIX_EPOCH_MJD + value / SECONDS_PER_DAY,
        other => return Err(ScrapeError::UnknownTimeUnit(other.to_string())),
    };
    if !mjd.is_finite() {
        return Err(ScrapeError::MalformedDate(format!(
            "timestamp {value} ({unit}) is not finite"
        )));
    }
    Ok(mjd)
}

/// Inverse of [`calendar_to_mjd`], truncating the fractional day.
pub fn mjd_to_calendar(mjd: f64) -> Option<NaiveDate> {
    let days = mjd.floor() as i32 + MJD_EPOCH_DAYS_CE;
    NaiveDate::from_num_days_from_ce_opt(days)
}
