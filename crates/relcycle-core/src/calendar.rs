//! UTC calendar helpers shared by the cycle resolvers.
//!
//! Every date handled by the crate is a [`NaiveDate`] that stands for UTC midnight.
//! Timestamps carrying an offset are converted to UTC before the time of day is dropped.

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, NaiveDateTime, Utc};
use tracing::trace;

use crate::error::InvalidDateError;

/// Sentinel accepted in place of a date to mean "the caller's current UTC date".
pub const NOW_SENTINEL: &str = "now";

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M%#z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M%#z",
];

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Resolve an optional override into a reference date.
///
/// `None` and the `"now"` sentinel resolve to the UTC date of `now`. The clock is
/// read by the caller so every computation below stays deterministic.
pub fn resolve_today(
    input: Option<&str>,
    now: DateTime<Utc>,
) -> Result<NaiveDate, InvalidDateError> {
    match input.map(str::trim) {
        None => Ok(now.date_naive()),
        Some(value) if value.eq_ignore_ascii_case(NOW_SENTINEL) => Ok(now.date_naive()),
        Some(value) => parse_iso_date(value),
    }
}

/// Parse an ISO-8601 date or timestamp and normalize it to its UTC calendar date.
pub fn parse_iso_date(input: &str) -> Result<NaiveDate, InvalidDateError> {
    let value = input.trim();
    if value.is_empty() {
        return Err(InvalidDateError::new(input));
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc).date_naive());
    }
    for format in OFFSET_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(value, format) {
            return Ok(parsed.with_timezone(&Utc).date_naive());
        }
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(parsed.date());
        }
    }

    let parsed = if let Some(date) = expand_compact(value) {
        NaiveDate::parse_from_str(&date, "%Y-%m-%d").ok()
    } else if is_year_month(value) {
        NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d").ok()
    } else if is_ordinal(value) {
        NaiveDate::parse_from_str(value, "%Y-%j").ok()
    } else if value.contains("-W") {
        NaiveDate::parse_from_str(value, "%G-W%V-%u").ok()
    } else {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
    };

    match parsed {
        Some(date) => {
            trace!(input = value, %date, "parsed reference date");
            Ok(date)
        }
        None => Err(InvalidDateError::new(input)),
    }
}

/// `YYYYMMDD` becomes `YYYY-MM-DD`.
fn expand_compact(value: &str) -> Option<String> {
    if value.len() == 8 && value.bytes().all(|b| b.is_ascii_digit()) {
        Some(format!("{}-{}-{}", &value[0..4], &value[4..6], &value[6..8]))
    } else {
        None
    }
}

fn is_year_month(value: &str) -> bool {
    matches!(value.split_once('-'), Some((year, month))
        if year.len() == 4
            && month.len() == 2
            && year.bytes().chain(month.bytes()).all(|b| b.is_ascii_digit()))
}

fn is_ordinal(value: &str) -> bool {
    matches!(value.split_once('-'), Some((year, day))
        if year.len() == 4
            && day.len() == 3
            && year.bytes().chain(day.bytes()).all(|b| b.is_ascii_digit()))
}

/// ISO weekday number: 1 = Monday through 7 = Sunday.
pub fn iso_weekday(date: NaiveDate) -> u32 {
    date.weekday().number_from_monday()
}

pub fn plus_days(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_add_days(Days::new(days))
        .unwrap_or(NaiveDate::MAX)
}

pub fn minus_days(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_sub_days(Days::new(days))
        .unwrap_or(NaiveDate::MIN)
}

/// Calendar-aware month addition; day-of-month is clamped to the target month's length.
pub fn plus_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months))
        .unwrap_or(NaiveDate::MAX)
}

/// Whole weeks from `earlier` to `later`, rounded toward negative infinity.
pub fn weeks_between_floor(later: NaiveDate, earlier: NaiveDate) -> i64 {
    (later - earlier).num_days().div_euclid(7)
}

/// Weeks from `earlier` to `later`, rounded to the nearest whole week.
///
/// Day counts never land on a half week, so there is no tie to break.
pub fn weeks_between_round(later: NaiveDate, earlier: NaiveDate) -> i64 {
    ((later - earlier).num_days() + 3).div_euclid(7)
}
