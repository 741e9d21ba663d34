//! Calendar-date helpers. Everything here works on `NaiveDate` and never
//! consults a timezone.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::DateParseError;

/// Read a `YYYY-MM-DD` string, discarding any trailing time component
/// (`2024-03-15T23:00:00Z`, `2024-03-15 08:00:00+00`).
///
/// The date is built from its explicit components, so a late-evening
/// timestamp is never pushed onto the next or previous day.
pub fn parse_calendar_date(field: &str, raw: &str) -> Result<NaiveDate, DateParseError> {
    let err = || DateParseError::new(field, raw);
    let date_part = raw
        .trim()
        .split(|c: char| c == 'T' || c.is_whitespace())
        .next()
        .unwrap_or("");

    let mut parts = date_part.split('-');
    let (Some(y), Some(m), Some(d), None) = (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(err());
    };

    let year: i32 = numeric(y).ok_or_else(err)?;
    let month: u32 = numeric(m).ok_or_else(err)?;
    let day: u32 = numeric(d).ok_or_else(err)?;
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(err)
}

fn numeric<T: std::str::FromStr>(s: &str) -> Option<T> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Whole days from `a` to `b` (negative when `b` is earlier).
pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    (b - a).num_days()
}

/// Sunday on or before `date`.
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}

/// Saturday on or after `date`.
pub fn end_of_week(date: NaiveDate) -> NaiveDate {
    start_of_week(date) + Duration::days(6)
}

pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn end_of_month(date: NaiveDate) -> NaiveDate {
    shift_month_start(date, 1) - Duration::days(1)
}

/// First day of the month `months` away from the month of `date`.
pub fn shift_month_start(date: NaiveDate, months: i32) -> NaiveDate {
    let index = date.year() * 12 + date.month0() as i32 + months;
    let year = index.div_euclid(12);
    let month = index.rem_euclid(12) as u32 + 1;
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(date)
}

/// Calendar months from the month of `a` to the month of `b`.
pub fn months_between(a: NaiveDate, b: NaiveDate) -> i32 {
    (b.year() - a.year()) * 12 + b.month() as i32 - a.month() as i32
}

/// 1–4.
pub fn quarter_of(date: NaiveDate) -> u32 {
    date.month0() / 3 + 1
}

pub fn start_of_quarter(date: NaiveDate) -> NaiveDate {
    let first_month = (quarter_of(date) - 1) * 3 + 1;
    NaiveDate::from_ymd_opt(date.year(), first_month, 1).unwrap_or(date)
}

pub fn end_of_quarter(date: NaiveDate) -> NaiveDate {
    end_of_month(shift_month_start(start_of_quarter(date), 2))
}

pub fn min_date<I: IntoIterator<Item = NaiveDate>>(dates: I) -> Option<NaiveDate> {
    dates.into_iter().min()
}

pub fn max_date<I: IntoIterator<Item = NaiveDate>>(dates: I) -> Option<NaiveDate> {
    dates.into_iter().max()
}

/// Earliest and latest date of a set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateExtents {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateExtents {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: start.min(end),
            end: start.max(end),
        }
    }

    pub fn point(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// `None` for an empty set.
    pub fn from_dates<I: IntoIterator<Item = NaiveDate>>(dates: I) -> Option<Self> {
        dates.into_iter().fold(None, |acc, d| match acc {
            None => Some(Self::point(d)),
            Some(e) => Some(Self {
                start: e.start.min(d),
                end: e.end.max(d),
            }),
        })
    }
}
