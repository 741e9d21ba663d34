//! Partitions the visible period into timeline columns.
//!
//! Each view mode has an unscoped window around the reference period and a
//! scoped variant used when the chart is narrowed to one project. The scoped
//! variants start no earlier than the current day/week/month and are sized to
//! the project's task range within fixed bounds. The `full` mode picks its
//! granularity from the total span so the column count stays small.

use chrono::{Datelike, Duration, NaiveDate};

use super::date_math::{
    days_between, end_of_month, end_of_quarter, end_of_week, months_between, quarter_of,
    shift_month_start, start_of_month, start_of_quarter, start_of_week, DateExtents,
};
use crate::model::{TimelineUnit, ViewMode};

pub const DAILY_DAYS_BEFORE: i64 = 7;
pub const DAILY_DAYS_AFTER: i64 = 6;
pub const DAILY_BOUNDS: (i64, i64) = (7, 60);
pub const WEEKLY_BOUNDS: (i64, i64) = (4, 16);
pub const MONTHLY_BOUNDS: (i32, i32) = (3, 24);
pub const MONTHLY_MONTHS_BEFORE: i32 = 2;
pub const MONTHLY_WINDOW: i32 = 6;
/// Largest inclusive month span the full view still draws month by month.
pub const FULL_MONTHLY_MAX: i32 = 12;
/// Largest inclusive month span drawn in two-month columns.
pub const FULL_BIMONTHLY_MAX: i32 = 24;

/// Everything the generator looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitRequest {
    pub view_mode: ViewMode,
    /// Date the user navigated to.
    pub reference: NaiveDate,
    pub today: NaiveDate,
    /// Min/max over the visible tasks' start and end dates.
    pub task_extents: Option<DateExtents>,
    /// Set when the chart is narrowed to a single project.
    pub scope: Option<DateExtents>,
}

/// Distance kept from chrono's first and last representable day. Wider than
/// the largest window or trailing quarter the generator steps through.
const CALENDAR_MARGIN_DAYS: i64 = 3 * 366;

impl UnitRequest {
    /// Same request with every date pulled inside the steppable range.
    fn within_calendar(&self) -> Self {
        let extents =
            |e: DateExtents| DateExtents::new(within_calendar(e.start), within_calendar(e.end));
        Self {
            view_mode: self.view_mode,
            reference: within_calendar(self.reference),
            today: within_calendar(self.today),
            task_extents: self.task_extents.map(extents),
            scope: self.scope.map(extents),
        }
    }
}

fn within_calendar(date: NaiveDate) -> NaiveDate {
    let margin = Duration::days(CALENDAR_MARGIN_DAYS);
    date.clamp(NaiveDate::MIN + margin, NaiveDate::MAX - margin)
}

/// Ordered, contiguous, non-empty list of columns for `req`.
///
/// Dates within a few years of chrono's limits are pulled inward first, so
/// the window lands slightly earlier (or later) instead of overflowing.
pub fn generate_units(req: &UnitRequest) -> Vec<TimelineUnit> {
    let req = req.within_calendar();
    match (req.view_mode, req.scope) {
        (ViewMode::Daily, None) => daily_units(
            req.reference - Duration::days(DAILY_DAYS_BEFORE),
            DAILY_DAYS_BEFORE + DAILY_DAYS_AFTER + 1,
        ),
        (ViewMode::Daily, Some(scope)) => {
            let start = scope.start.max(req.today);
            let days = (days_between(start, scope.end) + 1).clamp(DAILY_BOUNDS.0, DAILY_BOUNDS.1);
            daily_units(start, days)
        }
        (ViewMode::Weekly, None) => {
            let first = start_of_week(start_of_month(req.reference));
            let last = end_of_week(end_of_month(req.reference));
            weekly_units(first, (days_between(first, last) + 1) / 7)
        }
        (ViewMode::Weekly, Some(scope)) => {
            let first = start_of_week(scope.start).max(start_of_week(req.today));
            let last = end_of_week(scope.end);
            let weeks = ((days_between(first, last) + 1) / 7).clamp(WEEKLY_BOUNDS.0, WEEKLY_BOUNDS.1);
            weekly_units(first, weeks)
        }
        (ViewMode::Monthly, None) => monthly_units(
            shift_month_start(req.reference, -MONTHLY_MONTHS_BEFORE),
            MONTHLY_WINDOW,
        ),
        (ViewMode::Monthly, Some(scope)) => {
            let first = start_of_month(scope.start).max(start_of_month(req.today));
            let months =
                (months_between(first, scope.end) + 1).clamp(MONTHLY_BOUNDS.0, MONTHLY_BOUNDS.1);
            monthly_units(first, months)
        }
        (ViewMode::Full, _) => full_units(req.task_extents, req.today),
    }
}

fn full_units(extents: Option<DateExtents>, today: NaiveDate) -> Vec<TimelineUnit> {
    let extents = extents.unwrap_or(DateExtents::point(today));
    let start = extents.start.max(today);
    let end = extents.end.max(start);
    let span = months_between(start, end) + 1;

    if span <= FULL_MONTHLY_MAX {
        monthly_units(start_of_month(start), span)
    } else if span <= FULL_BIMONTHLY_MAX {
        bimonthly_units(start_of_month(start), (span + 1) / 2)
    } else {
        let first = start_of_quarter(start);
        quarterly_units(first, months_between(first, end) / 3 + 1)
    }
}

fn unit(label: String, start: NaiveDate, end: NaiveDate, is_aggregate: bool) -> TimelineUnit {
    TimelineUnit {
        label,
        start,
        end,
        year: start.year(),
        quarter: quarter_of(start),
        is_aggregate,
    }
}

fn daily_units(first: NaiveDate, days: i64) -> Vec<TimelineUnit> {
    (0..days)
        .map(|i| {
            let day = first + Duration::days(i);
            unit(day.format("%b %-d").to_string(), day, day, false)
        })
        .collect()
}

fn weekly_units(first_sunday: NaiveDate, weeks: i64) -> Vec<TimelineUnit> {
    (0..weeks.max(1))
        .map(|i| {
            let start = first_sunday + Duration::weeks(i);
            let end = start + Duration::days(6);
            unit(week_label(end), start, end, false)
        })
        .collect()
}

/// Weeks are named after the month their Saturday falls in, so the week
/// holding the 1st is always `W1` of that month.
fn week_label(saturday: NaiveDate) -> String {
    format!("{} W{}", saturday.format("%b"), (saturday.day() - 1) / 7 + 1)
}

fn monthly_units(first: NaiveDate, months: i32) -> Vec<TimelineUnit> {
    (0..months.max(1))
        .map(|i| {
            let start = shift_month_start(first, i);
            unit(start.format("%b %Y").to_string(), start, end_of_month(start), false)
        })
        .collect()
}

fn bimonthly_units(first: NaiveDate, pairs: i32) -> Vec<TimelineUnit> {
    (0..pairs.max(1))
        .map(|i| {
            let start = shift_month_start(first, i * 2);
            let second = shift_month_start(start, 1);
            let label = format!("{}-{}", start.format("%b"), second.format("%b"));
            unit(label, start, end_of_month(second), false)
        })
        .collect()
}

fn quarterly_units(first: NaiveDate, quarters: i32) -> Vec<TimelineUnit> {
    (0..quarters.max(1))
        .map(|i| {
            let start = shift_month_start(first, i * 3);
            unit(format!("Q{}", quarter_of(start)), start, end_of_quarter(start), true)
        })
        .collect()
}
