use chrono::NaiveDate;

use super::date_math::days_between;
use crate::model::{TaskPosition, TimelineUnit};

/// Narrowest bar, in percent, so same-day tasks stay visible.
pub const MIN_BAR_WIDTH: f64 = 1.0;

/// First and last day of the unit list plus its length in days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineSpan {
    pub start: NaiveDate,
    pub end: NaiveDate,
    total_days: i64,
}

impl TimelineSpan {
    /// `None` for an empty unit list.
    pub fn of(units: &[TimelineUnit]) -> Option<Self> {
        let start = units.first()?.start;
        let end = units.last()?.end;
        Some(Self {
            start,
            end,
            total_days: days_between(start, end).max(1),
        })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Offset of `date` from the span start, in percent of the span, clamped to [0, 100].
    pub fn ratio(&self, date: NaiveDate) -> f64 {
        let pct = days_between(self.start, date) as f64 / self.total_days as f64 * 100.0;
        pct.clamp(0.0, 100.0)
    }
}

/// Place a task's `[start, end]` on the timeline.
pub fn position_task(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    units: &[TimelineUnit],
) -> TaskPosition {
    let (Some(start), Some(end), Some(span)) = (start, end, TimelineSpan::of(units)) else {
        return TaskPosition {
            actual_start: start,
            actual_end: end,
            ..TaskPosition::hidden()
        };
    };

    let mut left = span.ratio(start);
    let raw_end = span.ratio(end);
    let visible = raw_end > 0.0 && left < 100.0;
    if visible {
        // Keep room for the minimum bar inside the chart.
        left = left.min(100.0 - MIN_BAR_WIDTH);
    }
    let width = (raw_end - left).max(MIN_BAR_WIDTH).min(100.0 - left);

    TaskPosition {
        left,
        width,
        visible,
        actual_start: Some(start),
        actual_end: Some(end),
    }
}
