use chrono::{Datelike, NaiveDate};

use super::date_math::days_between;
use super::positioner::TimelineSpan;
use crate::model::{TimelineUnit, TodayMarker, ViewMode};

/// Position of `today` on the chart.
///
/// Weekly and monthly charts draw equal-width columns, so the marker is
/// interpolated inside the column that holds today. Daily and full charts
/// use the same whole-span ratio as the bars.
pub fn today_marker(units: &[TimelineUnit], view_mode: ViewMode, today: NaiveDate) -> TodayMarker {
    let Some(span) = TimelineSpan::of(units) else {
        return TodayMarker {
            position: 0.0,
            visible: false,
        };
    };
    let visible = span.contains(today);

    let within_unit = match view_mode {
        ViewMode::Weekly | ViewMode::Monthly => units
            .iter()
            .position(|u| u.contains(today))
            .map(|index| {
                let unit = &units[index];
                // Day of week counts from Sunday = 0, day of month from 1.
                let fraction = match view_mode {
                    ViewMode::Monthly => today.day() as f64 / unit.len_days() as f64,
                    _ => days_between(unit.start, today) as f64 / 7.0,
                };
                let unit_width = 100.0 / units.len() as f64;
                index as f64 * unit_width + fraction * unit_width
            }),
        ViewMode::Daily | ViewMode::Full => None,
    };

    TodayMarker {
        position: within_unit.unwrap_or_else(|| span.ratio(today)),
        visible,
    }
}
