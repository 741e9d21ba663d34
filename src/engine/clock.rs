use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};

/// Hours east of UTC used for "today" unless settings say otherwise.
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = 8;

/// Source of the current calendar date.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Wall-clock "today" in a fixed UTC offset, whatever the host timezone is.
#[derive(Debug, Clone, Copy)]
pub struct FixedOffsetClock {
    offset: FixedOffset,
}

impl FixedOffsetClock {
    /// `None` when `hours` is outside ±23.
    pub fn from_hours(hours: i32) -> Option<Self> {
        FixedOffset::east_opt(hours.checked_mul(3600)?).map(|offset| Self { offset })
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Calendar date of `instant` as seen in this clock's offset.
    pub fn date_at(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.offset).date_naive()
    }
}

impl Default for FixedOffsetClock {
    fn default() -> Self {
        Self::from_hours(DEFAULT_UTC_OFFSET_HOURS).unwrap_or(Self { offset: Utc.fix() })
    }
}

impl Clock for FixedOffsetClock {
    fn today(&self) -> NaiveDate {
        self.date_at(Utc::now())
    }
}

/// A clock stuck on one date, for replaying a past pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinnedClock(pub NaiveDate);

impl Clock for PinnedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}
