// Calendar alignment shared by streaks, trend series and the month grid.
//
// All bucketing goes through one convention: instants are converted to a
// calendar date in a fixed UTC offset, weeks start on Monday (ISO 8601),
// months start on day 1. A bucket is identified by its first date.

use chrono::{DateTime, Datelike, Days, FixedOffset, Months, NaiveDate, Offset, Utc};
use cinerank_models::Period;

/// Width of a streak/trend bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Granularity {
    Day,
    Week,
    Month,
}

impl Granularity {
    /// Bucket width used by a reporting period.
    ///
    /// The granularity sits one level below the period: a weekly view
    /// tracks days, a monthly view weeks, a yearly view months.
    pub fn for_period(period: Period) -> Self {
        match period {
            Period::Weekly => Granularity::Day,
            Period::Monthly => Granularity::Week,
            Period::Yearly => Granularity::Month,
        }
    }

    /// First date of the bucket containing `date`
    pub fn align(&self, date: NaiveDate) -> NaiveDate {
        match self {
            Granularity::Day => date,
            Granularity::Week => week_start(date),
            Granularity::Month => month_start(date),
        }
    }

    /// Start of the bucket immediately before the one starting at `start`
    pub fn previous(&self, start: NaiveDate) -> Option<NaiveDate> {
        match self {
            Granularity::Day => start.checked_sub_days(Days::new(1)),
            Granularity::Week => week_start(start).checked_sub_days(Days::new(7)),
            Granularity::Month => month_start(start).checked_sub_months(Months::new(1)),
        }
    }

    /// Start of the bucket immediately after the one starting at `start`
    pub fn next(&self, start: NaiveDate) -> Option<NaiveDate> {
        match self {
            Granularity::Day => start.checked_add_days(Days::new(1)),
            Granularity::Week => week_start(start).checked_add_days(Days::new(7)),
            Granularity::Month => month_start(start).checked_add_months(Months::new(1)),
        }
    }

    /// Chart label: "Jan 5" for days, "W3" (ISO week number) for weeks,
    /// "Jan 24" for months.
    pub fn label(&self, start: NaiveDate) -> String {
        match self {
            Granularity::Day => start.format("%b %-d").to_string(),
            Granularity::Week => format!("W{}", start.iso_week().week()),
            Granularity::Month => start.format("%b %y").to_string(),
        }
    }
}

/// Maps instants onto calendar dates in a fixed UTC offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketCalendar {
    offset: FixedOffset,
}

impl BucketCalendar {
    pub fn utc() -> Self {
        Self::with_offset(Utc.fix())
    }

    pub fn with_offset(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// `None` when the offset is a day or more away from UTC
    pub fn from_offset_minutes(minutes: i32) -> Option<Self> {
        minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .map(Self::with_offset)
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Calendar date of `instant` in this calendar's offset
    pub fn date_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.offset).date_naive()
    }

    /// Start of the bucket that contains `instant`
    pub fn bucket_of(&self, instant: DateTime<Utc>, granularity: Granularity) -> NaiveDate {
        granularity.align(self.date_of(instant))
    }
}

impl Default for BucketCalendar {
    fn default() -> Self {
        Self::utc()
    }
}

/// Monday of the ISO week containing `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let back = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(back)).unwrap_or(date)
}

/// Sunday of the ISO week containing `date`
pub fn week_end(date: NaiveDate) -> NaiveDate {
    let start = week_start(date);
    start.checked_add_days(Days::new(6)).unwrap_or(start)
}

pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Move `date` by a signed number of calendar months, clamping the day to
/// the target month's length (Mar 31 - 1 month = Feb 29/28).
pub fn shift_months(date: NaiveDate, months: i32) -> Option<NaiveDate> {
    let magnitude = Months::new(months.unsigned_abs());
    if months >= 0 {
        date.checked_add_months(magnitude)
    } else {
        date.checked_sub_months(magnitude)
    }
}
