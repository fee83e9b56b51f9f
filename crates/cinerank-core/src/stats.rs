// Period-aware watch statistics: total, average rate, current streak and a
// dense trend series over a fixed lookback window.

use crate::buckets::{month_start, shift_months, week_start, BucketCalendar, Granularity};
use crate::score::days_between;
use chrono::{DateTime, Days, NaiveDate, Utc};
use cinerank_models::{MovieRecord, Period, TrendBucket, WatchStats};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Trailing window of the weekly (daily-bucket) trend, in days
pub const WEEKLY_TREND_DAYS: u64 = 14;
/// Trailing window of the monthly (weekly-bucket) trend, in months
pub const MONTHLY_TREND_MONTHS: i32 = 6;
/// Trailing window of the yearly (monthly-bucket) trend, in months
pub const YEARLY_TREND_MONTHS: i32 = 24;

/// Computes dashboard statistics over watched records.
///
/// The engine holds only the calendar used for bucketing; every call is a
/// pure function of its arguments.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatsEngine {
    calendar: BucketCalendar,
}

impl StatsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_calendar(calendar: BucketCalendar) -> Self {
        Self { calendar }
    }

    pub fn calendar(&self) -> &BucketCalendar {
        &self.calendar
    }

    /// Statistics for `records` under `period`, evaluated at `now`.
    ///
    /// Callers pass watched records only. Records without a watch date are
    /// ignored and do not count toward the total. Returns `None` when no
    /// dated record remains, which means "not enough data", not failure.
    pub fn compute(
        &self,
        records: &[MovieRecord],
        period: Period,
        now: DateTime<Utc>,
    ) -> Option<WatchStats> {
        let watched_at: Vec<DateTime<Utc>> =
            records.iter().filter_map(|record| record.date_watched).collect();

        let skipped = records.len() - watched_at.len();
        if skipped > 0 {
            debug!("compute_stats: ignoring {} records without a watch date", skipped);
        }

        let first_watched = *watched_at.iter().min()?;
        let total = watched_at.len();
        let average = average_per_unit(total, first_watched, period, now);

        let granularity = Granularity::for_period(period);
        let mut counts: HashMap<NaiveDate, usize> = HashMap::new();
        for at in &watched_at {
            *counts.entry(self.calendar.bucket_of(*at, granularity)).or_insert(0) += 1;
        }

        let today = self.calendar.date_of(now);
        let present: HashSet<NaiveDate> = counts.keys().copied().collect();
        let streak = current_streak(&present, granularity, today);
        let trend = trend_series(&counts, period, today);

        debug!(
            "compute_stats: period={}, total={}, distinct_buckets={}, streak={}, trend_buckets={}",
            period,
            total,
            present.len(),
            streak,
            trend.len()
        );

        Some(WatchStats {
            total,
            average,
            streak,
            trend,
        })
    }
}

/// `compute` with the default (UTC) calendar
pub fn compute_stats(
    records: &[MovieRecord],
    period: Period,
    now: DateTime<Utc>,
) -> Option<WatchStats> {
    StatsEngine::default().compute(records, period, now)
}

/// Movies per period unit since the first watch.
///
/// Elapsed time is floored at one day and at one unit, so a brand-new
/// history reports its raw count instead of an inflated rate.
pub fn average_per_unit(
    total: usize,
    first_watched: DateTime<Utc>,
    period: Period,
    now: DateTime<Utc>,
) -> f64 {
    let elapsed_days = days_between(now, first_watched).max(1) as f64;
    let elapsed_units = (elapsed_days / period.unit_days()).max(1.0);
    total as f64 / elapsed_units
}

/// Consecutive present buckets ending at today's bucket.
///
/// If today's bucket is still empty the count restarts from the previous
/// bucket, so an unfinished current period does not reset the streak.
pub fn current_streak(present: &HashSet<NaiveDate>, granularity: Granularity, today: NaiveDate) -> u32 {
    let current = granularity.align(today);
    let streak = count_back(present, granularity, current);
    if streak > 0 {
        return streak;
    }

    granularity
        .previous(current)
        .map(|previous| count_back(present, granularity, previous))
        .unwrap_or(0)
}

fn count_back(present: &HashSet<NaiveDate>, granularity: Granularity, start: NaiveDate) -> u32 {
    let mut streak = 0;
    let mut cursor = Some(start);
    while let Some(bucket) = cursor {
        if !present.contains(&bucket) {
            break;
        }
        streak += 1;
        cursor = granularity.previous(bucket);
    }
    streak
}

/// Bucket starts of the trend window for `period`, oldest first
pub fn trend_bucket_starts(period: Period, today: NaiveDate) -> Vec<NaiveDate> {
    match period {
        Period::Weekly => (0..=WEEKLY_TREND_DAYS)
            .rev()
            .filter_map(|back| today.checked_sub_days(Days::new(back)))
            .collect(),
        Period::Monthly => {
            // Step a week at a time from six months back, aligning each step
            let mut starts = Vec::new();
            let mut cursor = shift_months(today, -MONTHLY_TREND_MONTHS);
            while let Some(day) = cursor.filter(|day| *day <= today) {
                starts.push(week_start(day));
                cursor = day.checked_add_days(Days::new(7));
            }
            starts
        }
        Period::Yearly => {
            let mut starts = Vec::new();
            let mut cursor = shift_months(today, -YEARLY_TREND_MONTHS).map(month_start);
            while let Some(month) = cursor.filter(|month| *month <= today) {
                starts.push(month);
                cursor = Granularity::Month.next(month);
            }
            starts
        }
    }
}

fn trend_series(counts: &HashMap<NaiveDate, usize>, period: Period, today: NaiveDate) -> Vec<TrendBucket> {
    let granularity = Granularity::for_period(period);
    trend_bucket_starts(period, today)
        .into_iter()
        .map(|start| TrendBucket {
            label: granularity.label(start),
            start,
            count: counts.get(&start).copied().unwrap_or(0),
        })
        .collect()
}

#[cfg(test)]
mod tests;
