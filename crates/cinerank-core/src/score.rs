// Watch-worthiness score used to rank the to-watch queue.
//
// score = 0.35*release + 0.30*added + 0.20*priority + 0.15*fun
// Every sub-score is normalized to [0, 1] for well-formed records.

use chrono::{DateTime, NaiveDate, Utc};
use cinerank_models::MovieRecord;
use serde::Serialize;

pub const RELEASE_WEIGHT: f64 = 0.35;
pub const ADDED_WEIGHT: f64 = 0.30;
pub const PRIORITY_WEIGHT: f64 = 0.20;
pub const FUN_WEIGHT: f64 = 0.15;

/// Release recency decays linearly to zero over ten years
const RELEASE_DECAY_DAYS: f64 = 3650.0;
/// Used when the release year is unknown
pub const NEUTRAL_RELEASE_SCORE: f64 = 0.5;

const FRESH_DECAY_DAYS: f64 = 7.0;
const STALE_GROWTH_DAYS: f64 = 60.0;
const FRESH_SHARE: f64 = 0.55;
const STALE_SHARE: f64 = 0.45;

/// The four weighted inputs of a score, kept for `--explain` style output
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub release: f64,
    pub added: f64,
    pub priority: f64,
    pub fun: f64,
    pub total: f64,
}

impl ScoreBreakdown {
    pub fn compute(record: &MovieRecord, now: DateTime<Utc>) -> Self {
        let release = release_score(record.year, now);
        let added = added_score(days_between(now, record.date_added) as f64);
        let priority = rescale_rating(record.priority);
        let fun = rescale_rating(record.fun);

        let total = RELEASE_WEIGHT * release
            + ADDED_WEIGHT * added
            + PRIORITY_WEIGHT * priority
            + FUN_WEIGHT * fun;

        Self { release, added, priority, fun, total }
    }
}

/// Rank score for a queued record evaluated at `now`. Higher surfaces sooner.
pub fn score(record: &MovieRecord, now: DateTime<Utc>) -> f64 {
    ScoreBreakdown::compute(record, now).total
}

/// `1 - clamp(days since Jan 1 of year / 3650)`, or 0.5 without a year.
///
/// Future release years give negative day counts and clamp to 1.0.
pub fn release_score(year: Option<i32>, now: DateTime<Utc>) -> f64 {
    let released = year
        .and_then(|y| NaiveDate::from_ymd_opt(y, 1, 1))
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc());

    match released {
        Some(released) => {
            let days = days_between(now, released) as f64;
            1.0 - clamp01(days / RELEASE_DECAY_DAYS)
        }
        None => NEUTRAL_RELEASE_SCORE,
    }
}

/// Queue-age term: `0.55*exp(-A/7) + 0.45*(1 - exp(-A/60))`.
///
/// 0.55 on the day a movie is added, bottoming out near 0.16 about three
/// weeks in and climbing back toward 0.45 for long-neglected entries.
/// `days_since_added` is used as-is; a future `date_added` yields values
/// above 0.55.
pub fn added_score(days_since_added: f64) -> f64 {
    let fresh = (-days_since_added / FRESH_DECAY_DAYS).exp();
    let stale = 1.0 - (-days_since_added / STALE_GROWTH_DAYS).exp();
    FRESH_SHARE * fresh + STALE_SHARE * stale
}

/// Linear map of a 1-5 rating onto 0-1. Out-of-range input is not clamped.
pub fn rescale_rating(value: u8) -> f64 {
    (f64::from(value) - 1.0) / 4.0
}

/// Whole days from `earlier` to `later`, truncated toward zero
pub(crate) fn days_between(later: DateTime<Utc>, earlier: DateTime<Utc>) -> i64 {
    (later - earlier).num_days()
}

fn clamp01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}
