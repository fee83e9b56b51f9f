use super::*;
use chrono::{Datelike, Duration, TimeZone};
use cinerank_models::MovieStatus;

const EPS: f64 = 1e-9;

// Saturday
fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn create_watched_at(id: &str, watched_at: DateTime<Utc>) -> MovieRecord {
    MovieRecord {
        id: id.to_string(),
        name: format!("Movie {}", id),
        status: MovieStatus::Watched,
        priority: 3,
        fun: 4,
        director: None,
        actors: None,
        year: Some(2010),
        date_added: watched_at - Duration::days(30),
        date_watched: Some(watched_at),
    }
}

fn create_watched(id: &str, days_ago: i64) -> MovieRecord {
    create_watched_at(id, now() - Duration::days(days_ago))
}

fn create_watched_on(id: &str, y: i32, m: u32, d: u32) -> MovieRecord {
    create_watched_at(id, Utc.with_ymd_and_hms(y, m, d, 20, 0, 0).unwrap())
}

fn stats(records: &[MovieRecord], period: Period) -> WatchStats {
    compute_stats(records, period, now()).expect("stats for non-empty input")
}

#[test]
fn test_empty_input_is_none_for_every_period() {
    for period in Period::ALL {
        assert!(compute_stats(&[], period, now()).is_none());
    }
}

#[test]
fn test_records_without_watch_date_are_ignored() {
    let mut undated = create_watched("a", 0);
    undated.date_watched = None;
    assert!(compute_stats(&[undated.clone()], Period::Weekly, now()).is_none());

    let result = stats(&[undated, create_watched("b", 0)], Period::Weekly);
    assert_eq!(result.total, 1);
}

#[test]
fn test_daily_streak_single_day_today() {
    let records = vec![create_watched("a", 0), create_watched("b", 0)];
    assert_eq!(stats(&records, Period::Weekly).streak, 1);
}

#[test]
fn test_daily_streak_grace_from_yesterday() {
    let records = vec![create_watched("a", 1)];
    assert_eq!(stats(&records, Period::Weekly).streak, 1);
}

#[test]
fn test_daily_streak_broken_two_days_ago() {
    let records = vec![create_watched("a", 2), create_watched("b", 3)];
    assert_eq!(stats(&records, Period::Weekly).streak, 0);
}

#[test]
fn test_daily_streak_stops_at_first_gap_after_grace() {
    // Nothing today, yesterday present, gap from 2 to 7 days ago, 8 days ago present
    let records = vec![create_watched("a", 1), create_watched("b", 8)];
    assert_eq!(stats(&records, Period::Weekly).streak, 1);
}

#[test]
fn test_daily_streak_counts_consecutive_days() {
    let records = vec![
        create_watched("a", 0),
        create_watched("b", 1),
        create_watched("c", 2),
        create_watched("d", 4),
        create_watched("e", 5),
    ];
    assert_eq!(stats(&records, Period::Weekly).streak, 3);

    let from_yesterday = vec![create_watched("a", 1), create_watched("b", 2), create_watched("c", 3)];
    assert_eq!(stats(&from_yesterday, Period::Weekly).streak, 3);
}

#[test]
fn test_weekly_streak_on_monthly_period() {
    // Current week starts Mon Jun 10
    let records = vec![
        create_watched_on("a", 2024, 6, 12),
        create_watched_on("b", 2024, 6, 5),
        create_watched_on("c", 2024, 5, 28),
        create_watched_on("d", 2024, 5, 14),
    ];
    assert_eq!(stats(&records, Period::Monthly).streak, 3);
}

#[test]
fn test_weekly_streak_grace_from_previous_week() {
    let records = vec![
        create_watched_on("a", 2024, 6, 4),
        create_watched_on("b", 2024, 5, 29),
        create_watched_on("c", 2024, 5, 8),
    ];
    assert_eq!(stats(&records, Period::Monthly).streak, 2);
}

#[test]
fn test_monthly_streak_on_yearly_period() {
    let records = vec![
        create_watched_on("a", 2024, 6, 1),
        create_watched_on("b", 2024, 5, 20),
        create_watched_on("c", 2024, 4, 2),
        create_watched_on("d", 2024, 2, 10),
    ];
    assert_eq!(stats(&records, Period::Yearly).streak, 3);

    let grace = vec![create_watched_on("a", 2024, 5, 31), create_watched_on("b", 2024, 4, 30)];
    assert_eq!(stats(&grace, Period::Yearly).streak, 2);
}

#[test]
fn test_monthly_streak_crosses_year_boundary() {
    let now = Utc.with_ymd_and_hms(2025, 1, 10, 8, 0, 0).unwrap();
    let records = vec![
        create_watched_on("a", 2025, 1, 3),
        create_watched_on("b", 2024, 12, 20),
        create_watched_on("c", 2024, 11, 5),
    ];
    let result = compute_stats(&records, Period::Yearly, now).unwrap();
    assert_eq!(result.streak, 3);
}

#[test]
fn test_average_single_record_today_yearly() {
    let result = stats(&[create_watched("a", 0)], Period::Yearly);
    assert!((result.average - 1.0).abs() < EPS);
}

#[test]
fn test_average_uses_period_units() {
    // First watch 70 days ago: 10 weeks, 2.3 months, under a year
    let records: Vec<MovieRecord> = (0..10).map(|i| create_watched(&format!("m{}", i), 70 - i)).collect();

    let weekly = stats(&records, Period::Weekly);
    assert!((weekly.average - 1.0).abs() < EPS);

    let monthly = stats(&records, Period::Monthly);
    assert!((monthly.average - 10.0 / (70.0 / 30.44)).abs() < EPS);

    let yearly = stats(&records, Period::Yearly);
    assert!((yearly.average - 10.0).abs() < EPS);
}

#[test]
fn test_average_floors_short_histories() {
    let records = vec![create_watched("a", 10), create_watched("b", 3), create_watched("c", 0)];
    let monthly = stats(&records, Period::Monthly);
    assert!((monthly.average - 3.0).abs() < EPS);
}

#[test]
fn test_trend_lengths() {
    let records = vec![create_watched("a", 0)];
    assert_eq!(stats(&records, Period::Weekly).trend.len(), 15);
    assert_eq!(stats(&records, Period::Yearly).trend.len(), 25);
    // Dec 15 2023 to Jun 15 2024 is 183 days: 26 full steps plus the start
    assert_eq!(stats(&records, Period::Monthly).trend.len(), 27);
}

#[test]
fn test_trend_lengths_do_not_depend_on_record_count() {
    let few = vec![create_watched("a", 3)];
    let many: Vec<MovieRecord> = (0..200).map(|i| create_watched(&format!("m{}", i), i % 900)).collect();
    for period in Period::ALL {
        assert_eq!(stats(&few, period).trend.len(), stats(&many, period).trend.len());
    }
}

#[test]
fn test_trend_window_sizes_across_dates() {
    let anchors = [
        date(2024, 2, 29),
        date(2024, 3, 31),
        date(2023, 1, 1),
        date(2025, 12, 31),
        date(2024, 8, 31),
    ];
    for today in anchors {
        assert_eq!(trend_bucket_starts(Period::Weekly, today).len(), 15);
        assert_eq!(trend_bucket_starts(Period::Yearly, today).len(), 25);

        let window_start = shift_months(today, -6).unwrap();
        let expected = (today - window_start).num_days() / 7 + 1;
        assert_eq!(trend_bucket_starts(Period::Monthly, today).len() as i64, expected);
    }
}

#[test]
fn test_weekly_trend_buckets_and_labels() {
    let records = vec![
        create_watched("a", 0),
        create_watched("b", 0),
        create_watched("c", 14),
        create_watched("d", 15),
    ];
    let trend = stats(&records, Period::Weekly).trend;

    assert_eq!(trend.first().unwrap().label, "Jun 1");
    assert_eq!(trend.first().unwrap().count, 1);
    assert_eq!(trend.last().unwrap().label, "Jun 15");
    assert_eq!(trend.last().unwrap().count, 2);
    assert_eq!(trend.iter().map(|b| b.count).sum::<usize>(), 3);

    for pair in trend.windows(2) {
        assert_eq!(pair[1].start - pair[0].start, Duration::days(1));
    }
}

#[test]
fn test_monthly_trend_is_week_aligned() {
    let records = vec![create_watched_on("a", 2024, 6, 12), create_watched_on("b", 2023, 12, 12)];
    let trend = stats(&records, Period::Monthly).trend;

    let first = trend.first().unwrap();
    assert_eq!(first.start, date(2023, 12, 11));
    assert_eq!(first.label, "W50");
    assert_eq!(first.count, 1);

    let last = trend.last().unwrap();
    assert_eq!(last.start, date(2024, 6, 10));
    assert_eq!(last.label, "W24");
    assert_eq!(last.count, 1);

    for pair in trend.windows(2) {
        assert_eq!(pair[1].start - pair[0].start, Duration::days(7));
    }
}

#[test]
fn test_yearly_trend_is_month_aligned() {
    let records = vec![
        create_watched_on("a", 2022, 6, 3),
        create_watched_on("b", 2022, 5, 30),
        create_watched_on("c", 2024, 6, 14),
        create_watched_on("d", 2024, 6, 1),
    ];
    let trend = stats(&records, Period::Yearly).trend;

    assert_eq!(trend.first().unwrap().label, "Jun 22");
    assert_eq!(trend.first().unwrap().count, 1);
    assert_eq!(trend.last().unwrap().label, "Jun 24");
    assert_eq!(trend.last().unwrap().count, 2);
    assert!(trend.iter().all(|bucket| bucket.start.day() == 1));
}

#[test]
fn test_calendar_offset_shifts_buckets() {
    let late = Utc.with_ymd_and_hms(2024, 6, 14, 23, 30, 0).unwrap();
    let records = vec![create_watched_at("a", late)];

    let utc = StatsEngine::default().compute(&records, Period::Weekly, now()).unwrap();
    assert_eq!(utc.trend.last().unwrap().count, 0);
    assert_eq!(utc.trend[13].count, 1);

    let plus_two = StatsEngine::with_calendar(BucketCalendar::from_offset_minutes(120).unwrap());
    let shifted = plus_two.compute(&records, Period::Weekly, now()).unwrap();
    assert_eq!(shifted.trend.last().unwrap().count, 1);
    assert_eq!(shifted.streak, 1);
}

#[test]
fn test_inconsistent_dates_do_not_panic() {
    let mut before_added = create_watched("a", 2);
    before_added.date_added = now();
    let future = create_watched("b", -5);

    let result = stats(&[before_added, future], Period::Weekly);
    assert_eq!(result.total, 2);
    assert!(result.average.is_finite());
    assert_eq!(result.trend.iter().map(|b| b.count).sum::<usize>(), 1);
}

#[test]
fn test_compute_is_idempotent() {
    let records: Vec<MovieRecord> = (0..25).map(|i| create_watched(&format!("m{}", i), i * 3)).collect();
    for period in Period::ALL {
        assert_eq!(stats(&records, period), stats(&records, period));
    }
}
