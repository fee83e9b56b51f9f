// Watch history filtering and ordering

use crate::buckets::BucketCalendar;
use crate::queue::normalize_search;
use chrono::Datelike;
use cinerank_models::{HistorySort, MovieRecord};
use std::collections::BTreeSet;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct HistoryQuery {
    pub sort: HistorySort,
    pub search: Option<String>,
    /// Calendar year of the watch date
    pub year: Option<i32>,
    /// Calendar month of the watch date, 1-12
    pub month: Option<u32>,
}

/// Watched records matching `query`, in display order.
///
/// Year and month filters use the watch date in `calendar`'s offset; a
/// record without a watch date never passes a date filter. Sorting is
/// stable, so equal ratings keep their input order.
pub fn history<'a>(
    records: &'a [MovieRecord],
    query: &HistoryQuery,
    calendar: &BucketCalendar,
) -> Vec<&'a MovieRecord> {
    let needle = normalize_search(query.search.as_deref());

    let watch_date = |record: &MovieRecord| record.date_watched.map(|at| calendar.date_of(at));

    let mut list: Vec<&MovieRecord> = records
        .iter()
        .filter(|record| record.is_watched())
        .filter(|record| record.matches_query(&needle))
        .filter(|record| match query.year {
            Some(year) => watch_date(*record).map(|d| d.year() == year).unwrap_or(false),
            None => true,
        })
        .filter(|record| match query.month {
            Some(month) => watch_date(*record).map(|d| d.month() == month).unwrap_or(false),
            None => true,
        })
        .collect();

    match query.sort {
        HistorySort::DateDesc => list.sort_by(|a, b| b.date_watched.cmp(&a.date_watched)),
        HistorySort::DateAsc => list.sort_by(|a, b| a.date_watched.cmp(&b.date_watched)),
        HistorySort::RatingDesc => list.sort_by(|a, b| b.fun.cmp(&a.fun)),
        HistorySort::RatingAsc => list.sort_by(|a, b| a.fun.cmp(&b.fun)),
    }

    debug!(
        "history: input_count={}, result_count={}, sort={}, year={:?}, month={:?}",
        records.len(),
        list.len(),
        query.sort,
        query.year,
        query.month
    );

    list
}

/// Distinct years with at least one watch, newest first
pub fn watched_years(records: &[MovieRecord], calendar: &BucketCalendar) -> Vec<i32> {
    let years: BTreeSet<i32> = records
        .iter()
        .filter_map(|record| record.date_watched)
        .map(|at| calendar.date_of(at).year())
        .collect();
    years.into_iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use cinerank_models::MovieStatus;

    fn create_watched(id: &str, rating: u8, y: i32, m: u32, d: u32) -> MovieRecord {
        let at = Utc.with_ymd_and_hms(y, m, d, 21, 0, 0).unwrap();
        MovieRecord::queued(id, format!("Movie {}", id), at).mark_watched(rating, at)
    }

    fn ids(list: &[&MovieRecord]) -> Vec<String> {
        list.iter().map(|r| r.id.clone()).collect()
    }

    fn sample() -> Vec<MovieRecord> {
        vec![
            create_watched("a", 3, 2023, 11, 2),
            create_watched("b", 5, 2024, 2, 14),
            create_watched("c", 1, 2024, 5, 30),
            create_watched("d", 5, 2024, 2, 1),
            MovieRecord::queued("q", "Queued", Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
        ]
    }

    #[test]
    fn test_default_is_newest_first_watched_only() {
        let records = sample();
        let list = history(&records, &HistoryQuery::default(), &BucketCalendar::utc());
        assert_eq!(ids(&list), vec!["c", "b", "d", "a"]);
    }

    #[test]
    fn test_sort_options() {
        let records = sample();
        let calendar = BucketCalendar::utc();

        let asc = HistoryQuery { sort: HistorySort::DateAsc, ..HistoryQuery::default() };
        assert_eq!(ids(&history(&records, &asc, &calendar)), vec!["a", "d", "b", "c"]);

        let best = HistoryQuery { sort: HistorySort::RatingDesc, ..HistoryQuery::default() };
        assert_eq!(ids(&history(&records, &best, &calendar)), vec!["b", "d", "a", "c"]);

        let worst = HistoryQuery { sort: HistorySort::RatingAsc, ..HistoryQuery::default() };
        assert_eq!(ids(&history(&records, &worst, &calendar)), vec!["c", "a", "b", "d"]);
    }

    #[test]
    fn test_year_and_month_filters() {
        let records = sample();
        let calendar = BucketCalendar::utc();

        let in_2024 = HistoryQuery { year: Some(2024), ..HistoryQuery::default() };
        assert_eq!(ids(&history(&records, &in_2024, &calendar)), vec!["c", "b", "d"]);

        let february = HistoryQuery { year: Some(2024), month: Some(2), ..HistoryQuery::default() };
        assert_eq!(ids(&history(&records, &february, &calendar)), vec!["b", "d"]);

        let november_any_year = HistoryQuery { month: Some(11), ..HistoryQuery::default() };
        assert_eq!(ids(&history(&records, &november_any_year, &calendar)), vec!["a"]);
    }

    #[test]
    fn test_month_filter_uses_calendar_offset() {
        // 21:00 UTC on Jan 31 is already Feb 1 at UTC+5
        let records = vec![create_watched("late", 4, 2024, 1, 31)];
        let plus_five = BucketCalendar::from_offset_minutes(300).unwrap();
        let february = HistoryQuery { month: Some(2), ..HistoryQuery::default() };

        assert!(history(&records, &february, &BucketCalendar::utc()).is_empty());
        assert_eq!(history(&records, &february, &plus_five).len(), 1);
    }

    #[test]
    fn test_undated_watched_records_fail_date_filters() {
        let mut undated = create_watched("u", 4, 2024, 3, 3);
        undated.date_watched = None;
        assert_eq!(undated.status, MovieStatus::Watched);
        let records = vec![undated];

        let unfiltered = history(&records, &HistoryQuery::default(), &BucketCalendar::utc());
        assert_eq!(unfiltered.len(), 1);

        let in_2024 = HistoryQuery { year: Some(2024), ..HistoryQuery::default() };
        assert!(history(&records, &in_2024, &BucketCalendar::utc()).is_empty());
    }

    #[test]
    fn test_watched_years() {
        let records = sample();
        assert_eq!(watched_years(&records, &BucketCalendar::utc()), vec![2024, 2023]);
        assert!(watched_years(&[], &BucketCalendar::utc()).is_empty());
    }
}
