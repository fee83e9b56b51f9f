// Month grid for the watch calendar

use crate::buckets::{shift_months, week_end, week_start, BucketCalendar};
use chrono::{Datelike, NaiveDate};
use cinerank_models::MovieRecord;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    /// False for the leading/trailing days borrowed from adjacent months
    pub in_month: bool,
    pub count: usize,
}

/// Whole Monday-Sunday weeks covering one calendar month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub days: Vec<CalendarDay>,
}

impl MonthGrid {
    pub fn weeks(&self) -> impl Iterator<Item = &[CalendarDay]> {
        self.days.chunks(7)
    }

    /// Watches inside the month itself
    pub fn total(&self) -> usize {
        self.days.iter().filter(|day| day.in_month).map(|day| day.count).sum()
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }
}

/// Build the grid for `year`/`month` with per-day watch counts.
///
/// Only watched records with a watch date are counted. Returns `None` for
/// a month that does not exist.
pub fn month_grid(
    records: &[MovieRecord],
    year: i32,
    month: u32,
    calendar: &BucketCalendar,
) -> Option<MonthGrid> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let last = shift_months(first, 1)?.pred_opt()?;

    let mut counts: HashMap<NaiveDate, usize> = HashMap::new();
    for at in records
        .iter()
        .filter(|record| record.is_watched())
        .filter_map(|record| record.date_watched)
    {
        *counts.entry(calendar.date_of(at)).or_insert(0) += 1;
    }

    let days = week_start(first)
        .iter_days()
        .take_while(|day| *day <= week_end(last))
        .map(|date| CalendarDay {
            date,
            in_month: date.month() == month && date.year() == year,
            count: counts.get(&date).copied().unwrap_or(0),
        })
        .collect();

    Some(MonthGrid { year, month, days })
}

/// Watched records whose watch date falls on `day`
pub fn watched_on<'a>(
    records: &'a [MovieRecord],
    day: NaiveDate,
    calendar: &BucketCalendar,
) -> Vec<&'a MovieRecord> {
    records
        .iter()
        .filter(|record| record.is_watched())
        .filter(|record| record.date_watched.map(|at| calendar.date_of(at)) == Some(day))
        .collect()
}
