// To-watch queue ordering

use crate::score::score;
use chrono::{DateTime, Utc};
use cinerank_models::{MovieRecord, SortOption};
use serde::Serialize;
use std::cmp::Ordering;
use tracing::debug;

/// How the queue should be filtered and ordered
#[derive(Debug, Clone, Default)]
pub struct QueueQuery {
    pub sort: SortOption,
    /// Case-insensitive match on name, director or actors
    pub search: Option<String>,
    pub limit: Option<usize>,
}

/// A queued record with the score it was ranked by
#[derive(Debug, Clone, Serialize)]
pub struct RankedMovie<'a> {
    #[serde(flatten)]
    pub record: &'a MovieRecord,
    pub score: f64,
}

/// Queued records matching `query`, in display order.
///
/// Watched records are dropped. `Ranked` orders by score, highest first,
/// with the most recently added winning ties. The other orders are stable.
pub fn rank_queue<'a>(
    records: &'a [MovieRecord],
    query: &QueueQuery,
    now: DateTime<Utc>,
) -> Vec<RankedMovie<'a>> {
    let needle = normalize_search(query.search.as_deref());

    let mut ranked: Vec<RankedMovie<'a>> = records
        .iter()
        .filter(|record| record.is_queued())
        .filter(|record| record.matches_query(&needle))
        .map(|record| RankedMovie {
            record,
            score: score(record, now),
        })
        .collect();

    match query.sort {
        SortOption::Ranked => ranked.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| b.record.date_added.cmp(&a.record.date_added))
        }),
        SortOption::RecentlyAdded => {
            ranked.sort_by(|a, b| b.record.date_added.cmp(&a.record.date_added))
        }
        SortOption::HighestPriority => {
            ranked.sort_by(|a, b| b.record.priority.cmp(&a.record.priority))
        }
    }

    if let Some(limit) = query.limit {
        ranked.truncate(limit);
    }

    debug!(
        "rank_queue: input_count={}, result_count={}, sort={}, search={:?}",
        records.len(),
        ranked.len(),
        query.sort,
        query.search
    );

    ranked
}

/// Lowercased, trimmed search text; empty means "match everything"
pub(crate) fn normalize_search(search: Option<&str>) -> String {
    search.map(|s| s.trim().to_lowercase()).unwrap_or_default()
}
