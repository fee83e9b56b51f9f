use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Dashboard figures for one reporting period
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchStats {
    pub total: usize,
    /// Movies per period unit, full precision
    pub average: f64,
    /// Consecutive buckets with at least one watch, ending at or just before now
    pub streak: u32,
    /// Dense, oldest first
    pub trend: Vec<TrendBucket>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrendBucket {
    pub label: String,
    /// First calendar day covered by the bucket
    pub start: NaiveDate,
    pub count: usize,
}
