use crate::error::ParseEnumError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ordering applied to the to-watch queue
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortOption {
    /// Watch-worthiness score, highest first
    #[default]
    Ranked,
    /// Newest additions first
    RecentlyAdded,
    /// Priority 5 down to 1
    HighestPriority,
}

impl SortOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Ranked => "ranked",
            SortOption::RecentlyAdded => "recent",
            SortOption::HighestPriority => "priority",
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOption {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "ranked" | "rank" => Ok(SortOption::Ranked),
            "recent" | "recently_added" => Ok(SortOption::RecentlyAdded),
            "priority" | "highest_priority" => Ok(SortOption::HighestPriority),
            _ => Err(ParseEnumError::new("queue sort", s, "ranked, recent, priority")),
        }
    }
}

/// Ordering applied to the watch history
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum HistorySort {
    #[default]
    DateDesc,
    DateAsc,
    RatingDesc,
    RatingAsc,
}

impl HistorySort {
    pub fn as_str(&self) -> &'static str {
        match self {
            HistorySort::DateDesc => "date-desc",
            HistorySort::DateAsc => "date-asc",
            HistorySort::RatingDesc => "rating-desc",
            HistorySort::RatingAsc => "rating-asc",
        }
    }
}

impl fmt::Display for HistorySort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HistorySort {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "date_desc" | "newest" => Ok(HistorySort::DateDesc),
            "date_asc" | "oldest" => Ok(HistorySort::DateAsc),
            "rating_desc" => Ok(HistorySort::RatingDesc),
            "rating_asc" => Ok(HistorySort::RatingAsc),
            _ => Err(ParseEnumError::new(
                "history sort",
                s,
                "date-desc, date-asc, rating-desc, rating-asc",
            )),
        }
    }
}
