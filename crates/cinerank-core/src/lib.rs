pub mod buckets;
pub mod calendar;
pub mod filter;
pub mod history;
pub mod queue;
pub mod score;
pub mod stats;

pub use buckets::{BucketCalendar, Granularity};
pub use calendar::{month_grid, watched_on, CalendarDay, MonthGrid};
pub use filter::{partition_valid, queued_snapshot, watched_snapshot};
pub use history::{history, watched_years, HistoryQuery};
pub use queue::{rank_queue, QueueQuery, RankedMovie};
pub use score::{score, ScoreBreakdown};
pub use stats::{compute_stats, StatsEngine};
