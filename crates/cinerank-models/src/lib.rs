pub mod error;
pub mod movie;
pub mod period;
pub mod sort;
pub mod stats;
pub mod status;

pub use error::{ParseEnumError, RecordError};
pub use movie::MovieRecord;
pub use period::Period;
pub use sort::{HistorySort, SortOption};
pub use stats::{TrendBucket, WatchStats};
pub use status::MovieStatus;
