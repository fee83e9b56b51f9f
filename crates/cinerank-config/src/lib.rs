pub mod config;
pub mod paths;

pub use config::{Config, HistoryConfig, LoggingConfig, QueueConfig, SnapshotConfig, StatsConfig, MAX_UTC_OFFSET_MINUTES};
pub use paths::{PathManager, HOME_ENV_VAR};
