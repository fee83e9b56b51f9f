use cinerank_models::{HistorySort, Period, SortOption};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Largest accepted calendar offset, just under a day either way
pub const MAX_UTC_OFFSET_MINUTES: i32 = 1439;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub snapshot: SnapshotConfig,
    #[serde(default)]
    pub stats: StatsConfig,
    #[serde(default)]
    pub queue: QueueConfig,
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SnapshotConfig {
    /// Snapshot read when `--snapshot` is not given; falls back to the data dir
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StatsConfig {
    #[serde(default)]
    pub default_period: Period,
    /// Offset of the local calendar used for day/week/month buckets
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct QueueConfig {
    #[serde(default)]
    pub default_sort: SortOption,
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HistoryConfig {
    #[serde(default)]
    pub default_sort: HistorySort,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Daily-rotated log file, in addition to stderr
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load `path` if it exists, otherwise return the defaults
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Wrote config to {}", path.display());
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let offset = self.stats.utc_offset_minutes;
        if !(-MAX_UTC_OFFSET_MINUTES..=MAX_UTC_OFFSET_MINUTES).contains(&offset) {
            return Err(anyhow::anyhow!(
                "stats.utc_offset_minutes must be between -{} and {}, got {}",
                MAX_UTC_OFFSET_MINUTES,
                MAX_UTC_OFFSET_MINUTES,
                offset
            ));
        }

        if self.queue.limit == Some(0) {
            return Err(anyhow::anyhow!("queue.limit must be at least 1 when set"));
        }

        if self.logging.level.trim().is_empty() {
            return Err(anyhow::anyhow!("logging.level cannot be empty"));
        }

        Ok(())
    }

    /// Configured snapshot path, or the default under `data_dir`
    pub fn snapshot_path(&self, default: PathBuf) -> PathBuf {
        self.snapshot.path.clone().unwrap_or(default)
    }
}
