pub mod calendar;
pub mod config;
pub mod history;
pub mod queue;
pub mod stats;

use crate::output::Output;
use crate::snapshot::load_snapshot;
use chrono::{DateTime, Utc};
use cinerank_config::{Config, PathManager};
use cinerank_core::{partition_valid, BucketCalendar};
use cinerank_models::MovieRecord;
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use std::path::PathBuf;

/// Everything a read-only command needs, resolved once in `main`
pub struct CommandContext {
    pub config: Config,
    pub paths: PathManager,
    pub snapshot_path: PathBuf,
    pub now: DateTime<Utc>,
    pub calendar: BucketCalendar,
}

impl CommandContext {
    pub fn new(
        config: Config,
        paths: PathManager,
        snapshot_override: Option<PathBuf>,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let calendar = BucketCalendar::from_offset_minutes(config.stats.utc_offset_minutes)
            .ok_or_else(|| eyre!("Invalid utc_offset_minutes: {}", config.stats.utc_offset_minutes))?;
        let snapshot_path =
            snapshot_override.unwrap_or_else(|| config.snapshot_path(paths.default_snapshot_file()));

        Ok(Self {
            config,
            paths,
            snapshot_path,
            now,
            calendar,
        })
    }

    /// Load the snapshot, dropping (and reporting) records that fail validation
    pub fn load_records(&self, output: &Output) -> Result<Vec<MovieRecord>> {
        let records = load_snapshot(&self.snapshot_path)
            .wrap_err_with(|| format!("Failed to load snapshot {}", self.snapshot_path.display()))?;

        let (valid, errors) = partition_valid(records);
        if !errors.is_empty() {
            output.warn(format!("Skipped {} invalid records", errors.len()));
        }
        Ok(valid)
    }
}

/// One-to-five rating as filled stars
pub fn stars(value: u8) -> String {
    let filled = value.min(5) as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}
