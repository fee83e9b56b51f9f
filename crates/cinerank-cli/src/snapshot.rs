// Loading record snapshots exported by the application

use chrono::{DateTime, NaiveDate, Utc};
use cinerank_models::{MovieRecord, MovieStatus};
use serde::Deserialize;
use std::fs::File;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid CSV in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{path}, row {row}: {message}")]
    Row { path: PathBuf, row: usize, message: String },

    #[error("unsupported snapshot format for {0} (expected .json or .csv)")]
    UnsupportedFormat(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Json,
    Csv,
}

impl SnapshotFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "json" => Some(SnapshotFormat::Json),
            "csv" => Some(SnapshotFormat::Csv),
            _ => None,
        }
    }
}

/// Row of the application's CSV export
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CsvRow {
    #[serde(rename = "ID")]
    id: String,
    name: String,
    status: String,
    priority: String,
    fun: String,
    #[serde(default)]
    director: String,
    #[serde(default)]
    actors: String,
    #[serde(default)]
    year: String,
    date_added: String,
    #[serde(default)]
    date_watched: String,
}

/// Load every record from `path`, picking the format from its extension
pub fn load_snapshot(path: &Path) -> Result<Vec<MovieRecord>, SnapshotError> {
    if !path.exists() {
        return Err(SnapshotError::NotFound(path.to_path_buf()));
    }

    let format = SnapshotFormat::from_path(path)
        .ok_or_else(|| SnapshotError::UnsupportedFormat(path.to_path_buf()))?;
    debug!("Loading {:?} snapshot from {}", format, path.display());

    let records = match format {
        SnapshotFormat::Json => {
            let content = std::fs::read_to_string(path).map_err(|source| SnapshotError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            parse_json(&content, path)?
        }
        SnapshotFormat::Csv => {
            let file = File::open(path).map_err(|source| SnapshotError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            parse_csv(file, path)?
        }
    };

    info!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

fn parse_json(content: &str, path: &Path) -> Result<Vec<MovieRecord>, SnapshotError> {
    serde_json::from_str(content).map_err(|source| SnapshotError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_csv<R: std::io::Read>(reader: R, path: &Path) -> Result<Vec<MovieRecord>, SnapshotError> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut records = Vec::new();

    for (index, result) in reader.deserialize::<CsvRow>().enumerate() {
        // Header is line 1
        let row = index + 2;
        let raw = result.map_err(|source| SnapshotError::Csv {
            path: path.to_path_buf(),
            source,
        })?;

        if raw.id.is_empty() {
            debug!(row, "Skipping row with empty ID");
            continue;
        }

        let record = record_from_row(raw).map_err(|message| SnapshotError::Row {
            path: path.to_path_buf(),
            row,
            message,
        })?;
        records.push(record);
    }

    Ok(records)
}

fn record_from_row(row: CsvRow) -> Result<MovieRecord, String> {
    let status: MovieStatus = row.status.parse().map_err(|e| format!("{}", e))?;
    let priority = row
        .priority
        .parse::<u8>()
        .map_err(|_| format!("invalid priority '{}'", row.priority))?;
    let fun = row.fun.parse::<u8>().map_err(|_| format!("invalid fun '{}'", row.fun))?;
    // Unparseable years are dropped, as the application does on import
    let year = row.year.parse::<i32>().ok();

    let date_added = parse_timestamp(&row.date_added)
        .ok_or_else(|| format!("invalid DateAdded '{}'", row.date_added))?;
    let date_watched = if row.date_watched.is_empty() {
        None
    } else {
        Some(
            parse_timestamp(&row.date_watched)
                .ok_or_else(|| format!("invalid DateWatched '{}'", row.date_watched))?,
        )
    };

    Ok(MovieRecord {
        id: row.id,
        name: if row.name.is_empty() { "Untitled".to_string() } else { row.name },
        status,
        priority,
        fun,
        director: non_empty(row.director),
        actors: non_empty(row.actors),
        year,
        date_added,
        date_watched,
    })
}

/// RFC 3339 timestamp, or a bare `YYYY-MM-DD` read as midnight UTC
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(at) = DateTime::parse_from_rfc3339(value) {
        return Some(at.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()?
        .and_hms_opt(0, 0, 0)
        .map(|naive| naive.and_utc())
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
