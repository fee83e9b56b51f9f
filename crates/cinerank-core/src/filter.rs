// Status-based views of a record collection

use cinerank_models::{MovieRecord, RecordError};
use tracing::{debug, warn};

/// Watched records that carry a watch date, ready for the stats engine
pub fn watched_snapshot(records: &[MovieRecord]) -> Vec<MovieRecord> {
    let watched: Vec<MovieRecord> = records
        .iter()
        .filter(|record| record.is_watched() && record.date_watched.is_some())
        .cloned()
        .collect();

    debug!(
        "watched_snapshot: input_count={}, watched_count={}",
        records.len(),
        watched.len()
    );
    watched
}

/// Records still on the to-watch queue
pub fn queued_snapshot(records: &[MovieRecord]) -> Vec<MovieRecord> {
    let queued: Vec<MovieRecord> = records.iter().filter(|record| record.is_queued()).cloned().collect();

    debug!(
        "queued_snapshot: input_count={}, queued_count={}",
        records.len(),
        queued.len()
    );
    queued
}

/// Split `records` into those passing `MovieRecord::validate` and the
/// errors for the rest. Order is preserved on both sides.
pub fn partition_valid(records: Vec<MovieRecord>) -> (Vec<MovieRecord>, Vec<RecordError>) {
    let mut valid = Vec::with_capacity(records.len());
    let mut errors = Vec::new();

    for record in records {
        match record.validate() {
            Ok(()) => valid.push(record),
            Err(e) => {
                warn!("Skipping invalid record: {}", e);
                errors.push(e);
            }
        }
    }

    (valid, errors)
}
