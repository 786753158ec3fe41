//! Backup snapshots: both collections wrapped in one portable JSON envelope.

use chrono::{DateTime, NaiveDate, Utc};
use cinetrack_models::{MovieRecord, WatchedRecord};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::store::MovieState;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("invalid JSON format: {0}")]
    InvalidJson(#[source] serde_json::Error),
    #[error("invalid data format - missing watchlist or watched arrays")]
    MissingCollections,
    #[error("invalid movie records in snapshot: {0}")]
    InvalidRecords(#[source] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub watchlist: Vec<MovieRecord>,
    pub watched: Vec<WatchedRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_movies: Option<usize>,
}

impl Snapshot {
    pub fn movie_count(&self) -> usize {
        self.watchlist.len() + self.watched.len()
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Copy both collections out of `state`. Pure read.
pub fn export_snapshot(state: &MovieState, now: DateTime<Utc>) -> Snapshot {
    Snapshot {
        watchlist: state.watchlist.clone(),
        watched: state.watched.clone(),
        export_date: Some(now),
        total_movies: Some(state.total_movies()),
    }
}

/// True for an object carrying both `watchlist` and `watched` arrays
pub fn validate_snapshot(raw: &Value) -> bool {
    matches!(
        (raw.get("watchlist"), raw.get("watched")),
        (Some(Value::Array(_)), Some(Value::Array(_)))
    )
}

/// Parse the text of a backup file
pub fn parse_snapshot(text: &str) -> Result<Snapshot, ImportError> {
    let raw: Value = serde_json::from_str(text).map_err(ImportError::InvalidJson)?;
    snapshot_from_value(raw)
}

/// Build a snapshot from parsed JSON. Only the two collections are required;
/// `exportDate` and `totalMovies` are informational and read leniently.
pub fn snapshot_from_value(mut raw: Value) -> Result<Snapshot, ImportError> {
    if !validate_snapshot(&raw) {
        return Err(ImportError::MissingCollections);
    }

    let export_date = raw
        .get("exportDate")
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|date| date.with_timezone(&Utc));
    let total_movies = raw.get("totalMovies").and_then(Value::as_u64).map(|n| n as usize);

    let watchlist = serde_json::from_value(raw["watchlist"].take()).map_err(ImportError::InvalidRecords)?;
    let watched = serde_json::from_value(raw["watched"].take()).map_err(ImportError::InvalidRecords)?;

    Ok(Snapshot {
        watchlist,
        watched,
        export_date,
        total_movies,
    })
}

/// `cinetrack-backup-2024-05-01.json`
pub fn default_backup_file_name(date: NaiveDate) -> String {
    format!("cinetrack-backup-{}.json", date.format("%Y-%m-%d"))
}
