//! Max-record loading from CSV.
//!
//! The engine only ever cares about the latest personal best per
//! exercise; this module reduces an append-style CSV export to that
//! newest-wins view.

use crate::{MaxRecord, Result};
use chrono::{DateTime, Utc};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// CSV row format for reading recorded maxes
#[derive(Debug, Deserialize)]
struct CsvRow {
    exercise_id: String,
    max_reps: Option<i32>,
    max_time_seconds: Option<i32>,
    weight: Option<f64>,
    recorded_at: Option<String>,
}

impl TryFrom<CsvRow> for MaxRecord {
    type Error = crate::Error;

    fn try_from(row: CsvRow) -> Result<Self> {
        if row.exercise_id.is_empty() {
            return Err(crate::Error::Other("Max record has empty exercise id".into()));
        }

        let recorded_at = match row.recorded_at.as_deref() {
            Some(raw) if !raw.is_empty() => Some(
                DateTime::parse_from_rfc3339(raw)
                    .map_err(|e| crate::Error::Other(format!("Invalid date: {}", e)))?
                    .with_timezone(&Utc),
            ),
            _ => None,
        };

        Ok(MaxRecord {
            exercise_id: row.exercise_id,
            max_reps: row.max_reps,
            max_time_seconds: row.max_time_seconds,
            weight: row.weight,
            recorded_at,
        })
    }
}

/// Load the latest max record per exercise from a CSV file.
///
/// Rows that fail to parse are skipped with a warning so one bad line
/// never hides the rest of the history. For each exercise the newest
/// `recorded_at` wins; undated rows lose to dated ones, and later rows
/// win among equals (file order).
pub fn load_max_records(path: &Path) -> Result<HashMap<String, MaxRecord>> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_path(path)?;

    let mut records: HashMap<String, MaxRecord> = HashMap::new();
    for result in reader.deserialize::<CsvRow>() {
        let record = match result {
            Ok(row) => match MaxRecord::try_from(row) {
                Ok(record) => record,
                Err(e) => {
                    tracing::warn!("Failed to parse max record row: {}", e);
                    continue;
                }
            },
            Err(e) => {
                tracing::warn!("Failed to deserialize max record row: {}", e);
                continue;
            }
        };

        match records.get(&record.exercise_id) {
            Some(existing) if record.recorded_at < existing.recorded_at => {}
            _ => {
                records.insert(record.exercise_id.clone(), record);
            }
        }
    }

    tracing::debug!("Loaded {} max records from {:?}", records.len(), path);
    Ok(records)
}
