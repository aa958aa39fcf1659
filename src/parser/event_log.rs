//! Event log loader and preprocessor.
//!
//! Reads the header-less event log into `RawEvent`s and decodes each
//! millisecond timestamp into the calendar fields used for grouping.

use super::schema::{Event, RawEvent, YearMonth};
use crate::utils::config::EVENT_COLUMNS;
use crate::utils::error::LoadError;
use chrono::{DateTime, Datelike};
use csv::{ReaderBuilder, StringRecord};
use log::{debug, info, warn};
use std::io::Read;
use std::path::Path;

/// Load every event from the log at `path`
///
/// **Public** - main entry point for loading
///
/// # Arguments
/// * `path` - Header-less delimited file, columns in `EVENT_COLUMNS` order
///
/// # Returns
/// One `RawEvent` per input row, in file order
///
/// # Errors
/// * `LoadError::FileNotFound` - `path` does not exist
/// * `LoadError::Csv` - the file cannot be read as delimited text
/// * `LoadError::MalformedRow` - wrong column count or non-integer timestamp
pub fn load_events(path: impl AsRef<Path>) -> Result<Vec<RawEvent>, LoadError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(LoadError::FileNotFound(path.to_path_buf()));
    }

    let file = std::fs::File::open(path).map_err(|e| LoadError::Csv(e.into()))?;
    let events = read_events(file)?;

    info!("Fetched {} rows from {}", events.len(), path.display());
    Ok(events)
}

/// Read events from any delimited source
///
/// **Public** - used by `load_events` and handy for in-memory logs
pub fn read_events<R: Read>(reader: R) -> Result<Vec<RawEvent>, LoadError> {
    // Flexible so that a short row reports our own error with its line number
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut events = Vec::new();
    for (index, result) in rdr.records().enumerate() {
        let record = result?;
        let line = record
            .position()
            .map(|p| p.line())
            .unwrap_or(index as u64 + 1);
        events.push(parse_record(&record, line)?);
    }

    debug!("Read {} raw events", events.len());
    Ok(events)
}

/// Convert one CSV record into a `RawEvent`
///
/// **Private** - internal helper for read_events
fn parse_record(record: &StringRecord, line: u64) -> Result<RawEvent, LoadError> {
    if record.len() != EVENT_COLUMNS.len() {
        return Err(LoadError::MalformedRow {
            line,
            reason: format!(
                "expected {} columns ({}), found {}",
                EVENT_COLUMNS.len(),
                EVENT_COLUMNS.join(", "),
                record.len()
            ),
        });
    }

    let raw_timestamp = record[0].trim();
    let timestamp = raw_timestamp
        .parse::<i64>()
        .map_err(|_| LoadError::MalformedRow {
            line,
            reason: format!("timestamp '{}' is not an integer", raw_timestamp),
        })?;

    Ok(RawEvent {
        timestamp,
        message_id: record[1].to_string(),
        sender: record[2].to_string(),
        recipients: record[3].to_string(),
        topic: record[4].to_string(),
        mode: record[5].to_string(),
        line,
    })
}

/// Decode timestamps and derive the calendar fields
///
/// **Public** - second pipeline stage
///
/// Row count and order are unchanged.
///
/// # Errors
/// * `LoadError::MalformedRow` - timestamp outside the representable range
pub fn preprocess(raw_events: Vec<RawEvent>) -> Result<Vec<Event>, LoadError> {
    let mut events = Vec::with_capacity(raw_events.len());

    for raw in raw_events {
        let date_time = DateTime::from_timestamp_millis(raw.timestamp)
            .ok_or_else(|| LoadError::MalformedRow {
                line: raw.line,
                reason: format!("timestamp {} is out of range", raw.timestamp),
            })?
            .naive_utc();

        if raw.recipients.is_empty() {
            warn!("Message {} from {} has no recipients", raw.message_id, raw.sender);
        }

        events.push(Event {
            timestamp: raw.timestamp,
            message_id: raw.message_id,
            sender: raw.sender,
            recipients: raw.recipients,
            topic: raw.topic,
            mode: raw.mode,
            year: date_time.year(),
            year_month: YearMonth::from_date_time(&date_time),
            date_time,
        });
    }

    debug!("Preprocessed {} events", events.len());
    Ok(events)
}
