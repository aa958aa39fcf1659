//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading and preprocessing the event log
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Data file {} does not exist", .0.display())]
    FileNotFound(PathBuf),

    #[error("CSV read failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("Malformed row at line {line}: {reason}")]
    MalformedRow { line: u64, reason: String },
}

/// Errors that can occur during aggregation
#[derive(Error, Debug)]
pub enum AggregateError {
    #[error("Empty dataset: {0}")]
    EmptyDataset(String),
}

/// Errors that can occur during chart generation
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("No series to plot")]
    EmptySeries,

    #[error("Series '{label}' has {actual} points but the axis has {expected} months")]
    LengthMismatch {
        label: String,
        expected: usize,
        actual: usize,
    },
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to write CSV: {0}")]
    CsvFailed(#[from] csv::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
