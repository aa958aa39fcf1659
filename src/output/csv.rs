//! Contact summary CSV writer.
//!
//! Writes the summary table with a fixed `person,sent,received` header,
//! one line per contact in the order given.

use super::{ensure_parent_dir, file_size, validate_path};
use crate::parser::schema::ContactSummary;
use crate::utils::config::SUMMARY_HEADER;
use crate::utils::error::OutputError;
use csv::{ReaderBuilder, WriterBuilder};
use log::{debug, info};
use std::path::Path;

/// Write the contact summary to a CSV file
///
/// **Public** - main entry point for the summary output
///
/// The header is written even when `summary` is empty.
///
/// # Errors
/// * `OutputError::InvalidPath` - path is empty, a directory, or uncreatable
/// * `OutputError::CsvFailed` - I/O or encoding error during write
pub fn write_summary(
    summary: &[ContactSummary],
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing summary to: {}", output_path.display());

    validate_path(output_path)?;
    ensure_parent_dir(output_path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_path(output_path)?;

    writer.write_record(SUMMARY_HEADER)?;
    for row in summary {
        writer.serialize(row)?;
    }
    writer.flush()?;

    info!(
        "Saved {} contacts ({} bytes)",
        summary.len(),
        file_size(output_path)
    );

    Ok(())
}

/// Read a contact summary back from a CSV file
///
/// **Public** - useful for validation and testing
pub fn read_summary(input_path: impl AsRef<Path>) -> Result<Vec<ContactSummary>, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading summary from: {}", input_path.display());

    let mut reader = ReaderBuilder::new().from_path(input_path)?;
    let summary = reader
        .deserialize::<ContactSummary>()
        .collect::<Result<Vec<_>, _>>()?;

    debug!("Summary loaded: {} contacts", summary.len());
    Ok(summary)
}
