//! JSON monthly report writer.
//!
//! Writes `MonthlyReport` structs to JSON files with proper formatting.

use super::{ensure_parent_dir, file_size, validate_path};
use crate::parser::schema::MonthlyReport;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Write a monthly report to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_report(report: &MonthlyReport, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing monthly report to: {}", output_path.display());

    validate_path(output_path)?;
    ensure_parent_dir(output_path)?;

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    // Serialize to JSON with pretty printing
    serde_json::to_writer_pretty(writer, report).map_err(OutputError::SerializationFailed)?;

    info!(
        "Monthly report written successfully ({} bytes)",
        file_size(output_path)
    );

    Ok(())
}

/// Read a monthly report from a JSON file
///
/// **Public** - useful for validation and testing
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_report(input_path: impl AsRef<Path>) -> Result<MonthlyReport, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading monthly report from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;
    let report: MonthlyReport =
        serde_json::from_reader(file).map_err(OutputError::SerializationFailed)?;

    debug!(
        "Report loaded: version {}, {} senders over {} months",
        report.version,
        report.top_senders.len(),
        report.months.len()
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::schema::{SenderSeries, YearMonth};
    use tempfile::NamedTempFile;

    fn create_test_report() -> MonthlyReport {
        MonthlyReport {
            version: "1.0.0".to_string(),
            source: "events.csv".to_string(),
            top_senders: vec!["alice".to_string()],
            months: vec![YearMonth::new(2001, 1), YearMonth::new(2001, 2)],
            total_unique_recipients: 2,
            emails: vec![SenderSeries {
                sender: "alice".to_string(),
                values: vec![1.0, 0.0],
            }],
            contacts: vec![SenderSeries {
                sender: "alice".to_string(),
                values: vec![50.0, 0.0],
            }],
            generated_at: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_write_and_read_report() {
        let report = create_test_report();
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path();

        write_report(&report, path).unwrap();
        let loaded = read_report(path).unwrap();

        assert_eq!(loaded.version, report.version);
        assert_eq!(loaded.months, report.months);
        assert_eq!(loaded.contacts, report.contacts);
    }

    #[test]
    fn test_months_serialized_as_strings() {
        let temp_file = NamedTempFile::new().unwrap();
        write_report(&create_test_report(), temp_file.path()).unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        assert!(content.contains("\"2001-02\""));
    }

    #[test]
    fn test_read_report_missing_file() {
        assert!(read_report("no/such/report.json").is_err());
    }
}
