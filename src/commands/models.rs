use crate::utils::config::{contacts_chart_file_name, emails_chart_file_name, SUMMARY_FILE_NAME};
use std::path::{Path, PathBuf};

/// Where one run writes its artifacts
///
/// **Public** - derived once per run and passed to the emitters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    /// Contact summary CSV
    pub summary: PathBuf,

    /// Monthly email count chart
    pub emails_chart: PathBuf,

    /// Monthly unique-recipient percentage chart
    pub contacts_chart: PathBuf,
}

impl ReportPaths {
    pub fn new(output_dir: impl AsRef<Path>, top_n: usize) -> Self {
        let dir = output_dir.as_ref();
        Self {
            summary: dir.join(SUMMARY_FILE_NAME),
            emails_chart: dir.join(emails_chart_file_name(top_n)),
            contacts_chart: dir.join(contacts_chart_file_name(top_n)),
        }
    }
}

/// What a completed run produced
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    pub events: usize,
    pub recipient_rows: usize,
    pub contacts: usize,
    pub top_senders: Vec<String>,
    pub months: usize,
    pub total_unique_recipients: u64,
    pub paths: ReportPaths,
}
