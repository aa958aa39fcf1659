//! Configuration and constants for the CLI.

/// Current JSON report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Number of top senders charted when none is given on the command line
pub const DEFAULT_TOP_SENDERS: usize = 5;

// Input log layout: no header row, fixed column order
pub const EVENT_COLUMNS: &[&str] = &[
    "timestamp",
    "message_id",
    "sender",
    "recipients",
    "topic",
    "mode",
];
pub const RECIPIENT_DELIMITER: char = '|';

/// Header of the contact summary file
pub const SUMMARY_HEADER: &[&str] = &["person", "sent", "received"];

// Output file names, derived per run from the top-N count
pub const SUMMARY_FILE_NAME: &str = "Output_1_Summary.csv";

pub fn emails_chart_file_name(top_n: usize) -> String {
    format!("Output_2_Top_{}_Senders_Monthly_Emails.svg", top_n)
}

pub fn contacts_chart_file_name(top_n: usize) -> String {
    format!("Output_3_Top_{}_Senders_Monthly_Contacts.svg", top_n)
}

// Chart defaults
pub const DEFAULT_CHART_WIDTH: usize = 1000;
pub const DEFAULT_CHART_HEIGHT: usize = 600;
/// Only every n-th month label is drawn on the x axis
pub const MONTH_LABEL_STRIDE: usize = 3;
pub const Y_TICK_COUNT: usize = 5;

/// Rows shown in the console preview of the contact summary
pub const PREVIEW_ROWS: usize = 5;
