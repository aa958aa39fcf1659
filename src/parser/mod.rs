//! Event log parsing and schema definitions.
//!
//! This module handles:
//! - Loading the raw event log
//! - Decoding timestamps into calendar buckets
//! - Expanding the multi-recipient field
//! - Defining record and report types

pub mod event_log;
pub mod recipients;
pub mod schema;

// Re-export main types
pub use event_log::{load_events, preprocess, read_events};
pub use recipients::expand_recipients;
pub use schema::{
    ContactSummary, Event, MonthlyReport, RawEvent, RecipientRow, SenderSeries, YearMonth,
};
