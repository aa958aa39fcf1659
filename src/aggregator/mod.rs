//! Aggregation of events into contact summaries and monthly series.
//!
//! This module transforms preprocessed events into:
//! - A per-person sent/received summary
//! - The ranked top-sender list
//! - Monthly email counts and unique-recipient percentages

pub mod contacts;
pub mod monthly;

// Re-export main types and functions
pub use contacts::{filter_top_senders, select_top_senders, summarize_contacts};
pub use monthly::{
    monthly_contact_percentages, monthly_email_counts, ContactPercentages, MonthAxis,
    MonthlySeries,
};
