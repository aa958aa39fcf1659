//! Record types flowing through the pipeline and the JSON report schema.
//!
//! Raw events come straight from the log; preprocessed events carry the
//! decoded calendar fields every later stage groups on.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One logged email send action, as read from the log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEvent {
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
    pub message_id: String,
    pub sender: String,
    /// One or more recipients joined by `|`
    pub recipients: String,
    pub topic: String,
    pub mode: String,

    /// 1-based line in the source log, for error reporting
    pub line: u64,
}

/// A raw event with its calendar fields decoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub timestamp: i64,
    pub message_id: String,
    pub sender: String,
    pub recipients: String,
    pub topic: String,
    pub mode: String,

    /// Decoded timestamp (UTC)
    pub date_time: NaiveDateTime,

    pub year: i32,

    /// Monthly bucket used for aggregation
    pub year_month: YearMonth,
}

/// One (message, recipient) pair produced by recipient expansion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipientRow {
    pub message_id: String,
    pub recipient: String,
}

/// Per-person tally of sent and received events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSummary {
    pub person: String,
    pub sent: u64,
    pub received: u64,
}

impl ContactSummary {
    pub fn new(person: impl Into<String>, sent: u64, received: u64) -> Self {
        Self {
            person: person.into(),
            sent,
            received,
        }
    }
}

/// Calendar month bucket, displayed as `YYYY-MM`
///
/// Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// Bucket containing the given date-time
    pub fn from_date_time(date_time: &NaiveDateTime) -> Self {
        Self::new(date_time.year(), date_time.month())
    }

    /// The calendar month immediately after this one
    pub fn next(self) -> Self {
        if self.month >= 12 {
            Self::new(self.year + 1, 1)
        } else {
            Self::new(self.year, self.month + 1)
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let parsed = NaiveDate::parse_from_str(&format!("{}-01", raw), "%Y-%m-%d")
            .map_err(|e| serde::de::Error::custom(format!("invalid year-month '{}': {}", raw, e)))?;
        Ok(Self::new(parsed.year(), parsed.month()))
    }
}

/// Top-level monthly report written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Input log the report was built from
    pub source: String,

    /// Top senders, highest sent-count first
    pub top_senders: Vec<String>,

    /// Contiguous month axis shared by every series
    pub months: Vec<YearMonth>,

    /// Distinct recipients across all top-sender messages
    pub total_unique_recipients: u64,

    /// Monthly sent-event counts per sender
    pub emails: Vec<SenderSeries>,

    /// Monthly unique-recipient percentages per sender
    pub contacts: Vec<SenderSeries>,

    /// Timestamp when the report was generated
    pub generated_at: String,
}

/// One sender's values over the month axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SenderSeries {
    pub sender: String,
    pub values: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_month_display_is_zero_padded() {
        assert_eq!(YearMonth::new(2001, 7).to_string(), "2001-07");
        assert_eq!(YearMonth::new(987, 12).to_string(), "0987-12");
    }

    #[test]
    fn test_year_month_next_rolls_over_year() {
        assert_eq!(YearMonth::new(2000, 11).next(), YearMonth::new(2000, 12));
        assert_eq!(YearMonth::new(2000, 12).next(), YearMonth::new(2001, 1));
    }

    #[test]
    fn test_year_month_ordering() {
        assert!(YearMonth::new(2000, 12) < YearMonth::new(2001, 1));
        assert!(YearMonth::new(2001, 2) > YearMonth::new(2001, 1));
    }

    #[test]
    fn test_year_month_json_roundtrip() {
        let ym = YearMonth::new(1999, 3);
        let json = serde_json::to_string(&ym).unwrap();
        assert_eq!(json, "\"1999-03\"");
        let back: YearMonth = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ym);
    }

    #[test]
    fn test_year_month_rejects_garbage() {
        let result: Result<YearMonth, _> = serde_json::from_str("\"1999-13\"");
        assert!(result.is_err());
    }
}
