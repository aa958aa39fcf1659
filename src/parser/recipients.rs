//! Recipient expansion.
//!
//! The log stores every recipient of a message in one `|`-joined field.
//! Expansion flattens it into one row per (message, recipient) pair so
//! recipients can be counted and joined back on `message_id`.

use super::schema::{Event, RecipientRow};
use crate::utils::config::RECIPIENT_DELIMITER;
use log::info;

/// Expand every event into one row per recipient token
///
/// **Public** - third pipeline stage
///
/// Tokens are kept as-is: duplicates stay duplicated and an empty field
/// yields one empty recipient.
pub fn expand_recipients(events: &[Event]) -> Vec<RecipientRow> {
    let rows: Vec<RecipientRow> = events
        .iter()
        .flat_map(|event| {
            event
                .recipients
                .split(RECIPIENT_DELIMITER)
                .map(move |recipient| RecipientRow {
                    message_id: event.message_id.clone(),
                    recipient: recipient.to_string(),
                })
        })
        .collect();

    info!(
        "Unstacked recipients from {} to {} rows",
        events.len(),
        rows.len()
    );

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::schema::YearMonth;
    use chrono::DateTime;

    fn event(message_id: &str, recipients: &str) -> Event {
        let date_time = DateTime::from_timestamp_millis(0).unwrap().naive_utc();
        Event {
            timestamp: 0,
            message_id: message_id.to_string(),
            sender: "alice".to_string(),
            recipients: recipients.to_string(),
            topic: String::new(),
            mode: String::new(),
            date_time,
            year: 1970,
            year_month: YearMonth::new(1970, 1),
        }
    }

    #[test]
    fn test_expand_counts_tokens() {
        let events = vec![event("m1", "bob"), event("m2", "bob|carol|dave")];
        let rows = expand_recipients(&events);

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].message_id, "m1");
        assert!(rows[1..].iter().all(|r| r.message_id == "m2"));
    }

    #[test]
    fn test_expand_keeps_duplicates_and_empty_tokens() {
        let events = vec![event("m1", "bob|bob"), event("m2", ""), event("m3", "carol|")];
        let rows = expand_recipients(&events);

        let recipients: Vec<&str> = rows.iter().map(|r| r.recipient.as_str()).collect();
        assert_eq!(recipients, vec!["bob", "bob", "", "carol", ""]);
    }

    #[test]
    fn test_expand_empty_input() {
        assert!(expand_recipients(&[]).is_empty());
    }
}
