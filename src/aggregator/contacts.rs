//! Per-person send/receive tallies and top-sender ranking.

use crate::parser::schema::{ContactSummary, Event, RecipientRow};
use log::{debug, info};
use std::collections::{HashMap, HashSet};

/// Build the contact summary from events and their expanded recipients
///
/// **Public** - fourth pipeline stage
///
/// # Arguments
/// * `events` - Preprocessed events (one per send)
/// * `recipients` - Recipient-expanded rows
///
/// # Returns
/// One entry per person seen as sender or recipient, sorted ascending by
/// `sent` and then by `person`
///
/// # Algorithm
/// 1. Count events per sender
/// 2. Count expanded rows per recipient
/// 3. Merge both key sets; a missing side counts as 0
/// 4. Sort
pub fn summarize_contacts(events: &[Event], recipients: &[RecipientRow]) -> Vec<ContactSummary> {
    let mut sent: HashMap<&str, u64> = HashMap::new();
    for event in events {
        *sent.entry(event.sender.as_str()).or_insert(0) += 1;
    }

    let mut received: HashMap<&str, u64> = HashMap::new();
    for row in recipients {
        *received.entry(row.recipient.as_str()).or_insert(0) += 1;
    }

    let people: HashSet<&str> = sent.keys().chain(received.keys()).copied().collect();

    let mut summary: Vec<ContactSummary> = people
        .into_iter()
        .map(|person| {
            ContactSummary::new(
                person,
                sent.get(person).copied().unwrap_or(0),
                received.get(person).copied().unwrap_or(0),
            )
        })
        .collect();

    summary.sort_by(|a, b| a.sent.cmp(&b.sent).then_with(|| a.person.cmp(&b.person)));

    info!(
        "{} senders & {} recipients are merged into {} contacts",
        sent.len(),
        received.len(),
        summary.len()
    );

    summary
}

/// Pick the `top_n` persons with the highest sent-count
///
/// **Public** - fifth pipeline stage
///
/// Ties keep their order in `summary`. Persons who never sent are not
/// senders and are never selected, so fewer than `top_n` names come back
/// when the log has fewer senders.
pub fn select_top_senders(summary: &[ContactSummary], top_n: usize) -> Vec<String> {
    let mut ranked: Vec<&ContactSummary> = summary.iter().filter(|c| c.sent > 0).collect();

    // Stable sort: equal counts stay in input order
    ranked.sort_by(|a, b| b.sent.cmp(&a.sent));

    let top: Vec<String> = ranked
        .into_iter()
        .take(top_n)
        .map(|c| c.person.clone())
        .collect();

    debug!("Top {} senders: {:?}", top_n, top);
    top
}

/// Keep only the events sent by one of `top_senders`
///
/// **Public** - source order is preserved
pub fn filter_top_senders<'a>(events: &'a [Event], top_senders: &[String]) -> Vec<&'a Event> {
    let wanted: HashSet<&str> = top_senders.iter().map(String::as_str).collect();

    let filtered: Vec<&Event> = events
        .iter()
        .filter(|e| wanted.contains(e.sender.as_str()))
        .collect();

    debug!(
        "Filtered {} of {} events from top senders",
        filtered.len(),
        events.len()
    );

    filtered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(rows: &[(&str, u64, u64)]) -> Vec<ContactSummary> {
        rows.iter()
            .map(|(p, s, r)| ContactSummary::new(*p, *s, *r))
            .collect()
    }

    #[test]
    fn test_select_top_senders_orders_descending() {
        let rows = summary(&[("a", 1, 0), ("b", 5, 0), ("c", 3, 2)]);
        assert_eq!(select_top_senders(&rows, 2), vec!["b", "c"]);
    }

    #[test]
    fn test_select_top_senders_ties_keep_input_order() {
        let rows = summary(&[("x", 2, 0), ("y", 2, 0), ("z", 2, 0)]);
        assert_eq!(select_top_senders(&rows, 2), vec!["x", "y"]);
    }

    #[test]
    fn test_select_top_senders_skips_pure_recipients() {
        let rows = summary(&[("bob", 0, 2), ("carol", 0, 1), ("alice", 2, 0)]);
        assert_eq!(select_top_senders(&rows, 5), vec!["alice"]);
    }

    #[test]
    fn test_select_top_senders_zero() {
        let rows = summary(&[("a", 1, 0)]);
        assert!(select_top_senders(&rows, 0).is_empty());
    }
}
