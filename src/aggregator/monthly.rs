//! Monthly top-sender series over a gap-filled calendar axis.
//!
//! Both products share one `MonthAxis`. Every sender gets a value for
//! every month on the axis, zero where the sender had no activity.

use crate::parser::schema::{Event, RecipientRow, YearMonth};
use crate::utils::error::AggregateError;
use log::debug;
use std::collections::{HashMap, HashSet};

/// Contiguous month buckets from the earliest to the latest event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthAxis {
    months: Vec<YearMonth>,
}

impl MonthAxis {
    /// Build the axis spanning the given events
    ///
    /// **Public** - shared scaffolding for both monthly products
    ///
    /// # Errors
    /// * `AggregateError::EmptyDataset` - no events to span
    pub fn spanning(events: &[&Event]) -> Result<Self, AggregateError> {
        let first = events.iter().map(|e| e.date_time).min();
        let last = events.iter().map(|e| e.date_time).max();

        let (first, last) = match (first, last) {
            (Some(first), Some(last)) => (first, last),
            _ => {
                return Err(AggregateError::EmptyDataset(
                    "no top-sender events to build a month axis from".to_string(),
                ))
            }
        };

        Ok(Self::between(
            YearMonth::from_date_time(&first),
            YearMonth::from_date_time(&last),
        ))
    }

    /// Axis from `first` through `last`, inclusive
    pub fn between(first: YearMonth, last: YearMonth) -> Self {
        let mut months = Vec::new();
        let mut current = first;
        while current <= last {
            months.push(current);
            current = current.next();
        }

        debug!("Month axis: {} months ({} .. {})", months.len(), first, last);
        Self { months }
    }

    pub fn months(&self) -> &[YearMonth] {
        &self.months
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    /// `YYYY-MM` labels in axis order
    pub fn labels(&self) -> Vec<String> {
        self.months.iter().map(ToString::to_string).collect()
    }

    /// One value per axis month, `default` where `lookup` has none
    fn fill<T: Copy>(&self, default: T, lookup: impl Fn(YearMonth) -> Option<T>) -> Vec<T> {
        self.months
            .iter()
            .map(|month| lookup(*month).unwrap_or(default))
            .collect()
    }
}

/// One sender's values aligned with a `MonthAxis`
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySeries<T> {
    pub sender: String,
    pub values: Vec<T>,
}

/// Unique-recipient percentages plus the denominator they share
#[derive(Debug, Clone, PartialEq)]
pub struct ContactPercentages {
    /// Distinct recipients across every top-sender message
    pub total_unique: u64,
    pub series: Vec<MonthlySeries<f64>>,
}

/// Monthly sent-event counts per top sender
///
/// **Public** - first monthly product
///
/// # Arguments
/// * `top_events` - Events already filtered to the top senders
/// * `top_senders` - Sender order for the returned series
/// * `axis` - Month axis every series is aligned to
pub fn monthly_email_counts(
    top_events: &[&Event],
    top_senders: &[String],
    axis: &MonthAxis,
) -> Vec<MonthlySeries<u64>> {
    let mut counts: HashMap<(&str, YearMonth), u64> = HashMap::new();
    for event in top_events {
        *counts
            .entry((event.sender.as_str(), event.year_month))
            .or_insert(0) += 1;
    }

    debug!("{} (sender, month) email groups", counts.len());

    top_senders
        .iter()
        .map(|sender| MonthlySeries {
            sender: sender.clone(),
            values: axis.fill(0, |month| counts.get(&(sender.as_str(), month)).copied()),
        })
        .collect()
}

/// Monthly unique-recipient reach per top sender, as a percentage
///
/// **Public** - second monthly product
///
/// Events are joined to `recipients` on `message_id`. The denominator is
/// the number of distinct recipients over the whole joined set, shared by
/// every sender and month, so the percentages do not sum to 100.
///
/// # Errors
/// * `AggregateError::EmptyDataset` - the joined set has no recipients
pub fn monthly_contact_percentages(
    top_events: &[&Event],
    top_senders: &[String],
    recipients: &[RecipientRow],
    axis: &MonthAxis,
) -> Result<ContactPercentages, AggregateError> {
    let mut by_message: HashMap<&str, Vec<&str>> = HashMap::new();
    for row in recipients {
        by_message
            .entry(row.message_id.as_str())
            .or_default()
            .push(row.recipient.as_str());
    }

    let mut all_recipients: HashSet<&str> = HashSet::new();
    let mut per_month: HashMap<(&str, YearMonth), HashSet<&str>> = HashMap::new();

    for event in top_events {
        // Events without expanded rows contribute nothing
        let Some(message_recipients) = by_message.get(event.message_id.as_str()) else {
            continue;
        };

        let group = per_month
            .entry((event.sender.as_str(), event.year_month))
            .or_default();

        for &recipient in message_recipients {
            all_recipients.insert(recipient);
            group.insert(recipient);
        }
    }

    let total_unique = all_recipients.len() as u64;
    if total_unique == 0 {
        return Err(AggregateError::EmptyDataset(
            "top senders have no recipients".to_string(),
        ));
    }

    debug!(
        "{} distinct recipients across {} (sender, month) groups",
        total_unique,
        per_month.len()
    );

    let series = top_senders
        .iter()
        .map(|sender| MonthlySeries {
            sender: sender.clone(),
            values: axis.fill(0.0, |month| {
                per_month
                    .get(&(sender.as_str(), month))
                    .map(|unique| unique.len() as f64 / total_unique as f64 * 100.0)
            }),
        })
        .collect();

    Ok(ContactPercentages {
        total_unique,
        series,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_between_single_month() {
        let axis = MonthAxis::between(YearMonth::new(2001, 5), YearMonth::new(2001, 5));
        assert_eq!(axis.labels(), vec!["2001-05"]);
    }

    #[test]
    fn test_axis_between_crosses_year() {
        let axis = MonthAxis::between(YearMonth::new(2000, 11), YearMonth::new(2001, 2));
        assert_eq!(
            axis.labels(),
            vec!["2000-11", "2000-12", "2001-01", "2001-02"]
        );
    }

    #[test]
    fn test_axis_spanning_empty_is_error() {
        assert!(matches!(
            MonthAxis::spanning(&[]),
            Err(AggregateError::EmptyDataset(_))
        ));
    }

    #[test]
    fn test_fill_defaults_missing_months() {
        let axis = MonthAxis::between(YearMonth::new(2001, 1), YearMonth::new(2001, 3));
        let filled = axis.fill(0u64, |m| (m.month == 2).then_some(7));
        assert_eq!(filled, vec![0, 7, 0]);
    }
}
