//! Mailstat
//!
//! Contact summaries and monthly top-sender charts from
//! historical email event logs.
//!
//! This crate provides the core implementation for the
//! `mailstat` CLI tool.
//!
//! ## Getting Started
//!
//! ```bash
//! mailstat events.csv 5 --output-dir reports
//! ```
//!
//! The run writes a `person,sent,received` summary CSV and two SVG
//! charts: monthly email counts and monthly unique-recipient reach of
//! the top senders.

pub mod aggregator;
pub mod chart;
pub mod commands;
pub mod output;
pub mod parser;
pub mod utils;
