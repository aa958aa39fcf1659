//! Chart rendering for the monthly top-sender series.
//!
//! This module turns aligned monthly series into SVG line charts and
//! renders the console preview of the contact summary.

pub mod generator;

// Re-export main types
pub use generator::{
    generate_line_chart,
    generate_text_summary,
    ChartConfig,
    ChartSeries,
};
