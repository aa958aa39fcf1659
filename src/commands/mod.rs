//! CLI command implementations.
//!
//! Commands orchestrate the various library components to perform user tasks.

pub mod models;
pub mod summarize;

// Re-export main command functions
pub use models::{ReportPaths, RunOutcome};
pub use summarize::{execute_summarize, validate_args, SummarizeArgs};
