//! Mailstat CLI
//!
//! Summarizes an email event log per person and charts the monthly
//! activity of the top senders.

use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use std::path::PathBuf;

use mailstat::commands::{execute_summarize, validate_args, SummarizeArgs};
use mailstat::utils::config::{DEFAULT_CHART_HEIGHT, DEFAULT_CHART_WIDTH, DEFAULT_TOP_SENDERS};

/// Mailstat - contact summaries and top-sender charts from email logs
#[derive(Parser, Debug)]
#[command(name = "mailstat")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Event log: timestamp,message_id,sender,recipients,topic,mode (no header)
    input: PathBuf,

    /// Number of top senders to chart
    #[arg(default_value_t = DEFAULT_TOP_SENDERS)]
    top_n: usize,

    /// Directory for the summary CSV and charts
    #[arg(short, long, env = "MAILSTAT_OUTPUT_DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Also write the monthly series as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Chart width in pixels
    #[arg(long, default_value_t = DEFAULT_CHART_WIDTH)]
    width: usize,

    /// Chart height in pixels
    #[arg(long, default_value_t = DEFAULT_CHART_HEIGHT)]
    height: usize,

    /// Print text summary to stdout
    #[arg(long)]
    summary: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let args = SummarizeArgs {
        input: cli.input,
        top_n: cli.top_n,
        output_dir: cli.output_dir,
        output_json: cli.json,
        chart_width: cli.width,
        chart_height: cli.height,
        print_summary: cli.summary,
    };

    // Validate args first
    validate_args(&args)?;

    let outcome = execute_summarize(args)?;

    log::debug!(
        "{} events, {} recipient rows, {} contacts, top senders {:?}",
        outcome.events,
        outcome.recipient_rows,
        outcome.contacts,
        outcome.top_senders
    );

    Ok(())
}
