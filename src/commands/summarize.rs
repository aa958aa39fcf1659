//! Summarize command implementation.
//!
//! The summarize command:
//! 1. Loads the event log
//! 2. Decodes timestamps into month buckets
//! 3. Expands recipients
//! 4. Builds and writes the contact summary
//! 5. Selects the top senders
//! 6. Aggregates monthly series
//! 7. Renders and writes the charts

use super::models::{ReportPaths, RunOutcome};
use crate::aggregator::{
    filter_top_senders, monthly_contact_percentages, monthly_email_counts, select_top_senders,
    summarize_contacts, ContactPercentages, MonthAxis, MonthlySeries,
};
use crate::chart::{generate_line_chart, generate_text_summary, ChartConfig, ChartSeries};
use crate::output::{write_report, write_summary, write_svg};
use crate::parser::schema::{MonthlyReport, SenderSeries};
use crate::parser::{expand_recipients, load_events, preprocess};
use crate::utils::config::{
    DEFAULT_CHART_HEIGHT, DEFAULT_CHART_WIDTH, DEFAULT_TOP_SENDERS, PREVIEW_ROWS,
    SCHEMA_VERSION,
};
use crate::utils::error::LoadError;
use anyhow::{Context, Result};
use log::{debug, info};
use std::path::PathBuf;
use std::time::Instant;

/// Arguments for the summarize command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct SummarizeArgs {
    /// Event log to read
    pub input: PathBuf,

    /// Number of top senders to chart
    pub top_n: usize,

    /// Directory receiving the summary and charts
    pub output_dir: PathBuf,

    /// Optional JSON dump of the monthly series
    pub output_json: Option<PathBuf>,

    /// Chart size in pixels
    pub chart_width: usize,
    pub chart_height: usize,

    /// Print text summary to stdout
    pub print_summary: bool,
}

impl Default for SummarizeArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            top_n: DEFAULT_TOP_SENDERS,
            output_dir: PathBuf::from("."),
            output_json: None,
            chart_width: DEFAULT_CHART_WIDTH,
            chart_height: DEFAULT_CHART_HEIGHT,
            print_summary: false,
        }
    }
}

/// Execute the summarize command
///
/// **Public** - main entry point called from main.rs
///
/// The contact summary is written before the top senders are chosen, so
/// it exists even when the chart stage fails on an empty dataset.
///
/// # Errors
/// * Missing or malformed input log
/// * Empty dataset at the chart stage
/// * File write errors
pub fn execute_summarize(args: SummarizeArgs) -> Result<RunOutcome> {
    let start_time = Instant::now();
    let paths = ReportPaths::new(&args.output_dir, args.top_n);

    info!("Starting summary of: {}", args.input.display());

    // Step 1: Load
    info!("Step 1/7: Loading event log...");
    let raw_events = load_events(&args.input).context("Failed to load event log")?;

    // Step 2: Preprocess
    info!("Step 2/7: Decoding timestamps...");
    let events = preprocess(raw_events).context("Failed to preprocess events")?;

    // Step 3: Expand recipients
    info!("Step 3/7: Expanding recipients...");
    let recipients = expand_recipients(&events);

    // Step 4: Contact summary
    info!("Step 4/7: Summarizing contacts...");
    let summary = summarize_contacts(&events, &recipients);
    write_summary(&summary, &paths.summary).context("Failed to write contact summary")?;
    info!("✓ Summary written to: {}", paths.summary.display());

    // Step 5: Top senders
    info!("Step 5/7: Selecting top {} senders...", args.top_n);
    let top_senders = select_top_senders(&summary, args.top_n);
    let top_events = filter_top_senders(&events, &top_senders);

    if args.print_summary {
        println!("\n{}", "=".repeat(80));
        println!("{}", generate_text_summary(&summary, &top_senders, PREVIEW_ROWS));
        println!("{}", "=".repeat(80));
    }

    // Step 6: Monthly series
    info!("Step 6/7: Aggregating monthly series...");
    let axis = MonthAxis::spanning(&top_events).context("Cannot chart top senders")?;
    let counts = monthly_email_counts(&top_events, &top_senders, &axis);
    let percentages = monthly_contact_percentages(&top_events, &top_senders, &recipients, &axis)
        .context("Cannot compute unique-recipient percentages")?;

    debug!(
        "{} months, {} distinct recipients among top senders",
        axis.len(),
        percentages.total_unique
    );

    // Step 7: Charts
    info!("Step 7/7: Rendering charts...");
    let months = axis.labels();

    let emails_config = ChartConfig::new()
        .with_title("Top Senders Emails")
        .with_axis_labels("Month", "# of Emails Sent by Month")
        .with_size(args.chart_width, args.chart_height);
    let emails_svg = generate_line_chart(&months, &count_series(&counts), Some(&emails_config))
        .context("Failed to render monthly emails chart")?;
    write_svg(&emails_svg, &paths.emails_chart).context("Failed to write monthly emails chart")?;
    info!("✓ Monthly emails chart written to: {}", paths.emails_chart.display());

    let contacts_config = ChartConfig::new()
        .with_title("Top Senders Percentage of Contacts")
        .with_axis_labels("Month", "% of Unique Monthly Recipients")
        .with_y_suffix("%")
        .with_size(args.chart_width, args.chart_height);
    let contacts_svg = generate_line_chart(
        &months,
        &percentage_series(&percentages.series),
        Some(&contacts_config),
    )
    .context("Failed to render monthly contacts chart")?;
    write_svg(&contacts_svg, &paths.contacts_chart)
        .context("Failed to write monthly contacts chart")?;
    info!(
        "✓ Monthly contacts chart written to: {}",
        paths.contacts_chart.display()
    );

    if let Some(json_path) = &args.output_json {
        let report = build_report(&args, &top_senders, &axis, &counts, &percentages);
        write_report(&report, json_path).context("Failed to write monthly report JSON")?;
        info!("✓ Monthly report written to: {}", json_path.display());
    }

    let elapsed = start_time.elapsed();
    info!("Summary completed in {:.2}s", elapsed.as_secs_f64());

    Ok(RunOutcome {
        events: events.len(),
        recipient_rows: recipients.len(),
        contacts: summary.len(),
        months: axis.len(),
        total_unique_recipients: percentages.total_unique,
        top_senders,
        paths,
    })
}

/// Chart lines for the monthly email counts
///
/// **Private** - internal helper for execute_summarize
fn count_series(counts: &[MonthlySeries<u64>]) -> Vec<ChartSeries> {
    counts
        .iter()
        .map(|s| ChartSeries::new(&s.sender, s.values.iter().map(|v| *v as f64).collect()))
        .collect()
}

/// Chart lines for the unique-recipient percentages
///
/// **Private** - internal helper for execute_summarize
fn percentage_series(series: &[MonthlySeries<f64>]) -> Vec<ChartSeries> {
    series
        .iter()
        .map(|s| ChartSeries::new(&s.sender, s.values.clone()))
        .collect()
}

/// Bundle both monthly products into the JSON report
///
/// **Private** - internal helper for execute_summarize
fn build_report(
    args: &SummarizeArgs,
    top_senders: &[String],
    axis: &MonthAxis,
    counts: &[MonthlySeries<u64>],
    percentages: &ContactPercentages,
) -> MonthlyReport {
    let to_sender_series = |series: Vec<ChartSeries>| -> Vec<SenderSeries> {
        series
            .into_iter()
            .map(|s| SenderSeries {
                sender: s.label,
                values: s.values,
            })
            .collect()
    };

    MonthlyReport {
        version: SCHEMA_VERSION.to_string(),
        source: args.input.display().to_string(),
        top_senders: top_senders.to_vec(),
        months: axis.months().to_vec(),
        total_unique_recipients: percentages.total_unique,
        emails: to_sender_series(count_series(counts)),
        contacts: to_sender_series(percentage_series(&percentages.series)),
        generated_at: chrono::Utc::now().to_rfc3339(),
    }
}

/// Validate summarize arguments
///
/// **Public** - can be called before execute_summarize for early validation
pub fn validate_args(args: &SummarizeArgs) -> Result<()> {
    if args.input.as_os_str().is_empty() {
        anyhow::bail!("Input path cannot be empty");
    }

    if !args.input.exists() {
        return Err(LoadError::FileNotFound(args.input.clone()).into());
    }

    if args.top_n == 0 {
        anyhow::bail!("Number of top senders must be greater than 0");
    }

    if args.chart_width == 0 || args.chart_height == 0 {
        anyhow::bail!("Chart dimensions must be greater than 0");
    }

    Ok(())
}
