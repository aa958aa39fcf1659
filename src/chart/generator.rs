//! SVG line chart generation for the monthly top-sender series.
//!
//! Rendered by hand rather than through a plotting crate:
//! - One polyline per sender over a shared month axis
//! - Only every n-th month label is drawn, rotated
//! - Legend in the upper-left corner of the plot area

use crate::parser::schema::ContactSummary;
use crate::utils::config::{
    DEFAULT_CHART_HEIGHT, DEFAULT_CHART_WIDTH, MONTH_LABEL_STRIDE, Y_TICK_COUNT,
};
use crate::utils::error::ChartError;
use log::info;

// Plot area margins in pixels
const MARGIN_LEFT: f64 = 80.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 110.0;

/// Line colours, cycled per series
const PALETTE: &[&str] = &[
    "rgb(31, 119, 180)",
    "rgb(255, 127, 14)",
    "rgb(44, 160, 44)",
    "rgb(214, 39, 40)",
    "rgb(148, 103, 189)",
    "rgb(140, 86, 75)",
    "rgb(227, 119, 194)",
    "rgb(127, 127, 127)",
    "rgb(188, 189, 34)",
    "rgb(23, 190, 207)",
];

/// Line chart configuration
#[derive(Debug, Clone)]
pub struct ChartConfig {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub width: usize,
    pub height: usize,
    /// Appended to every y tick label (e.g. "%")
    pub y_suffix: String,
    /// Draw every n-th x label
    pub label_stride: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: "Top Senders".to_string(),
            x_label: "Month".to_string(),
            y_label: String::new(),
            width: DEFAULT_CHART_WIDTH,
            height: DEFAULT_CHART_HEIGHT,
            y_suffix: String::new(),
            label_stride: MONTH_LABEL_STRIDE,
        }
    }
}

impl ChartConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_axis_labels(mut self, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        self.x_label = x_label.into();
        self.y_label = y_label.into();
        self
    }

    pub fn with_y_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.y_suffix = suffix.into();
        self
    }

    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

/// One labelled line on the chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub label: String,
    pub values: Vec<f64>,
}

impl ChartSeries {
    pub fn new(label: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            values,
        }
    }
}

/// Render a multi-line chart over `months` as an SVG document
///
/// **Public** - main entry point for chart rendering
///
/// # Errors
/// * `ChartError::EmptySeries` - nothing to plot
/// * `ChartError::LengthMismatch` - a series does not cover every month
pub fn generate_line_chart(
    months: &[String],
    series: &[ChartSeries],
    config: Option<&ChartConfig>,
) -> Result<String, ChartError> {
    if series.is_empty() || months.is_empty() {
        return Err(ChartError::EmptySeries);
    }

    for s in series {
        if s.values.len() != months.len() {
            return Err(ChartError::LengthMismatch {
                label: s.label.clone(),
                expected: months.len(),
                actual: s.values.len(),
            });
        }
    }

    let config = config.cloned().unwrap_or_default();
    info!(
        "Generating line chart '{}' with {} series over {} months",
        config.title,
        series.len(),
        months.len()
    );

    let data_max = series
        .iter()
        .flat_map(|s| s.values.iter().copied())
        .fold(0.0_f64, f64::max);
    let step = nice_step(data_max / Y_TICK_COUNT as f64);

    let width = config.width as f64;
    let height = config.height as f64;
    let plot = PlotArea {
        left: MARGIN_LEFT,
        top: MARGIN_TOP,
        width: (width - MARGIN_LEFT - MARGIN_RIGHT).max(1.0),
        height: (height - MARGIN_TOP - MARGIN_BOTTOM).max(1.0),
        points: months.len(),
        y_max: (data_max / step).ceil().max(1.0) * step,
    };

    let mut svg = String::new();

    // Header
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        config.width, config.height, config.width, config.height
    ));
    svg.push_str(r#"<style>text { font-family: sans-serif; }</style>"#);
    svg.push_str(&format!(
        r#"<rect x="0" y="0" width="{}" height="{}" fill="white"/>"#,
        config.width, config.height
    ));

    // Title
    svg.push_str(&format!(
        r#"<text x="{:.1}" y="28" font-size="16" text-anchor="middle" font-weight="bold">{}</text>"#,
        width / 2.0,
        escape_xml(&config.title)
    ));

    render_y_axis(&mut svg, &plot, step, &config);
    render_x_axis(&mut svg, &plot, months, &config);

    for (i, s) in series.iter().enumerate() {
        render_series(&mut svg, &plot, s, PALETTE[i % PALETTE.len()]);
    }

    render_legend(&mut svg, &plot, series);

    svg.push_str("</svg>");

    info!("Line chart generated successfully ({} bytes)", svg.len());
    Ok(svg)
}

/// Pixel geometry of the plotting rectangle
#[derive(Debug, Clone, Copy)]
struct PlotArea {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    points: usize,
    y_max: f64,
}

impl PlotArea {
    fn bottom(&self) -> f64 {
        self.top + self.height
    }

    fn x(&self, index: usize) -> f64 {
        if self.points <= 1 {
            self.left + self.width / 2.0
        } else {
            self.left + index as f64 * self.width / (self.points - 1) as f64
        }
    }

    fn y(&self, value: f64) -> f64 {
        self.bottom() - value / self.y_max * self.height
    }
}

/// Round a raw tick step up to 1, 2 or 5 times a power of ten
fn nice_step(raw: f64) -> f64 {
    if raw <= 0.0 || !raw.is_finite() {
        return 1.0;
    }

    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let nice = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };

    nice * magnitude
}

/// Tick label with as many decimals as the step needs
fn format_tick(value: f64, step: f64, suffix: &str) -> String {
    let decimals = if step > 0.0 && step.is_finite() {
        // Nudge so an exact power of ten is not pushed down by rounding
        (-(step.log10() + 1e-9).floor()).max(0.0) as usize
    } else {
        0
    };
    format!("{:.*}{}", decimals, value, suffix)
}

fn render_y_axis(out: &mut String, plot: &PlotArea, step: f64, config: &ChartConfig) {
    let ticks = (plot.y_max / step).round() as usize;

    for i in 0..=ticks {
        let value = i as f64 * step;
        let y = plot.y(value);
        out.push_str(&format!(
            r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="rgb(230, 230, 230)"/>"#,
            plot.left,
            y,
            plot.left + plot.width,
            y
        ));
        out.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" font-size="11" text-anchor="end" dy="4">{}</text>"#,
            plot.left - 8.0,
            y,
            escape_xml(&format_tick(value, step, &config.y_suffix))
        ));
    }

    out.push_str(&format!(
        r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="black"/>"#,
        plot.left,
        plot.top,
        plot.left,
        plot.bottom()
    ));

    // Rotated axis title
    let mid_y = plot.top + plot.height / 2.0;
    out.push_str(&format!(
        r#"<text x="20" y="{:.1}" font-size="13" text-anchor="middle" transform="rotate(-90 20 {:.1})">{}</text>"#,
        mid_y,
        mid_y,
        escape_xml(&config.y_label)
    ));
}

fn render_x_axis(out: &mut String, plot: &PlotArea, months: &[String], config: &ChartConfig) {
    let bottom = plot.bottom();
    let stride = config.label_stride.max(1);

    out.push_str(&format!(
        r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="black"/>"#,
        plot.left,
        bottom,
        plot.left + plot.width,
        bottom
    ));

    for (i, month) in months.iter().enumerate() {
        let x = plot.x(i);
        out.push_str(&format!(
            r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="black"/>"#,
            x,
            bottom,
            x,
            bottom + 4.0
        ));

        if i % stride != 0 {
            continue;
        }

        let label_y = bottom + 8.0;
        out.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" font-size="11" text-anchor="end" dy="4" transform="rotate(-90 {:.1} {:.1})">{}</text>"#,
            x,
            label_y,
            x,
            label_y,
            escape_xml(month)
        ));
    }

    out.push_str(&format!(
        r#"<text x="{:.1}" y="{:.1}" font-size="13" text-anchor="middle">{}</text>"#,
        plot.left + plot.width / 2.0,
        bottom + MARGIN_BOTTOM - 12.0,
        escape_xml(&config.x_label)
    ));
}

fn render_series(out: &mut String, plot: &PlotArea, series: &ChartSeries, color: &str) {
    let points: Vec<String> = series
        .values
        .iter()
        .enumerate()
        .map(|(i, v)| format!("{:.1},{:.1}", plot.x(i), plot.y(*v)))
        .collect();

    out.push_str(&format!(
        r#"<polyline fill="none" stroke="{}" stroke-width="2" points="{}"><title>{}</title></polyline>"#,
        color,
        points.join(" "),
        escape_xml(&series.label)
    ));
}

fn render_legend(out: &mut String, plot: &PlotArea, series: &[ChartSeries]) {
    let row_height = 18.0;
    let longest = series.iter().map(|s| s.label.chars().count()).max().unwrap_or(0);
    let box_width = 40.0 + longest as f64 * 7.0;
    let box_height = 8.0 + series.len() as f64 * row_height;
    let x = plot.left + 10.0;
    let y = plot.top + 10.0;

    out.push_str(&format!(
        r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="white" fill-opacity="0.85" stroke="rgb(200, 200, 200)" rx="3"/>"#,
        x, y, box_width, box_height
    ));

    for (i, s) in series.iter().enumerate() {
        let row_y = y + 4.0 + (i as f64 + 0.5) * row_height;
        let color = PALETTE[i % PALETTE.len()];
        out.push_str(&format!(
            r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-width="2"/>"#,
            x + 6.0,
            row_y,
            x + 26.0,
            row_y,
            color
        ));
        out.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" font-size="12" dy="4">{}</text>"#,
            x + 32.0,
            row_y,
            escape_xml(&s.label)
        ));
    }
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Console table of the first summary rows and the chosen top senders
pub fn generate_text_summary(
    summary: &[ContactSummary],
    top_senders: &[String],
    max_lines: usize,
) -> String {
    let mut lines = Vec::new();

    lines.push("  CONTACT SUMMARY".to_string());
    lines.push(format!("  ┏{}┳{}┳{}┓", "━".repeat(42), "━".repeat(12), "━".repeat(12)));
    lines.push(format!("  ┃ {:<40} ┃ {:>10} ┃ {:>10} ┃", "person", "sent", "received"));
    lines.push(format!("  ┣{}╋{}╋{}┫", "━".repeat(42), "━".repeat(12), "━".repeat(12)));

    for row in summary.iter().take(max_lines) {
        // Truncate long identifiers for display
        let person = if row.person.chars().count() > 40 {
            let head: String = row.person.chars().take(37).collect();
            format!("{}...", head)
        } else {
            row.person.clone()
        };

        lines.push(format!(
            "  ┃ {:<40} ┃ {:>10} ┃ {:>10} ┃",
            person, row.sent, row.received
        ));
    }

    lines.push(format!("  ┗{}┻{}┻{}┛", "━".repeat(42), "━".repeat(12), "━".repeat(12)));

    if summary.len() > max_lines {
        lines.push(format!("   (Showing {} of {} contacts)", max_lines, summary.len()));
    }

    lines.push(String::new());
    lines.push(format!("  TOP {} SENDERS", top_senders.len()));
    for (i, sender) in top_senders.iter().enumerate() {
        lines.push(format!("  {:>3}. {}", i + 1, sender));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn months(n: usize) -> Vec<String> {
        (1..=n).map(|m| format!("2001-{:02}", m)).collect()
    }

    #[test]
    fn test_nice_step() {
        assert_eq!(nice_step(0.0), 1.0);
        assert_eq!(nice_step(0.8), 1.0);
        assert_eq!(nice_step(1.5), 2.0);
        assert_eq!(nice_step(3.0), 5.0);
        assert_eq!(nice_step(7.0), 10.0);
        assert_eq!(nice_step(42.0), 50.0);
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a&b <c>"), "a&amp;b &lt;c&gt;");
    }

    #[test]
    fn test_format_tick_suffix() {
        assert_eq!(format_tick(20.0, 10.0, "%"), "20%");
        assert_eq!(format_tick(0.5, 0.5, ""), "0.5");
        assert_eq!(format_tick(0.02, 0.01, "%"), "0.02%");
        assert_eq!(format_tick(0.005, 0.005, "%"), "0.005%");
    }

    #[test]
    fn test_small_percentages_get_distinct_ticks() {
        let series = vec![ChartSeries::new("alice", vec![0.04, 0.02])];
        let config = ChartConfig::new().with_y_suffix("%");
        let svg = generate_line_chart(&months(2), &series, Some(&config)).unwrap();

        let ticks: Vec<&str> = svg
            .split(r#"text-anchor="end" dy="4">"#)
            .skip(1)
            .filter_map(|rest| rest.split("</text>").next())
            .filter(|label| label.ends_with('%'))
            .collect();

        let mut distinct = ticks.clone();
        distinct.dedup();
        assert!(ticks.len() >= 5);
        assert_eq!(distinct, ticks);
        assert_eq!(ticks[0], "0.00%");
        assert!(ticks.contains(&"0.02%"));
        assert!(ticks.contains(&"0.04%"));
    }

    #[test]
    fn test_every_third_label_is_drawn() {
        let series = vec![ChartSeries::new("alice", vec![1.0; 7])];
        let svg = generate_line_chart(&months(7), &series, None).unwrap();

        assert!(svg.contains(">2001-01</text>"));
        assert!(svg.contains(">2001-04</text>"));
        assert!(svg.contains(">2001-07</text>"));
        assert!(!svg.contains(">2001-02</text>"));
        assert!(!svg.contains(">2001-03</text>"));
    }

    #[test]
    fn test_single_month_chart() {
        let series = vec![ChartSeries::new("alice", vec![2.0])];
        let svg = generate_line_chart(&months(1), &series, None).unwrap();
        assert!(svg.contains("<polyline"));
    }

    #[test]
    fn test_all_zero_series_renders() {
        let series = vec![ChartSeries::new("alice", vec![0.0, 0.0])];
        let svg = generate_line_chart(&months(2), &series, None).unwrap();
        assert!(!svg.contains("NaN"));
    }

    #[test]
    fn test_text_summary_truncates_rows() {
        let summary: Vec<ContactSummary> = (0..8)
            .map(|i| ContactSummary::new(format!("p{}", i), i, 0))
            .collect();
        let text = generate_text_summary(&summary, &["p7".to_string()], 5);

        assert!(text.contains("p4"));
        assert!(!text.contains("p5 "));
        assert!(text.contains("Showing 5 of 8 contacts"));
        assert!(text.contains("1. p7"));
    }
}
