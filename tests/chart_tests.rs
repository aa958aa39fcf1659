use mailstat::chart::{generate_line_chart, ChartConfig, ChartSeries};
use mailstat::utils::error::ChartError;

fn months() -> Vec<String> {
    vec!["2000-11", "2000-12", "2001-01", "2001-02"]
        .into_iter()
        .map(String::from)
        .collect()
}

#[test]
fn test_one_line_and_legend_entry_per_sender() {
    let series = vec![
        ChartSeries::new("alice", vec![1.0, 4.0, 2.0, 0.0]),
        ChartSeries::new("bob", vec![0.0, 0.0, 3.0, 5.0]),
    ];
    let config = ChartConfig::new()
        .with_title("Top Senders Emails")
        .with_axis_labels("Month", "# of Emails Sent by Month");

    let svg = generate_line_chart(&months(), &series, Some(&config)).unwrap();

    assert!(svg.starts_with("<svg"));
    assert!(svg.ends_with("</svg>"));
    assert_eq!(svg.matches("<polyline").count(), 2);
    assert!(svg.contains(">alice</text>"));
    assert!(svg.contains(">bob</text>"));
    assert!(svg.contains("Top Senders Emails"));
    assert!(svg.contains("# of Emails Sent by Month"));
}

#[test]
fn test_percent_suffix_on_y_ticks() {
    let series = vec![ChartSeries::new("alice", vec![10.0, 50.0, 25.0, 0.0])];
    let config = ChartConfig::new()
        .with_title("Top Senders Percentage of Contacts")
        .with_y_suffix("%");

    let svg = generate_line_chart(&months(), &series, Some(&config)).unwrap();

    assert!(svg.contains(">0%</text>"));
    assert!(svg.contains(">50%</text>"));
}

#[test]
fn test_labels_are_escaped() {
    let series = vec![ChartSeries::new("r&d <team>", vec![1.0; 4])];
    let svg = generate_line_chart(&months(), &series, None).unwrap();

    assert!(svg.contains("r&amp;d &lt;team&gt;"));
    assert!(!svg.contains("<team>"));
}

#[test]
fn test_custom_size() {
    let series = vec![ChartSeries::new("alice", vec![1.0; 4])];
    let config = ChartConfig::new().with_size(640, 480);

    let svg = generate_line_chart(&months(), &series, Some(&config)).unwrap();

    assert!(svg.contains(r#"width="640" height="480""#));
}

#[test]
fn test_empty_series_is_error() {
    let result = generate_line_chart(&months(), &[], None);
    assert!(matches!(result, Err(ChartError::EmptySeries)));
}

#[test]
fn test_length_mismatch_is_error() {
    let series = vec![ChartSeries::new("alice", vec![1.0, 2.0])];
    let result = generate_line_chart(&months(), &series, None);

    match result {
        Err(ChartError::LengthMismatch { label, expected, actual }) => {
            assert_eq!(label, "alice");
            assert_eq!(expected, 4);
            assert_eq!(actual, 2);
        }
        other => panic!("expected LengthMismatch, got {:?}", other),
    }
}
