use mailstat::output::{read_summary, validate_path, write_summary, write_svg};
use mailstat::parser::schema::ContactSummary;
use pretty_assertions::assert_eq;
use std::path::Path;
use tempfile::NamedTempFile;

#[test]
fn test_summary_round_trip() {
    let summary = vec![
        ContactSummary::new("bob", 0, 2),
        ContactSummary::new("carol", 0, 1),
        ContactSummary::new("alice", 2, 0),
    ];
    let temp_file = NamedTempFile::new().unwrap();

    write_summary(&summary, temp_file.path()).unwrap();
    let loaded = read_summary(temp_file.path()).unwrap();

    assert_eq!(loaded, summary);
}

#[test]
fn test_summary_header() {
    let temp_file = NamedTempFile::new().unwrap();
    write_summary(&[ContactSummary::new("alice", 1, 0)], temp_file.path()).unwrap();

    let content = std::fs::read_to_string(temp_file.path()).unwrap();
    assert_eq!(content.lines().next(), Some("person,sent,received"));
}

#[test]
fn test_summary_write_creates_parent_dirs() {
    let temp_dir = tempfile::tempdir().unwrap();
    let nested_path = temp_dir.path().join("nested/dirs/summary.csv");

    write_summary(&[], &nested_path).unwrap();

    assert!(nested_path.exists());
}

#[test]
fn test_validate_output_path_empty() {
    assert!(validate_path(Path::new("")).is_err());
}

#[test]
fn test_validate_output_path_directory() {
    // Try to write to a directory path
    let temp_dir = tempfile::tempdir().unwrap();
    assert!(validate_path(temp_dir.path()).is_err());
}

#[test]
fn test_svg_write_creates_parent_dirs() {
    let temp_dir = tempfile::tempdir().unwrap();
    let nested_path = temp_dir.path().join("nested/dirs/chart.svg");
    let valid_svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100"></svg>"#;

    write_svg(valid_svg, &nested_path).unwrap();

    assert!(nested_path.exists());
}
