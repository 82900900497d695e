use std::io::Cursor;

use tempfile::tempdir;

use crate::config::{FormatterConfig, OutputFormat, delimiter_from_env};
use crate::error::FormatError;
use crate::pipeline::run::run_pipeline;

fn log_line(n: u32) -> String {
    format!(
        "1700000000.{n:06} 23 10.0.0.{n} TCP_MISS/200 4512 GET http://example.com/{n} - DIRECT/203.0.113.9 text/html\n"
    )
}

fn test_config(max_lines: usize) -> FormatterConfig {
    FormatterConfig {
        delimiter: delimiter_from_env(),
        max_lines,
        format: OutputFormat::Gzip,
    }
}

#[test]
fn five_records_with_max_two_produce_three_files() {
    // Arrange
    let dir = tempdir().unwrap();
    let prefix = dir.path().join("out");
    let input: String = (0..5).map(log_line).collect();

    // Act
    let summary = run_pipeline(
        Cursor::new(input),
        prefix.to_str().unwrap(),
        &test_config(2),
    )
    .unwrap();

    // Assert
    assert_eq!(summary.chunks, 3);
    assert_eq!(summary.records, 5);
    assert!(dir.path().join("out_00.log.gz").exists());
    assert!(dir.path().join("out_01.log.gz").exists());
    assert!(dir.path().join("out_02.log.gz").exists());
    assert!(!dir.path().join("out_03.log.gz").exists());
}

#[test]
fn empty_input_writes_no_files() {
    let dir = tempdir().unwrap();
    let prefix = dir.path().join("out");

    let summary = run_pipeline(
        Cursor::new(String::new()),
        prefix.to_str().unwrap(),
        &test_config(2),
    )
    .unwrap();

    assert_eq!(summary.chunks, 0);
    assert_eq!(summary.records, 0);
    assert!(!dir.path().join("out_00.log.gz").exists());
}

#[test]
fn truncated_line_aborts_the_run() {
    let dir = tempdir().unwrap();
    let prefix = dir.path().join("out");
    let input = format!("{}too few fields\n", log_line(0));

    let err = run_pipeline(
        Cursor::new(input),
        prefix.to_str().unwrap(),
        &test_config(10),
    )
    .unwrap_err();

    assert!(matches!(
        err,
        FormatError::TruncatedRecord { line: 2, found: 3 }
    ));
}

#[test]
fn bad_timestamp_aborts_the_run() {
    let dir = tempdir().unwrap();
    let prefix = dir.path().join("out");
    let input =
        "noon 23 10.0.0.1 TCP_MISS/200 4512 GET http://example.com/ - DIRECT/- text/html\n";

    let err = run_pipeline(
        Cursor::new(input.to_string()),
        prefix.to_str().unwrap(),
        &test_config(10),
    )
    .unwrap_err();

    assert!(matches!(err, FormatError::BadTimestamp { line: 1, .. }));
}
