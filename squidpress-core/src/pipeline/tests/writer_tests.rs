use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use flate2::read::GzDecoder;
use tempfile::tempdir;

use crate::config::{DEFAULT_DELIMITER, OutputFormat};
use crate::error::FormatError;
use crate::pipeline::fields::{OUTPUT_COLUMNS, OutputRecord};
use crate::pipeline::writer::ChunkWriter;

fn sample_record(n: u32) -> OutputRecord {
    OutputRecord {
        date_id: "20231114".into(),
        time_id: "1353".into(),
        timestamp_full: format!("170000000012345{n}"),
        elapsed: "23".into(),
        client: "098f6bcd4621d373cade4e832627b4f6".into(),
        code: "TCP_MISS".into(),
        status_id: "200".into(),
        bytes: "4512".into(),
        method: "GET".into(),
        url: format!("http://example.com/{n}"),
        domain: "example.com".into(),
        peerstatus: "DIRECT".into(),
        peerhost: "203.0.113.9".into(),
        content: "text/html".into(),
    }
}

fn split_lines(raw: &[u8], delimiter: u8) -> Vec<Vec<String>> {
    raw.split(|b| *b == b'\n')
        .filter(|l| !l.is_empty())
        .map(|line| {
            line.split(|b| *b == delimiter)
                .map(|f| String::from_utf8(f.to_vec()).unwrap())
                .collect()
        })
        .collect()
}

fn read_gzip(path: &Path) -> Vec<u8> {
    let mut raw = Vec::new();
    GzDecoder::new(File::open(path).unwrap())
        .read_to_end(&mut raw)
        .unwrap();
    raw
}

#[test]
fn gzip_chunk_round_trips_header_and_records() {
    // Arrange
    let dir = tempdir().unwrap();
    let prefix = dir.path().join("out");
    let writer = ChunkWriter::spawn(
        prefix.to_str().unwrap(),
        0,
        DEFAULT_DELIMITER,
        OutputFormat::Gzip,
    );

    // Act
    for n in 0..3 {
        writer.send(sample_record(n)).unwrap();
    }
    let written = writer.finish().unwrap();

    // Assert
    assert_eq!(written, 3);

    let raw = read_gzip(&dir.path().join("out_00.log.gz"));
    let lines = split_lines(&raw, DEFAULT_DELIMITER);

    assert_eq!(lines.len(), 4); // header + 3 records
    assert_eq!(lines[0], OUTPUT_COLUMNS);
    for (line, n) in lines[1..].iter().zip(0..) {
        assert_eq!(line.len(), OUTPUT_COLUMNS.len());
        assert_eq!(*line, sample_record(n).values());
    }
}

#[test]
fn plain_chunk_is_written_uncompressed() {
    let dir = tempdir().unwrap();
    let prefix = dir.path().join("out");
    let writer = ChunkWriter::spawn(
        prefix.to_str().unwrap(),
        0,
        DEFAULT_DELIMITER,
        OutputFormat::Plain,
    );

    writer.send(sample_record(0)).unwrap();
    assert_eq!(writer.finish().unwrap(), 1);

    let raw = fs::read(dir.path().join("out_00.log")).unwrap();
    let lines = split_lines(&raw, DEFAULT_DELIMITER);

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], OUTPUT_COLUMNS);
}

#[test]
fn chunk_index_is_zero_padded_to_two_digits() {
    let dir = tempdir().unwrap();
    let prefix = dir.path().join("out");

    for index in [0, 7, 123] {
        let writer = ChunkWriter::spawn(
            prefix.to_str().unwrap(),
            index,
            DEFAULT_DELIMITER,
            OutputFormat::Gzip,
        );
        writer.finish().unwrap();
    }

    assert!(dir.path().join("out_00.log.gz").exists());
    assert!(dir.path().join("out_07.log.gz").exists());
    // Wider indexes are not truncated.
    assert!(dir.path().join("out_123.log.gz").exists());
}

#[test]
fn unwritable_path_fails_at_finish() {
    let dir = tempdir().unwrap();
    let prefix = dir.path().join("missing").join("out");
    let writer = ChunkWriter::spawn(
        prefix.to_str().unwrap(),
        0,
        DEFAULT_DELIMITER,
        OutputFormat::Gzip,
    );

    let err = writer.finish().unwrap_err();

    assert!(matches!(err, FormatError::CreateChunk { .. }));
}

#[test]
fn custom_delimiter_is_honored() {
    let dir = tempdir().unwrap();
    let prefix = dir.path().join("out");
    let writer = ChunkWriter::spawn(prefix.to_str().unwrap(), 0, b'\t', OutputFormat::Plain);

    writer.send(sample_record(0)).unwrap();
    writer.finish().unwrap();

    let raw = fs::read(dir.path().join("out_00.log")).unwrap();
    let lines = split_lines(&raw, b'\t');

    assert_eq!(lines[0], OUTPUT_COLUMNS);
    assert_eq!(lines[1].len(), OUTPUT_COLUMNS.len());
}
