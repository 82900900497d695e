//! Shared helpers for end-to-end pipeline tests.

use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use flate2::read::GzDecoder;

/// A well-formed native access-log line.
pub fn access_log_line(time: &str, client: &str, url: &str) -> String {
    format!("{time} 23 {client} TCP_MISS/200 4512 GET {url} - DIRECT/203.0.113.9 text/html\n")
}

/// Decompresses one gzip chunk file and splits it into per-line field lists.
pub fn read_gzip_chunk(path: &Path, delimiter: u8) -> Vec<Vec<String>> {
    let mut raw = Vec::new();
    GzDecoder::new(File::open(path).unwrap())
        .read_to_end(&mut raw)
        .unwrap();
    split_chunk(&raw, delimiter)
}

/// Reads one uncompressed chunk file and splits it into per-line field lists.
pub fn read_plain_chunk(path: &Path, delimiter: u8) -> Vec<Vec<String>> {
    split_chunk(&fs::read(path).unwrap(), delimiter)
}

/// Splits chunk content into newline-terminated lines, then each line into
/// its delimiter-separated fields.
pub fn split_chunk(raw: &[u8], delimiter: u8) -> Vec<Vec<String>> {
    raw.split(|b| *b == b'\n')
        .filter(|line| !line.is_empty())
        .map(|line| {
            line.split(|b| *b == delimiter)
                .map(|field| String::from_utf8(field.to_vec()).unwrap())
                .collect()
        })
        .collect()
}
