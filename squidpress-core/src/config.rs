//! Runtime configuration for the formatter pipeline.

use std::env;
use std::ffi::OsStr;

/// Default field delimiter: a non-ASCII byte, so legitimate field content
/// never needs quoting or escaping.
pub const DEFAULT_DELIMITER: u8 = 0xFE;

/// Environment variable whose first byte overrides the delimiter.
pub const DELIMITER_ENV: &str = "DELIMITER";

/// Assumed uncompressed size of one output line.
const BYTES_PER_LINE: usize = 128;

/// Assumed gzip compression ratio (1:5).
const COMPRESSION_RATIO: usize = 5;

/// Target compressed size of one chunk file.
const TARGET_CHUNK_BYTES: usize = 50 * 1024 * 1024;

/// Default records per chunk, sized so one compressed file lands near
/// `TARGET_CHUNK_BYTES` under the assumptions above.
pub const DEFAULT_MAX_LINES: usize = TARGET_CHUNK_BYTES / BYTES_PER_LINE * COMPRESSION_RATIO;

/// On-disk encoding of chunk files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// gzip-compressed `.log.gz` files (the default).
    Gzip,
    /// Uncompressed `.log` files.
    Plain,
}

#[derive(Debug, Clone)]
pub struct FormatterConfig {
    /// Byte separating fields in header and record lines.
    pub delimiter: u8,
    /// Maximum records per chunk; only the final chunk may hold fewer.
    pub max_lines: usize,
    pub format: OutputFormat,
}

impl FormatterConfig {
    /// Stock configuration: gzip output, default chunk sizing, delimiter
    /// taken from the environment.
    pub fn from_env() -> Self {
        Self {
            delimiter: delimiter_from_env(),
            max_lines: DEFAULT_MAX_LINES,
            format: OutputFormat::Gzip,
        }
    }
}

/// First byte of `$DELIMITER`, or the default when unset or empty.
pub fn delimiter_from_env() -> u8 {
    delimiter_from(env::var_os(DELIMITER_ENV).as_deref())
}

fn delimiter_from(value: Option<&OsStr>) -> u8 {
    value
        .and_then(|v| v.as_encoded_bytes().first().copied())
        .unwrap_or(DEFAULT_DELIMITER)
}
