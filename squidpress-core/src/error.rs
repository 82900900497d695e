use std::num::ParseFloatError;
use std::path::PathBuf;
use thiserror::Error;

use crate::pipeline::INPUT_FIELD_COUNT;

#[derive(Debug, Error)]
pub enum FormatError {
    // Input
    #[error("line {line}: expected at least {} fields, found {found}", INPUT_FIELD_COUNT)]
    TruncatedRecord { line: u64, found: usize },

    #[error("line {line}: Time field '{value}' is not a unix timestamp: {source}")]
    BadTimestamp {
        line: u64,
        value: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("line {line}: Time field '{value}' is outside the representable range")]
    TimestampRange { line: u64, value: String },

    #[error("failed to read input stream: {source}")]
    Read {
        #[source]
        source: std::io::Error,
    },

    // Output
    #[error("failed to create chunk file {path}: {source}")]
    CreateChunk {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write chunk file {path}: {source}")]
    WriteChunk {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("chunk writer for {path} terminated unexpectedly")]
    WriterGone { path: PathBuf },
}

impl FormatError {
    pub fn read(source: std::io::Error) -> Self {
        Self::Read { source }
    }

    pub fn timestamp_range(line: u64, value: impl Into<String>) -> Self {
        Self::TimestampRange {
            line,
            value: value.into(),
        }
    }

    pub fn create_chunk(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::CreateChunk {
            path: path.into(),
            source,
        }
    }

    pub fn write_chunk(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::WriteChunk {
            path: path.into(),
            source,
        }
    }
}
