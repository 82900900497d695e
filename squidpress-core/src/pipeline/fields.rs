//! Positional field schemas for input and output records.

use crate::error::FormatError;

/// Number of fields a well-formed input line must carry. Extra trailing
/// tokens are tolerated and ignored.
pub const INPUT_FIELD_COUNT: usize = 10;

/// Positional schema of the native proxy access-log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(usize)]
pub enum InputField {
    Time = 0,
    Elapsed,
    Client,
    CodeStatus,
    Bytes,
    Method,
    Url,
    Rfc931,
    PeerStatusHost,
    ContentType,
}

impl InputField {
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// One tokenized input line, guaranteed to hold at least
/// [`INPUT_FIELD_COUNT`] tokens.
#[derive(Debug, Clone)]
pub struct InputRecord {
    tokens: Vec<String>,
    line: u64,
}

impl InputRecord {
    /// Wraps a token list, rejecting lines with missing fields.
    pub fn from_tokens(tokens: Vec<String>, line: u64) -> Result<Self, FormatError> {
        if tokens.len() < INPUT_FIELD_COUNT {
            return Err(FormatError::TruncatedRecord {
                line,
                found: tokens.len(),
            });
        }
        Ok(Self { tokens, line })
    }

    pub fn field(&self, field: InputField) -> &str {
        &self.tokens[field.index()]
    }

    /// 1-based input line number, carried for error context.
    pub fn line(&self) -> u64 {
        self.line
    }
}

/// Tenant identifier. Single-tenant for now; reserved for multi-site support.
pub const SITE_ID: &str = "1";

/// Output column names, in file order.
pub const OUTPUT_COLUMNS: [&str; 15] = [
    "site_id",
    "date_id",
    "time_id",
    "timestamp_full",
    "elapsed",
    "client",
    "code",
    "status_id",
    "bytes",
    "method",
    "url",
    "domain",
    "peerstatus",
    "peerhost",
    "content",
];

/// One fully projected output row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRecord {
    pub date_id: String,
    pub time_id: String,
    pub timestamp_full: String,
    pub elapsed: String,
    /// Hashed client identifier, 32 lowercase hex chars.
    pub client: String,
    pub code: String,
    pub status_id: String,
    pub bytes: String,
    pub method: String,
    pub url: String,
    pub domain: String,
    pub peerstatus: String,
    pub peerhost: String,
    pub content: String,
}

impl OutputRecord {
    /// Column values in file order, aligned with [`OUTPUT_COLUMNS`].
    pub fn values(&self) -> [&str; 15] {
        [
            SITE_ID,
            &self.date_id,
            &self.time_id,
            &self.timestamp_full,
            &self.elapsed,
            &self.client,
            &self.code,
            &self.status_id,
            &self.bytes,
            &self.method,
            &self.url,
            &self.domain,
            &self.peerstatus,
            &self.peerhost,
            &self.content,
        ]
    }
}
