//! Field projection from the input schema to the output schema.

use chrono::{Local, TimeZone, Timelike};
use md5::{Digest, Md5};

use crate::error::FormatError;
use crate::pipeline::fields::{InputField, InputRecord, OutputRecord};
use crate::pipeline::url::extract_domain;

/// Projects one tokenized input record into the fixed output schema.
///
/// Purely functional: no side effects, and the only failure modes are a
/// Time field that does not parse as a unix timestamp or one that falls
/// outside the representable calendar range.
pub fn project(record: &InputRecord) -> Result<OutputRecord, FormatError> {
    let (date_id, time_id, timestamp_full) = decompose_timestamp(record)?;

    let (code, status_id) = split_on_slash(record.field(InputField::CodeStatus));
    let (peerstatus, peerhost) = split_on_slash(record.field(InputField::PeerStatusHost));

    let url = record.field(InputField::Url);
    let domain = extract_domain(url).unwrap_or("").to_string();

    Ok(OutputRecord {
        date_id,
        time_id,
        timestamp_full,
        elapsed: record.field(InputField::Elapsed).to_string(),
        client: hash_client(record.field(InputField::Client)),
        code: code.to_string(),
        status_id: status_id.to_string(),
        bytes: record.field(InputField::Bytes).to_string(),
        method: record.field(InputField::Method).to_string(),
        url: url.to_string(),
        domain,
        peerstatus: peerstatus.to_string(),
        peerhost: peerhost.to_string(),
        content: record.field(InputField::ContentType).to_string(),
    })
}

/// Splits on the first `/`; no separator leaves the second half empty.
fn split_on_slash(value: &str) -> (&str, &str) {
    value.split_once('/').unwrap_or((value, ""))
}

/// Stable anonymization of the client identifier: the MD5 digest of its raw
/// bytes as 32 lowercase hex chars. A content fingerprint, not a security
/// boundary; the same client always maps to the same value across runs.
pub fn hash_client(client: &str) -> String {
    format!("{:x}", Md5::digest(client.as_bytes()))
}

/// Derives (`date_id`, `time_id`, `timestamp_full`) from the Time field.
///
/// The timestamp is parsed as fractional unix seconds, rounded to the
/// nearest microsecond, then decomposed in local time: `date_id` is the
/// calendar date as `YYYYMMDD` and `time_id` the minute of the day (0-1439).
fn decompose_timestamp(record: &InputRecord) -> Result<(String, String, String), FormatError> {
    let raw = record.field(InputField::Time);
    let seconds: f64 = raw.parse().map_err(|source| FormatError::BadTimestamp {
        line: record.line(),
        value: raw.to_string(),
        source,
    })?;

    let micros = (seconds * 1e6).round();
    if !micros.is_finite() || micros < i64::MIN as f64 || micros > i64::MAX as f64 {
        return Err(FormatError::timestamp_range(record.line(), raw));
    }
    let micros = micros as i64;

    // Epoch -> local time is a unique mapping, so single() only fails for
    // instants chrono cannot represent at all.
    let local = Local
        .timestamp_micros(micros)
        .single()
        .ok_or_else(|| FormatError::timestamp_range(record.line(), raw))?;

    let date_id = local.format("%Y%m%d").to_string();
    let time_id = (local.hour() * 60 + local.minute()).to_string();

    Ok((date_id, time_id, micros.to_string()))
}
