//! squidpress: re-projects a stream of proxy access-log records from stdin
//! into a fixed delimiter-separated schema and writes it out as a sequence of
//! size-bounded, gzip-compressed chunk files.

pub mod config;
pub mod error;
pub mod logging;
pub mod pipeline;

pub use config::{FormatterConfig, OutputFormat};
pub use error::FormatError;
pub use pipeline::{RunSummary, run_pipeline};
