//! Access-Log Formatting Pipeline
//!
//! This module turns raw proxy access-log lines into chunked, compressed,
//! delimiter-separated output files.
//!
//! Data flows strictly left to right, one record at a time - no stage ever
//! materializes more than the current record plus one chunk's accounting:
//!
//! stdin
//! tokenize
//! InputRecord
//! project
//! OutputRecord
//! ChunkSplitter
//! ChunkWriter (worker thread, bounded channel)
//! `<prefix>_<NN>.log.gz`
//!
//! The producer side (tokenize, project, split) is fully synchronous on the
//! calling thread. Each chunk's compression and file IO happens on its own
//! worker thread, fed over a bounded channel, so reading the next records of
//! a chunk overlaps with compressing the previous ones. Exactly one writer is
//! in flight at any time: the worker is joined before the next chunk starts.

mod chunk;
mod fields;
mod project;
mod run;
mod tokenize;
mod url;
mod writer;

#[cfg(test)]
mod tests;

pub use chunk::{Chunk, ChunkSplitter};
pub use fields::{
    INPUT_FIELD_COUNT, InputField, InputRecord, OUTPUT_COLUMNS, OutputRecord, SITE_ID,
};
pub use project::project;
pub use run::{RunSummary, run_pipeline};
pub use tokenize::tokenize;
pub use url::extract_domain;
pub use writer::ChunkWriter;
