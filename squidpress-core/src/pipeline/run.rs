//! Pipeline wiring: raw lines in, chunk files out.

use std::io::BufRead;

use tracing::info;

use crate::config::FormatterConfig;
use crate::error::FormatError;
use crate::pipeline::chunk::ChunkSplitter;
use crate::pipeline::fields::{InputRecord, OutputRecord};
use crate::pipeline::project::project;
use crate::pipeline::tokenize::tokenize;
use crate::pipeline::writer::ChunkWriter;

/// Totals reported after a successful run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub records: u64,
    pub chunks: u64,
}

/// Streaming adapter over the input: reads one line, tokenizes and projects
/// it, and yields the result. Holds a single reusable line buffer, so memory
/// stays constant however long the stream runs.
struct RecordStream<R> {
    input: R,
    buf: String,
    line: u64,
}

impl<R: BufRead> RecordStream<R> {
    fn new(input: R) -> Self {
        Self {
            input,
            buf: String::new(),
            line: 0,
        }
    }
}

impl<R: BufRead> Iterator for RecordStream<R> {
    type Item = Result<OutputRecord, FormatError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.input.read_line(&mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                self.line += 1;
                let result = InputRecord::from_tokens(tokenize(&self.buf), self.line)
                    .and_then(|record| project(&record));
                Some(result)
            }
            Err(source) => Some(Err(FormatError::read(source))),
        }
    }
}

/// Runs the full pipeline over `input`, writing chunk files under `prefix`.
///
/// Any malformed record or IO failure aborts the run; files written so far
/// (including a partial current chunk) are left on disk.
pub fn run_pipeline<R: BufRead>(
    input: R,
    prefix: &str,
    config: &FormatterConfig,
) -> Result<RunSummary, FormatError> {
    let records = RecordStream::new(input);
    let mut splitter = ChunkSplitter::new(records, config.max_lines);

    let mut summary = RunSummary::default();

    while let Some(chunk) = splitter.next_chunk() {
        let writer = ChunkWriter::spawn(prefix, summary.chunks, config.delimiter, config.format);
        let path = writer.path().to_path_buf();

        for record in chunk {
            let record = record?;
            if writer.send(record).is_err() {
                // The worker died mid-chunk; joining it surfaces the IO error.
                return Err(match writer.finish() {
                    Ok(_) => FormatError::WriterGone { path },
                    Err(err) => err,
                });
            }
        }

        let written = writer.finish()?;
        info!(
            path = %path.display(),
            chunk = summary.chunks,
            records = written,
            "chunk written"
        );

        summary.records += written;
        summary.chunks += 1;
    }

    Ok(summary)
}
