//! Chunk serialization: one worker thread per chunk, fed over a bounded
//! channel, writing through a gzip encoder to the chunk file.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::thread::{self, JoinHandle};

use flate2::Compression;
use flate2::write::GzEncoder;
use tracing::debug;

use crate::config::OutputFormat;
use crate::error::FormatError;
use crate::pipeline::fields::{OUTPUT_COLUMNS, OutputRecord};

/// Records buffered between the producer and the writer thread before the
/// producer blocks. Bounded so a slow disk backpressures the reader instead
/// of growing the heap.
const CHANNEL_CAPACITY: usize = 1024;

/// Handle to a single in-flight chunk writer.
///
/// The worker thread owns the output file and the compression stream; the
/// producer feeds it one record at a time and must call
/// [`ChunkWriter::finish`] to drain the channel, flush the file and surface
/// any IO error before starting the next chunk.
pub struct ChunkWriter {
    tx: SyncSender<OutputRecord>,
    worker: JoinHandle<Result<u64, FormatError>>,
    path: PathBuf,
}

impl ChunkWriter {
    /// Spawns the writer for the chunk at `index`. The output file is
    /// created inside the worker, so creation failures surface at
    /// [`ChunkWriter::finish`] (or on the first rejected send).
    pub fn spawn(prefix: &str, index: u64, delimiter: u8, format: OutputFormat) -> Self {
        let path = chunk_path(prefix, index, format);
        let (tx, rx) = mpsc::sync_channel::<OutputRecord>(CHANNEL_CAPACITY);

        let worker_path = path.clone();
        let worker = thread::spawn(move || write_chunk(worker_path, rx, delimiter, format));

        debug!(path = %path.display(), chunk = index, "chunk writer started");

        Self { tx, worker, path }
    }

    /// Hands one record to the worker, blocking while the channel is full.
    /// An error means the worker is gone; [`ChunkWriter::finish`] has the
    /// underlying cause.
    pub fn send(&self, record: OutputRecord) -> Result<(), FormatError> {
        self.tx.send(record).map_err(|_| FormatError::WriterGone {
            path: self.path.clone(),
        })
    }

    /// Closes the channel, joins the worker and reports how many records it
    /// wrote.
    pub fn finish(self) -> Result<u64, FormatError> {
        let Self { tx, worker, path } = self;
        // Disconnects the channel so the worker drains and finalizes.
        drop(tx);
        match worker.join() {
            Ok(result) => result,
            Err(_) => Err(FormatError::WriterGone { path }),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// File name layout: `{prefix}_{NN}.log.gz` (or `.log` when uncompressed),
/// index zero-padded to at least two digits.
fn chunk_path(prefix: &str, index: u64, format: OutputFormat) -> PathBuf {
    let suffix = match format {
        OutputFormat::Gzip => ".log.gz",
        OutputFormat::Plain => ".log",
    };
    PathBuf::from(format!("{prefix}_{index:02}{suffix}"))
}

fn write_chunk(
    path: PathBuf,
    rx: Receiver<OutputRecord>,
    delimiter: u8,
    format: OutputFormat,
) -> Result<u64, FormatError> {
    let file = File::create(&path).map_err(|source| FormatError::create_chunk(&path, source))?;

    match format {
        OutputFormat::Gzip => {
            let mut out = GzEncoder::new(BufWriter::new(file), Compression::default());
            let written = write_records(&mut out, &rx, delimiter, &path)?;
            // finish() writes the gzip trailer; flush pushes it to disk.
            let mut inner = out
                .finish()
                .map_err(|source| FormatError::write_chunk(&path, source))?;
            inner
                .flush()
                .map_err(|source| FormatError::write_chunk(&path, source))?;
            Ok(written)
        }
        OutputFormat::Plain => {
            let mut out = BufWriter::new(file);
            let written = write_records(&mut out, &rx, delimiter, &path)?;
            out.flush()
                .map_err(|source| FormatError::write_chunk(&path, source))?;
            Ok(written)
        }
    }
}

fn write_records<W: Write>(
    out: &mut W,
    rx: &Receiver<OutputRecord>,
    delimiter: u8,
    path: &Path,
) -> Result<u64, FormatError> {
    write_line(out, OUTPUT_COLUMNS, delimiter)
        .map_err(|source| FormatError::write_chunk(path, source))?;

    let mut written = 0u64;
    while let Ok(record) = rx.recv() {
        write_line(out, record.values(), delimiter)
            .map_err(|source| FormatError::write_chunk(path, source))?;
        written += 1;
    }
    Ok(written)
}

fn write_line<'a, W: Write>(
    out: &mut W,
    values: impl IntoIterator<Item = &'a str>,
    delimiter: u8,
) -> io::Result<()> {
    let mut first = true;
    for value in values {
        if !first {
            out.write_all(&[delimiter])?;
        }
        out.write_all(value.as_bytes())?;
        first = false;
    }
    out.write_all(b"\n")
}
