//! Record-boundary chunking of the output stream.

use std::iter::Peekable;

/// Groups a record stream into bounded chunks without buffering it.
///
/// Chunks are handed out as sub-iterators over the shared stream, so the
/// splitter itself holds at most one peeked record regardless of chunk size.
/// A chunk always ends on a record boundary, and the splitter never reads
/// past end-of-stream to fill a chunk it cannot complete: the final chunk
/// may be short, and an exhausted stream yields no chunk at all.
pub struct ChunkSplitter<I: Iterator> {
    records: Peekable<I>,
    max_lines: usize,
}

impl<I: Iterator> ChunkSplitter<I> {
    pub fn new(records: I, max_lines: usize) -> Self {
        Self {
            records: records.peekable(),
            // A chunk holds at least one record.
            max_lines: max_lines.max(1),
        }
    }

    /// Next chunk, or `None` once the stream is exhausted.
    ///
    /// The previous chunk must be fully consumed first; any records it left
    /// unread spill into the chunk returned here.
    pub fn next_chunk(&mut self) -> Option<Chunk<'_, I>> {
        self.records.peek()?;
        Some(Chunk {
            records: &mut self.records,
            remaining: self.max_lines,
        })
    }
}

/// One chunk's worth of records, pulled lazily from the underlying stream.
pub struct Chunk<'a, I: Iterator> {
    records: &'a mut Peekable<I>,
    remaining: usize,
}

impl<I: Iterator> Iterator for Chunk<'_, I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        if self.remaining == 0 {
            return None;
        }
        let record = self.records.next()?;
        self.remaining -= 1;
        Some(record)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}
