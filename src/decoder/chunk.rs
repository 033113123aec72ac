use std::io::{self, BufReader, Read, Seek, SeekFrom};

use log::debug;

use super::words::{is_timer_window, PAIR_BYTES};

/// Default chunk budget in bytes.
pub const DEFAULT_CHUNK_BYTES: usize = 50_000_000;

/// Round a byte budget down to whole word pairs, minimum one pair.
pub fn effective_budget(bytes: usize) -> usize {
    (bytes - bytes % PAIR_BYTES).max(PAIR_BYTES)
}

/// A slice of the binary body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Absolute file offset of the first byte
    pub start: u64,
    /// Raw body bytes
    pub bytes: Vec<u8>,
}

impl Chunk {
    /// Absolute file offset just past the last byte
    pub fn end(&self) -> u64 {
        self.start + self.bytes.len() as u64
    }
}

/// Anything that yields body chunks in file order.
pub trait ChunkSource {
    /// Next chunk, or `None` once the body is exhausted.
    fn next_chunk(&mut self) -> io::Result<Option<Chunk>>;
}

/// Reads the body in bounded chunks that end just before a timer marker.
///
/// After the byte budget is read, 4-byte windows are appended until a window
/// carrying a timer marker is found. That window is pushed back so it opens
/// the following chunk. A payload value of `0x4000` also matches the window
/// test, so a chunk may end inside an event; see `ChunkSplicer`.
pub struct ChunkReader<R> {
    inner: BufReader<R>,
    position: u64,
    end: u64,
    budget: usize,
}

impl<R: Read + Seek> ChunkReader<R> {
    /// Position `inner` at `body_offset` and prepare to read up to `end`.
    pub fn new(mut inner: R, body_offset: u64, end: u64, budget: usize) -> io::Result<Self> {
        inner.seek(SeekFrom::Start(body_offset))?;
        Ok(Self {
            inner: BufReader::with_capacity(64 * 1024, inner),
            position: body_offset,
            end: end.max(body_offset),
            budget: effective_budget(budget),
        })
    }

    /// Current absolute position
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Absolute end of the body
    pub fn end(&self) -> u64 {
        self.end
    }

    /// Bytes not yet returned
    pub fn remaining(&self) -> u64 {
        self.end - self.position
    }

    /// Effective budget after rounding
    pub fn budget(&self) -> usize {
        self.budget
    }

    fn read_chunk(&mut self) -> io::Result<Option<Chunk>> {
        let remaining = self.remaining();
        if remaining == 0 {
            return Ok(None);
        }

        let start = self.position;
        if remaining <= self.budget as u64 {
            let mut bytes = vec![0u8; remaining as usize];
            self.inner.read_exact(&mut bytes)?;
            self.position = self.end;
            return Ok(Some(Chunk { start, bytes }));
        }

        let mut bytes = vec![0u8; self.budget];
        self.inner.read_exact(&mut bytes)?;
        self.position += self.budget as u64;

        let mut window = [0u8; PAIR_BYTES];
        let mut extended = 0usize;
        while self.position < self.end {
            let take = self.remaining().min(PAIR_BYTES as u64) as usize;
            self.inner.read_exact(&mut window[..take])?;
            if is_timer_window(&window[..take]) {
                self.inner.seek_relative(-(PAIR_BYTES as i64))?;
                break;
            }
            bytes.extend_from_slice(&window[..take]);
            self.position += take as u64;
            extended += take;
        }

        debug!(
            "Chunk at {}: {} bytes ({} past budget)",
            start,
            bytes.len(),
            extended
        );
        Ok(Some(Chunk { start, bytes }))
    }
}

impl<R: Read + Seek> ChunkSource for ChunkReader<R> {
    fn next_chunk(&mut self) -> io::Result<Option<Chunk>> {
        self.read_chunk()
    }
}

impl<R: Read + Seek> Iterator for ChunkReader<R> {
    type Item = io::Result<Chunk>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_chunk().transpose()
    }
}
