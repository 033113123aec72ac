use std::mem;

use log::debug;

use super::chunk::Chunk;
use super::scan::ChunkContext;
use super::words::{trailing_bytes, PAIR_BYTES};

/// Carries an event cut by a chunk boundary over to the next chunk.
///
/// Feed every chunk through [`join`](Self::join), decode the returned bytes
/// with the returned context, then hand the decoder's `pending` index to
/// [`keep`](Self::keep).
#[derive(Debug, Default)]
pub struct ChunkSplicer {
    carry: Vec<u8>,
    body_end: u64,
}

impl ChunkSplicer {
    /// Splicer for a body ending at absolute offset `body_end`.
    pub fn new(body_end: u64) -> Self {
        Self {
            carry: Vec::new(),
            body_end,
        }
    }

    /// Prepend the carried event to `chunk`.
    pub fn join(&mut self, chunk: Chunk) -> (Vec<u8>, ChunkContext) {
        let context = ChunkContext {
            resume_in_group: !self.carry.is_empty(),
            last: chunk.end() >= self.body_end,
        };
        let bytes = if self.carry.is_empty() {
            chunk.bytes
        } else {
            let mut joined = mem::take(&mut self.carry);
            joined.extend_from_slice(&chunk.bytes);
            joined
        };
        (bytes, context)
    }

    /// Keep the bytes from pair `pending` onward for the next chunk.
    pub fn keep(&mut self, bytes: &[u8], pending: Option<usize>) {
        if let Some(pair) = pending {
            let whole = bytes.len() - trailing_bytes(bytes.len());
            let from = (pair * PAIR_BYTES).min(whole);
            self.carry = bytes[from..whole].to_vec();
            debug!("Carrying {} bytes of a split event into the next chunk", self.carry.len());
        }
    }

    /// Bytes waiting for the next chunk
    pub fn carried(&self) -> usize {
        self.carry.len()
    }
}
