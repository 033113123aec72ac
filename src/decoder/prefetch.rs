//! Background chunk reading.
//!
//! [`ChunkPrefetcher`] moves a [`ChunkReader`] onto a dedicated thread and hands
//! chunks back through a bounded channel, so file I/O for chunk `n + 1` overlaps
//! with decoding of chunk `n`.
//!
//! ```text
//! ┌─────────────────┐    bounded channel    ┌─────────────┐
//! │ mpalist-reader  │ ──io::Result<Chunk>─▶ │  Decoder    │
//! │ (ChunkReader)   │     (file order)      │  (caller)   │
//! └─────────────────┘                       └─────────────┘
//! ```
//!
//! The channel preserves order, so the caller sees exactly the sequence the
//! sequential reader would produce. Dropping the prefetcher disconnects the
//! channel, which stops the reader thread at its next send.

use std::io::{self, Read, Seek};
use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, Receiver};

use super::chunk::{Chunk, ChunkReader, ChunkSource};

/// Default number of chunks read ahead of the decoder.
pub const DEFAULT_PREFETCH_DEPTH: usize = 2;

/// Chunk source backed by a reader thread.
pub struct ChunkPrefetcher {
    /// Channel receiver (None once the thread has been joined)
    receiver: Option<Receiver<io::Result<Chunk>>>,
    /// Reader thread handle
    handle: Option<JoinHandle<()>>,
}

impl ChunkPrefetcher {
    /// Spawn the reader thread.
    ///
    /// At most `depth` chunks (minimum 1) are buffered in the channel, plus one
    /// held by the thread while it waits to send.
    pub fn spawn<R>(mut reader: ChunkReader<R>, depth: usize) -> io::Result<Self>
    where
        R: Read + Seek + Send + 'static,
    {
        let (sender, receiver) = bounded::<io::Result<Chunk>>(depth.max(1));

        let handle = thread::Builder::new()
            .name("mpalist-reader".to_string())
            .spawn(move || loop {
                match reader.next_chunk() {
                    Ok(Some(chunk)) => {
                        // Receiver gone: the consumer stopped early.
                        if sender.send(Ok(chunk)).is_err() {
                            break;
                        }
                    }
                    Ok(None) => break,
                    Err(e) => {
                        let _ = sender.send(Err(e));
                        break;
                    }
                }
            })?;

        Ok(Self {
            receiver: Some(receiver),
            handle: Some(handle),
        })
    }

    fn join(&mut self) -> io::Result<()> {
        self.receiver.take();
        match self.handle.take() {
            Some(handle) => handle.join().map_err(|_| {
                io::Error::new(io::ErrorKind::Other, "chunk reader thread panicked")
            }),
            None => Ok(()),
        }
    }
}

impl ChunkSource for ChunkPrefetcher {
    fn next_chunk(&mut self) -> io::Result<Option<Chunk>> {
        let received = match self.receiver.as_ref() {
            Some(receiver) => receiver.recv(),
            None => return Ok(None),
        };
        match received {
            Ok(Ok(chunk)) => Ok(Some(chunk)),
            Ok(Err(e)) => {
                self.join()?;
                Err(e)
            }
            // Sender dropped: the reader reached the end of the body (or panicked).
            Err(_) => {
                self.join()?;
                Ok(None)
            }
        }
    }
}

impl Drop for ChunkPrefetcher {
    fn drop(&mut self) {
        if let Err(e) = self.join() {
            log::warn!("{}", e);
        }
    }
}
