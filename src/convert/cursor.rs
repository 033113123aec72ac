use super::error::ConversionError;
use crate::decoder::ChunkCounts;

/// Global offsets carried from one chunk to the next.
///
/// Chunk-local event ids and timer ticks become global by adding the bases.
/// After each chunk the bases advance by the chunk's full event and timer
/// counts, so timer markers after the last event of a chunk still count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamCursor {
    /// Events in all previous chunks
    pub event_base: u64,
    /// Timer markers in all previous chunks
    pub timer_base: u32,
}

impl StreamCursor {
    /// Cursor at the start of the body
    pub fn new() -> Self {
        Self::default()
    }

    /// Global id of a chunk-local event
    #[inline]
    pub fn global_event(&self, local: u32) -> u64 {
        self.event_base + u64::from(local)
    }

    /// Global tick of a chunk-local timer count
    #[inline]
    pub fn global_tick(&self, local: u32) -> Result<u32, ConversionError> {
        self.timer_base
            .checked_add(local)
            .ok_or(ConversionError::TimerOverflow {
                base: self.timer_base,
                ticks: local,
            })
    }

    /// Move past a chunk
    pub fn advance(&mut self, counts: &ChunkCounts) -> Result<(), ConversionError> {
        self.timer_base = self.global_tick(counts.timers)?;
        self.event_base += u64::from(counts.events);
        Ok(())
    }
}
