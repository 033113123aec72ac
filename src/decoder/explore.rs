use super::channels::ChannelMask;
use super::scan::{walk, ChunkContext, ChunkCounts, EventHeader, EventVisitor, Payload};
use super::words::WordPair;

/// Result of the discovery pass over one chunk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChunkSummary {
    /// Token counts
    pub counts: ChunkCounts,
    /// OR of all complete events' masks
    pub channel_mask: ChannelMask,
    /// Pair index of an event continued in the next chunk
    pub pending: Option<usize>,
}

struct MaskAccumulator(ChannelMask);

impl EventVisitor for MaskAccumulator {
    #[inline]
    fn event(&mut self, header: &EventHeader, _payload: Payload<'_>, _local_event: u32, _timer_tick: u32) {
        self.0 |= header.mask;
    }
}

/// Count tokens and collect the channel mask without materializing samples.
///
/// Treats `pairs` as the whole body; see [`explore_chunk_in`] for chunked input.
pub fn explore_chunk(pairs: &[WordPair]) -> ChunkSummary {
    explore_chunk_in(pairs, ChunkContext::WHOLE)
}

/// [`explore_chunk`] for one chunk of a longer body.
pub fn explore_chunk_in(pairs: &[WordPair], context: ChunkContext) -> ChunkSummary {
    let mut acc = MaskAccumulator(ChannelMask::EMPTY);
    let walked = walk(pairs, context, &mut acc);
    ChunkSummary {
        counts: walked.counts,
        channel_mask: acc.0,
        pending: walked.pending,
    }
}
