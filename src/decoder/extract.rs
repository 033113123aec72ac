use super::channels::{ChannelMask, ChannelOrigin};
use super::scan::{walk, ChunkContext, ChunkCounts, EventHeader, EventVisitor, Payload};
use super::words::WordPair;

/// One ADC value tagged with its event and timer tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedSample {
    /// Event id (chunk-local from [`decode_chunk`])
    pub event_id: u32,
    /// Timer markers seen before the event (chunk-local from [`decode_chunk`])
    pub timer_tick: u32,
    /// Channel index after applying the origin
    pub channel: u8,
    /// ADC value
    pub value: u16,
}

/// Flat per-sample output for one chunk, as parallel arrays.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedChunk {
    /// Chunk-local event id per sample
    pub event_id: Vec<u32>,
    /// Chunk-local timer tick per sample
    pub timer_tick: Vec<u32>,
    /// Channel index per sample
    pub channel: Vec<u8>,
    /// ADC value per sample
    pub value: Vec<u16>,
    /// Token counts
    pub counts: ChunkCounts,
    /// OR of all complete events' masks
    pub channel_mask: ChannelMask,
    /// Pair index of an event continued in the next chunk
    pub pending: Option<usize>,
}

impl DecodedChunk {
    fn with_capacity(n: usize) -> Self {
        Self {
            event_id: Vec::with_capacity(n),
            timer_tick: Vec::with_capacity(n),
            channel: Vec::with_capacity(n),
            value: Vec::with_capacity(n),
            counts: ChunkCounts::default(),
            channel_mask: ChannelMask::EMPTY,
            pending: None,
        }
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.value.len()
    }

    /// Whether no sample was decoded
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Iterate samples in stream order
    pub fn samples(&self) -> impl Iterator<Item = DecodedSample> + '_ {
        (0..self.len()).map(move |i| DecodedSample {
            event_id: self.event_id[i],
            timer_tick: self.timer_tick[i],
            channel: self.channel[i],
            value: self.value[i],
        })
    }
}

struct SampleCollector {
    origin: ChannelOrigin,
    out: DecodedChunk,
}

impl EventVisitor for SampleCollector {
    fn event(&mut self, header: &EventHeader, payload: Payload<'_>, local_event: u32, timer_tick: u32) {
        self.out.channel_mask |= header.mask;
        for (bit, value) in payload.values() {
            self.out.event_id.push(local_event);
            self.out.timer_tick.push(timer_tick);
            self.out.channel.push(self.origin.channel(bit));
            self.out.value.push(value);
        }
    }
}

/// Decode one chunk into flat samples, treating `pairs` as the whole body.
pub fn decode_chunk(pairs: &[WordPair], origin: ChannelOrigin) -> DecodedChunk {
    decode_chunk_in(pairs, origin, ChunkContext::WHOLE)
}

/// [`decode_chunk`] for one chunk of a longer body.
pub fn decode_chunk_in(pairs: &[WordPair], origin: ChannelOrigin, context: ChunkContext) -> DecodedChunk {
    let mut collector = SampleCollector {
        origin,
        out: DecodedChunk::with_capacity(pairs.len()),
    };
    let walked = walk(pairs, context, &mut collector);
    collector.out.counts = walked.counts;
    collector.out.pending = walked.pending;
    collector.out
}
