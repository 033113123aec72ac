use std::ops::AddAssign;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::channels::{ChannelMask, MAX_CHANNELS};
use super::words::WordPair;

const EVENT_BIT: u16 = 1 << 14;
const DUMMY_BIT: u16 = 1 << 15;
const RTC_BIT: u16 = 1 << 12;

/// Words of real-time-clock data preceding the ADC values when the RTC flag is set.
pub const RTC_WORDS: usize = 3;

/// Lenient-decoding counters. None of these abort a conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeDiagnostics {
    /// Unrecognized pairs outside an event group
    pub skipped_pairs: u64,
    /// Event headers with an empty ADC mask
    pub empty_headers: u64,
    /// Events whose payload ran past the end of the chunk
    pub truncated_events: u64,
    /// Body bytes that did not form a whole pair
    pub trailing_bytes: u64,
}

impl DecodeDiagnostics {
    /// Whether every counter is zero
    pub fn is_clean(&self) -> bool {
        *self == DecodeDiagnostics::default()
    }
}

impl AddAssign for DecodeDiagnostics {
    fn add_assign(&mut self, rhs: Self) {
        self.skipped_pairs += rhs.skipped_pairs;
        self.empty_headers += rhs.empty_headers;
        self.truncated_events += rhs.truncated_events;
        self.trailing_bytes += rhs.trailing_bytes;
    }
}

/// Token counts for one chunk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChunkCounts {
    /// Timer markers
    pub timers: u32,
    /// Sync markers
    pub syncs: u32,
    /// Complete events
    pub events: u32,
    /// Lenient-decoding counters
    pub diagnostics: DecodeDiagnostics,
}

/// Decoded flag word of an event header pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventHeader {
    /// ADC inputs that delivered a value
    pub mask: ChannelMask,
    /// A padding word precedes the values
    pub dummy: bool,
    /// Three RTC words precede the values
    pub rtc: bool,
}

impl EventHeader {
    /// Interpret a pair as an event header. The caller checks [`ends_group`] first.
    #[inline]
    pub fn from_pair(pair: WordPair) -> Self {
        EventHeader {
            mask: ChannelMask(pair.0),
            dummy: pair.1 & DUMMY_BIT != 0,
            rtc: pair.1 & RTC_BIT != 0,
        }
    }

    /// Words dropped before the first ADC value
    #[inline]
    pub fn prefix_words(&self) -> usize {
        self.dummy as usize + RTC_WORDS * self.rtc as usize
    }

    /// Total payload words following the header
    #[inline]
    pub fn payload_words(&self) -> usize {
        self.mask.count() + self.prefix_words()
    }

    /// Payload length rounded up to whole pairs
    #[inline]
    pub fn payload_pairs(&self) -> usize {
        (self.payload_words() + 1) / 2
    }
}

/// A pair whose flag word has the event bit set ends the current group.
/// Timer and sync markers both qualify.
#[inline]
pub fn ends_group(pair: WordPair) -> bool {
    pair.1 & EVENT_BIT != 0
}

/// ADC values of one event, addressed by word index past the prefix.
#[derive(Debug, Clone, Copy)]
pub struct Payload<'a> {
    pairs: &'a [WordPair],
    prefix: usize,
    mask: ChannelMask,
}

impl<'a> Payload<'a> {
    /// `(bit, value)` for every set mask bit, in increasing bit order
    pub fn values(&self) -> impl Iterator<Item = (u8, u16)> + 'a {
        let pairs = self.pairs;
        let prefix = self.prefix;
        let mask = self.mask.0;
        (0..MAX_CHANNELS)
            .filter(move |b| (mask >> b) & 1 == 1)
            .enumerate()
            .map(move |(i, bit)| {
                let w = prefix + i;
                (bit, pairs[w / 2].word(w % 2))
            })
    }
}

/// Receives each complete event found by [`walk`].
pub(crate) trait EventVisitor {
    /// `local_event` and `timer_tick` are chunk-local counters at the time the
    /// event header was read.
    fn event(&mut self, header: &EventHeader, payload: Payload<'_>, local_event: u32, timer_tick: u32);
}

/// Where a chunk sits in the body stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkContext {
    /// The chunk opens with an event header of a group left open by the previous chunk
    pub resume_in_group: bool,
    /// No bytes follow this chunk
    pub last: bool,
}

impl ChunkContext {
    /// A chunk that is the whole body.
    pub const WHOLE: ChunkContext = ChunkContext {
        resume_in_group: false,
        last: true,
    };
}

impl Default for ChunkContext {
    fn default() -> Self {
        Self::WHOLE
    }
}

/// Outcome of [`walk`] over one chunk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Walk {
    pub counts: ChunkCounts,
    /// Pair index of an event header whose payload runs past a non-final chunk
    pub pending: Option<usize>,
}

/// Run the token state machine over one chunk.
///
/// Outside a group, pairs are timer markers, sync markers, or skipped. After a
/// sync marker, event headers and their payloads follow until a pair with the
/// event bit set (typically the next timer or sync) or the end of the chunk.
///
/// A payload word of `0x4000` can make the chunk reader cut inside an event.
/// Unless the chunk is the last one, such an event is left unconsumed and its
/// header index returned in [`Walk::pending`]; the caller re-feeds it with the
/// next chunk and [`ChunkContext::resume_in_group`] set.
pub(crate) fn walk<V: EventVisitor>(pairs: &[WordPair], context: ChunkContext, visitor: &mut V) -> Walk {
    let mut counts = ChunkCounts::default();
    let mut pending = None;
    let len = pairs.len();
    let mut k = 0usize;
    let mut in_group = context.resume_in_group;

    while k < len {
        let pair = pairs[k];
        if in_group {
            if ends_group(pair) {
                in_group = false;
                continue;
            }
            let header = EventHeader::from_pair(pair);
            if header.mask.is_empty() {
                counts.diagnostics.empty_headers += 1;
                k += 1;
                continue;
            }

            let start = k + 1;
            let stop = start + header.payload_pairs();
            if stop > len {
                if context.last {
                    counts.diagnostics.truncated_events += 1;
                    warn!(
                        "Event header at pair {} needs {} payload words but the body ends after {}; event dropped",
                        k,
                        header.payload_words(),
                        2 * (len - start)
                    );
                } else {
                    pending = Some(k);
                }
                break;
            }

            let payload = Payload {
                pairs: &pairs[start..stop],
                prefix: header.prefix_words(),
                mask: header.mask,
            };
            visitor.event(&header, payload, counts.events, counts.timers);
            counts.events += 1;
            k = stop;
        } else if pair.is_timer() {
            counts.timers += 1;
            k += 1;
        } else if pair.is_sync() {
            counts.syncs += 1;
            k += 1;
            in_group = true;
        } else {
            counts.diagnostics.skipped_pairs += 1;
            k += 1;
        }
    }

    if counts.diagnostics.skipped_pairs > 0 {
        debug!(
            "Skipped {} unrecognized pairs in chunk of {} pairs",
            counts.diagnostics.skipped_pairs, len
        );
    }
    Walk { counts, pending }
}
