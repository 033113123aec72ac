//! # List-Mode Body Decoder
//!
//! The binary body of an MPA-3 list file is a stream of little-endian 16-bit
//! words, consumed in pairs:
//!
//! | Pair                  | Meaning                                         |
//! |-----------------------|-------------------------------------------------|
//! | `(_, 0x4000)`         | timer marker (one tick of the acquisition clock)|
//! | `(0xFFFF, 0xFFFF)`    | sync marker, opens an event group               |
//! | `(mask, flags)`       | event header inside a group                     |
//!
//! An event header is followed by `popcount(mask)` ADC values, preceded by a
//! padding word when flag bit 15 is set and three RTC words when bit 12 is set.
//! A pair with flag bit 14 set ends the group.
//!
//! The body is read in bounded [`Chunk`]s that end right before a pair whose
//! second word is `0x4000`. That is usually a timer marker, but an ADC value of
//! `0x4000` matches too, so an event can straddle two chunks. [`ChunkSplicer`]
//! carries such an event into the next chunk and [`ChunkContext`] tells the
//! state machine to resume inside the open group. [`explore_chunk`] and
//! [`decode_chunk`] share one state machine: the first only counts, the second
//! emits flat [`DecodedSample`]s with chunk-local event ids and timer ticks.

mod channels;
mod chunk;
mod explore;
mod extract;
mod prefetch;
mod scan;
mod splice;
mod words;


pub use channels::{ChannelMask, ChannelOrigin, MAX_CHANNELS};
pub use chunk::{effective_budget, Chunk, ChunkReader, ChunkSource, DEFAULT_CHUNK_BYTES};
pub use explore::{explore_chunk, explore_chunk_in, ChunkSummary};
pub use extract::{decode_chunk, decode_chunk_in, DecodedChunk, DecodedSample};
pub use prefetch::{ChunkPrefetcher, DEFAULT_PREFETCH_DEPTH};
pub use scan::{ends_group, ChunkContext, ChunkCounts, DecodeDiagnostics, EventHeader, Payload, RTC_WORDS};
pub use splice::ChunkSplicer;
pub use words::{
    is_timer_window, pairs_from_bytes, trailing_bytes, WordPair, PAIR_BYTES, SYNC_WORD, TIMER_WORD,
};
