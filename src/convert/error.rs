use crate::decoder::ChannelMask;
use crate::header::HeaderError;
use crate::metadata::MetadataError;
use crate::store::StoreError;

/// Errors that can occur during conversion
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    /// Bad input/output paths, raised before any decoding
    #[error("Usage error: {0}")]
    UsageError(String),

    /// Error reading the list-file header
    #[error("Header error: {0}")]
    HeaderError(#[from] HeaderError),

    /// I/O error during file operations
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error writing the output store
    #[error("Store error: {0}")]
    StoreError(#[from] StoreError),

    /// Error processing metadata
    #[error("Metadata error: {0}")]
    MetadataError(#[from] MetadataError),

    /// The two passes disagree about the file contents
    #[error(
        "Event count mismatch: discovery found {explored_events} events (mask {explored_mask}), \
         conversion found {converted_events} events (mask {converted_mask})"
    )]
    EventCountMismatch {
        /// Events counted by the discovery pass
        explored_events: u64,
        /// Events decoded by the materialization pass
        converted_events: u64,
        /// Channel mask from the discovery pass
        explored_mask: ChannelMask,
        /// Channel mask from the materialization pass
        converted_mask: ChannelMask,
    },

    /// A sample references a channel that the discovery pass did not see
    #[error("Sample for channel {channel} in event {event} is outside the discovered channels")]
    UnknownChannel {
        /// Channel index of the sample
        channel: u8,
        /// Global event id
        event: u64,
    },

    /// Timer ticks no longer fit the 32-bit TIME column
    #[error("Timer tick overflow: base {base} + {ticks} exceeds u32")]
    TimerOverflow {
        /// Ticks before the chunk
        base: u32,
        /// Chunk-local ticks
        ticks: u32,
    },
}
