use crate::decoder::{ChannelOrigin, DEFAULT_CHUNK_BYTES, DEFAULT_PREFETCH_DEPTH};
use crate::header::DEFAULT_MAX_HEADER_BYTES;
use crate::store::StoreConfig;

/// Configuration for list file conversion
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionConfig {
    /// Store writer configuration
    pub store_config: StoreConfig,

    /// Target chunk size in bytes (rounded down to whole word pairs)
    pub chunk_bytes: usize,

    /// Channel numbering of mask bits
    pub channel_origin: ChannelOrigin,

    /// Read chunks on a background thread
    pub prefetch: bool,

    /// Chunks buffered ahead of the decoder when prefetching
    pub prefetch_depth: usize,

    /// Give up looking for `[LISTDATA]` after this many header bytes
    pub max_header_bytes: u64,

    /// Replace an existing output file
    pub overwrite: bool,

    /// Progress log interval (chunks)
    pub progress_interval: usize,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            store_config: StoreConfig::default(),
            chunk_bytes: DEFAULT_CHUNK_BYTES,
            channel_origin: ChannelOrigin::Zero,
            prefetch: true,
            prefetch_depth: DEFAULT_PREFETCH_DEPTH,
            max_header_bytes: DEFAULT_MAX_HEADER_BYTES,
            overwrite: false,
            progress_interval: 10,
        }
    }
}

impl ConversionConfig {
    /// Configuration optimized for maximum compression (slower conversion)
    pub fn max_compression() -> Self {
        Self {
            store_config: StoreConfig::max_compression(),
            ..Self::default()
        }
    }

    /// Configuration optimized for fast conversion (larger files)
    pub fn fast_write() -> Self {
        Self {
            store_config: StoreConfig::fast_write(),
            ..Self::default()
        }
    }

    /// Balanced configuration (default)
    pub fn balanced() -> Self {
        Self::default()
    }
}
