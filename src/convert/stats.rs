use std::fmt;

use serde::{Deserialize, Serialize};

use crate::decoder::{ChannelMask, ChannelOrigin, ChunkCounts, DecodeDiagnostics};

/// Whole-file counts from the discovery pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExploreSummary {
    /// Complete events
    pub events: u64,
    /// Timer markers
    pub timers: u64,
    /// Sync markers
    pub syncs: u64,
    /// OR of all event masks
    pub channel_mask: ChannelMask,
    /// Lenient-decoding counters
    pub diagnostics: DecodeDiagnostics,
    /// Chunks read
    pub chunks: u64,
    /// Body size in bytes
    pub body_bytes: u64,
}

impl ExploreSummary {
    /// Fold in one chunk's counts
    pub fn add_chunk(&mut self, counts: &ChunkCounts, mask: ChannelMask) {
        self.events += u64::from(counts.events);
        self.timers += u64::from(counts.timers);
        self.syncs += u64::from(counts.syncs);
        self.channel_mask |= mask;
        self.diagnostics += counts.diagnostics;
        self.chunks += 1;
    }

    /// Discovered channel indices in increasing order
    pub fn channels(&self, origin: ChannelOrigin) -> Vec<u8> {
        self.channel_mask.channels(origin)
    }
}

impl fmt::Display for ExploreSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} events, {} timer markers, {} sync markers, channel mask {}",
            self.events, self.timers, self.syncs, self.channel_mask
        )
    }
}

/// Statistics from a conversion
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversionStats {
    /// Discovery pass counts
    pub explore: ExploreSummary,
    /// Events written
    pub events_written: u64,
    /// Channels written, in column order
    pub channels: Vec<u8>,
    /// Lenient-decoding counters from the materialization pass
    pub diagnostics: DecodeDiagnostics,
    /// Parquet row groups written
    pub row_groups_written: usize,
    /// Size of source list file in bytes
    pub source_file_size: u64,
    /// Size of output store in bytes
    pub output_file_size: u64,
    /// Compression ratio (source/output)
    pub compression_ratio: f64,
}

impl fmt::Display for ConversionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Converted {} events on channels {:?} ({} -> {} bytes, ratio {:.2})",
            self.events_written,
            self.channels,
            self.source_file_size,
            self.output_file_size,
            self.compression_ratio
        )
    }
}
