use super::cursor::StreamCursor;
use super::error::ConversionError;
use crate::decoder::{ChannelMask, ChannelOrigin, DecodedChunk, MAX_CHANNELS};
use crate::schema::ABSENT_VALUE;

const SLOTS: usize = MAX_CHANNELS as usize + 1;

/// Maps discovered channel indices to output column positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelLayout {
    channels: Vec<u8>,
    slots: [Option<usize>; SLOTS],
}

impl ChannelLayout {
    /// Layout for the channels of a mask, in increasing order
    pub fn from_mask(mask: ChannelMask, origin: ChannelOrigin) -> Self {
        Self::from_channels(&mask.channels(origin))
    }

    /// Layout for an explicit, increasing channel list
    pub fn from_channels(channels: &[u8]) -> Self {
        let mut slots = [None; SLOTS];
        for (column, &channel) in channels.iter().enumerate() {
            if let Some(slot) = slots.get_mut(channel as usize) {
                *slot = Some(column);
            }
        }
        Self {
            channels: channels.to_vec(),
            slots,
        }
    }

    /// Channels in column order
    pub fn channels(&self) -> &[u8] {
        &self.channels
    }

    /// Column position of a channel
    #[inline]
    pub fn column(&self, channel: u8) -> Option<usize> {
        self.slots.get(channel as usize).copied().flatten()
    }

    /// Number of channel columns
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Whether no channel was discovered
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

/// Dense rows for one chunk, ready to be written at `first_event`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledChunk {
    /// Global id of the first row
    pub first_event: u64,
    /// Global timer tick per row
    pub time: Vec<u32>,
    /// One value column per layout channel
    pub values: Vec<Vec<u16>>,
}

impl AssembledChunk {
    /// Number of rows
    pub fn rows(&self) -> usize {
        self.time.len()
    }
}

/// Group a chunk's flat samples into one row per event.
///
/// Rows are indexed by chunk-local event id. Channels without a sample in an
/// event keep [`ABSENT_VALUE`].
pub fn assemble(
    decoded: &DecodedChunk,
    cursor: &StreamCursor,
    layout: &ChannelLayout,
) -> Result<AssembledChunk, ConversionError> {
    let rows = decoded.counts.events as usize;
    let mut time = vec![0u32; rows];
    let mut values = vec![vec![ABSENT_VALUE; rows]; layout.len()];

    for sample in decoded.samples() {
        let row = sample.event_id as usize;
        let column = layout
            .column(sample.channel)
            .ok_or(ConversionError::UnknownChannel {
                channel: sample.channel,
                event: cursor.global_event(sample.event_id),
            })?;
        time[row] = cursor.global_tick(sample.timer_tick)?;
        values[column][row] = sample.value;
    }

    Ok(AssembledChunk {
        first_event: cursor.event_base,
        time,
        values,
    })
}
