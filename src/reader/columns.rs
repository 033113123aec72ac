use crate::schema::{channel_column_name, ABSENT_VALUE, TIME};

use super::utils::{get_uint16_column, get_uint32_column};
use super::{ListModeReader, ReaderError};

/// A block of consecutive events
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRows {
    /// Global id of the first event
    pub first_event: u64,
    /// `TIME` values
    pub time: Vec<u32>,
    /// Channel of each value column
    pub channels: Vec<u8>,
    /// One value column per channel, each as long as `time`
    pub values: Vec<Vec<u16>>,
}

impl EventRows {
    /// Number of events
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Value column for a channel
    pub fn channel(&self, channel: u8) -> Option<&[u16]> {
        self.channels
            .iter()
            .position(|&c| c == channel)
            .map(|idx| self.values[idx].as_slice())
    }

    /// Sample of `channel` in row `row`, or `None` if the channel did not fire.
    pub fn sample(&self, row: usize, channel: u8) -> Option<u16> {
        self.channel(channel)?
            .get(row)
            .copied()
            .filter(|&v| v != ABSENT_VALUE)
    }
}

impl ListModeReader {
    /// Read the whole `TIME` column
    pub fn read_time(&self) -> Result<Vec<u32>, ReaderError> {
        let mut time = Vec::with_capacity(self.capacity_hint());
        for batch in self.read_batches(Some(&[TIME][..]), 0, None)? {
            let batch = batch?;
            time.extend_from_slice(get_uint32_column(&batch, TIME)?.values());
        }
        Ok(time)
    }

    /// Read the whole value column of `channel`
    ///
    /// Rows where the channel did not fire hold [`ABSENT_VALUE`].
    pub fn read_channel(&self, channel: u8) -> Result<Vec<u16>, ReaderError> {
        if !self.channels().contains(&channel) {
            return Err(ReaderError::ChannelNotFound(channel));
        }
        let name = channel_column_name(channel);
        let mut values = Vec::with_capacity(self.capacity_hint());
        for batch in self.read_batches(Some(&[name.as_str()][..]), 0, None)? {
            let batch = batch?;
            values.extend_from_slice(get_uint16_column(&batch, &name)?.values());
        }
        Ok(values)
    }

    /// Read events `[start, start + len)` across all columns
    pub fn read_rows(&self, start: u64, len: usize) -> Result<EventRows, ReaderError> {
        let total = self.total_events();
        let out_of_range = || ReaderError::OutOfRange { start, len, total };
        start
            .checked_add(len as u64)
            .filter(|&end| end <= total)
            .ok_or_else(out_of_range)?;
        let offset = usize::try_from(start).map_err(|_| out_of_range())?;

        let channels = self.channels().to_vec();
        let names: Vec<String> = channels.iter().map(|&c| channel_column_name(c)).collect();
        let mut rows = EventRows {
            first_event: start,
            time: Vec::with_capacity(len),
            values: vec![Vec::with_capacity(len); channels.len()],
            channels,
        };
        if len == 0 {
            return Ok(rows);
        }

        for batch in self.read_batches(None, offset, Some(len))? {
            let batch = batch?;
            rows.time.extend_from_slice(get_uint32_column(&batch, TIME)?.values());
            for (column, name) in rows.values.iter_mut().zip(&names) {
                column.extend_from_slice(get_uint16_column(&batch, name)?.values());
            }
        }
        Ok(rows)
    }

    fn capacity_hint(&self) -> usize {
        usize::try_from(self.total_events()).unwrap_or(0)
    }
}
