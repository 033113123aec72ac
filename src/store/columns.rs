use log::debug;

use super::error::StoreError;
use crate::schema::ABSENT_VALUE;

/// Fixed-size output columns for a whole file, indexed by global event id.
///
/// Allocated once from the discovery pass counts; channel columns start out
/// filled with [`ABSENT_VALUE`]. Chunks are written at their absolute offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventColumns {
    channels: Vec<u8>,
    time: Vec<u32>,
    values: Vec<Vec<u16>>,
    rows_written: u64,
}

impl EventColumns {
    /// Allocate `events` rows for `TIME` and each channel.
    pub fn allocate(events: u64, channels: &[u8]) -> Result<Self, StoreError> {
        let len = usize::try_from(events).map_err(|_| {
            StoreError::InvalidData(format!("{} events do not fit in memory on this platform", events))
        })?;
        debug!(
            "Allocating {} events x {} channel columns",
            len,
            channels.len()
        );
        Ok(Self {
            channels: channels.to_vec(),
            time: vec![0; len],
            values: channels.iter().map(|_| vec![ABSENT_VALUE; len]).collect(),
            rows_written: 0,
        })
    }

    /// Allocated rows
    pub fn capacity(&self) -> usize {
        self.time.len()
    }

    /// Channel index of each value column
    pub fn channels(&self) -> &[u8] {
        &self.channels
    }

    /// Total rows written so far
    pub fn rows_written(&self) -> u64 {
        self.rows_written
    }

    /// Copy a block of rows into `[first_row, first_row + time.len())`.
    ///
    /// `values` holds one slice per channel column, each as long as `time`.
    pub fn write_rows(&mut self, first_row: u64, time: &[u32], values: &[Vec<u16>]) -> Result<(), StoreError> {
        let rows = time.len();
        let out_of_bounds = || StoreError::OutOfBounds {
            first_row,
            rows,
            capacity: self.time.len(),
        };
        let start = usize::try_from(first_row).map_err(|_| out_of_bounds())?;
        let end = start.checked_add(rows).ok_or_else(out_of_bounds)?;
        if end > self.time.len() {
            return Err(out_of_bounds());
        }
        if values.len() != self.values.len() {
            return Err(StoreError::InvalidData(format!(
                "expected {} channel columns, got {}",
                self.values.len(),
                values.len()
            )));
        }
        if let Some(bad) = values.iter().position(|v| v.len() != rows) {
            return Err(StoreError::InvalidData(format!(
                "channel column {} has {} rows, expected {}",
                bad,
                values[bad].len(),
                rows
            )));
        }

        self.time[start..end].copy_from_slice(time);
        for (column, block) in self.values.iter_mut().zip(values) {
            column[start..end].copy_from_slice(block);
        }
        self.rows_written += rows as u64;
        Ok(())
    }

    /// `TIME` column
    pub fn time(&self) -> &[u32] {
        &self.time
    }

    /// Value column for a channel
    pub fn channel(&self, channel: u8) -> Option<&[u16]> {
        self.channels
            .iter()
            .position(|&c| c == channel)
            .map(|idx| self.values[idx].as_slice())
    }

    /// Consume into `(time, per-channel values)`
    pub fn into_parts(self) -> (Vec<u32>, Vec<Vec<u16>>) {
        (self.time, self.values)
    }
}
