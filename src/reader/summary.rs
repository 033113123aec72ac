use std::fmt;

use crate::schema::{channel_column_name, ABSENT_VALUE, TIME};

use super::utils::{get_uint16_column, get_uint32_column};
use super::{ListModeReader, ReaderError};

/// Summary statistics about a store
#[derive(Debug, Clone, PartialEq)]
pub struct StoreSummary {
    /// Total number of events
    pub total_events: u64,
    /// Channels with a value column
    pub channels: Vec<u8>,
    /// Samples recorded per channel (rows not holding the sentinel)
    pub samples_per_channel: Vec<u64>,
    /// First and last `TIME` value
    pub time_range: Option<(u32, u32)>,
    /// Format version
    pub format_version: String,
    /// Whether the completion marker is present
    pub complete: bool,
}

impl ListModeReader {
    /// Scan the store once and collect summary statistics
    pub fn summary(&self) -> Result<StoreSummary, ReaderError> {
        let channels = self.channels().to_vec();
        let names: Vec<String> = channels.iter().map(|&c| channel_column_name(c)).collect();
        let mut samples = vec![0u64; channels.len()];
        let mut first: Option<u32> = None;
        let mut last: Option<u32> = None;

        for batch in self.iter_batches()? {
            let batch = batch?;
            let time = get_uint32_column(&batch, TIME)?;
            if let Some(&t) = time.values().first() {
                first.get_or_insert(t);
            }
            if let Some(&t) = time.values().last() {
                last = Some(t);
            }
            for (count, name) in samples.iter_mut().zip(&names) {
                let column = get_uint16_column(&batch, name)?;
                *count += column.values().iter().filter(|&&v| v != ABSENT_VALUE).count() as u64;
            }
        }

        Ok(StoreSummary {
            total_events: self.total_events(),
            channels,
            samples_per_channel: samples,
            time_range: first.zip(last),
            format_version: self.metadata().format_version.clone(),
            complete: self.is_complete(),
        })
    }
}

impl fmt::Display for StoreSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Format version: {}", self.format_version)?;
        writeln!(f, "Complete: {}", self.complete)?;
        writeln!(f, "Events: {}", self.total_events)?;
        if let Some((start, end)) = self.time_range {
            writeln!(f, "TIME range: {} - {} ticks", start, end)?;
        }
        for (channel, samples) in self.channels.iter().zip(&self.samples_per_channel) {
            writeln!(f, "  {}: {} samples", channel_column_name(*channel), samples)?;
        }
        Ok(())
    }
}
