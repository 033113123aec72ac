use std::fmt;

/// Statistics from a completed store write
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreStats {
    /// Number of events (rows) written
    pub events_written: u64,
    /// Number of channel columns
    pub channel_columns: usize,
    /// Number of Parquet row groups written
    pub row_groups_written: usize,
    /// Final file size in bytes
    pub file_size_bytes: u64,
}

impl fmt::Display for StoreStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Wrote {} events ({} channel columns) in {} row groups, {} bytes",
            self.events_written, self.channel_columns, self.row_groups_written, self.file_size_bytes
        )
    }
}
