/// Errors that can occur during reading
#[derive(Debug, thiserror::Error)]
pub enum ReaderError {
    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Arrow error
    #[error("Arrow error: {0}")]
    ArrowError(#[from] arrow::error::ArrowError),

    /// Parquet error
    #[error("Parquet error: {0}")]
    ParquetError(#[from] parquet::errors::ParquetError),

    /// Footer metadata could not be parsed
    #[error("Metadata error: {0}")]
    MetadataError(#[from] crate::metadata::MetadataError),

    /// Invalid file format
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Column not found
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// The store has no column for this channel
    #[error("Channel {0} not present in store")]
    ChannelNotFound(u8),

    /// Requested rows extend past the last event
    #[error("Rows {start}..{start}+{len} out of range for {total} events")]
    OutOfRange {
        /// First requested row
        start: u64,
        /// Requested row count
        len: usize,
        /// Events in the store
        total: u64,
    },
}
