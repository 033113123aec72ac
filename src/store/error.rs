/// Errors that can occur while building or writing a store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// I/O error during file operations
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from the Arrow library during array operations
    #[error("Arrow error: {0}")]
    ArrowError(#[from] arrow::error::ArrowError),

    /// Error from the Parquet library during file writing
    #[error("Parquet error: {0}")]
    ParquetError(#[from] parquet::errors::ParquetError),

    /// Error processing metadata
    #[error("Metadata error: {0}")]
    MetadataError(#[from] crate::metadata::MetadataError),

    /// A chunk write would land outside the allocated columns
    #[error("Write of {rows} rows at event {first_row} exceeds allocated {capacity} events")]
    OutOfBounds {
        /// First row of the write
        first_row: u64,
        /// Rows in the write
        rows: usize,
        /// Allocated rows
        capacity: usize,
    },

    /// Invalid data provided to the store
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// The output already exists and overwriting was not allowed
    #[error("Output already exists: {0}")]
    OutputExists(String),
}
