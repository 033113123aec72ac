//! # Store Reader
//!
//! Reads converted list-mode stores: footer metadata (the parsed list-file
//! header, channel list, completion marker) and the event columns.
//!
//! ## Example
//!
//! ```rust,no_run
//! use mpalist::reader::ListModeReader;
//!
//! let reader = ListModeReader::open("run.parquet")?;
//! println!("Channels: {:?}", reader.channels());
//!
//! let time = reader.read_time()?;
//! if let Some(&first) = reader.channels().first() {
//!     let values = reader.read_channel(first)?;
//!     println!("{} events, first channel has {} values", time.len(), values.len());
//! }
//!
//! // Histogram range of ADC1 as recorded in the list-file header
//! if let Some(range) = reader.header().get("ADC1", "range") {
//!     println!("ADC1 range: {}", range);
//! }
//! # Ok::<(), mpalist::reader::ReaderError>(())
//! ```

mod batches;
mod columns;
mod config;
mod error;
mod metadata;
mod open;
mod summary;
mod utils;

#[cfg(test)]
mod tests;

use std::path::PathBuf;

pub use batches::RecordBatchIterator;
pub use columns::EventRows;
pub use config::ReaderConfig;
pub use error::ReaderError;
pub use metadata::StoreMetadata;
pub use summary::StoreSummary;

/// Reader for single-file event stores
pub struct ListModeReader {
    path: PathBuf,
    config: ReaderConfig,
    store_metadata: StoreMetadata,
}
