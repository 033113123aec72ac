//! # Event Store Writer
//!
//! Writes converted events to a single Parquet file: `TIME` plus one
//! `ADC<n>` column per discovered channel, with the list-file metadata in the
//! footer.
//!
//! Columns are allocated once at full size ([`EventColumns`]) and filled chunk
//! by chunk at absolute event offsets, then handed to [`EventStoreWriter`],
//! which writes through a temporary file and renames it into place only after
//! the footer (including the `mpalist:complete` marker) is on disk.

mod columns;
mod config;
mod error;
mod stats;
mod writer;


pub use columns::EventColumns;
pub use config::{CompressionType, StoreConfig};
pub use error::StoreError;
pub use stats::StoreStats;
pub use writer::EventStoreWriter;
pub(crate) use writer::create_partial;
