//! # Store Metadata
//!
//! Everything a consumer needs besides the event columns is kept in the
//! Parquet footer's key-value metadata: the parsed list-file header (as typed
//! JSON and as flattened `header.<SECTION>.<key>` strings), the discovered
//! channel list, discovery-pass counts, decoding diagnostics, and provenance.
//!
//! Histogram tools read per-channel settings such as `header.ADC1.range`
//! straight from the flattened entries.

mod error;
mod listfile;
mod source;


pub use error::MetadataError;
pub use listfile::ListFileMetadata;
pub use source::SourceFileInfo;
