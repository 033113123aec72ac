//! # mpalist - MPA-3 list-mode decoding and columnar conversion
//!
//! `mpalist` reads the list-mode files written by FAST ComTec MPA-3 multi-ADC
//! acquisition systems and converts them into a columnar event table stored
//! as a single Apache Parquet file.
//!
//! A list file is an ASCII header of `[Section]` blocks and `key=value` lines,
//! terminated by a `[LISTDATA]` line, followed by a binary stream of
//! little-endian 16-bit word pairs: timer markers, sync markers, and event
//! groups carrying one value per ADC that fired.
//!
//! ## Conversion
//!
//! Conversion takes two passes over the file. The first counts events and
//! discovers which ADC channels ever fired; the second allocates every output
//! column at its final size and fills it chunk by chunk. Chunks always end
//! just before a timer marker, so no event group is ever split across chunks.
//!
//! ```rust,no_run
//! use mpalist::convert::{ConversionConfig, ListModeConverter};
//!
//! let converter = ListModeConverter::with_config(ConversionConfig::default());
//! let stats = converter.convert("run.lst", "run.parquet")?;
//! println!("{} events on channels {:?}", stats.events_written, stats.channels);
//! # Ok::<(), mpalist::convert::ConversionError>(())
//! ```
//!
//! ## Store layout
//!
//! | Column | Type | Content |
//! |--------|------|---------|
//! | `TIME` | UInt32 | Timer ticks seen before the event |
//! | `ADC<n>` | UInt16 | Value of channel n, or 65535 when it did not fire |
//!
//! The absent-value sentinel is lossy: a genuine reading of 65535 is
//! indistinguishable from "no sample". The sentinel is recorded in the footer
//! (`mpalist:sentinel`) and on every channel column's field metadata.
//!
//! The parsed header is stored in the footer both as typed JSON and as
//! flattened `header.<SECTION>.<key>` entries, so histogram tools can pick up
//! settings such as `header.ADC1.range` without parsing anything.
//!
//! ## Reading
//!
//! ```rust,no_run
//! use mpalist::reader::ListModeReader;
//!
//! let reader = ListModeReader::open("run.parquet")?;
//! assert!(reader.is_complete());
//! let time = reader.read_time()?;
//! # Ok::<(), mpalist::reader::ReaderError>(())
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod convert;
pub mod decoder;
pub mod header;
pub mod metadata;
pub mod reader;
pub mod schema;
pub mod store;
pub mod validator;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::convert::{
        default_output_path, explore_list_file, ConversionConfig, ConversionError, ConversionStats,
        ExploreSummary, ListModeConverter,
    };
    pub use crate::decoder::{ChannelMask, ChannelOrigin, DecodeDiagnostics};
    pub use crate::header::{Header, HeaderError, HeaderSection, HeaderValue};
    pub use crate::metadata::{ListFileMetadata, SourceFileInfo};
    pub use crate::reader::{EventRows, ListModeReader, ReaderConfig, ReaderError, StoreSummary};
    pub use crate::schema::{create_event_schema, ABSENT_VALUE, MPALIST_FORMAT_VERSION};
    pub use crate::store::{CompressionType, EventStoreWriter, StoreConfig, StoreStats};
    pub use crate::validator::{validate_store, ValidationReport};
}
