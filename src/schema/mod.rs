//! # mpalist Schema Definition
//!
//! This module defines the Apache Arrow schema for converted list-mode stores.
//!
//! Each row is one event. Columns:
//!
//! | Column | Type | Description |
//! |--------|------|-------------|
//! | TIME | UInt32 | Timer ticks elapsed before the event (non-decreasing) |
//! | ADC\<n\> | UInt16 | Value of ADC channel n, or 65535 when the channel did not fire |
//!
//! Only channels that fired at least once in the file get a column, in
//! increasing channel order. The row index is the global event id.
//!
//! The list-file header and conversion provenance live in the Parquet footer's
//! key-value metadata under the `mpalist:` and `header.` keys.

mod builders;
/// Event table column names.
pub mod columns;
mod constants;
mod validation;


pub use builders::{create_event_schema, create_event_schema_arc};
pub use columns::*;
pub use constants::*;
pub use validation::{validate_schema, SchemaValidationError};
