//! # Store Validation
//!
//! Integrity checks for converted stores, run in four steps:
//!
//! 1. **Structure**: the path is a readable Parquet file.
//! 2. **Metadata**: the footer carries the completion marker, a parseable
//!    channel list, the absent-value sentinel, and the list-file header.
//! 3. **Schema**: columns are exactly `TIME` plus one `ADC<n>` per listed
//!    channel, with the expected types.
//! 4. **Data**: all columns have equal length, `TIME` never decreases, every
//!    row holds at least one sample, and the row count agrees with the
//!    discovery pass.
//!
//! ```rust,no_run
//! use mpalist::validator::validate_store;
//! use std::path::Path;
//!
//! match validate_store(Path::new("run.parquet")) {
//!     Ok(report) => println!("{}", report),
//!     Err(e) => eprintln!("Validation failed: {}", e),
//! }
//! ```

use std::path::Path;

pub use report::{CheckStatus, ValidationCheck, ValidationReport};

mod data;
mod metadata;
mod report;
mod schema;
mod structure;

#[cfg(test)]
mod tests;

/// Errors that stop validation before all checks ran
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// The path is not a readable store
    #[error("Structure error: {0}")]
    StructureError(String),

    /// I/O error during file operations
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from the Parquet library
    #[error("Parquet error: {0}")]
    ParquetError(#[from] parquet::errors::ParquetError),

    /// Error while streaming the event columns
    #[error("Reader error: {0}")]
    ReaderError(#[from] crate::reader::ReaderError),
}

/// Validate a store and collect the results of every check.
///
/// Returns `Err` only when the file cannot be read at all; failed checks are
/// reported in the [`ValidationReport`].
pub fn validate_store(path: &Path) -> Result<ValidationReport, ValidationError> {
    let mut report = ValidationReport::new(path.display().to_string());

    let parquet = structure::check_structure(path, &mut report)?;

    let Some(metadata) = metadata::check_metadata_integrity(&parquet, &mut report) else {
        return Ok(report);
    };

    let schema_ok = schema::check_schema_contract(&parquet, &metadata.channels, &mut report)?;
    if schema_ok {
        data::check_data_sanity(path, &parquet, &metadata, &mut report)?;
    }

    Ok(report)
}
