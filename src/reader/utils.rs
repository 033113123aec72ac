use arrow::array::{Array, UInt16Array, UInt32Array};
use arrow::record_batch::RecordBatch;

use super::ReaderError;

/// Get a required UInt32 column by name.
pub(super) fn get_uint32_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a UInt32Array, ReaderError> {
    let array = batch
        .column_by_name(name)
        .ok_or_else(|| ReaderError::ColumnNotFound(name.to_string()))?
        .as_any()
        .downcast_ref::<UInt32Array>()
        .ok_or_else(|| ReaderError::InvalidFormat(format!("{} is not UInt32", name)))?;
    if array.null_count() > 0 {
        return Err(ReaderError::InvalidFormat(format!("{} contains nulls", name)));
    }
    Ok(array)
}

/// Get a required UInt16 column by name.
pub(super) fn get_uint16_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a UInt16Array, ReaderError> {
    let array = batch
        .column_by_name(name)
        .ok_or_else(|| ReaderError::ColumnNotFound(name.to_string()))?
        .as_any()
        .downcast_ref::<UInt16Array>()
        .ok_or_else(|| ReaderError::InvalidFormat(format!("{} is not UInt16", name)))?;
    if array.null_count() > 0 {
        return Err(ReaderError::InvalidFormat(format!("{} contains nulls", name)));
    }
    Ok(array)
}
