use arrow::datatypes::{DataType, Schema};

use super::columns;

/// Validates that a schema matches the event table layout for `channels`.
///
/// The schema must hold exactly `TIME` (UInt32) followed by `ADC<n>` (UInt16)
/// for each channel, in order.
pub fn validate_schema(schema: &Schema, channels: &[u8]) -> Result<(), SchemaValidationError> {
    let mut expected = Vec::with_capacity(channels.len() + 1);
    expected.push((columns::TIME.to_string(), DataType::UInt32));
    for &channel in channels {
        expected.push((columns::channel_column_name(channel), DataType::UInt16));
    }

    for (name, expected_type) in &expected {
        match schema.field_with_name(name) {
            Ok(field) => {
                if field.data_type() != expected_type {
                    return Err(SchemaValidationError::TypeMismatch {
                        column: name.clone(),
                        expected: format!("{:?}", expected_type),
                        found: format!("{:?}", field.data_type()),
                    });
                }
            }
            Err(_) => {
                return Err(SchemaValidationError::MissingColumn(name.clone()));
            }
        }
    }

    for (idx, field) in schema.fields().iter().enumerate() {
        match expected.get(idx) {
            Some((name, _)) if name == field.name() => {}
            Some(_) => {
                return Err(SchemaValidationError::ColumnOrder {
                    column: field.name().clone(),
                    position: idx,
                })
            }
            None => return Err(SchemaValidationError::UnexpectedColumn(field.name().clone())),
        }
    }

    Ok(())
}

/// Errors that can occur during schema validation
#[derive(Debug, thiserror::Error)]
pub enum SchemaValidationError {
    /// A required column is missing from the schema
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// A column not backed by a discovered channel
    #[error("Unexpected column: {0}")]
    UnexpectedColumn(String),

    /// Columns present but out of order
    #[error("Column '{column}' found at position {position} out of order")]
    ColumnOrder {
        /// Name of the misplaced column
        column: String,
        /// Position where it was found
        position: usize,
    },

    /// A column has an incorrect data type
    #[error("Type mismatch for column '{column}': expected {expected}, found {found}")]
    TypeMismatch {
        /// Name of the column with the type mismatch
        column: String,
        /// Expected data type
        expected: String,
        /// Actual data type found
        found: String,
    },
}
