use parquet::file::metadata::ParquetMetaData;

use crate::schema::{parse_channel_column, validate_schema, ABSENT_VALUE, FIELD_META_SENTINEL};

use super::{ValidationCheck, ValidationError, ValidationReport};

/// Step 3: the column set matches the channel list.
///
/// Returns whether the columns are usable for the data checks.
pub(crate) fn check_schema_contract(
    parquet: &ParquetMetaData,
    channels: &[u8],
    report: &mut ValidationReport,
) -> Result<bool, ValidationError> {
    let file_metadata = parquet.file_metadata();
    let schema = parquet::arrow::parquet_to_arrow_schema(
        file_metadata.schema_descr(),
        file_metadata.key_value_metadata(),
    )?;

    if let Err(e) = validate_schema(&schema, channels) {
        report.add_check(ValidationCheck::failed("Columns match channel list", e.to_string()));
        return Ok(false);
    }
    report.add_check(ValidationCheck::ok(format!(
        "Columns match channel list ({} channel columns)",
        channels.len()
    )));

    let sentinel = ABSENT_VALUE.to_string();
    let undocumented: Vec<&str> = schema
        .fields()
        .iter()
        .filter(|f| parse_channel_column(f.name()).is_some())
        .filter(|f| f.metadata().get(FIELD_META_SENTINEL) != Some(&sentinel))
        .map(|f| f.name().as_str())
        .collect();
    if undocumented.is_empty() {
        report.add_check(ValidationCheck::ok("Column sentinel metadata"));
    } else {
        report.add_check(ValidationCheck::warning(
            "Column sentinel metadata",
            format!("No sentinel field metadata on {}", undocumented.join(", ")),
        ));
    }

    Ok(true)
}
