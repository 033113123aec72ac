use super::*;
use crate::convert::ListModeConverter;
use crate::metadata::ListFileMetadata;
use crate::schema::{create_event_schema_arc, ABSENT_VALUE, KEY_COMPLETE};
use arrow::array::{ArrayRef, UInt16Array, UInt32Array};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::file::properties::WriterProperties;
use parquet::format::KeyValue;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::tempdir;

/// Write a store by hand so tests can produce broken ones.
fn write_store(
    path: &Path,
    listed: &[u8],
    columns: &[u8],
    time: Vec<u32>,
    values: Vec<Vec<u16>>,
    complete: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let metadata = ListFileMetadata {
        channels: listed.to_vec(),
        ..Default::default()
    };
    let mut kv: Vec<KeyValue> = metadata
        .to_parquet_metadata()?
        .into_iter()
        .map(|(key, value)| KeyValue { key, value: Some(value) })
        .collect();
    if complete {
        kv.push(KeyValue {
            key: KEY_COMPLETE.to_string(),
            value: Some("true".to_string()),
        });
    }
    let props = WriterProperties::builder().set_key_value_metadata(Some(kv)).build();

    let schema = create_event_schema_arc(columns);
    let mut arrays: Vec<ArrayRef> = vec![Arc::new(UInt32Array::from(time))];
    for column in values {
        arrays.push(Arc::new(UInt16Array::from(column)));
    }
    let batch = RecordBatch::try_new(schema.clone(), arrays)?;

    let mut writer = ArrowWriter::try_new(std::fs::File::create(path)?, schema, Some(props))?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn converted_store(dir: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let input = dir.join("run.lst");
    let mut file = std::fs::File::create(&input)?;
    file.write_all(b"[MPA3A]\r\nrange=8192\r\n[LISTDATA]\r\n")?;
    let words: [u16; 10] = [0x0000, 0x4000, 0xFFFF, 0xFFFF, 0b101, 0x0000, 100, 200, 0x0000, 0x4000];
    let bytes: Vec<u8> = words.iter().flat_map(|w| w.to_le_bytes()).collect();
    file.write_all(&bytes)?;
    drop(file);

    let output = dir.join("run.parquet");
    ListModeConverter::new().convert(&input, &output)?;
    Ok(output)
}

fn status<'a>(report: &'a ValidationReport, name: &str) -> Option<&'a CheckStatus> {
    report.check(name).map(|c| &c.status)
}

#[test]
fn test_validation_report_display() {
    let mut report = ValidationReport::new("test.parquet");
    report.add_check(ValidationCheck::ok("Test check 1"));
    report.add_check(ValidationCheck::warning("Test check 2", "This is a warning"));
    report.add_check(ValidationCheck::failed("Test check 3", "This failed"));

    let output = format!("{}", report);
    assert!(output.contains("✓"));
    assert!(output.contains("⚠"));
    assert!(output.contains("✗"));
    assert!(output.contains("1 passed, 1 warnings, 1 failed"));
    assert!(output.contains("Validation FAILED"));
}

#[test]
fn test_converted_store_passes() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = converted_store(dir.path())?;

    let report = validate_store(&path)?;
    assert!(!report.has_failures(), "{}", report);
    assert_eq!(status(&report, "Completion marker"), Some(&CheckStatus::Ok));
    assert_eq!(status(&report, "TIME non-decreasing"), Some(&CheckStatus::Ok));
    assert_eq!(status(&report, "Every event has a sample"), Some(&CheckStatus::Ok));
    assert_eq!(status(&report, "Event count matches discovery pass"), Some(&CheckStatus::Ok));
    Ok(())
}

#[test]
fn test_missing_completion_marker() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("partial.parquet");
    write_store(&path, &[0], &[0], vec![0, 1], vec![vec![5, 6]], false)?;

    let report = validate_store(&path)?;
    assert!(matches!(status(&report, "Completion marker"), Some(CheckStatus::Failed(_))));
    Ok(())
}

#[test]
fn test_column_set_mismatch() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("mismatch.parquet");
    write_store(&path, &[0, 1], &[0], vec![0], vec![vec![5]], true)?;

    let report = validate_store(&path)?;
    assert!(matches!(
        status(&report, "Columns match channel list"),
        Some(CheckStatus::Failed(_))
    ));
    assert!(report.check("TIME non-decreasing").is_none());
    Ok(())
}

#[test]
fn test_decreasing_time_and_empty_rows() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("bad.parquet");
    write_store(
        &path,
        &[0, 3],
        &[0, 3],
        vec![0, 4, 2, 5],
        vec![vec![1, ABSENT_VALUE, 3, 4], vec![ABSENT_VALUE, ABSENT_VALUE, 7, 8]],
        true,
    )?;

    let report = validate_store(&path)?;
    match status(&report, "TIME non-decreasing") {
        Some(CheckStatus::Failed(msg)) => assert!(msg.contains("at event 2")),
        other => panic!("unexpected status {:?}", other),
    }
    match status(&report, "Every event has a sample") {
        Some(CheckStatus::Failed(msg)) => assert!(msg.contains("first at event 1")),
        other => panic!("unexpected status {:?}", other),
    }
    Ok(())
}

#[test]
fn test_not_a_store() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let missing = dir.path().join("missing.parquet");
    assert!(matches!(validate_store(&missing), Err(ValidationError::StructureError(_))));

    let text = dir.path().join("notes.parquet");
    std::fs::write(&text, b"not parquet at all")?;
    assert!(matches!(validate_store(&text), Err(ValidationError::StructureError(_))));
    Ok(())
}
