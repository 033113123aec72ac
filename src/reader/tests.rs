use super::*;
use crate::convert::{ConversionConfig, ListModeConverter};
use crate::header::HeaderValue;
use crate::schema::{create_event_schema_arc, ABSENT_VALUE};
use crate::store::StoreConfig;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn write_list_file(path: &Path, body: &[u16]) -> std::io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    file.write_all(b"[MPA3A]\r\nrange=8192\r\n[ADC0]\r\nrange=4096\r\n[LISTDATA]\r\n")?;
    let bytes: Vec<u8> = body.iter().flat_map(|w| w.to_le_bytes()).collect();
    file.write_all(&bytes)
}

/// Ten events; even ones fire ADC0 and ADC2, odd ones only ADC2.
fn converted_store(dir: &Path, row_group_size: usize) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let mut body = Vec::new();
    for i in 0..10u16 {
        body.extend_from_slice(&[0x0000, 0x4000]);
        body.extend_from_slice(&[0xFFFF, 0xFFFF]);
        if i % 2 == 0 {
            body.extend_from_slice(&[0b101, 0x0000, i, 100 + i]);
        } else {
            body.extend_from_slice(&[0b100, 0x8000, 0xFFFF, 100 + i]);
        }
    }
    let input = dir.join("run.lst");
    write_list_file(&input, &body)?;

    let output = dir.join("run.parquet");
    let config = ConversionConfig {
        store_config: StoreConfig {
            row_group_size,
            ..StoreConfig::default()
        },
        prefetch: false,
        ..ConversionConfig::default()
    };
    ListModeConverter::with_config(config).convert(&input, &output)?;
    Ok(output)
}

#[test]
fn test_open_reads_metadata() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = converted_store(dir.path(), 1_000_000)?;
    let reader = ListModeReader::open(&path)?;

    assert!(reader.is_complete());
    assert_eq!(reader.total_events(), 10);
    assert_eq!(reader.channels(), &[0, 2]);
    assert_eq!(reader.metadata().format_version, crate::schema::MPALIST_FORMAT_VERSION);
    assert_eq!(reader.header().get("ADC0", "range"), Some(&HeaderValue::Int(4096)));
    assert_eq!(reader.schema().fields().len(), 3);

    let source = reader.list_metadata().source_file.as_ref().map(|s| s.name.as_str());
    assert_eq!(source, Some("run.lst"));
    Ok(())
}

#[test]
fn test_read_columns() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = converted_store(dir.path(), 3)?;
    let reader = ListModeReader::open(&path)?;
    assert_eq!(reader.metadata().num_row_groups, 4);

    let time = reader.read_time()?;
    assert_eq!(time, (1..=10).collect::<Vec<u32>>());

    let adc0 = reader.read_channel(0)?;
    assert_eq!(adc0[0], 0);
    assert_eq!(adc0[1], ABSENT_VALUE);
    assert_eq!(adc0[8], 8);

    let adc2 = reader.read_channel(2)?;
    assert_eq!(adc2, (100..110).collect::<Vec<u16>>());

    assert!(matches!(reader.read_channel(1), Err(ReaderError::ChannelNotFound(1))));
    Ok(())
}

#[test]
fn test_read_rows_window() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = converted_store(dir.path(), 4)?;
    let reader = ListModeReader::open(&path)?;

    let rows = reader.read_rows(3, 4)?;
    assert_eq!(rows.first_event, 3);
    assert_eq!(rows.len(), 4);
    assert_eq!(rows.time, vec![4, 5, 6, 7]);
    assert_eq!(rows.channel(2), Some(&[103, 104, 105, 106][..]));
    assert_eq!(rows.sample(0, 0), None);
    assert_eq!(rows.sample(1, 0), Some(4));

    assert!(reader.read_rows(10, 0)?.is_empty());
    assert!(matches!(
        reader.read_rows(8, 3),
        Err(ReaderError::OutOfRange { start: 8, len: 3, total: 10 })
    ));
    Ok(())
}

#[test]
fn test_summary() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = converted_store(dir.path(), 1_000_000)?;
    let summary = ListModeReader::open(&path)?.summary()?;

    assert_eq!(summary.total_events, 10);
    assert_eq!(summary.samples_per_channel, vec![5, 10]);
    assert_eq!(summary.time_range, Some((1, 10)));
    assert!(summary.complete);
    assert!(summary.to_string().contains("ADC2: 10 samples"));
    Ok(())
}

#[test]
fn test_incomplete_store_opens() -> Result<(), Box<dyn std::error::Error>> {
    use parquet::arrow::ArrowWriter;

    let dir = tempdir()?;
    let path = dir.path().join("partial.parquet");
    let file = std::fs::File::create(&path)?;
    let writer = ArrowWriter::try_new(file, create_event_schema_arc(&[1]), None)?;
    writer.close()?;

    let reader = ListModeReader::open(&path)?;
    assert!(!reader.is_complete());
    assert_eq!(reader.total_events(), 0);
    assert_eq!(reader.channels(), &[1]);
    assert!(reader.read_time()?.is_empty());
    Ok(())
}

#[test]
fn test_open_directory_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    assert!(matches!(
        ListModeReader::open(dir.path()),
        Err(ReaderError::InvalidFormat(_))
    ));
    Ok(())
}

#[test]
fn test_unknown_projection() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = converted_store(dir.path(), 1_000_000)?;
    let reader = ListModeReader::open(&path)?;
    assert!(matches!(
        reader.iter_columns(&["ADC7"]),
        Err(ReaderError::ColumnNotFound(_))
    ));
    let batches: Vec<_> = reader.iter_columns(&["TIME"])?.collect::<Result<_, _>>()?;
    assert!(batches.iter().all(|b| b.num_columns() == 1));
    Ok(())
}
