//! Integration tests for mpalist
//!
//! These tests run the full pipeline: synthetic list file, conversion, and
//! reading the store back.

use mpalist::convert::{ConversionConfig, ConversionError, ListModeConverter};
use mpalist::decoder::ChannelOrigin;
use mpalist::header::HeaderValue;
use mpalist::reader::ListModeReader;
use mpalist::schema::ABSENT_VALUE;
use mpalist::validator::validate_store;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

const HEADER: &str = "[MPA3A] 2021\r\nrange=8192\r\ncmline0=list mode\r\n[ADC1]\r\nrange=4096\r\nactive=1\r\n[ADC3]\r\nrange=1024\r\n[LISTDATA]\r\n";

const TIMER: [u16; 2] = [0x0000, 0x4000];
const SYNC: [u16; 2] = [0xFFFF, 0xFFFF];

fn write_list_file(dir: &Path, name: &str, body: &[u16]) -> PathBuf {
    let path = dir.join(name);
    let mut bytes = HEADER.as_bytes().to_vec();
    bytes.extend(body.iter().flat_map(|w| w.to_le_bytes()));
    fs::write(&path, bytes).unwrap();
    path
}

fn sequential() -> ConversionConfig {
    ConversionConfig {
        prefetch: false,
        ..ConversionConfig::default()
    }
}

/// One sync, one event with mask 0b101 and values (100, 200).
#[test]
fn test_single_event() {
    let dir = tempdir().unwrap();
    let mut body = Vec::new();
    body.extend_from_slice(&SYNC);
    body.extend_from_slice(&[0x0005, 0x0000, 100, 200]);
    let input = write_list_file(dir.path(), "single.lst", &body);
    let output = dir.path().join("single.parquet");

    let stats = ListModeConverter::new().convert(&input, &output).unwrap();
    assert_eq!(stats.events_written, 1);
    assert_eq!(stats.channels, vec![0, 2]);

    let reader = ListModeReader::open(&output).unwrap();
    assert_eq!(reader.read_time().unwrap(), vec![0]);
    assert_eq!(reader.read_channel(0).unwrap(), vec![100]);
    assert_eq!(reader.read_channel(2).unwrap(), vec![200]);
    assert!(reader.read_channel(1).is_err());
}

#[test]
fn test_timer_before_sync() {
    let dir = tempdir().unwrap();
    let mut body = Vec::new();
    body.extend_from_slice(&TIMER);
    body.extend_from_slice(&SYNC);
    body.extend_from_slice(&[0x0005, 0x0000, 100, 200]);
    let input = write_list_file(dir.path(), "timer.lst", &body);
    let output = dir.path().join("timer.parquet");

    ListModeConverter::with_config(sequential())
        .convert(&input, &output)
        .unwrap();

    let reader = ListModeReader::open(&output).unwrap();
    assert_eq!(reader.read_time().unwrap(), vec![1]);
}

#[test]
fn test_stray_pair_between_groups() {
    let dir = tempdir().unwrap();
    let group = [0x0001, 0x8000, 0xFFFF, 42];

    let mut clean = Vec::new();
    clean.extend_from_slice(&SYNC);
    clean.extend_from_slice(&group);
    clean.extend_from_slice(&TIMER);
    clean.extend_from_slice(&SYNC);
    clean.extend_from_slice(&group);

    let mut stray = Vec::new();
    stray.extend_from_slice(&SYNC);
    stray.extend_from_slice(&group);
    stray.extend_from_slice(&TIMER);
    stray.extend_from_slice(&[0x0BAD, 0x0001]);
    stray.extend_from_slice(&SYNC);
    stray.extend_from_slice(&group);

    let converter = ListModeConverter::with_config(sequential());
    let clean_stats = converter
        .convert(
            write_list_file(dir.path(), "clean.lst", &clean),
            dir.path().join("clean.parquet"),
        )
        .unwrap();
    let stray_stats = converter
        .convert(
            write_list_file(dir.path(), "stray.lst", &stray),
            dir.path().join("stray.parquet"),
        )
        .unwrap();

    assert_eq!(clean_stats.events_written, 2);
    assert_eq!(stray_stats.events_written, 2);
    assert_eq!(clean_stats.diagnostics.skipped_pairs, 0);
    assert_eq!(stray_stats.diagnostics.skipped_pairs, 1);

    let reader = ListModeReader::open(dir.path().join("stray.parquet")).unwrap();
    assert_eq!(reader.list_metadata().diagnostics.skipped_pairs, 1);
    assert_eq!(reader.read_time().unwrap(), vec![0, 1]);
}

#[test]
fn test_sentinel_only_where_channel_absent() {
    let dir = tempdir().unwrap();
    let mut body = Vec::new();
    let masks: [u16; 4] = [0b0011, 0b0100, 0b0110, 0b0001];
    for (i, &mask) in masks.iter().enumerate() {
        body.extend_from_slice(&TIMER);
        body.extend_from_slice(&SYNC);
        let n = mask.count_ones() as u16;
        let dummy = n % 2 == 1;
        body.extend_from_slice(&[mask, if dummy { 0x8000 } else { 0 }]);
        if dummy {
            body.push(0xFFFF);
        }
        for v in 0..n {
            body.push(10 * i as u16 + v);
        }
    }
    let input = write_list_file(dir.path(), "mixed.lst", &body);
    let output = dir.path().join("mixed.parquet");
    ListModeConverter::new().convert(&input, &output).unwrap();

    let reader = ListModeReader::open(&output).unwrap();
    assert_eq!(reader.channels(), &[0, 1, 2]);
    for (bit, channel) in [(0u16, 0u8), (1, 1), (2, 2)] {
        let values = reader.read_channel(channel).unwrap();
        for (row, &mask) in masks.iter().enumerate() {
            let fired = mask & (1 << bit) != 0;
            assert_eq!(values[row] != ABSENT_VALUE, fired, "row {} channel {}", row, channel);
        }
    }
    assert_eq!(reader.read_time().unwrap(), vec![1, 2, 3, 4]);
}

#[test]
fn test_channel_origin_one() {
    let dir = tempdir().unwrap();
    let mut body = Vec::new();
    body.extend_from_slice(&SYNC);
    body.extend_from_slice(&[0x0005, 0x0000, 100, 200]);
    let input = write_list_file(dir.path(), "origin.lst", &body);
    let output = dir.path().join("origin.parquet");

    let config = ConversionConfig {
        channel_origin: ChannelOrigin::One,
        ..sequential()
    };
    ListModeConverter::with_config(config).convert(&input, &output).unwrap();

    let reader = ListModeReader::open(&output).unwrap();
    assert_eq!(reader.channels(), &[1, 3]);
    assert_eq!(reader.list_metadata().channel_origin, ChannelOrigin::One);
    assert_eq!(reader.read_channel(1).unwrap(), vec![100]);

    // ADC1 and ADC3 sections line up with the columns under this numbering
    let adc3 = reader.list_metadata().channel_config(3).unwrap();
    assert_eq!(adc3.get("range"), Some(&HeaderValue::Int(1024)));
}

#[test]
fn test_header_metadata_passthrough() {
    let dir = tempdir().unwrap();
    let input = write_list_file(dir.path(), "header.lst", &SYNC);
    let output = dir.path().join("header.parquet");
    ListModeConverter::new().convert(&input, &output).unwrap();

    let reader = ListModeReader::open(&output).unwrap();
    let kv = &reader.metadata().key_value_metadata;
    assert_eq!(kv.get("header.ADC1.range").map(String::as_str), Some("4096"));
    assert_eq!(kv.get("header.ADC3.range").map(String::as_str), Some("1024"));
    assert_eq!(kv.get("header.MPA3A.cmline0").map(String::as_str), Some("list mode"));

    let header = reader.header();
    assert_eq!(header.get("MPA3A", "range"), Some(&HeaderValue::Int(8192)));
    assert_eq!(header.get("MPA3A", "SECTIONHEADER"), Some(&HeaderValue::Str("2021".to_string())));
    let names: Vec<&str> = header.sections().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["MPA3A", "ADC1", "ADC3"]);

    assert_eq!(reader.total_events(), 0);
    assert!(reader.channels().is_empty());
    assert!(reader.is_complete());
}

#[test]
fn test_rtc_events() {
    let dir = tempdir().unwrap();
    let mut body = Vec::new();
    body.extend_from_slice(&SYNC);
    // rtc + one value: 3 + 1 words, no padding
    body.extend_from_slice(&[0x0002, 0x1000, 0x0001, 0x0002, 0x0003, 77]);
    // rtc + two values: 3 + 2 words, padded
    body.extend_from_slice(&[0x0003, 0x9000, 0xFFFF, 0x0001, 0x0002, 0x0003, 5, 6]);
    let input = write_list_file(dir.path(), "rtc.lst", &body);
    let output = dir.path().join("rtc.parquet");
    ListModeConverter::new().convert(&input, &output).unwrap();

    let reader = ListModeReader::open(&output).unwrap();
    assert_eq!(reader.read_channel(1).unwrap(), vec![77, 6]);
    assert_eq!(reader.read_channel(0).unwrap(), vec![ABSENT_VALUE, 5]);
}

#[test]
fn test_existing_output_requires_overwrite() {
    let dir = tempdir().unwrap();
    let mut body = Vec::new();
    body.extend_from_slice(&SYNC);
    body.extend_from_slice(&[0x0001, 0x8000, 0xFFFF, 9]);
    let input = write_list_file(dir.path(), "run.lst", &body);
    let output = dir.path().join("run.parquet");
    fs::write(&output, b"previous").unwrap();

    let result = ListModeConverter::new().convert(&input, &output);
    assert!(matches!(result, Err(ConversionError::UsageError(_))));
    assert_eq!(fs::read(&output).unwrap(), b"previous");

    let config = ConversionConfig {
        overwrite: true,
        ..ConversionConfig::default()
    };
    ListModeConverter::with_config(config).convert(&input, &output).unwrap();
    assert_eq!(ListModeReader::open(&output).unwrap().total_events(), 1);
}

#[test]
fn test_failed_conversion_leaves_no_output() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("no_sentinel.lst");
    fs::write(&input, b"[MPA3A]\r\nrange=8192\r\n").unwrap();
    let output = dir.path().join("no_sentinel.parquet");

    let result = ListModeConverter::new().convert(&input, &output);
    assert!(matches!(result, Err(ConversionError::HeaderError(_))));
    assert!(!output.exists());

    let leftovers: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".partial"))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn test_prefetch_matches_sequential() {
    let dir = tempdir().unwrap();
    let mut body = Vec::new();
    for i in 0..200u16 {
        body.extend_from_slice(&TIMER);
        body.extend_from_slice(&SYNC);
        body.extend_from_slice(&[0b11, 0x0000, i, i + 1]);
        body.extend_from_slice(&[0b100, 0x8000, 0xFFFF, i + 2]);
    }
    let input = write_list_file(dir.path(), "long.lst", &body);

    let prefetched = ConversionConfig {
        chunk_bytes: 64,
        prefetch: true,
        ..ConversionConfig::default()
    };
    let sequential = ConversionConfig {
        chunk_bytes: 64,
        prefetch: false,
        ..ConversionConfig::default()
    };
    ListModeConverter::with_config(prefetched)
        .convert(&input, dir.path().join("a.parquet"))
        .unwrap();
    ListModeConverter::with_config(sequential)
        .convert(&input, dir.path().join("b.parquet"))
        .unwrap();

    let a = ListModeReader::open(dir.path().join("a.parquet")).unwrap();
    let b = ListModeReader::open(dir.path().join("b.parquet")).unwrap();
    assert_eq!(a.total_events(), 400);
    assert_eq!(a.read_time().unwrap(), b.read_time().unwrap());
    for channel in [0, 1, 2] {
        assert_eq!(a.read_channel(channel).unwrap(), b.read_channel(channel).unwrap());
    }
}

#[test]
fn test_converted_store_validates() {
    let dir = tempdir().unwrap();
    let mut body = Vec::new();
    body.extend_from_slice(&TIMER);
    body.extend_from_slice(&SYNC);
    body.extend_from_slice(&[0x0005, 0x0000, 100, 200]);
    let input = write_list_file(dir.path(), "valid.lst", &body);
    let output = dir.path().join("valid.parquet");
    ListModeConverter::new().convert(&input, &output).unwrap();

    let report = validate_store(&output).unwrap();
    assert!(!report.has_failures(), "{}", report);
}
