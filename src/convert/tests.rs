use super::*;
use crate::decoder::{decode_chunk, pairs_from_bytes, ChannelMask, ChannelOrigin, ChunkCounts};
use crate::schema::ABSENT_VALUE;
use std::io::Write;
use tempfile::TempDir;

fn words_to_bytes(words: &[u16]) -> Vec<u8> {
    words.iter().flat_map(|w| w.to_le_bytes()).collect()
}

fn list_file(dir: &TempDir, name: &str, body: &[u16]) -> std::io::Result<PathBuf> {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path)?;
    file.write_all(b"[MPA3A]\r\nrange=8192\r\n[ADC1]\r\nrange=4096\r\n[LISTDATA]\r\n")?;
    file.write_all(&words_to_bytes(body))?;
    Ok(path)
}

const SYNC: [u16; 2] = [0xFFFF, 0xFFFF];
const TIMER: [u16; 2] = [0x0000, 0x4000];

fn sequential(config: ConversionConfig) -> ListModeConverter {
    ListModeConverter::with_config(ConversionConfig {
        prefetch: false,
        ..config
    })
}

#[test]
fn test_cursor_advance() -> Result<(), ConversionError> {
    let mut cursor = StreamCursor::new();
    let counts = ChunkCounts {
        timers: 3,
        events: 5,
        ..Default::default()
    };
    cursor.advance(&counts)?;
    cursor.advance(&counts)?;
    assert_eq!(cursor.event_base, 10);
    assert_eq!(cursor.timer_base, 6);
    assert_eq!(cursor.global_event(2), 12);
    assert_eq!(cursor.global_tick(1)?, 7);
    Ok(())
}

#[test]
fn test_cursor_timer_overflow() {
    let cursor = StreamCursor {
        event_base: 0,
        timer_base: u32::MAX - 1,
    };
    assert!(matches!(
        cursor.global_tick(2),
        Err(ConversionError::TimerOverflow { ticks: 2, .. })
    ));
}

#[test]
fn test_channel_layout() {
    let layout = ChannelLayout::from_mask(ChannelMask(0b1010_0001), ChannelOrigin::One);
    assert_eq!(layout.channels(), &[1, 6, 8]);
    assert_eq!(layout.column(6), Some(1));
    assert_eq!(layout.column(2), None);
    assert_eq!(layout.column(200), None);
    assert_eq!(layout.len(), 3);
}

#[test]
fn test_assemble_rows() -> Result<(), ConversionError> {
    let mut words = Vec::new();
    words.extend_from_slice(&TIMER);
    words.extend_from_slice(&SYNC);
    words.extend_from_slice(&[0b101, 0x0000, 100, 200]);
    words.extend_from_slice(&[0b100, 0x8000, 0xFFFF, 300]);
    let decoded = decode_chunk(&pairs_from_bytes(&words_to_bytes(&words)), ChannelOrigin::Zero);

    let cursor = StreamCursor {
        event_base: 10,
        timer_base: 4,
    };
    let layout = ChannelLayout::from_channels(&[0, 2]);
    let rows = assemble(&decoded, &cursor, &layout)?;

    assert_eq!(rows.first_event, 10);
    assert_eq!(rows.rows(), 2);
    assert_eq!(rows.time, vec![5, 5]);
    assert_eq!(rows.values[0], vec![100, ABSENT_VALUE]);
    assert_eq!(rows.values[1], vec![200, 300]);
    Ok(())
}

#[test]
fn test_assemble_unknown_channel() {
    let mut words = Vec::new();
    words.extend_from_slice(&SYNC);
    words.extend_from_slice(&[0b10, 0x8000, 0xFFFF, 1]);
    let decoded = decode_chunk(&pairs_from_bytes(&words_to_bytes(&words)), ChannelOrigin::Zero);

    let layout = ChannelLayout::from_channels(&[0]);
    let result = assemble(&decoded, &StreamCursor::new(), &layout);
    assert!(matches!(
        result,
        Err(ConversionError::UnknownChannel { channel: 1, event: 0 })
    ));
}

#[test]
fn test_explore_counts() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let mut body = Vec::new();
    body.extend_from_slice(&TIMER);
    body.extend_from_slice(&SYNC);
    body.extend_from_slice(&[0b101, 0x0000, 100, 200]);
    body.extend_from_slice(&TIMER);
    body.extend_from_slice(&[0x1234, 0x0001]);
    body.extend_from_slice(&SYNC);
    body.extend_from_slice(&[0b1000, 0x8000, 0xFFFF, 7]);
    let path = list_file(&dir, "run.lst", &body)?;

    let exploration = sequential(ConversionConfig::default()).explore(&path)?;
    let summary = exploration.summary;
    assert_eq!(summary.events, 2);
    assert_eq!(summary.timers, 2);
    assert_eq!(summary.syncs, 2);
    assert_eq!(summary.channel_mask, ChannelMask(0b1101));
    assert_eq!(summary.diagnostics.skipped_pairs, 1);
    assert_eq!(summary.body_bytes, body.len() as u64 * 2);
    assert_eq!(summary.channels(ChannelOrigin::Zero), vec![0, 2, 3]);
    assert_eq!(exploration.header.len(), 2);
    Ok(())
}

#[test]
fn test_materialize_fills_columns() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let mut body = Vec::new();
    for i in 0..10u16 {
        body.extend_from_slice(&TIMER);
        body.extend_from_slice(&SYNC);
        body.extend_from_slice(&[0b11, 0x0000, i, 1000 + i]);
    }
    let path = list_file(&dir, "run.lst", &body)?;

    let converter = sequential(ConversionConfig {
        chunk_bytes: 16,
        ..ConversionConfig::default()
    });
    let exploration = converter.explore(&path)?;
    let materialized = converter.materialize(&path, &exploration)?;
    let columns = materialized.columns;

    assert_eq!(columns.time(), (1..=10).collect::<Vec<u32>>().as_slice());
    assert_eq!(columns.channel(0), Some((0..10).collect::<Vec<u16>>().as_slice()));
    assert_eq!(columns.channel(1), Some((1000..1010).collect::<Vec<u16>>().as_slice()));
    assert!(materialized.diagnostics.is_clean());
    Ok(())
}

#[test]
fn test_materialize_detects_mismatch() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let mut body = Vec::new();
    body.extend_from_slice(&SYNC);
    body.extend_from_slice(&[0b1, 0x8000, 0xFFFF, 5]);
    let path = list_file(&dir, "run.lst", &body)?;

    let converter = sequential(ConversionConfig::default());
    let mut exploration = converter.explore(&path)?;
    exploration.summary.events = 2;

    let result = converter.materialize(&path, &exploration);
    assert!(matches!(
        result,
        Err(ConversionError::EventCountMismatch {
            explored_events: 2,
            converted_events: 1,
            ..
        })
    ));
    Ok(())
}

#[test]
fn test_materialize_rejects_surplus_events_before_writing() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let mut body = Vec::new();
    body.extend_from_slice(&SYNC);
    for value in [5, 6, 7] {
        body.extend_from_slice(&[0b1, 0x8000, 0xFFFF, value]);
    }
    let path = list_file(&dir, "run.lst", &body)?;

    let converter = sequential(ConversionConfig::default());
    let mut exploration = converter.explore(&path)?;
    exploration.summary.events = 1;

    let result = converter.materialize(&path, &exploration);
    assert!(matches!(
        result,
        Err(ConversionError::EventCountMismatch {
            explored_events: 1,
            converted_events: 3,
            ..
        })
    ));
    Ok(())
}

#[test]
fn test_timer_valued_sample_survives_small_chunks() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let mut body = Vec::new();
    body.extend_from_slice(&SYNC);
    body.extend_from_slice(&[0b11, 0x0000, 100, 0x4000]);
    body.extend_from_slice(&[0b1, 0x8000, 0xFFFF, 7]);
    body.extend_from_slice(&TIMER);
    body.extend_from_slice(&SYNC);
    body.extend_from_slice(&[0b10, 0x8000, 0xFFFF, 0x4000]);
    let path = list_file(&dir, "run.lst", &body)?;

    let mut outputs = Vec::new();
    for chunk_bytes in [8, 4096] {
        let converter = sequential(ConversionConfig {
            chunk_bytes,
            ..ConversionConfig::default()
        });
        let exploration = converter.explore(&path)?;
        assert_eq!(exploration.summary.events, 3);
        assert_eq!(exploration.summary.timers, 1);
        assert!(exploration.summary.diagnostics.is_clean());
        outputs.push(converter.materialize(&path, &exploration)?);
    }

    let columns = &outputs[0].columns;
    assert_eq!(columns.time(), &[0, 0, 1]);
    assert_eq!(columns.channel(0), Some(&[100, 7, ABSENT_VALUE][..]));
    assert_eq!(columns.channel(1), Some(&[0x4000, ABSENT_VALUE, 0x4000][..]));
    assert_eq!(outputs[0], outputs[1]);
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_unwritable_output_directory_is_usage_error() -> Result<(), Box<dyn std::error::Error>> {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir()?;
    let input = list_file(&dir, "run.lst", &SYNC)?;
    let locked = dir.path().join("locked");
    std::fs::create_dir(&locked)?;
    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o555))?;

    // Privileged users can still write; nothing to check then.
    let writable = tempfile::tempfile_in(&locked).is_ok();
    let result = ListModeConverter::new().convert(&input, locked.join("out.parquet"));
    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755))?;
    if writable {
        return Ok(());
    }

    assert!(matches!(result, Err(ConversionError::UsageError(_))));
    assert_eq!(std::fs::read_dir(&locked)?.count(), 0);
    Ok(())
}

#[test]
fn test_convert_usage_errors() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let converter = ListModeConverter::new();

    let missing = dir.path().join("missing.lst");
    let result = converter.convert(&missing, dir.path().join("out.parquet"));
    assert!(matches!(result, Err(ConversionError::UsageError(_))));

    let input = list_file(&dir, "run.lst", &SYNC)?;
    let existing = dir.path().join("existing.parquet");
    std::fs::write(&existing, b"x")?;
    let result = converter.convert(&input, &existing);
    assert!(matches!(result, Err(ConversionError::UsageError(_))));
    assert_eq!(std::fs::read(&existing)?, b"x");

    let result = converter.convert(&input, dir.path().join("no_such_dir").join("out.parquet"));
    assert!(matches!(result, Err(ConversionError::UsageError(_))));

    let result = converter.convert(&input, &input);
    assert!(matches!(result, Err(ConversionError::UsageError(_))));
    Ok(())
}

#[test]
fn test_missing_sentinel_is_header_error() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("broken.lst");
    std::fs::write(&path, b"[MPA3A]\r\nrange=8192\r\n")?;

    let result = ListModeConverter::new().convert(&path, dir.path().join("out.parquet"));
    assert!(matches!(result, Err(ConversionError::HeaderError(_))));
    assert!(!dir.path().join("out.parquet").exists());
    Ok(())
}

#[test]
fn test_convert_writes_store() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let mut body = Vec::new();
    body.extend_from_slice(&SYNC);
    body.extend_from_slice(&[0b101, 0x0000, 100, 200]);
    let input = list_file(&dir, "run.lst", &body)?;
    let output = default_output_path(&input);
    assert_eq!(output, dir.path().join("run.parquet"));

    let stats = ListModeConverter::new().convert(&input, &output)?;
    assert_eq!(stats.events_written, 1);
    assert_eq!(stats.channels, vec![0, 2]);
    assert_eq!(stats.explore.events, 1);
    assert!(stats.output_file_size > 0);
    assert!(output.exists());
    Ok(())
}

#[test]
fn test_config_presets() {
    let fast = ConversionConfig::fast_write();
    assert_eq!(fast.chunk_bytes, ConversionConfig::default().chunk_bytes);
    assert_ne!(fast.store_config, ConversionConfig::max_compression().store_config);
    assert_eq!(ConversionConfig::balanced(), ConversionConfig::default());
    assert_eq!(ConversionConfig::default().chunk_bytes, 50_000_000);
}
