use anyhow::{Context, Result};
use std::path::PathBuf;

use mpalist::convert::{ConversionConfig, ListModeConverter};
use mpalist::decoder::ChannelOrigin;
use mpalist::schema::channel_column_name;

/// Run the discovery pass only and print what it found
pub fn run(input: PathBuf, chunk_bytes: Option<usize>, channel_origin: ChannelOrigin, show_header: bool) -> Result<()> {
    let mut config = ConversionConfig {
        channel_origin,
        ..ConversionConfig::default()
    };
    if let Some(chunk_bytes) = chunk_bytes {
        config.chunk_bytes = chunk_bytes;
    }

    let exploration = ListModeConverter::with_config(config)
        .explore(&input)
        .with_context(|| format!("Failed to explore {}", input.display()))?;
    let summary = &exploration.summary;

    println!("List File Summary");
    println!("=================");
    println!("File: {}", input.display());
    println!("  File size: {} bytes", exploration.file_size);
    println!("  Body offset: {} bytes", exploration.body_offset);
    println!("  Chunks: {}", summary.chunks);
    println!();
    println!("Events: {}", summary.events);
    println!("Timer markers: {}", summary.timers);
    println!("Sync markers: {}", summary.syncs);
    println!("Channel mask: {}", summary.channel_mask);
    let columns: Vec<String> = summary
        .channels(channel_origin)
        .into_iter()
        .map(channel_column_name)
        .collect();
    println!("Channels: {}", columns.join(", "));
    println!();

    let d = &summary.diagnostics;
    println!("Diagnostics:");
    println!("  Skipped pairs: {}", d.skipped_pairs);
    println!("  Empty event headers: {}", d.empty_headers);
    println!("  Truncated events: {}", d.truncated_events);
    println!("  Trailing bytes: {}", d.trailing_bytes);

    println!();
    println!("Header sections:");
    for (name, section) in exploration.header.sections() {
        println!("  [{}] {} entries", name, section.len());
        if show_header {
            for (key, value) in section.iter() {
                println!("    {} = {}", key, value);
            }
        }
    }

    Ok(())
}
