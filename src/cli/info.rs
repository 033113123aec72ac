use anyhow::{Context, Result};
use std::path::PathBuf;

use mpalist::reader::ListModeReader;
use mpalist::schema::KEY_HEADER_PREFIX;

/// Display information about a store
pub fn run(file: PathBuf, scan: bool) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {}", file.display());
    }

    let reader = ListModeReader::open(&file).context("Failed to open store")?;
    let store = reader.metadata();
    let list = reader.list_metadata();

    println!("mpalist Store Information");
    println!("=========================");
    println!("File: {}", file.display());
    println!();

    println!("Store:");
    println!("  Format version: {}", store.format_version);
    println!("  Complete: {}", reader.is_complete());
    println!("  Events: {}", reader.total_events());
    println!("  Row groups: {}", store.num_row_groups);
    if let Some(source) = &list.source_file {
        println!("  Source: {}", source.name);
    }
    if let Some(ts) = list.conversion_timestamp {
        println!("  Converted: {}", ts.to_rfc3339());
    }
    if let Some(converter) = &list.converter_info {
        println!("  Converter: {}", converter);
    }
    println!("  Channel origin: {}", list.channel_origin);
    println!();

    if let Some(explore) = &list.explore {
        println!("Discovery pass: {}", explore);
    }
    let d = &list.diagnostics;
    println!(
        "Diagnostics: {} skipped pairs, {} empty headers, {} truncated events, {} trailing bytes",
        d.skipped_pairs, d.empty_headers, d.truncated_events, d.trailing_bytes
    );
    println!();

    println!("Schema:");
    for (i, field) in reader.schema().fields().iter().enumerate() {
        println!("  {:3}. {} ({})", i + 1, field.name(), field.data_type());
    }
    println!();

    println!("Header:");
    let mut flattened: Vec<(&String, &String)> = store
        .key_value_metadata
        .iter()
        .filter(|(k, _)| k.starts_with(KEY_HEADER_PREFIX))
        .collect();
    flattened.sort();
    for (key, value) in flattened {
        println!("  {} = {}", key, value);
    }

    if scan {
        println!();
        println!("Scan:");
        let summary = reader.summary().context("Failed to scan event columns")?;
        print!("{}", summary);
    }

    Ok(())
}
