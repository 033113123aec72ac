//! TOML configuration file support.
//!
//! Settings that would otherwise need several flags can live in a file:
//!
//! ```toml
//! # mpalist.toml
//! [conversion]
//! chunk_bytes = 100000000
//! channel_origin = "one"
//! compression_level = 9
//! row_group_size = 2000000
//! prefetch = true
//! prefetch_depth = 4
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use mpalist::decoder::ChannelOrigin;

/// Root configuration structure for mpalist.toml files.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Conversion-specific settings.
    #[serde(default)]
    pub conversion: ConversionSettings,
}

/// Settings for the convert command.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConversionSettings {
    /// Bytes read per chunk.
    pub chunk_bytes: Option<usize>,

    /// Channel numbering of mask bits.
    pub channel_origin: Option<ChannelOrigin>,

    /// ZSTD compression level (1-22).
    pub compression_level: Option<i32>,

    /// Events per Parquet row group.
    pub row_group_size: Option<usize>,

    /// Read chunks on a background thread.
    pub prefetch: Option<bool>,

    /// Chunks buffered ahead of the decoder.
    pub prefetch_depth: Option<usize>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }
}
