use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use mpalist::convert::{default_output_path, ConversionConfig, ListModeConverter};
use mpalist::store::CompressionType;

use super::config::{Config, ConversionSettings};
use super::{ConvertOverrides, Profile};

/// Convert a list file to a Parquet event store
pub fn run(
    input: PathBuf,
    output: Option<PathBuf>,
    force: bool,
    profile: Profile,
    config_path: Option<PathBuf>,
    overrides: ConvertOverrides,
) -> Result<()> {
    let file_settings = match config_path {
        Some(path) => Some(Config::from_file(&path)?.conversion),
        None => None,
    };
    let config = build_config(profile, file_settings.as_ref(), &overrides, force)?;

    let output = output.unwrap_or_else(|| default_output_path(&input));

    info!("mpalist Converter - MPA-3 list file to Parquet");
    info!("==============================================");
    info!("Input:  {}", input.display());
    info!("Output: {}", output.display());
    info!("Profile: {}", profile);
    info!("Chunk size: {} bytes", config.chunk_bytes);
    info!("Channel origin: {}", config.channel_origin);
    info!("Compression: {:?}", config.store_config.compression);
    info!("Row group size: {}", config.store_config.row_group_size);

    let converter = ListModeConverter::with_config(config);
    let stats = converter
        .convert(&input, &output)
        .with_context(|| format!("Conversion of {} failed", input.display()))?;

    info!("Conversion complete!");
    info!("  Events: {}", stats.events_written);
    info!("  Channels: {:?}", stats.channels);
    info!("  Row groups: {}", stats.row_groups_written);
    info!(
        "  Output file size: {} bytes ({:.2} MB)",
        stats.output_file_size,
        stats.output_file_size as f64 / 1024.0 / 1024.0
    );
    if stats.compression_ratio > 0.0 {
        info!("  Compression ratio: {:.1}x", stats.compression_ratio);
    }
    if !stats.diagnostics.is_clean() {
        info!("  Diagnostics: {:?}", stats.diagnostics);
    }

    Ok(())
}

/// Resolve settings: profile, then config file, then explicit flags.
fn build_config(
    profile: Profile,
    file: Option<&ConversionSettings>,
    overrides: &ConvertOverrides,
    force: bool,
) -> Result<ConversionConfig> {
    let mut config = profile.conversion_config();

    if let Some(settings) = file {
        if let Some(chunk_bytes) = settings.chunk_bytes {
            config.chunk_bytes = chunk_bytes;
        }
        if let Some(origin) = settings.channel_origin {
            config.channel_origin = origin;
        }
        if let Some(level) = settings.compression_level {
            config.store_config.compression = CompressionType::Zstd(level);
        }
        if let Some(rows) = settings.row_group_size {
            config.store_config.row_group_size = rows;
        }
        if let Some(prefetch) = settings.prefetch {
            config.prefetch = prefetch;
        }
        if let Some(depth) = settings.prefetch_depth {
            config.prefetch_depth = depth;
        }
    }

    if let Some(chunk_bytes) = overrides.chunk_bytes {
        config.chunk_bytes = chunk_bytes;
    }
    if let Some(origin) = overrides.channel_origin {
        config.channel_origin = origin;
    }
    if overrides.no_prefetch {
        config.prefetch = false;
    }
    if let Some(level) = overrides.compression_level {
        config.store_config.compression = CompressionType::Zstd(level);
    }
    if let Some(rows) = overrides.row_group_size {
        config.store_config.row_group_size = rows;
    }
    config.overwrite = force;

    if config.chunk_bytes < 4 {
        anyhow::bail!("chunk size must be at least 4 bytes, got {}", config.chunk_bytes);
    }
    if config.store_config.row_group_size == 0 {
        anyhow::bail!("row group size must be positive");
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mpalist::decoder::ChannelOrigin;

    #[test]
    fn test_profile_only() {
        let config = build_config(Profile::Fast, None, &ConvertOverrides::default(), false).unwrap();
        assert_eq!(config, ConversionConfig::fast_write());
    }

    #[test]
    fn test_flags_override_file() {
        let settings = Config::from_str(
            r#"
            [conversion]
            chunk_bytes = 8192
            compression_level = 9
            channel_origin = "one"
        "#,
        )
        .unwrap()
        .conversion;
        let overrides = ConvertOverrides {
            chunk_bytes: Some(4096),
            no_prefetch: true,
            ..Default::default()
        };

        let config = build_config(Profile::Balanced, Some(&settings), &overrides, true).unwrap();
        assert_eq!(config.chunk_bytes, 4096);
        assert_eq!(config.store_config.compression, CompressionType::Zstd(9));
        assert_eq!(config.channel_origin, ChannelOrigin::One);
        assert!(!config.prefetch);
        assert!(config.overwrite);
    }

    #[test]
    fn test_tiny_chunk_rejected() {
        let overrides = ConvertOverrides {
            chunk_bytes: Some(2),
            ..Default::default()
        };
        assert!(build_config(Profile::Balanced, None, &overrides, false).is_err());
    }
}
