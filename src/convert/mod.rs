//! List file to event store converter
//!
//! Conversion reads the file twice. The discovery pass
//! ([`ListModeConverter::explore`]) counts events and collects the set of
//! channels that fired without holding more than a few chunks in memory. The
//! materialization pass ([`ListModeConverter::materialize`]) allocates the
//! output columns at their final size and fills them chunk by chunk at
//! absolute event offsets, carrying a [`StreamCursor`] between chunks.
//!
//! [`ListModeConverter::convert`] runs both passes and writes the store.

mod assemble;
mod config;
mod cursor;
mod error;
mod pipeline;
mod stats;

#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};

use chrono::Utc;
use log::info;
use uuid::Uuid;

pub use assemble::{assemble, AssembledChunk, ChannelLayout};
pub use config::ConversionConfig;
pub use cursor::StreamCursor;
pub use error::ConversionError;
pub use pipeline::{ListFileExploration, MaterializedEvents};
pub use stats::{ConversionStats, ExploreSummary};

use crate::metadata::{ListFileMetadata, SourceFileInfo};
use crate::schema::MPALIST_EXTENSION;
use crate::store::{create_partial, EventStoreWriter};

/// Converter from MPA-3 list files to event stores
#[derive(Debug, Clone, Default)]
pub struct ListModeConverter {
    config: ConversionConfig,
}

impl ListModeConverter {
    /// Create a new converter with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new converter with custom configuration
    pub fn with_config(config: ConversionConfig) -> Self {
        Self { config }
    }

    /// Set the chunk size in bytes
    pub fn with_chunk_bytes(mut self, chunk_bytes: usize) -> Self {
        self.config.chunk_bytes = chunk_bytes;
        self
    }

    /// Current configuration
    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    /// Convert a list file into a store at `output_path`.
    pub fn convert<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
    ) -> Result<ConversionStats, ConversionError> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();
        check_paths(input_path, output_path, self.config.overwrite)?;

        info!("Converting {} to {}", input_path.display(), output_path.display());

        let exploration = self.explore(input_path)?;
        let materialized = self.materialize(input_path, &exploration)?;

        let channels = materialized.columns.channels().to_vec();
        let mut metadata = ListFileMetadata::new(exploration.header.clone());
        metadata.source_file = Some(SourceFileInfo::for_list_file(
            input_path,
            exploration.file_size,
            exploration.body_offset,
        ));
        metadata.channels = channels.clone();
        metadata.channel_origin = self.config.channel_origin;
        metadata.explore = Some(exploration.summary);
        metadata.diagnostics = materialized.diagnostics;
        metadata.conversion_timestamp = Some(Utc::now());
        metadata.conversion_id = Some(Uuid::new_v4());

        let mut writer = EventStoreWriter::create(
            output_path,
            &metadata,
            &self.config.store_config,
            self.config.overwrite,
        )?;
        writer.write_columns(materialized.columns)?;
        let store_stats = writer.finish()?;

        let mut stats = ConversionStats {
            explore: exploration.summary,
            events_written: store_stats.events_written,
            channels,
            diagnostics: materialized.diagnostics,
            row_groups_written: store_stats.row_groups_written,
            source_file_size: exploration.file_size,
            output_file_size: store_stats.file_size_bytes,
            compression_ratio: 0.0,
        };
        if stats.output_file_size > 0 {
            stats.compression_ratio = stats.source_file_size as f64 / stats.output_file_size as f64;
        }

        info!("Conversion complete:");
        info!("  Events: {}", stats.events_written);
        info!("  Channels: {:?}", stats.channels);
        info!("  Input size: {} bytes", stats.source_file_size);
        info!("  Output size: {} bytes", stats.output_file_size);
        info!("  Compression ratio: {:.2}x", stats.compression_ratio);

        Ok(stats)
    }
}

/// Run the discovery pass with default settings.
pub fn explore_list_file<P: AsRef<Path>>(input_path: P) -> Result<ListFileExploration, ConversionError> {
    ListModeConverter::new().explore(input_path)
}

/// Output path used when none is given: the input with a `.parquet` extension.
pub fn default_output_path(input_path: &Path) -> PathBuf {
    input_path.with_extension(MPALIST_EXTENSION)
}

/// Reject unusable input/output paths before any decoding work.
fn check_paths(input: &Path, output: &Path, overwrite: bool) -> Result<(), ConversionError> {
    if !input.is_file() {
        return Err(ConversionError::UsageError(format!(
            "input file not found: {}",
            input.display()
        )));
    }
    if input == output {
        return Err(ConversionError::UsageError(format!(
            "output would overwrite the input: {}",
            output.display()
        )));
    }
    if output.is_dir() {
        return Err(ConversionError::UsageError(format!(
            "output is a directory: {}",
            output.display()
        )));
    }
    if output.exists() && !overwrite {
        return Err(ConversionError::UsageError(format!(
            "output already exists (use overwrite to replace it): {}",
            output.display()
        )));
    }
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            return Err(ConversionError::UsageError(format!(
                "output directory does not exist: {}",
                parent.display()
            )));
        }
    }
    create_partial(output).map_err(|e| {
        ConversionError::UsageError(format!(
            "cannot write to the output directory of {}: {}",
            output.display(),
            e
        ))
    })?;
    Ok(())
}
