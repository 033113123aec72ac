use std::collections::HashMap;
use std::sync::Arc;

use arrow::datatypes::Schema;
use parquet::file::reader::{FileReader, SerializedFileReader};

use crate::header::Header;
use crate::metadata::ListFileMetadata;
use crate::schema::{parse_channel_column, KEY_FORMAT_VERSION};

use super::{ListModeReader, ReaderError};

/// Metadata extracted from a store
#[derive(Debug, Clone)]
pub struct StoreMetadata {
    /// Format version string
    pub format_version: String,
    /// Total number of events (rows)
    pub total_events: u64,
    /// Number of row groups
    pub num_row_groups: usize,
    /// Schema of the Parquet file
    pub schema: Arc<Schema>,
    /// Raw key-value metadata from the Parquet footer
    pub key_value_metadata: HashMap<String, String>,
    /// Parsed list-file metadata
    pub list: ListFileMetadata,
}

impl ListModeReader {
    pub(super) fn extract_store_metadata<R: parquet::file::reader::ChunkReader + 'static>(
        reader: &SerializedFileReader<R>,
    ) -> Result<StoreMetadata, ReaderError> {
        let parquet_metadata = reader.metadata();
        let file_meta = parquet_metadata.file_metadata();
        let schema = parquet::arrow::parquet_to_arrow_schema(
            file_meta.schema_descr(),
            file_meta.key_value_metadata(),
        )?;

        let mut kv_metadata = HashMap::new();
        if let Some(kv_list) = file_meta.key_value_metadata() {
            for kv in kv_list {
                if let Some(value) = &kv.value {
                    kv_metadata.insert(kv.key.clone(), value.clone());
                }
            }
        }

        let format_version = kv_metadata
            .get(KEY_FORMAT_VERSION)
            .cloned()
            .unwrap_or_else(|| "unknown".to_string());

        let mut list = ListFileMetadata::from_parquet_metadata(&kv_metadata)?;
        if list.channels.is_empty() {
            // Files written by other tools: fall back to the column names.
            list.channels = schema
                .fields()
                .iter()
                .filter_map(|f| parse_channel_column(f.name()))
                .collect();
        }

        let total_events: u64 = (0..parquet_metadata.num_row_groups())
            .map(|i| parquet_metadata.row_group(i).num_rows().max(0) as u64)
            .sum();

        Ok(StoreMetadata {
            format_version,
            total_events,
            num_row_groups: parquet_metadata.num_row_groups(),
            schema: Arc::new(schema),
            key_value_metadata: kv_metadata,
            list,
        })
    }

    /// Store metadata
    pub fn metadata(&self) -> &StoreMetadata {
        &self.store_metadata
    }

    /// Parsed list-file metadata
    pub fn list_metadata(&self) -> &ListFileMetadata {
        &self.store_metadata.list
    }

    /// Parsed list-file header
    pub fn header(&self) -> &Header {
        &self.store_metadata.list.header
    }

    /// Channels with a value column, in column order
    pub fn channels(&self) -> &[u8] {
        &self.store_metadata.list.channels
    }

    /// Whether the store carries the completion marker
    pub fn is_complete(&self) -> bool {
        self.store_metadata.list.complete
    }

    /// Total number of events
    pub fn total_events(&self) -> u64 {
        self.store_metadata.total_events
    }

    /// Arrow schema
    pub fn schema(&self) -> Arc<Schema> {
        Arc::clone(&self.store_metadata.schema)
    }
}
