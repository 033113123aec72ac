use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{ArrayRef, UInt16Array, UInt32Array};
use arrow::buffer::ScalarBuffer;
use arrow::datatypes::Schema;
use arrow::record_batch::RecordBatch;
use log::{debug, info};
use parquet::arrow::ArrowWriter;
use parquet::format::KeyValue;
use tempfile::NamedTempFile;

use super::columns::EventColumns;
use super::config::StoreConfig;
use super::error::StoreError;
use super::stats::StoreStats;
use crate::metadata::ListFileMetadata;
use crate::schema::{create_event_schema_arc, KEY_COMPLETE};

/// Directory a store at `target` is written in.
pub(crate) fn output_dir(target: &Path) -> PathBuf {
    match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Temporary `.mpalist-*.partial` file next to `target`, removed on drop.
pub(crate) fn create_partial(target: &Path) -> std::io::Result<NamedTempFile> {
    tempfile::Builder::new()
        .prefix(".mpalist-")
        .suffix(".partial")
        .tempfile_in(output_dir(target))
}

/// Writes a single-file event store.
///
/// Output goes to a temporary file next to the target and is renamed into
/// place by [`finish`](Self::finish). Dropping the writer without finishing
/// removes the temporary file, so a store at the target path is always
/// complete.
pub struct EventStoreWriter {
    writer: ArrowWriter<BufWriter<File>>,
    temp: NamedTempFile,
    target: PathBuf,
    overwrite: bool,
    schema: Arc<Schema>,
    row_group_size: usize,
    events_written: u64,
    row_groups_written: usize,
}

impl EventStoreWriter {
    /// Create a writer for `target` with one value column per channel.
    pub fn create(
        target: &Path,
        metadata: &ListFileMetadata,
        config: &StoreConfig,
        overwrite: bool,
    ) -> Result<Self, StoreError> {
        if !overwrite && target.exists() {
            return Err(StoreError::OutputExists(target.display().to_string()));
        }

        let temp = create_partial(target)?;
        debug!("Writing store to temporary file {}", temp.path().display());

        let schema = create_event_schema_arc(&metadata.channels);
        let parquet_metadata = metadata.to_parquet_metadata()?;
        let props = config.to_writer_properties(&parquet_metadata);

        let file = temp.as_file().try_clone()?;
        let writer = ArrowWriter::try_new(BufWriter::new(file), schema.clone(), Some(props))?;

        Ok(Self {
            writer,
            temp,
            target: target.to_path_buf(),
            overwrite,
            schema,
            row_group_size: config.row_group_size.max(1),
            events_written: 0,
            row_groups_written: 0,
        })
    }

    /// Schema of the store
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Write all columns, one row group per `row_group_size` events.
    pub fn write_columns(&mut self, columns: EventColumns) -> Result<(), StoreError> {
        let expected = self.schema.fields().len() - 1;
        if columns.channels().len() != expected {
            return Err(StoreError::InvalidData(format!(
                "store has {} channel columns, got {}",
                expected,
                columns.channels().len()
            )));
        }

        let (time, values) = columns.into_parts();
        let rows = time.len();

        let mut arrays: Vec<ArrayRef> = Vec::with_capacity(values.len() + 1);
        arrays.push(Arc::new(UInt32Array::new(ScalarBuffer::from(time), None)));
        for column in values {
            arrays.push(Arc::new(UInt16Array::new(ScalarBuffer::from(column), None)));
        }
        let batch = RecordBatch::try_new(self.schema.clone(), arrays)?;

        let mut offset = 0;
        while offset < rows {
            let len = self.row_group_size.min(rows - offset);
            self.writer.write(&batch.slice(offset, len))?;
            self.writer.flush()?;
            offset += len;
            self.row_groups_written += 1;
            debug!("Row group {}: {} events", self.row_groups_written, len);
        }
        self.events_written += rows as u64;
        Ok(())
    }

    /// Mark the store complete, close it, and move it to the target path.
    pub fn finish(mut self) -> Result<StoreStats, StoreError> {
        self.writer.append_key_value_metadata(KeyValue {
            key: KEY_COMPLETE.to_string(),
            value: Some("true".to_string()),
        });

        let mut inner = self.writer.into_inner()?;
        inner.flush()?;
        let file = inner.into_inner().map_err(|e| StoreError::IoError(e.into_error()))?;
        file.sync_all()?;
        drop(file);

        let file_size_bytes = self.temp.as_file().metadata()?.len();

        let persisted = if self.overwrite {
            self.temp.persist(&self.target)
        } else {
            self.temp.persist_noclobber(&self.target)
        };
        persisted.map_err(|e| {
            if e.error.kind() == std::io::ErrorKind::AlreadyExists {
                StoreError::OutputExists(self.target.display().to_string())
            } else {
                StoreError::IoError(e.error)
            }
        })?;

        let stats = StoreStats {
            events_written: self.events_written,
            channel_columns: self.schema.fields().len() - 1,
            row_groups_written: self.row_groups_written,
            file_size_bytes,
        };
        info!("Store finalized at {}: {}", self.target.display(), stats);
        Ok(stats)
    }
}
