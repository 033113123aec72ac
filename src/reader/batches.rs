use std::fs::File;

use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ProjectionMask;

use super::{ListModeReader, ReaderError};

/// Streaming iterator over record batches
pub struct RecordBatchIterator {
    inner: Box<dyn Iterator<Item = Result<RecordBatch, arrow::error::ArrowError>> + Send>,
}

impl RecordBatchIterator {
    pub(crate) fn new<I>(iter: I) -> Self
    where
        I: Iterator<Item = Result<RecordBatch, arrow::error::ArrowError>> + Send + 'static,
    {
        Self {
            inner: Box::new(iter),
        }
    }
}

impl Iterator for RecordBatchIterator {
    type Item = Result<RecordBatch, ReaderError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|r| r.map_err(ReaderError::from))
    }
}

impl ListModeReader {
    /// Streaming iterator over all columns
    ///
    /// Memory usage is bounded by `batch_size` rows.
    ///
    /// # Example
    /// ```rust,no_run
    /// use mpalist::reader::ListModeReader;
    ///
    /// let reader = ListModeReader::open("run.parquet")?;
    /// for batch in reader.iter_batches()? {
    ///     let batch = batch?;
    ///     println!("{} events", batch.num_rows());
    /// }
    /// # Ok::<(), mpalist::reader::ReaderError>(())
    /// ```
    pub fn iter_batches(&self) -> Result<RecordBatchIterator, ReaderError> {
        self.read_batches(None, 0, None)
    }

    /// Streaming iterator over the named columns only
    pub fn iter_columns(&self, columns: &[&str]) -> Result<RecordBatchIterator, ReaderError> {
        self.read_batches(Some(columns), 0, None)
    }

    /// Build a batch reader with an optional projection and row window.
    pub(super) fn read_batches(
        &self,
        columns: Option<&[&str]>,
        offset: usize,
        limit: Option<usize>,
    ) -> Result<RecordBatchIterator, ReaderError> {
        let file = File::open(&self.path)?;
        let mut builder =
            ParquetRecordBatchReaderBuilder::try_new(file)?.with_batch_size(self.config.batch_size);

        if let Some(columns) = columns {
            let indices = columns
                .iter()
                .map(|name| {
                    self.store_metadata
                        .schema
                        .index_of(name)
                        .map_err(|_| ReaderError::ColumnNotFound(name.to_string()))
                })
                .collect::<Result<Vec<_>, _>>()?;
            let mask = ProjectionMask::roots(builder.parquet_schema(), indices);
            builder = builder.with_projection(mask);
        }
        if offset > 0 {
            builder = builder.with_offset(offset);
        }
        if let Some(limit) = limit {
            builder = builder.with_limit(limit);
        }

        Ok(RecordBatchIterator::new(builder.build()?))
    }
}
