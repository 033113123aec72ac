use std::fs::File;
use std::path::Path;

use log::warn;
use parquet::file::reader::SerializedFileReader;

use super::{ListModeReader, ReaderConfig, ReaderError};

impl ListModeReader {
    /// Open a store
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ReaderError> {
        Self::open_with_config(path, ReaderConfig::default())
    }

    /// Open a store with custom configuration
    ///
    /// Stores without the completion marker still open; check
    /// [`is_complete`](Self::is_complete) before trusting their contents.
    pub fn open_with_config<P: AsRef<Path>>(path: P, config: ReaderConfig) -> Result<Self, ReaderError> {
        let path = path.as_ref().to_path_buf();
        if path.is_dir() {
            return Err(ReaderError::InvalidFormat(format!(
                "expected a single Parquet file, found a directory: {}",
                path.display()
            )));
        }

        let file = File::open(&path)?;
        let parquet_reader = SerializedFileReader::new(file)?;
        let store_metadata = Self::extract_store_metadata(&parquet_reader)?;

        if !store_metadata.list.complete {
            warn!("{} has no completion marker and may be a partial write", path.display());
        }

        Ok(Self {
            path,
            config,
            store_metadata,
        })
    }

    /// Path of the open store
    pub fn path(&self) -> &Path {
        &self.path
    }
}
