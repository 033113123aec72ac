use std::path::Path;

use serde::{Deserialize, Serialize};

use super::MetadataError;

/// Source file information for provenance tracking
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceFileInfo {
    /// Original file name
    pub name: String,

    /// Original file path
    pub path: Option<String>,

    /// File format
    pub format: Option<String>,

    /// File size in bytes
    pub size_bytes: Option<u64>,

    /// Byte offset of the binary body (just past the `[LISTDATA]` line)
    pub body_offset: Option<u64>,
}

impl SourceFileInfo {
    /// Create new source file info with the given filename
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Describe a list file on disk
    pub fn for_list_file(path: &Path, size_bytes: u64, body_offset: u64) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            name,
            path: Some(path.display().to_string()),
            format: Some("MPA-3 list".to_string()),
            size_bytes: Some(size_bytes),
            body_offset: Some(body_offset),
        }
    }

    /// Serialize to JSON for Parquet footer storage
    pub fn to_json(&self) -> Result<String, MetadataError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize from JSON
    pub fn from_json(json: &str) -> Result<Self, MetadataError> {
        Ok(serde_json::from_str(json)?)
    }
}
