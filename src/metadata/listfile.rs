use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::source::SourceFileInfo;
use super::MetadataError;
use crate::convert::ExploreSummary;
use crate::decoder::{ChannelOrigin, DecodeDiagnostics};
use crate::header::{Header, HeaderSection};
use crate::schema::columns::channel_column_name;

/// Complete metadata container for a converted list file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListFileMetadata {
    /// Parsed list-file header
    pub header: Header,

    /// Source file information
    pub source_file: Option<SourceFileInfo>,

    /// Discovered channels in increasing order
    pub channels: Vec<u8>,

    /// Numbering of `channels`
    pub channel_origin: ChannelOrigin,

    /// Counts from the discovery pass
    pub explore: Option<ExploreSummary>,

    /// Lenient-decoding counters from the materialization pass
    pub diagnostics: DecodeDiagnostics,

    /// Store format version (filled in when read back)
    pub format_version: Option<String>,

    /// When the conversion ran
    pub conversion_timestamp: Option<DateTime<Utc>>,

    /// Converter name and version
    pub converter_info: Option<String>,

    /// Unique id of the conversion run
    pub conversion_id: Option<Uuid>,

    /// Whether the completion marker was present (read side only)
    #[serde(default)]
    pub complete: bool,
}

impl ListFileMetadata {
    /// Create a metadata container for a parsed header
    pub fn new(header: Header) -> Self {
        Self {
            header,
            ..Default::default()
        }
    }

    /// Header section holding settings for a channel, e.g. `[ADC1]` for channel 1
    pub fn channel_config(&self, channel: u8) -> Option<&HeaderSection> {
        self.header.section(&channel_column_name(channel))
    }

    /// Flattened key for a header entry
    pub fn flat_header_key(section: &str, key: &str) -> String {
        format!("{}{}.{}", crate::schema::KEY_HEADER_PREFIX, section, key)
    }

    /// Convert all metadata to key-value pairs for the Parquet footer.
    ///
    /// The completion marker is not included; the store appends it after the
    /// last row group is written.
    pub fn to_parquet_metadata(&self) -> Result<Vec<(String, String)>, MetadataError> {
        use crate::schema::*;

        let mut metadata = Vec::new();

        metadata.push((KEY_FORMAT_VERSION.to_string(), MPALIST_FORMAT_VERSION.to_string()));

        metadata.push((
            KEY_CONVERSION_TIMESTAMP.to_string(),
            self.conversion_timestamp.unwrap_or_else(Utc::now).to_rfc3339(),
        ));

        metadata.push((
            KEY_CONVERTER_INFO.to_string(),
            self.converter_info
                .clone()
                .unwrap_or_else(|| format!("mpalist v{}", env!("CARGO_PKG_VERSION"))),
        ));

        if let Some(id) = self.conversion_id {
            metadata.push((KEY_CONVERSION_ID.to_string(), id.to_string()));
        }

        if let Some(ref source) = self.source_file {
            metadata.push((KEY_SOURCE_FILE.to_string(), source.to_json()?));
        }

        metadata.push((KEY_CHANNELS.to_string(), serde_json::to_string(&self.channels)?));
        metadata.push((KEY_CHANNEL_ORIGIN.to_string(), self.channel_origin.to_string()));
        metadata.push((KEY_SENTINEL.to_string(), ABSENT_VALUE.to_string()));

        if let Some(ref explore) = self.explore {
            metadata.push((KEY_EXPLORE_SUMMARY.to_string(), serde_json::to_string(explore)?));
        }

        metadata.push((KEY_DIAGNOSTICS.to_string(), serde_json::to_string(&self.diagnostics)?));

        metadata.push((KEY_HEADER.to_string(), serde_json::to_string(&self.header)?));
        for (section, key, value) in self.header.flatten() {
            metadata.push((Self::flat_header_key(section, key), value.to_string()));
        }

        Ok(metadata)
    }

    /// Reconstruct metadata from Parquet key_value_metadata
    pub fn from_parquet_metadata(metadata: &HashMap<String, String>) -> Result<Self, MetadataError> {
        use crate::schema::*;

        let mut result = Self::new(Header::new());

        if let Some(json) = metadata.get(KEY_HEADER) {
            result.header = serde_json::from_str(json)?;
        }

        if let Some(json) = metadata.get(KEY_SOURCE_FILE) {
            result.source_file = Some(SourceFileInfo::from_json(json)?);
        }

        if let Some(json) = metadata.get(KEY_CHANNELS) {
            result.channels = serde_json::from_str(json)?;
        }

        if let Some(origin) = metadata.get(KEY_CHANNEL_ORIGIN) {
            result.channel_origin = origin.parse().map_err(|_| invalid(KEY_CHANNEL_ORIGIN, origin))?;
        }

        if let Some(json) = metadata.get(KEY_EXPLORE_SUMMARY) {
            result.explore = Some(serde_json::from_str(json)?);
        }

        if let Some(json) = metadata.get(KEY_DIAGNOSTICS) {
            result.diagnostics = serde_json::from_str(json)?;
        }

        result.format_version = metadata.get(KEY_FORMAT_VERSION).cloned();
        result.converter_info = metadata.get(KEY_CONVERTER_INFO).cloned();

        if let Some(ts) = metadata.get(KEY_CONVERSION_TIMESTAMP) {
            let parsed = DateTime::parse_from_rfc3339(ts).map_err(|_| invalid(KEY_CONVERSION_TIMESTAMP, ts))?;
            result.conversion_timestamp = Some(parsed.with_timezone(&Utc));
        }

        if let Some(id) = metadata.get(KEY_CONVERSION_ID) {
            result.conversion_id = Some(Uuid::parse_str(id).map_err(|_| invalid(KEY_CONVERSION_ID, id))?);
        }

        result.complete = metadata.get(KEY_COMPLETE).map(|v| v == "true").unwrap_or(false);

        Ok(result)
    }
}

fn invalid(key: &str, value: &str) -> MetadataError {
    MetadataError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}
