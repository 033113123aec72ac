/// mpalist store format version - follows semantic versioning
pub const MPALIST_FORMAT_VERSION: &str = "1.0.0";

/// File extension for converted stores
pub const MPALIST_EXTENSION: &str = "parquet";

/// Value stored in a channel column when the event has no sample for that channel.
///
/// This is lossy: a genuine ADC reading of 65535 reads back as "absent".
pub const ABSENT_VALUE: u16 = u16::MAX;

/// Metadata key for format version in Parquet footer
pub const KEY_FORMAT_VERSION: &str = "mpalist:format_version";

/// Metadata key for the parsed list-file header (typed JSON)
pub const KEY_HEADER: &str = "mpalist:header";

/// Prefix of flattened header entries: `header.<SECTION>.<key>`
pub const KEY_HEADER_PREFIX: &str = "header.";

/// Metadata key for source file information
pub const KEY_SOURCE_FILE: &str = "mpalist:source_file";

/// Metadata key for the discovered channel list (JSON array)
pub const KEY_CHANNELS: &str = "mpalist:channels";

/// Metadata key for the channel numbering origin
pub const KEY_CHANNEL_ORIGIN: &str = "mpalist:channel_origin";

/// Metadata key for the discovery pass summary
pub const KEY_EXPLORE_SUMMARY: &str = "mpalist:explore_summary";

/// Metadata key for lenient-decoding counters
pub const KEY_DIAGNOSTICS: &str = "mpalist:diagnostics";

/// Metadata key for the absent-value sentinel
pub const KEY_SENTINEL: &str = "mpalist:sentinel";

/// Metadata key marking a fully written store
pub const KEY_COMPLETE: &str = "mpalist:complete";

/// Metadata key for conversion timestamp
pub const KEY_CONVERSION_TIMESTAMP: &str = "mpalist:conversion_timestamp";

/// Metadata key for converter software info
pub const KEY_CONVERTER_INFO: &str = "mpalist:converter_info";

/// Metadata key for the per-conversion identifier
pub const KEY_CONVERSION_ID: &str = "mpalist:conversion_id";

/// Field metadata key carrying the absent-value sentinel of a channel column
pub const FIELD_META_SENTINEL: &str = "sentinel";

/// Field metadata key carrying the ADC channel index of a column
pub const FIELD_META_CHANNEL: &str = "adc_channel";

/// Field metadata key carrying the unit of a column
pub const FIELD_META_UNIT: &str = "unit";

/// Unit of the TIME column
pub const TIME_UNIT: &str = "timer_tick";
