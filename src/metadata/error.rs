/// Errors that can occur during metadata processing
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    /// JSON serialization/deserialization error
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A key was present but its value could not be interpreted
    #[error("Invalid value for metadata key '{key}': {value}")]
    InvalidValue {
        /// Metadata key
        key: String,
        /// Offending value
        value: String,
    },
}
