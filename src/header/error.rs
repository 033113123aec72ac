/// Errors that can occur while reading the textual header
#[derive(Debug, thiserror::Error)]
pub enum HeaderError {
    /// I/O error reading the header
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The `[LISTDATA]` sentinel was never found
    #[error("Malformed list file: header sentinel {sentinel} not found within {scanned} bytes")]
    MissingSentinel {
        /// The sentinel line that was expected
        sentinel: &'static str,
        /// Number of bytes scanned before giving up
        scanned: u64,
    },
}
