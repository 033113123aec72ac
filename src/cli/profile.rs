//! Conversion profiles for common use cases.
//!
//! Profiles pick compression and row group settings so users do not have to
//! know Parquet tuning knobs.

use std::fmt;
use std::str::FromStr;

use mpalist::convert::ConversionConfig;

/// Conversion profiles for common use cases.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Profile {
    /// Prioritize speed over compression.
    ///
    /// - Compression: Snappy
    /// - Row group size: 500,000 events
    Fast,

    /// Balance between speed and compression (default).
    ///
    /// - Compression: ZSTD level 3
    /// - Row group size: 1,000,000 events
    #[default]
    Balanced,

    /// Maximum compression, slower conversion.
    ///
    /// - Compression: ZSTD level 19
    /// - Row group size: 4,000,000 events
    MaxCompression,
}

impl Profile {
    /// Conversion configuration this profile starts from.
    pub fn conversion_config(&self) -> ConversionConfig {
        match self {
            Profile::Fast => ConversionConfig::fast_write(),
            Profile::Balanced => ConversionConfig::balanced(),
            Profile::MaxCompression => ConversionConfig::max_compression(),
        }
    }

    /// Returns all available profile names.
    pub fn variants() -> &'static [&'static str] {
        &["fast", "balanced", "max-compression"]
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Profile::Fast => write!(f, "fast"),
            Profile::Balanced => write!(f, "balanced"),
            Profile::MaxCompression => write!(f, "max-compression"),
        }
    }
}

impl FromStr for Profile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fast" => Ok(Profile::Fast),
            "balanced" | "default" => Ok(Profile::Balanced),
            "max-compression" | "maxcompression" | "max" => Ok(Profile::MaxCompression),
            _ => Err(format!(
                "Unknown profile '{}'. Valid options: {}",
                s,
                Profile::variants().join(", ")
            )),
        }
    }
}
