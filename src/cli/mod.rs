use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use mpalist::decoder::ChannelOrigin;

mod convert;
mod explore;
mod info;
mod validate;

mod config;
mod profile;

pub use profile::Profile;

/// mpalist - MPA-3 list-mode file converter
#[derive(Parser)]
#[command(name = "mpalist")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Conversion profile for optimizing speed vs compression.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum ProfileArg {
    /// Prioritize speed over compression
    Fast,
    /// Balance between speed and compression
    #[default]
    Balanced,
    /// Maximum compression, slower conversion
    MaxCompression,
}

impl From<ProfileArg> for Profile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::Fast => Profile::Fast,
            ProfileArg::Balanced => Profile::Balanced,
            ProfileArg::MaxCompression => Profile::MaxCompression,
        }
    }
}

/// Settings given on the command line for `convert`; `None` leaves the
/// config file or profile value in place.
#[derive(Debug, Default, Clone)]
pub struct ConvertOverrides {
    pub chunk_bytes: Option<usize>,
    pub channel_origin: Option<ChannelOrigin>,
    pub no_prefetch: bool,
    pub compression_level: Option<i32>,
    pub row_group_size: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a list file to a Parquet event store
    Convert {
        /// Input list file path
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output store path (defaults to the input with a .parquet extension)
        #[arg(value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Replace the output if it already exists
        #[arg(short = 'f', long)]
        force: bool,

        /// Conversion profile (fast, balanced, max-compression)
        #[arg(short = 'p', long, default_value = "balanced", value_enum)]
        profile: ProfileArg,

        /// Load settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Numbering of ADC channels: 0 (bit 0 is ADC0) or 1 (bit 0 is ADC1)
        #[arg(long, value_name = "ORIGIN")]
        channel_origin: Option<ChannelOrigin>,

        /// Bytes read per chunk
        #[arg(long, value_name = "BYTES")]
        chunk_bytes: Option<usize>,

        /// Read chunks on the decoding thread instead of a background reader
        #[arg(long)]
        no_prefetch: bool,

        // === Advanced tuning flags (hidden from --help) ===
        /// Compression level for ZSTD (1-22, default: profile-dependent)
        #[arg(short = 'c', long, hide = true)]
        compression_level: Option<i32>,

        /// Row group size (events per row group)
        #[arg(short = 'r', long, hide = true)]
        row_group_size: Option<usize>,
    },

    /// Count events and channels in a list file without converting it
    Explore {
        /// Input list file path
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Bytes read per chunk
        #[arg(long, value_name = "BYTES")]
        chunk_bytes: Option<usize>,

        /// Numbering of ADC channels: 0 or 1
        #[arg(long, value_name = "ORIGIN", default_value = "0")]
        channel_origin: ChannelOrigin,

        /// Also print every header section
        #[arg(long)]
        header: bool,
    },

    /// Display information about a store
    Info {
        /// Store file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Scan the event columns for per-channel sample counts
        #[arg(long)]
        scan: bool,
    },

    /// Validate store integrity
    Validate {
        /// Store file path
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Convert {
            input,
            output,
            force,
            profile,
            config,
            channel_origin,
            chunk_bytes,
            no_prefetch,
            compression_level,
            row_group_size,
        } => convert::run(
            input,
            output,
            force,
            Profile::from(profile),
            config,
            ConvertOverrides {
                chunk_bytes,
                channel_origin,
                no_prefetch,
                compression_level,
                row_group_size,
            },
        ),
        Commands::Explore {
            input,
            chunk_bytes,
            channel_origin,
            header,
        } => explore::run(input, chunk_bytes, channel_origin, header),
        Commands::Info { file, scan } => info::run(file, scan),
        Commands::Validate { file } => validate::run(file),
    }
}
