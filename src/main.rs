//! # mpalist
//!
//! Command-line front end for converting MPA-3 list-mode files.
//!
//! ```bash
//! # Convert run.lst to run.parquet
//! mpalist convert run.lst
//!
//! # Counts only, no output
//! mpalist explore run.lst
//!
//! # Inspect and check a store
//! mpalist info run.parquet
//! mpalist validate run.parquet
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
