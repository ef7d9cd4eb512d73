use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for addressing-cli
#[derive(Debug, Parser)]
#[command(
    name = "addressing",
    version,
    about = "CLI for checking postal codes and subdivisions against country address metadata"
)]
pub struct CliArgs {
    /// Directory of <CC>.json snapshot files (default: the snapshot bundled in addressing-core)
    #[arg(short = 'd', long = "data-dir", global = true)]
    #[cfg_attr(feature = "remote", arg(conflicts_with = "remote"))]
    pub data_dir: Option<PathBuf>,

    /// Fetch country data live from the remote dataset (ADDRESSING_DATA_URL overrides the endpoint)
    #[cfg(feature = "remote")]
    #[arg(short = 'r', long = "remote", global = true)]
    pub remote: bool,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short = 'v', long = "verbose", global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check a postal code for a country
    Postal {
        /// ISO2 code of the country (e.g. US, NG)
        country: String,
        /// Postal code to check
        value: String,
    },

    /// List the subdivisions (states/provinces) of a country
    Subdivisions {
        /// ISO2 code of the country
        country: String,
    },

    /// Check a subdivision code for a country
    Subdivision {
        /// ISO2 code of the country
        country: String,
        /// Subdivision code (case-insensitive, e.g. CA)
        code: String,
    },

    /// Show the raw metadata of a country
    Country {
        /// ISO2 code of the country
        country: String,
    },

    /// Report postal patterns in the snapshot that do not compile
    Audit,

    /// Fetch countries from the remote dataset and write snapshot files
    #[cfg(feature = "remote")]
    Import {
        /// Output directory for <CC>.json files
        #[arg(short = 'o', long = "out")]
        out: PathBuf,

        /// Optional comma-separated list of ISO2 codes to import (e.g. US,NG,GB)
        #[arg(long = "only", value_delimiter = ',')]
        only: Vec<String>,

        /// Replace files that already exist
        #[arg(long)]
        overwrite: bool,

        /// Write gzip files (<CC>.json.gz)
        #[cfg(feature = "compact")]
        #[arg(long)]
        compress: bool,
    },
}
