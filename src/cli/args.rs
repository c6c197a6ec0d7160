//! CLI argument definitions using clap
//!
//! Commands:
//! - customer-service init --config <path> [--data-dir <dir>]
//! - customer-service start --config <path> [--port <n>] [--data-dir <dir>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Default configuration file location
pub const DEFAULT_CONFIG_PATH: &str = "./customer-service.json";

/// Customer registry served over HTTP
#[derive(Parser, Debug)]
#[command(name = "customer-service")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the data directory and an empty customer document
    Init {
        /// Path to configuration file (optional; defaults apply if absent)
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,

        /// Override the data directory
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },

    /// Start the HTTP server
    Start {
        /// Path to configuration file (optional; defaults apply if absent)
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,

        /// Override the listening port
        #[arg(long)]
        port: Option<u16>,

        /// Override the data directory
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
