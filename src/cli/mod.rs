//! CLI module for the customer service
//!
//! Provides command-line interface for:
//! - init: Create the data directory and an empty customer document
//! - start: Load the store and serve HTTP

mod args;
mod commands;
mod config;
mod errors;

pub use args::{Cli, Command, DEFAULT_CONFIG_PATH};
pub use commands::{init, resolve_config, run, run_command, start};
pub use config::{Config, ENV_DATA_DIR, ENV_PORT};
pub use errors::{CliError, CliErrorCode, CliResult};
