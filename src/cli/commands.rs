//! CLI command implementations
//!
//! `start` boots in a fixed order: configuration, logging, store, server.
//! Any failure before the server is listening is fatal.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::customer::{CustomerDocument, CustomerStore, DocumentBackend};
use crate::http_server::{CustomerState, HttpServer};
use crate::observability::{init_logging, Event};

use super::args::{Cli, Command};
use super::config::Config;
use super::errors::{CliError, CliResult};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Run a parsed command
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Init { config, data_dir } => {
            let path = init(&config, data_dir)?;
            println!("Initialized customer document at {}", path.display());
            Ok(())
        }
        Command::Start {
            config,
            port,
            data_dir,
        } => start(&config, port, data_dir),
    }
}

/// Resolve configuration from file, environment and flags
pub fn resolve_config(
    config_path: &Path,
    port: Option<u16>,
    data_dir: Option<PathBuf>,
) -> CliResult<Config> {
    let mut config = Config::load_or_default(config_path)?;
    config.apply_env()?;
    config.apply_overrides(port, data_dir)?;
    Ok(config)
}

/// Create the data directory and an empty customer document.
///
/// Refuses to overwrite an existing document. Returns its path.
pub fn init(config_path: &Path, data_dir: Option<PathBuf>) -> CliResult<PathBuf> {
    let config = resolve_config(config_path, None, data_dir)?;
    let backend = config.backend();

    if backend.exists() {
        return Err(CliError::already_initialized(backend.path().display()));
    }

    backend
        .persist(&CustomerDocument::default())
        .map_err(|e| CliError::init_failed(e.to_string()))?;
    Ok(backend.path().to_path_buf())
}

/// Boot the store and serve HTTP until interrupted
pub fn start(config_path: &Path, port: Option<u16>, data_dir: Option<PathBuf>) -> CliResult<()> {
    let config = resolve_config(config_path, port, data_dir)?;

    init_logging(&config.log_level, config.log_format()?)?;
    tracing::info!(
        event = Event::BootStart.as_str(),
        version = env!("CARGO_PKG_VERSION"),
        "starting customer service"
    );
    tracing::info!(
        event = Event::ConfigLoaded.as_str(),
        config = %config_path.display(),
        addr = %config.http.socket_addr(),
        data_dir = %config.data_dir,
        "configuration loaded"
    );

    let store = CustomerStore::open(config.backend()).map_err(|e| {
        tracing::error!(event = Event::PersistFailed.as_str(), error = %e, "failed to open store");
        CliError::from(e)
    })?;

    let state = Arc::new(CustomerState::new(Arc::new(store)));
    let server = HttpServer::new(config.http.clone(), state);

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("failed to start runtime: {}", e)))?;

    runtime
        .block_on(server.start())
        .map_err(|e| CliError::serve_failed(e.to_string()))
}
