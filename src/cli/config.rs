//! Service configuration
//!
//! Read from an optional JSON file, then overridden by environment
//! variables, then by command-line flags.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::errors::{CliError, CliResult};
use crate::customer::{JsonFileBackend, DEFAULT_DATA_FILE};
use crate::http_server::HttpServerConfig;
use crate::observability::{parse_level, LogFormat};

/// Environment variable overriding the listening port
pub const ENV_PORT: &str = "PORT";

/// Environment variable overriding the data directory
pub const ENV_DATA_DIR: &str = "CUSTOMER_SERVICE_DATA_DIR";

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(flatten)]
    pub http: HttpServerConfig,

    /// Directory holding the backing document (default "data")
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Backing document file name (default "customers.json")
    #[serde(default = "default_data_file")]
    pub data_file: String,

    /// Log level (default "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log format, "text" or "json" (default "text")
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

fn default_data_dir() -> String {
    "data".to_string()
}
fn default_data_file() -> String {
    DEFAULT_DATA_FILE.to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "text".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http: HttpServerConfig::default(),
            data_dir: default_data_dir(),
            data_file: default_data_file(),
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::config_error(format!("Failed to read config {}: {}", path.display(), e))
        })?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Load from `path` if it exists, otherwise use defaults
    pub fn load_or_default(path: &Path) -> CliResult<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply `PORT` and `CUSTOMER_SERVICE_DATA_DIR` from the process
    /// environment
    pub fn apply_env(&mut self) -> CliResult<()> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn apply_env_from<F>(&mut self, lookup: F) -> CliResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup(ENV_PORT).filter(|v| !v.trim().is_empty()) {
            self.http.port = port.trim().parse().map_err(|_| {
                CliError::config_error(format!("Invalid {} value: '{}'", ENV_PORT, port))
            })?;
        }

        if let Some(dir) = lookup(ENV_DATA_DIR).filter(|v| !v.trim().is_empty()) {
            self.data_dir = dir;
        }

        self.validate()
    }

    /// Apply command-line overrides
    pub fn apply_overrides(&mut self, port: Option<u16>, data_dir: Option<PathBuf>) -> CliResult<()> {
        if let Some(port) = port {
            self.http.port = port;
        }
        if let Some(dir) = data_dir {
            self.data_dir = dir.to_string_lossy().into_owned();
        }
        self.validate()
    }

    fn validate(&self) -> CliResult<()> {
        if self.http.port == 0 {
            return Err(CliError::config_error("port must be > 0"));
        }

        if self.data_dir.trim().is_empty() {
            return Err(CliError::config_error("data_dir must not be empty"));
        }

        let file = Path::new(&self.data_file);
        if self.data_file.is_empty() || file.file_name() != Some(file.as_os_str()) {
            return Err(CliError::config_error(format!(
                "data_file must be a plain file name, got '{}'",
                self.data_file
            )));
        }

        parse_level(&self.log_level)?;
        self.log_format()?;

        Ok(())
    }

    /// Parsed log format
    pub fn log_format(&self) -> CliResult<LogFormat> {
        Ok(self.log_format.parse::<LogFormat>()?)
    }

    /// Get data directory as Path
    pub fn data_path(&self) -> &Path {
        Path::new(&self.data_dir)
    }

    /// Backend for the configured backing document
    pub fn backend(&self) -> JsonFileBackend {
        JsonFileBackend::new(self.data_path(), &self.data_file)
    }
}
