//! Logging setup
//!
//! Installs the global tracing subscriber. `RUST_LOG`, when set, takes
//! precedence over the configured level.

use std::fmt;
use std::str::FromStr;

use tracing_subscriber::EnvFilter;

use super::{ObservabilityError, ObservabilityResult};

/// Output format for log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable single lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Text => "text",
            LogFormat::Json => "json",
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LogFormat {
    type Err = ObservabilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(ObservabilityError::new(format!(
                "unknown log format '{}' (expected 'text' or 'json')",
                other
            ))),
        }
    }
}

/// Parse a level name (`trace`, `debug`, `info`, `warn`, `error`)
pub fn parse_level(level: &str) -> ObservabilityResult<tracing::Level> {
    tracing::Level::from_str(level)
        .map_err(|_| ObservabilityError::new(format!("unknown log level '{}'", level)))
}

/// Install the global subscriber.
///
/// Fails if the level is unknown or a subscriber is already installed.
pub fn init_logging(level: &str, format: LogFormat) -> ObservabilityResult<()> {
    let level = parse_level(level)?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_ascii_lowercase()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let result = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().flatten_event(true).try_init(),
    };

    result.map_err(|e| ObservabilityError::new(format!("failed to install logger: {}", e)))
}
