//! Observability for the customer service
//!
//! - Typed lifecycle and request events ([`Event`])
//! - Structured logging through `tracing` ([`init_logging`])
//!
//! # Usage
//!
//! ```ignore
//! use customer_service::observability::{init_logging, Event, LogFormat};
//!
//! init_logging("info", LogFormat::Json)?;
//! tracing::info!(event = Event::BootStart.as_str(), "starting");
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{init_logging, parse_level, LogFormat};

use std::fmt;

/// Observability error
///
/// Raised while configuring logging. Never raised by logging itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservabilityError {
    message: String,
}

impl ObservabilityError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ObservabilityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "observability: {}", self.message)
    }
}

impl std::error::Error for ObservabilityError {}

/// Result type for observability operations
pub type ObservabilityResult<T> = Result<T, ObservabilityError>;
