//! Observable events for the customer service
//!
//! Every log line carries one of these as its `event` field, so logs can
//! be filtered by what happened rather than by message text.

use std::fmt;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Boot & Lifecycle
    /// Startup begins
    BootStart,
    /// Configuration loaded
    ConfigLoaded,
    /// HTTP listener bound, ready to serve
    ServerListening,
    /// Shutdown complete
    ShutdownComplete,

    // Store
    /// No backing document existed; an empty one was written
    StoreCreated,
    /// Backing document loaded into memory
    StoreLoaded,
    /// Writing the backing document failed
    PersistFailed,

    // Customers
    CustomerCreated,
    CustomerUpdated,
    CustomerDeleted,
    /// Create or update rejected because the alias is taken
    CustomerConflict,
    /// Search diagnostics (debug only)
    SearchRequested,
}

impl Event {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "BOOT_START",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::ServerListening => "SERVER_LISTENING",
            Event::ShutdownComplete => "SHUTDOWN_COMPLETE",
            Event::StoreCreated => "STORE_CREATED",
            Event::StoreLoaded => "STORE_LOADED",
            Event::PersistFailed => "PERSIST_FAILED",
            Event::CustomerCreated => "CUSTOMER_CREATED",
            Event::CustomerUpdated => "CUSTOMER_UPDATED",
            Event::CustomerDeleted => "CUSTOMER_DELETED",
            Event::CustomerConflict => "CUSTOMER_CONFLICT",
            Event::SearchRequested => "SEARCH_REQUESTED",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
