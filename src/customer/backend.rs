//! # Document Backends
//!
//! Where the customer document lives between process runs. Every persist
//! rewrites the whole document.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use super::errors::{StoreError, StoreResult};
use super::model::CustomerDocument;

/// Default name of the backing document inside the data directory
pub const DEFAULT_DATA_FILE: &str = "customers.json";

/// Durable storage for the customer document
pub trait DocumentBackend: Send + Sync {
    /// Read the stored document, `None` if nothing has been stored yet
    fn load(&self) -> StoreResult<Option<CustomerDocument>>;

    /// Replace the stored document
    fn persist(&self, document: &CustomerDocument) -> StoreResult<()>;

    /// Human-readable location, for logs
    fn describe(&self) -> String;
}

/// JSON file in a data directory
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    data_dir: PathBuf,
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(data_dir: impl Into<PathBuf>, file_name: &str) -> Self {
        let data_dir = data_dir.into();
        let path = data_dir.join(file_name);
        Self { data_dir, path }
    }

    /// Backend using the default file name
    pub fn in_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self::new(data_dir, DEFAULT_DATA_FILE)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }
}

impl DocumentBackend for JsonFileBackend {
    fn load(&self) -> StoreResult<Option<CustomerDocument>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StoreError::Io(format!(
                    "failed to read {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| StoreError::Corrupt(format!("{}: {}", self.path.display(), e)))
    }

    fn persist(&self, document: &CustomerDocument) -> StoreResult<()> {
        fs::create_dir_all(&self.data_dir).map_err(|e| {
            StoreError::Io(format!(
                "failed to create {}: {}",
                self.data_dir.display(),
                e
            ))
        })?;

        let bytes = serde_json::to_vec_pretty(document)
            .map_err(|e| StoreError::Io(format!("failed to encode document: {}", e)))?;

        fs::write(&self.path, bytes)
            .map_err(|e| StoreError::Io(format!("failed to write {}: {}", self.path.display(), e)))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-memory backend for testing
#[derive(Debug, Default)]
pub struct MemoryBackend {
    document: RwLock<Option<CustomerDocument>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend that starts out holding `document`
    pub fn with_document(document: CustomerDocument) -> Self {
        Self {
            document: RwLock::new(Some(document)),
        }
    }

    /// Last persisted document
    pub fn snapshot(&self) -> Option<CustomerDocument> {
        self.document.read().ok().and_then(|doc| (*doc).clone())
    }
}

impl DocumentBackend for MemoryBackend {
    fn load(&self) -> StoreResult<Option<CustomerDocument>> {
        let document = self.document.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok((*document).clone())
    }

    fn persist(&self, document: &CustomerDocument) -> StoreResult<()> {
        let mut stored = self.document.write().map_err(|_| StoreError::LockPoisoned)?;
        *stored = Some(document.clone());
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
