//! # Customer Registry
//!
//! Create, look up, update and delete customer records.
//!
//! # Layers
//!
//! - [`CustomerService`]: alias/existence rules and partial-merge updates
//! - [`CustomerRepository`]: persistence seam, implemented by [`CustomerStore`]
//! - [`DocumentBackend`]: where the document lives ([`JsonFileBackend`],
//!   [`MemoryBackend`])
//!
//! # Invariants
//!
//! - Aliases are unique across all records, compared case-insensitively
//! - Ids are unique and never change after creation
//! - The backend holds the whole collection after every successful mutation

pub mod backend;
pub mod errors;
pub mod model;
pub mod service;
pub mod store;

pub use backend::{DocumentBackend, JsonFileBackend, MemoryBackend, DEFAULT_DATA_FILE};
pub use errors::{CustomerError, CustomerResult, ErrorResponse, StoreError, StoreResult};
pub use model::{
    Customer, CustomerDocument, CustomerDraft, CustomerPayload, SearchBy, SearchQuery,
};
pub use service::CustomerService;
pub use store::{CustomerRepository, CustomerStore};
