//! # Customer Store
//!
//! The repository seam and its document-backed implementation.
//!
//! The store owns the working copy of every customer, loaded once from a
//! [`DocumentBackend`] at open. Lookups are linear scans. Every mutation
//! writes the entire collection back to the backend before it becomes
//! visible in memory.

use std::sync::RwLock;

use chrono::Utc;

use super::backend::DocumentBackend;
use super::errors::{StoreError, StoreResult};
use super::model::{Customer, CustomerDocument, CustomerDraft};

/// Customer repository trait
///
/// Abstracts storage operations for customers.
pub trait CustomerRepository: Send + Sync {
    /// All customers in insertion order
    fn find_all(&self) -> StoreResult<Vec<Customer>>;

    /// Find a customer by exact id
    fn find_by_id(&self, id: &str) -> StoreResult<Option<Customer>>;

    /// Find a customer by alias (case-insensitive)
    fn find_by_alias(&self, alias: &str) -> StoreResult<Option<Customer>>;

    /// Find the first customer with this name (case-insensitive)
    fn find_by_name(&self, name: &str) -> StoreResult<Option<Customer>>;

    /// Insert when the draft has no id, otherwise merge into the record
    /// with that id. Fails with `AliasTaken` if another record holds the
    /// alias.
    fn save(&self, draft: CustomerDraft) -> StoreResult<Customer>;

    /// Remove a customer, returning the removed record
    fn delete_by_id(&self, id: &str) -> StoreResult<Option<Customer>>;
}

#[derive(Debug, Default)]
struct StoreState {
    customers: Vec<Customer>,
    /// Highest numeric id handed out or loaded
    last_id: u64,
}

impl StoreState {
    fn from_document(document: CustomerDocument) -> Self {
        let last_id = document
            .customers
            .iter()
            .filter_map(|c| c.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        Self {
            customers: document.customers,
            last_id,
        }
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.customers.iter().position(|c| c.id == id)
    }

    /// Millisecond timestamp id, bumped past any id already in use.
    ///
    /// When `last_id` is already `u64::MAX` the search restarts from the
    /// clock, so a loaded document holding the largest id cannot stop
    /// inserts.
    fn next_id(&mut self) -> StoreResult<String> {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        let mut candidate = match self.last_id.checked_add(1) {
            Some(floor) => now.max(floor),
            None => now,
        };
        while self.position(&candidate.to_string()).is_some() {
            candidate = candidate
                .checked_add(1)
                .ok_or(StoreError::IdsExhausted)?;
        }
        self.last_id = candidate;
        Ok(candidate.to_string())
    }

    fn alias_held_by_other(&self, alias: &str, own_id: Option<&str>) -> bool {
        self.customers
            .iter()
            .any(|c| c.has_alias(alias) && Some(c.id.as_str()) != own_id)
    }
}

/// Document-backed customer store
#[derive(Debug)]
pub struct CustomerStore<B: DocumentBackend> {
    backend: B,
    state: RwLock<StoreState>,
}

impl<B: DocumentBackend> CustomerStore<B> {
    /// Load the store from `backend`. An empty backend is initialised with
    /// an empty document, which is persisted immediately.
    pub fn open(backend: B) -> StoreResult<Self> {
        let state = match backend.load()? {
            Some(document) => {
                tracing::info!(
                    event = crate::observability::Event::StoreLoaded.as_str(),
                    location = %backend.describe(),
                    customers = document.customers.len(),
                    "customer document loaded"
                );
                StoreState::from_document(document)
            }
            None => {
                backend.persist(&CustomerDocument::default())?;
                tracing::info!(
                    event = crate::observability::Event::StoreCreated.as_str(),
                    location = %backend.describe(),
                    "created empty customer document"
                );
                StoreState::default()
            }
        };

        Ok(Self {
            backend,
            state: RwLock::new(state),
        })
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn len(&self) -> StoreResult<usize> {
        let state = self.state.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(state.customers.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }

    fn find<P>(&self, predicate: P) -> StoreResult<Option<Customer>>
    where
        P: Fn(&Customer) -> bool,
    {
        let state = self.state.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(state.customers.iter().find(|c| predicate(c)).cloned())
    }

    /// Write `customers` to the backend, then make them the working copy
    fn commit(&self, state: &mut StoreState, customers: Vec<Customer>) -> StoreResult<()> {
        let document = CustomerDocument { customers };
        self.backend.persist(&document)?;
        state.customers = document.customers;
        Ok(())
    }
}

impl<B: DocumentBackend> CustomerRepository for CustomerStore<B> {
    fn find_all(&self) -> StoreResult<Vec<Customer>> {
        let state = self.state.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(state.customers.clone())
    }

    fn find_by_id(&self, id: &str) -> StoreResult<Option<Customer>> {
        self.find(|c| c.id == id)
    }

    fn find_by_alias(&self, alias: &str) -> StoreResult<Option<Customer>> {
        self.find(|c| c.has_alias(alias))
    }

    fn find_by_name(&self, name: &str) -> StoreResult<Option<Customer>> {
        self.find(|c| c.has_name(name))
    }

    fn save(&self, draft: CustomerDraft) -> StoreResult<Customer> {
        let mut state = self.state.write().map_err(|_| StoreError::LockPoisoned)?;

        if state.alias_held_by_other(&draft.alias, draft.id.as_deref()) {
            return Err(StoreError::AliasTaken(draft.alias));
        }

        let now = Utc::now();
        let mut customers = state.customers.clone();

        let existing_index = draft.id.as_deref().and_then(|id| state.position(id));
        let saved = match existing_index {
            Some(index) => {
                let existing = &mut customers[index];
                existing.name = draft.name;
                existing.alias = draft.alias;
                existing.dob = draft.dob;
                existing.updated_at = Some(now);
                existing.clone()
            }
            None => {
                let id = match draft.id {
                    Some(id) => id,
                    None => state.next_id()?,
                };
                let customer = Customer {
                    id,
                    name: draft.name,
                    alias: draft.alias,
                    dob: draft.dob,
                    created_at: now,
                    updated_at: None,
                };
                customers.push(customer.clone());
                customer
            }
        };

        self.commit(&mut state, customers)?;
        Ok(saved)
    }

    fn delete_by_id(&self, id: &str) -> StoreResult<Option<Customer>> {
        let mut state = self.state.write().map_err(|_| StoreError::LockPoisoned)?;

        let Some(index) = state.position(id) else {
            return Ok(None);
        };

        let mut customers = state.customers.clone();
        let removed = customers.remove(index);
        self.commit(&mut state, customers)?;
        Ok(Some(removed))
    }
}
