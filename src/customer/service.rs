//! # Customer Service
//!
//! Orchestrates lookups and merge-style updates over a
//! [`CustomerRepository`]. Input validation happens at the HTTP boundary;
//! this layer only enforces the alias and existence rules.

use std::sync::{Arc, Mutex, MutexGuard};

use super::errors::{CustomerError, CustomerResult, StoreError};
use super::model::{Customer, CustomerDraft, CustomerPayload, SearchBy};
use super::store::CustomerRepository;
use crate::observability::Event;

/// Customer service over a shared repository
pub struct CustomerService<R: CustomerRepository + ?Sized> {
    repo: Arc<R>,
    /// Serialises read-merge-save sequences
    writer: Mutex<()>,
}

impl<R: CustomerRepository> CustomerService<R> {
    pub fn new(repo: R) -> Self {
        Self::with_shared(Arc::new(repo))
    }
}

impl<R: CustomerRepository + ?Sized> CustomerService<R> {
    pub fn with_shared(repo: Arc<R>) -> Self {
        Self {
            repo,
            writer: Mutex::new(()),
        }
    }

    fn lock_writer(&self) -> CustomerResult<MutexGuard<'_, ()>> {
        self.writer
            .lock()
            .map_err(|_| CustomerError::from(StoreError::LockPoisoned))
    }

    pub fn list(&self) -> CustomerResult<Vec<Customer>> {
        Ok(self.repo.find_all()?)
    }

    pub fn get_by_id(&self, id: &str) -> CustomerResult<Option<Customer>> {
        Ok(self.repo.find_by_id(id)?)
    }

    pub fn get_by_alias(&self, alias: &str) -> CustomerResult<Option<Customer>> {
        Ok(self.repo.find_by_alias(alias)?)
    }

    pub fn get_by_name(&self, name: &str) -> CustomerResult<Option<Customer>> {
        Ok(self.repo.find_by_name(name)?)
    }

    /// Resolve a single lookup key, `NotFound` if nothing matches
    pub fn find(&self, criterion: &SearchBy) -> CustomerResult<Customer> {
        let found = match criterion {
            SearchBy::Id(id) => self.get_by_id(id)?,
            SearchBy::Alias(alias) => self.get_by_alias(alias)?,
            SearchBy::Name(name) => self.get_by_name(name)?,
        };

        tracing::debug!(
            event = Event::SearchRequested.as_str(),
            criterion = ?criterion,
            found = found.as_ref().map(|c| c.id.as_str()).unwrap_or(""),
            "customer search"
        );

        found.ok_or(CustomerError::NotFound)
    }

    /// Create a customer; `Conflict` if the alias is taken
    pub fn create(&self, draft: CustomerDraft) -> CustomerResult<Customer> {
        let _guard = self.lock_writer()?;

        if self.repo.find_by_alias(&draft.alias)?.is_some() {
            tracing::info!(
                event = Event::CustomerConflict.as_str(),
                alias = %draft.alias,
                "alias already taken"
            );
            return Err(CustomerError::Conflict);
        }

        let created = self.repo.save(CustomerDraft { id: None, ..draft })?;
        tracing::info!(
            event = Event::CustomerCreated.as_str(),
            id = %created.id,
            alias = %created.alias,
            "customer created"
        );
        Ok(created)
    }

    /// Partial update: fields absent from `patch` keep their value.
    ///
    /// Alias conflicts are reported before a missing target.
    pub fn update(&self, id: &str, patch: &CustomerPayload) -> CustomerResult<Customer> {
        let _guard = self.lock_writer()?;

        if let Some(alias) = &patch.alias {
            if let Some(holder) = self.repo.find_by_alias(alias)? {
                if holder.id != id {
                    tracing::info!(
                        event = Event::CustomerConflict.as_str(),
                        alias = %alias,
                        holder = %holder.id,
                        "alias already taken"
                    );
                    return Err(CustomerError::Conflict);
                }
            }
        }

        let existing = self.repo.find_by_id(id)?.ok_or(CustomerError::NotFound)?;
        let updated = self.repo.save(patch.merge_into(&existing))?;
        tracing::info!(
            event = Event::CustomerUpdated.as_str(),
            id = %updated.id,
            "customer updated"
        );
        Ok(updated)
    }

    /// Delete a customer, returning the removed record
    pub fn delete(&self, id: &str) -> CustomerResult<Customer> {
        let _guard = self.lock_writer()?;

        let removed = self.repo.delete_by_id(id)?.ok_or(CustomerError::NotFound)?;
        tracing::info!(
            event = Event::CustomerDeleted.as_str(),
            id = %removed.id,
            "customer deleted"
        );
        Ok(removed)
    }
}
