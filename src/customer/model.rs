//! # Customer Model
//!
//! The customer record, the persisted document wrapping it, and the
//! request-side shapes used to create, update and look up customers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Customer record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// System-generated identifier, immutable after creation
    pub id: String,

    pub name: String,

    /// Globally unique handle (case-insensitive)
    pub alias: String,

    /// Date of birth, stored verbatim
    pub dob: String,

    pub created_at: DateTime<Utc>,

    /// Absent until the first successful update
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Customer {
    /// Case-insensitive alias comparison
    pub fn has_alias(&self, alias: &str) -> bool {
        self.alias.to_lowercase() == alias.to_lowercase()
    }

    /// Case-insensitive name comparison
    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

/// The backing document: the entire durable state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDocument {
    #[serde(default)]
    pub customers: Vec<Customer>,
}

/// Record handed to the repository for saving.
///
/// Without an id the repository inserts a new record; with one it merges
/// into the stored record carrying that id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerDraft {
    pub id: Option<String>,
    pub name: String,
    pub alias: String,
    pub dob: String,
}

impl CustomerDraft {
    pub fn new(name: impl Into<String>, alias: impl Into<String>, dob: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            alias: alias.into(),
            dob: dob.into(),
        }
    }
}

impl From<&Customer> for CustomerDraft {
    fn from(customer: &Customer) -> Self {
        Self {
            id: Some(customer.id.clone()),
            name: customer.name.clone(),
            alias: customer.alias.clone(),
            dob: customer.dob.clone(),
        }
    }
}

/// Request body for create and update.
///
/// An absent key and an explicit `null` both deserialize to `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dob: Option<String>,
}

impl CustomerPayload {
    /// True when none of the recognized fields was supplied
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.alias.is_none() && self.dob.is_none()
    }

    /// Names of the supplied fields whose value is blank
    pub fn blank_fields(&self) -> Vec<&'static str> {
        [
            ("name", &self.name),
            ("alias", &self.alias),
            ("dob", &self.dob),
        ]
        .into_iter()
        .filter(|(_, value)| value.as_deref().is_some_and(|v| v.trim().is_empty()))
        .map(|(field, _)| field)
        .collect()
    }

    /// Partial merge: copy supplied fields over `existing`, keep the rest
    pub fn merge_into(&self, existing: &Customer) -> CustomerDraft {
        let mut draft = CustomerDraft::from(existing);
        if let Some(name) = &self.name {
            draft.name = name.clone();
        }
        if let Some(alias) = &self.alias {
            draft.alias = alias.clone();
        }
        if let Some(dob) = &self.dob {
            draft.dob = dob.clone();
        }
        draft
    }
}

/// Query string for `GET /customers/search`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub alias: Option<String>,
}

/// A single resolved lookup key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchBy {
    Id(String),
    Alias(String),
    Name(String),
}

impl SearchQuery {
    /// Pick the lookup key: id, then alias, then name. Empty values count
    /// as absent.
    pub fn criterion(&self) -> Option<SearchBy> {
        fn present(value: &Option<String>) -> Option<String> {
            value.as_ref().filter(|v| !v.is_empty()).cloned()
        }

        present(&self.id)
            .map(SearchBy::Id)
            .or_else(|| present(&self.alias).map(SearchBy::Alias))
            .or_else(|| present(&self.name).map(SearchBy::Name))
    }
}
