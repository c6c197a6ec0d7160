//! Customer HTTP Routes
//!
//! CRUD and lookup endpoints over the customer service.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::Serialize;

use super::validation::{
    json_body, query_params, validate_create, validate_search, validate_update,
};
use crate::customer::{
    Customer, CustomerError, CustomerPayload, CustomerRepository, CustomerService, CustomerStore,
    MemoryBackend, SearchQuery, StoreResult,
};

// ==================
// Shared State
// ==================

/// Customer state shared across handlers
pub struct CustomerState {
    pub service: CustomerService<dyn CustomerRepository>,
}

impl CustomerState {
    pub fn new(repo: Arc<dyn CustomerRepository>) -> Self {
        Self {
            service: CustomerService::with_shared(repo),
        }
    }

    /// State over a fresh in-memory store
    pub fn in_memory() -> StoreResult<Self> {
        let store = CustomerStore::open(MemoryBackend::new())?;
        Ok(Self::new(Arc::new(store)))
    }
}

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
    pub customer: Customer,
}

// ==================
// Customer Routes
// ==================

/// Create customer routes
pub fn customer_routes(state: Arc<CustomerState>) -> Router {
    Router::new()
        .route(
            "/customers",
            get(list_customers_handler).post(create_customer_handler),
        )
        .route("/customers/search", get(search_customer_handler))
        .route(
            "/customers/:id",
            put(update_customer_handler).delete(delete_customer_handler),
        )
        .with_state(state)
}

// ==================
// Handlers
// ==================

async fn create_customer_handler(
    State(state): State<Arc<CustomerState>>,
    body: Result<Json<CustomerPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Customer>), CustomerError> {
    let payload = json_body(body)?;
    let draft = validate_create(&payload)?;

    let created = state.service.create(draft)?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn list_customers_handler(
    State(state): State<Arc<CustomerState>>,
) -> Result<Json<Vec<Customer>>, CustomerError> {
    Ok(Json(state.service.list()?))
}

async fn search_customer_handler(
    State(state): State<Arc<CustomerState>>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<Customer>, CustomerError> {
    let query = query_params(query)?;
    let criterion = validate_search(&query)?;

    Ok(Json(state.service.find(&criterion)?))
}

async fn update_customer_handler(
    State(state): State<Arc<CustomerState>>,
    Path(id): Path<String>,
    body: Result<Json<CustomerPayload>, JsonRejection>,
) -> Result<Json<Customer>, CustomerError> {
    let patch = json_body(body)?;
    validate_update(&patch)?;

    Ok(Json(state.service.update(&id, &patch)?))
}

async fn delete_customer_handler(
    State(state): State<Arc<CustomerState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, CustomerError> {
    let customer = state.service.delete(&id)?;

    Ok(Json(DeleteResponse {
        message: "Customer deleted successfully".to_string(),
        customer,
    }))
}
