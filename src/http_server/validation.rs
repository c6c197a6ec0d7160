//! Request validation
//!
//! Required fields and parameter combinations are checked here, before a
//! request reaches the customer service.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::Query;
use axum::Json;

use crate::customer::{
    CustomerDraft, CustomerError, CustomerPayload, CustomerResult, SearchBy, SearchQuery,
};

pub const MISSING_CREATE_FIELDS: &str = "Name, alias, and date of birth are required";
pub const MISSING_UPDATE_FIELDS: &str = "At least one field to update is required";
pub const MISSING_SEARCH_PARAMS: &str =
    "At least one search parameter (id, name, or alias) is required";

/// Create needs every field, each non-blank
pub fn validate_create(payload: &CustomerPayload) -> CustomerResult<CustomerDraft> {
    fn required(value: &Option<String>) -> Option<&str> {
        value.as_deref().filter(|v| !v.trim().is_empty())
    }

    match (
        required(&payload.name),
        required(&payload.alias),
        required(&payload.dob),
    ) {
        (Some(name), Some(alias), Some(dob)) => Ok(CustomerDraft::new(name, alias, dob)),
        _ => Err(CustomerError::validation(MISSING_CREATE_FIELDS)),
    }
}

/// Update needs at least one field; supplied fields must be non-blank
pub fn validate_update(payload: &CustomerPayload) -> CustomerResult<()> {
    if payload.is_empty() {
        return Err(CustomerError::validation(MISSING_UPDATE_FIELDS));
    }

    let blank = payload.blank_fields();
    if !blank.is_empty() {
        return Err(CustomerError::validation(format!(
            "Fields must not be empty: {}",
            blank.join(", ")
        )));
    }

    Ok(())
}

/// Search needs at least one non-empty parameter
pub fn validate_search(query: &SearchQuery) -> CustomerResult<SearchBy> {
    query
        .criterion()
        .ok_or_else(|| CustomerError::validation(MISSING_SEARCH_PARAMS))
}

/// Unwrap a JSON body, reporting rejections as validation errors
pub fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> CustomerResult<T> {
    body.map(|Json(value)| value).map_err(|rejection| {
        CustomerError::validation(format!("Invalid request body: {}", rejection.body_text()))
    })
}

/// Unwrap a query string, reporting rejections as validation errors
pub fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> CustomerResult<T> {
    query.map(|Query(value)| value).map_err(|rejection| {
        CustomerError::validation(format!("Invalid query string: {}", rejection.body_text()))
    })
}
