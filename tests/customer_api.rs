//! Customer API Tests
//!
//! Drives the full router (validation, service, store) over HTTP requests
//! against an in-memory store.
//!
//! Covers:
//! - Status codes and error bodies for every endpoint
//! - Alias uniqueness under case variants
//! - Partial-merge updates
//! - Round-trip agreement between write responses and later reads

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use customer_service::http_server::{CustomerState, HttpServer, HttpServerConfig};
use serde_json::{json, Value};
use tower::ServiceExt;

// =============================================================================
// Test Utilities
// =============================================================================

fn app() -> Router {
    let state = Arc::new(CustomerState::in_memory().expect("in-memory store"));
    HttpServer::new(HttpServerConfig::default(), state).router()
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create(app: &Router, name: &str, alias: &str, dob: &str) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/customers",
        Some(json!({"name": name, "alias": alias, "dob": dob})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {}", body);
    body
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "healthy"}));
}

// =============================================================================
// End-to-end scenario
// =============================================================================

#[tokio::test]
async fn test_customer_lifecycle() {
    let app = app();

    let created = create(&app, "Ann", "ann1", "1990-01-01").await;
    let id = created["id"].as_str().unwrap().to_string();
    assert!(!id.is_empty());
    assert_eq!(created["name"], "Ann");
    assert!(created["createdAt"].is_string());
    assert!(created.get("updatedAt").is_none());

    let (status, body) = send(
        &app,
        Method::POST,
        "/customers",
        Some(json!({"name": "Ann", "alias": "ann1", "dob": "1990-01-01"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body, json!({"error": "Customer with this alias already exists"}));

    let (status, found) = send(&app, Method::GET, "/customers/search?alias=ann1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found, created);

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/customers/{}", id),
        Some(json!({"dob": "1991-02-02"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["dob"], "1991-02-02");
    assert_eq!(updated["name"], "Ann");
    assert_eq!(updated["alias"], "ann1");
    assert_eq!(updated["createdAt"], created["createdAt"]);
    assert!(updated["updatedAt"].is_string());

    let (status, deleted) = send(&app, Method::DELETE, &format!("/customers/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["message"], "Customer deleted successfully");
    assert_eq!(deleted["customer"], updated);

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/customers/search?id={}", id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Customer not found"}));
}

// =============================================================================
// Create
// =============================================================================

#[tokio::test]
async fn test_create_requires_all_fields() {
    let app = app();

    for payload in [
        json!({"alias": "ann1", "dob": "1990-01-01"}),
        json!({"name": "Ann", "dob": "1990-01-01"}),
        json!({"name": "Ann", "alias": "ann1"}),
        json!({"name": "", "alias": "ann1", "dob": "1990-01-01"}),
        json!({"name": "Ann", "alias": null, "dob": "1990-01-01"}),
    ] {
        let (status, body) = send(&app, Method::POST, "/customers", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({"error": "Name, alias, and date of birth are required"})
        );
    }

    let (_, list) = send(&app, Method::GET, "/customers", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_create_rejects_malformed_body() {
    let app = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/customers")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].as_str().unwrap().starts_with("Invalid request body"));
}

#[tokio::test]
async fn test_duplicate_alias_any_case_conflicts() {
    let app = app();
    create(&app, "Ann", "ann1", "1990-01-01").await;

    for alias in ["ann1", "ANN1", "Ann1"] {
        let (status, _) = send(
            &app,
            Method::POST,
            "/customers",
            Some(json!({"name": "Other", "alias": alias, "dob": "2000-01-01"})),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    let (_, list) = send(&app, Method::GET, "/customers", None).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_created_ids_are_unique() {
    let app = app();
    let mut ids = Vec::new();
    for i in 0..20 {
        let created = create(&app, "Bulk", &format!("bulk{}", i), "2000-01-01").await;
        ids.push(created["id"].as_str().unwrap().to_string());
    }

    let mut unique = ids.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), ids.len());
}

// =============================================================================
// List & Search
// =============================================================================

#[tokio::test]
async fn test_list_in_insertion_order() {
    let app = app();
    let first = create(&app, "Ann", "ann1", "1990-01-01").await;
    let second = create(&app, "Bob", "bob", "1980-01-01").await;

    let (status, list) = send(&app, Method::GET, "/customers", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list, json!([first, second]));
}

#[tokio::test]
async fn test_search_requires_parameter() {
    let app = app();

    for uri in ["/customers/search", "/customers/search?id=", "/customers/search?other=1"] {
        let (status, body) = send(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(
            body,
            json!({"error": "At least one search parameter (id, name, or alias) is required"})
        );
    }
}

#[tokio::test]
async fn test_search_priority_and_case() {
    let app = app();
    let ann = create(&app, "Ann", "ann1", "1990-01-01").await;
    let bob = create(&app, "Bob", "bob", "1980-01-01").await;
    let ann_id = ann["id"].as_str().unwrap();

    // id wins over alias and name
    let uri = format!("/customers/search?id={}&alias=bob&name=Bob", ann_id);
    let (_, found) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(found, ann);

    // alias wins over name
    let (_, found) = send(&app, Method::GET, "/customers/search?alias=BOB&name=Ann", None).await;
    assert_eq!(found, bob);

    let (status, found) = send(&app, Method::GET, "/customers/search?name=ann", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found, ann);

    // a missing id is not rescued by a matching alias
    let (status, _) = send(
        &app,
        Method::GET,
        "/customers/search?id=missing&alias=ann1",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Update
// =============================================================================

#[tokio::test]
async fn test_update_without_fields_is_rejected() {
    let app = app();
    let ann = create(&app, "Ann", "ann1", "1990-01-01").await;
    let uri = format!("/customers/{}", ann["id"].as_str().unwrap());

    for payload in [json!({}), json!({"email": "ann@example.com"}), json!({"name": null})] {
        let (status, body) = send(&app, Method::PUT, &uri, Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "At least one field to update is required"}));
    }

    let (_, list) = send(&app, Method::GET, "/customers", None).await;
    assert_eq!(list, json!([ann]));
}

#[tokio::test]
async fn test_update_rejects_empty_value() {
    let app = app();
    let ann = create(&app, "Ann", "ann1", "1990-01-01").await;
    let uri = format!("/customers/{}", ann["id"].as_str().unwrap());

    let (status, _) = send(&app, Method::PUT, &uri, Some(json!({"alias": ""}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, found) = send(&app, Method::GET, "/customers/search?alias=ann1", None).await;
    assert_eq!(found, ann);
}

#[tokio::test]
async fn test_update_partial_merge() {
    let app = app();
    let ann = create(&app, "Ann", "ann1", "1990-01-01").await;
    let uri = format!("/customers/{}", ann["id"].as_str().unwrap());

    send(&app, Method::PUT, &uri, Some(json!({"name": "Anna"}))).await;
    let (status, updated) = send(&app, Method::PUT, &uri, Some(json!({"dob": "1991-02-02"}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], ann["id"]);
    assert_eq!(updated["name"], "Anna");
    assert_eq!(updated["alias"], "ann1");
    assert_eq!(updated["dob"], "1991-02-02");

    let (_, list) = send(&app, Method::GET, "/customers", None).await;
    assert_eq!(list, json!([updated]));
}

#[tokio::test]
async fn test_update_alias_rules() {
    let app = app();
    let ann = create(&app, "Ann", "ann1", "1990-01-01").await;
    create(&app, "Bob", "bob", "1980-01-01").await;
    let uri = format!("/customers/{}", ann["id"].as_str().unwrap());

    let (status, body) = send(&app, Method::PUT, &uri, Some(json!({"alias": "BOB"}))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body, json!({"error": "Customer with this alias already exists"}));

    // re-casing your own alias is not a conflict
    let (status, updated) = send(&app, Method::PUT, &uri, Some(json!({"alias": "Ann1"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["alias"], "Ann1");
}

#[tokio::test]
async fn test_update_unknown_id() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::PUT,
        "/customers/does-not-exist",
        Some(json!({"name": "Ghost"})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Customer not found"}));
}

// =============================================================================
// Delete
// =============================================================================

#[tokio::test]
async fn test_delete_unknown_id_is_not_found() {
    let app = app();
    let ann = create(&app, "Ann", "ann1", "1990-01-01").await;
    let uri = format!("/customers/{}", ann["id"].as_str().unwrap());

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);

    for _ in 0..2 {
        let (status, body) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Customer not found"}));
    }
}

#[tokio::test]
async fn test_deleted_alias_can_be_reused() {
    let app = app();
    let ann = create(&app, "Ann", "ann1", "1990-01-01").await;
    send(
        &app,
        Method::DELETE,
        &format!("/customers/{}", ann["id"].as_str().unwrap()),
        None,
    )
    .await;

    let again = create(&app, "Ann", "ANN1", "1990-01-01").await;
    assert_ne!(again["id"], ann["id"]);
}

// =============================================================================
// Transport
// =============================================================================

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let app = app();
    let request = Request::builder()
        .method(Method::GET)
        .uri("/customers")
        .header(header::ORIGIN, "http://example.com")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}
