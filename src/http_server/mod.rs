//! # HTTP Server Module
//!
//! HTTP API for the customer registry, built on Axum.
//!
//! # Endpoints
//!
//! - `GET /health` - Liveness
//! - `POST /customers` - Create
//! - `GET /customers` - List all
//! - `GET /customers/search?id=|name=|alias=` - Lookup
//! - `PUT /customers/:id` - Partial update
//! - `DELETE /customers/:id` - Remove
//!
//! Errors are returned as `{"error": "<message>"}`. Any origin may call the
//! API unless `cors_origins` restricts it.

pub mod config;
pub mod customer_routes;
pub mod health_routes;
pub mod server;
pub mod validation;

pub use config::HttpServerConfig;
pub use customer_routes::CustomerState;
pub use server::{build_router, HttpServer};
