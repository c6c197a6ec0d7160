//! customer_service - A customer registry served over HTTP
//!
//! Records live in memory and are mirrored to a single JSON document that
//! is rewritten after every mutation.

pub mod cli;
pub mod customer;
pub mod http_server;
pub mod observability;
