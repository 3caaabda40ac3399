//! Resume API library entry.
//!
//! This crate wires config, the document store, the counter adapter, the HTTP
//! endpoints, and metrics into one axum service. It is consumed by the binary
//! (`main.rs`) and by integration tests.

pub mod api;
pub mod app_state;
pub mod config;
pub mod obs;
pub mod ops;
pub mod router;
pub mod store;
