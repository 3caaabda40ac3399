//! Lightweight in-process metrics.
//!
//! Request, conflict, and store-error counters are kept as atomics and
//! rendered in Prometheus text format by the `/metrics` handler. They describe
//! this instance only; the visit count itself always lives in the store.

pub mod metrics;
