//! Persisted documents.
//!
//! - `counter`: the singleton visit counter.
//! - `contact`: contact form input and the append-only message record.

pub mod contact;
pub mod counter;

pub use contact::{ContactMessage, ContactRequest, ValidContact};
pub use counter::Counter;
