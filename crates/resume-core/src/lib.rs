//! Resume core: runtime-free domain records and the shared error surface.
//!
//! This crate defines the counter and contact-message documents and the error
//! taxonomy shared by the API service and its tests. It carries no transport or
//! runtime dependencies so the records can be reused by provisioning tools.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `ResumeError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod model;

/// Shared result type.
pub use error::{Result, ResumeError};
