//! Document store abstraction.
//!
//! The service never keeps counter state in process memory; every read and
//! write goes through a `DocumentStore`. Writes to existing documents are
//! conditional on the version token (`ETag`) returned by the last read, which
//! is what makes the counter's read-modify-write safe across instances.

pub mod counter;
pub mod memory;

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use resume_core::error::{Result, ResumeError};

pub use counter::{CounterSettings, CounterStore};
pub use memory::MemoryStore;

/// Opaque version token. Changes on every successful write.
pub type ETag = u64;

/// A document together with the version it was read at.
#[derive(Debug, Clone)]
pub struct Versioned<T> {
    pub etag: ETag,
    pub doc: T,
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read a document and its current version. `Ok(None)` if absent.
    async fn read(&self, collection: &str, id: &str) -> Result<Option<Versioned<Value>>>;

    /// Insert a new document. `Conflict` if the id is already taken.
    async fn create(&self, collection: &str, id: &str, doc: Value) -> Result<ETag>;

    /// Overwrite a document only if its version still equals `if_match`.
    /// `NotFound` if absent, `Conflict` on version mismatch.
    async fn replace(&self, collection: &str, id: &str, doc: Value, if_match: ETag)
        -> Result<ETag>;

    /// Connectivity probe. Must not mutate.
    async fn ping(&self) -> Result<()>;
}

/// Bound a store round-trip; an expired deadline surfaces as `StoreUnavailable`.
pub async fn with_timeout<T, F>(timeout: Duration, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    tokio::time::timeout(timeout, fut).await.map_err(|_| {
        ResumeError::StoreUnavailable(format!(
            "store round-trip exceeded {}ms",
            timeout.as_millis()
        ))
    })?
}
