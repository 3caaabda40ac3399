//! Counter store adapter: atomic increment of the singleton visit counter.
//!
//! Each attempt reads the record with its ETag, writes `count + 1` back
//! conditionally on that ETag, and starts over on a version conflict. The
//! number of attempts is bounded; there is no unconditional write path.

use std::sync::Arc;
use std::time::Duration;

use resume_core::error::{Result, ResumeError};
use resume_core::model::Counter;

use super::{with_timeout, DocumentStore, Versioned};
use crate::config::StoreSection;
use crate::obs::metrics::ApiMetrics;

/// Where the counter lives and how hard to try.
#[derive(Debug, Clone)]
pub struct CounterSettings {
    pub collection: String,
    pub id: String,
    pub max_attempts: u32,
    pub timeout: Duration,
}

impl From<&StoreSection> for CounterSettings {
    fn from(s: &StoreSection) -> Self {
        Self {
            collection: s.counter_collection.clone(),
            id: s.counter_id.clone(),
            max_attempts: s.max_attempts.max(1),
            timeout: s.timeout(),
        }
    }
}

pub struct CounterStore {
    store: Arc<dyn DocumentStore>,
    settings: CounterSettings,
    metrics: Option<Arc<ApiMetrics>>,
}

impl CounterStore {
    pub fn new(store: Arc<dyn DocumentStore>, settings: CounterSettings) -> Self {
        Self {
            store,
            settings,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<ApiMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Record one visit and return the counter as persisted.
    pub async fn increment(&self) -> Result<Counter> {
        let max = self.settings.max_attempts.max(1);

        for attempt in 1..=max {
            let current = self.read_versioned().await?.ok_or_else(|| {
                ResumeError::NotFound(format!(
                    "counter {}/{} is not provisioned",
                    self.settings.collection, self.settings.id
                ))
            })?;

            let next = current.doc.incremented()?;
            let write = self.store.replace(
                &self.settings.collection,
                &self.settings.id,
                next.to_document()?,
                current.etag,
            );

            match with_timeout(self.settings.timeout, write).await {
                Ok(_) => {
                    tracing::debug!(count = next.count, attempt, "counter incremented");
                    return Ok(next);
                }
                Err(ResumeError::Conflict(reason)) => {
                    tracing::debug!(attempt, max, %reason, "counter write conflict, retrying");
                    if let Some(m) = &self.metrics {
                        m.counter_conflicts.inc(&[]);
                    }
                }
                Err(e) => return Err(e),
            }
        }

        tracing::warn!(attempts = max, id = %self.settings.id, "counter retry budget exhausted");
        Err(ResumeError::Conflict(format!(
            "counter {} still contended after {max} attempts",
            self.settings.id
        )))
    }

    /// Read the counter without changing it.
    pub async fn current(&self) -> Result<Option<Counter>> {
        Ok(self.read_versioned().await?.map(|v| v.doc))
    }

    /// Create the counter with `seed` unless it already exists. The existing
    /// record is returned untouched in that case.
    pub async fn provision(&self, seed: u64) -> Result<Counter> {
        let counter = Counter::new(self.settings.id.clone(), seed);
        let create = self.store.create(
            &self.settings.collection,
            &self.settings.id,
            counter.to_document()?,
        );

        match with_timeout(self.settings.timeout, create).await {
            Ok(_) => {
                tracing::info!(id = %counter.id, count = seed, "counter provisioned");
                Ok(counter)
            }
            Err(ResumeError::Conflict(_)) => {
                let existing = self.current().await?.ok_or_else(|| {
                    ResumeError::Internal("counter vanished during provisioning".into())
                })?;
                tracing::info!(id = %existing.id, count = existing.count, "counter already provisioned");
                Ok(existing)
            }
            Err(e) => Err(e),
        }
    }

    async fn read_versioned(&self) -> Result<Option<Versioned<Counter>>> {
        let read = self
            .store
            .read(&self.settings.collection, &self.settings.id);

        match with_timeout(self.settings.timeout, read).await? {
            Some(v) => Ok(Some(Versioned {
                etag: v.etag,
                doc: Counter::from_document(v.doc)?,
            })),
            None => Ok(None),
        }
    }
}
