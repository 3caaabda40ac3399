//! Shared application state for the resume API.
//!
//! Holds the config, the document store handle, the counter adapter, and the
//! metrics registry. Nothing here caches counter values.

use std::sync::Arc;
use std::time::{Duration, Instant};

use resume_core::error::Result;

use crate::config::ApiConfig;
use crate::obs::metrics::ApiMetrics;
use crate::store::{CounterSettings, CounterStore, DocumentStore, MemoryStore};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    counter: Arc<CounterStore>,
    metrics: Arc<ApiMetrics>,
}

struct AppStateInner {
    cfg: ApiConfig,
    store: Arc<dyn DocumentStore>,
    started: Instant,
}

impl AppState {
    /// Wire state around an existing store.
    pub fn with_store(cfg: ApiConfig, store: Arc<dyn DocumentStore>) -> Self {
        let metrics = Arc::new(ApiMetrics::new());
        let counter = CounterStore::new(Arc::clone(&store), CounterSettings::from(&cfg.store))
            .with_metrics(Arc::clone(&metrics));

        Self {
            inner: Arc::new(AppStateInner {
                cfg,
                store,
                started: Instant::now(),
            }),
            counter: Arc::new(counter),
            metrics,
        }
    }

    /// Build state on the in-process store and provision the counter when a
    /// seed is configured.
    /// Returns Result so main can handle errors gracefully (no panic).
    pub async fn bootstrap(cfg: ApiConfig) -> Result<Self> {
        let seed = cfg.store.seed_count;
        let state = Self::with_store(cfg, Arc::new(MemoryStore::new()));

        match seed {
            Some(seed) => {
                state.counter.provision(seed).await?;
            }
            None => {
                tracing::warn!(
                    id = %state.cfg().store.counter_id,
                    "store.seed_count not set; counter must be provisioned out of band"
                );
            }
        }

        Ok(state)
    }

    pub fn cfg(&self) -> &ApiConfig {
        &self.inner.cfg
    }

    pub fn store(&self) -> &dyn DocumentStore {
        self.inner.store.as_ref()
    }

    pub fn counter(&self) -> Arc<CounterStore> {
        Arc::clone(&self.counter)
    }

    pub fn metrics(&self) -> Arc<ApiMetrics> {
        Arc::clone(&self.metrics)
    }

    pub fn uptime(&self) -> Duration {
        self.inner.started.elapsed()
    }
}
