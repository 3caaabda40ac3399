//! Counter store adapter: increment semantics, concurrency, retry bound, timeout.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use resume_api::store::{CounterSettings, CounterStore, DocumentStore, ETag, MemoryStore, Versioned};
use resume_core::error::{Result, ResumeError};
use resume_core::model::Counter;

const COLLECTION: &str = "Counter";
const ID: &str = "index";

fn settings(max_attempts: u32) -> CounterSettings {
    CounterSettings {
        collection: COLLECTION.into(),
        id: ID.into(),
        max_attempts,
        timeout: Duration::from_millis(500),
    }
}

async fn seeded(count: u64) -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    store
        .create(COLLECTION, ID, json!({ "id": ID, "count": count }))
        .await
        .unwrap();
    store
}

async fn persisted(store: &MemoryStore) -> u64 {
    let doc = store.read(COLLECTION, ID).await.unwrap().unwrap().doc;
    doc["count"].as_u64().unwrap()
}

#[tokio::test]
async fn increments_from_seed_and_persists() {
    let store = seeded(2).await;
    let counter = CounterStore::new(store.clone(), settings(5));

    let c = counter.increment().await.unwrap();
    assert_eq!(c, Counter::new("index", 3));
    assert_eq!(persisted(&store).await, 3);

    counter.increment().await.unwrap();
    let c = counter.increment().await.unwrap();
    assert_eq!(c.count, 5);
    assert_eq!(persisted(&store).await, 5);
}

#[tokio::test]
async fn observed_counts_never_decrease() {
    let store = seeded(0).await;
    let counter = CounterStore::new(store, settings(5));

    let mut last = 0;
    for _ in 0..20 {
        let c = counter.increment().await.unwrap();
        assert!(c.count > last);
        last = c.count;
    }
    assert_eq!(last, 20);
}

#[tokio::test]
async fn missing_record_is_not_found_and_writes_nothing() {
    let store = Arc::new(MemoryStore::new());
    let counter = CounterStore::new(store.clone(), settings(5));

    let err = counter.increment().await.expect_err("not provisioned");
    assert!(matches!(err, ResumeError::NotFound(_)));
    assert!(store.read(COLLECTION, ID).await.unwrap().is_none());
    assert!(store.is_empty(COLLECTION));
}

#[tokio::test]
async fn two_concurrent_increments_both_land() {
    let store = seeded(7).await;
    let counter = Arc::new(CounterStore::new(store.clone(), settings(5)));

    let (a, b) = tokio::join!(counter.increment(), counter.increment());
    let mut got = [a.unwrap().count, b.unwrap().count];
    got.sort();
    assert_eq!(got, [8, 9]);
    assert_eq!(persisted(&store).await, 9);
}

#[tokio::test]
async fn fifty_concurrent_increments_single_thread() {
    let store = seeded(0).await;
    // Each conflict a caller sees means another caller committed, so K callers
    // with a budget of K attempts all succeed.
    let counter = Arc::new(CounterStore::new(store.clone(), settings(50)));

    let handles: Vec<_> = (0..50)
        .map(|_| {
            let counter = Arc::clone(&counter);
            tokio::spawn(async move { counter.increment().await })
        })
        .collect();

    let mut seen = Vec::new();
    for h in handles {
        seen.push(h.await.unwrap().unwrap().count);
    }
    seen.sort();
    assert_eq!(seen, (1..=50).collect::<Vec<u64>>());
    assert_eq!(persisted(&store).await, 50);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn fifty_concurrent_increments_multi_thread() {
    let store = seeded(0).await;
    let counter = Arc::new(CounterStore::new(store.clone(), settings(50)));

    let handles: Vec<_> = (0..50)
        .map(|_| {
            let counter = Arc::clone(&counter);
            tokio::spawn(async move { counter.increment().await })
        })
        .collect();

    for h in handles {
        h.await.unwrap().unwrap();
    }
    assert_eq!(persisted(&store).await, 50);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn tight_budget_never_loses_or_doubles_updates() {
    let store = seeded(100).await;
    let counter = Arc::new(CounterStore::new(store.clone(), settings(2)));

    let handles: Vec<_> = (0..40)
        .map(|_| {
            let counter = Arc::clone(&counter);
            tokio::spawn(async move { counter.increment().await })
        })
        .collect();

    let mut ok = 0u64;
    for h in handles {
        match h.await.unwrap() {
            Ok(_) => ok += 1,
            Err(ResumeError::Conflict(_)) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
    assert!(ok >= 1);
    assert_eq!(persisted(&store).await, 100 + ok);
}

/// Store with a rival writer that bumps the counter between every read and
/// the adapter's conditional write.
struct ContendedStore {
    inner: MemoryStore,
    replaces: AtomicU32,
}

#[async_trait]
impl DocumentStore for ContendedStore {
    async fn read(&self, collection: &str, id: &str) -> Result<Option<Versioned<Value>>> {
        self.inner.read(collection, id).await
    }

    async fn create(&self, collection: &str, id: &str, doc: Value) -> Result<ETag> {
        self.inner.create(collection, id, doc).await
    }

    async fn replace(&self, collection: &str, id: &str, doc: Value, if_match: ETag) -> Result<ETag> {
        self.replaces.fetch_add(1, Ordering::SeqCst);
        let cur = self.inner.read(collection, id).await?.unwrap();
        let rival = json!({ "id": id, "count": cur.doc["count"].as_u64().unwrap() + 1 });
        self.inner.replace(collection, id, rival, cur.etag).await?;
        self.inner.replace(collection, id, doc, if_match).await
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn sustained_conflicts_stop_at_the_retry_bound() {
    let inner = MemoryStore::new();
    inner
        .create(COLLECTION, ID, json!({ "id": ID, "count": 10 }))
        .await
        .unwrap();
    let store = Arc::new(ContendedStore {
        inner,
        replaces: AtomicU32::new(0),
    });
    let counter = CounterStore::new(store.clone(), settings(4));

    let err = counter.increment().await.expect_err("rival always wins");
    assert!(matches!(err, ResumeError::Conflict(_)));
    assert_eq!(store.replaces.load(Ordering::SeqCst), 4);

    // only the rival's four writes landed
    let doc = store.inner.read(COLLECTION, ID).await.unwrap().unwrap().doc;
    assert_eq!(doc["count"], 14);
}

/// Store whose round-trips never complete.
struct HungStore;

#[async_trait]
impl DocumentStore for HungStore {
    async fn read(&self, _collection: &str, _id: &str) -> Result<Option<Versioned<Value>>> {
        std::future::pending().await
    }

    async fn create(&self, _collection: &str, _id: &str, _doc: Value) -> Result<ETag> {
        std::future::pending().await
    }

    async fn replace(
        &self,
        _collection: &str,
        _id: &str,
        _doc: Value,
        _if_match: ETag,
    ) -> Result<ETag> {
        std::future::pending().await
    }

    async fn ping(&self) -> Result<()> {
        std::future::pending().await
    }
}

#[tokio::test]
async fn hung_store_surfaces_unavailable() {
    let mut s = settings(5);
    s.timeout = Duration::from_millis(30);
    let counter = CounterStore::new(Arc::new(HungStore), s);

    let err = counter.increment().await.expect_err("must time out");
    assert!(matches!(err, ResumeError::StoreUnavailable(_)));
    assert!(err.is_transient());
}

#[tokio::test]
async fn malformed_record_is_internal() {
    let store = Arc::new(MemoryStore::new());
    store
        .create(COLLECTION, ID, json!({ "id": ID, "count": "many" }))
        .await
        .unwrap();
    let counter = CounterStore::new(store.clone(), settings(5));

    let err = counter.increment().await.expect_err("bad document");
    assert!(matches!(err, ResumeError::Internal(_)));
    assert_eq!(
        store.read(COLLECTION, ID).await.unwrap().unwrap().doc["count"],
        "many"
    );
}

#[tokio::test]
async fn provision_creates_once() {
    let store = Arc::new(MemoryStore::new());
    let counter = CounterStore::new(store.clone(), settings(5));

    assert_eq!(counter.current().await.unwrap(), None);
    assert_eq!(counter.provision(0).await.unwrap().count, 0);
    counter.increment().await.unwrap();

    // a second provision keeps the live value
    assert_eq!(counter.provision(0).await.unwrap().count, 1);
    assert_eq!(counter.current().await.unwrap(), Some(Counter::new("index", 1)));
}
