//! In-process document store.
//!
//! Backed by `DashMap`; a conditional replace checks and bumps the version
//! while holding the entry's shard lock, so it is atomic per key. Every call
//! yields to the scheduler once so concurrent callers interleave the way they
//! would across a network round-trip.

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde_json::Value;

use resume_core::error::{Result, ResumeError};

use super::{DocumentStore, ETag, Versioned};

#[derive(Default)]
pub struct MemoryStore {
    docs: DashMap<(String, String), Versioned<Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            docs: DashMap::new(),
        }
    }

    /// Number of documents in a collection.
    pub fn len(&self, collection: &str) -> usize {
        self.docs.iter().filter(|e| e.key().0 == collection).count()
    }

    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }

    fn key(collection: &str, id: &str) -> (String, String) {
        (collection.to_string(), id.to_string())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn read(&self, collection: &str, id: &str) -> Result<Option<Versioned<Value>>> {
        tokio::task::yield_now().await;
        Ok(self
            .docs
            .get(&Self::key(collection, id))
            .map(|r| r.value().clone()))
    }

    async fn create(&self, collection: &str, id: &str, doc: Value) -> Result<ETag> {
        tokio::task::yield_now().await;
        match self.docs.entry(Self::key(collection, id)) {
            Entry::Occupied(_) => Err(ResumeError::Conflict(format!(
                "{collection}/{id} already exists"
            ))),
            Entry::Vacant(v) => {
                v.insert(Versioned { etag: 1, doc });
                Ok(1)
            }
        }
    }

    async fn replace(
        &self,
        collection: &str,
        id: &str,
        doc: Value,
        if_match: ETag,
    ) -> Result<ETag> {
        tokio::task::yield_now().await;
        let mut entry = self
            .docs
            .get_mut(&Self::key(collection, id))
            .ok_or_else(|| ResumeError::NotFound(format!("{collection}/{id}")))?;

        if entry.etag != if_match {
            return Err(ResumeError::Conflict(format!(
                "{collection}/{id} changed (expected etag {if_match}, found {})",
                entry.etag
            )));
        }

        entry.etag += 1;
        entry.doc = doc;
        Ok(entry.etag)
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn replace_requires_matching_etag() {
        let store = MemoryStore::new();
        let etag = store.create("c", "index", json!({"count": 0})).await.unwrap();

        let next = store
            .replace("c", "index", json!({"count": 1}), etag)
            .await
            .unwrap();
        assert_ne!(next, etag);

        let stale = store.replace("c", "index", json!({"count": 99}), etag).await;
        assert!(matches!(stale, Err(ResumeError::Conflict(_))));

        let cur = store.read("c", "index").await.unwrap().unwrap();
        assert_eq!(cur.doc["count"], 1);
        assert_eq!(cur.etag, next);
    }

    #[tokio::test]
    async fn create_never_overwrites() {
        let store = MemoryStore::new();
        store.create("c", "index", json!({"count": 7})).await.unwrap();
        let dup = store.create("c", "index", json!({"count": 0})).await;
        assert!(matches!(dup, Err(ResumeError::Conflict(_))));
        assert_eq!(store.read("c", "index").await.unwrap().unwrap().doc["count"], 7);
    }

    #[tokio::test]
    async fn replace_missing_is_not_found() {
        let store = MemoryStore::new();
        let res = store.replace("c", "index", json!({}), 1).await;
        assert!(matches!(res, Err(ResumeError::NotFound(_))));
        assert!(store.is_empty("c"));
    }

    #[tokio::test]
    async fn collections_are_separate() {
        let store = MemoryStore::new();
        store.create("a", "x", json!(1)).await.unwrap();
        store.create("b", "x", json!(2)).await.unwrap();
        assert_eq!(store.len("a"), 1);
        assert_eq!(store.len("b"), 1);
        assert!(store.read("a", "y").await.unwrap().is_none());
    }
}
