//! Singleton visit counter document.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ResumeError};

/// Well-known id of the counter record.
pub const DEFAULT_COUNTER_ID: &str = "index";

/// The visit counter as stored and as returned to clients.
///
/// Stores may attach their own metadata fields to the document; they are
/// ignored on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counter {
    pub id: String,
    pub count: u64,
}

impl Counter {
    pub fn new(id: impl Into<String>, count: u64) -> Self {
        Self {
            id: id.into(),
            count,
        }
    }

    /// The record after one more visit. Fails rather than wrapping.
    pub fn incremented(&self) -> Result<Counter> {
        let count = self
            .count
            .checked_add(1)
            .ok_or_else(|| ResumeError::Internal(format!("counter {} overflowed", self.id)))?;
        Ok(Counter {
            id: self.id.clone(),
            count,
        })
    }

    pub fn to_document(&self) -> Result<serde_json::Value> {
        serde_json::to_value(self)
            .map_err(|e| ResumeError::Internal(format!("encode counter failed: {e}")))
    }

    pub fn from_document(doc: serde_json::Value) -> Result<Counter> {
        serde_json::from_value(doc)
            .map_err(|e| ResumeError::Internal(format!("malformed counter document: {e}")))
    }
}
