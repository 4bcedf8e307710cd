//! Client seam for the external realtime document store.
//!
//! Collections are flat sets of JSON documents keyed by an opaque,
//! store-assigned id. Reads return full-collection snapshots and
//! subscriptions re-deliver a fresh snapshot on every remote change;
//! writes are individual create/update/delete calls whose outcome is the
//! remote store's to decide. Services receive the handle explicitly so
//! tests can substitute a double.

mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::watch;

/// One stored document: an opaque id plus its JSON fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub data: Value,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read collection '{collection}': {message}")]
    Read { collection: String, message: String },

    #[error("failed to write to collection '{collection}': {message}")]
    Write { collection: String, message: String },

    #[error("document '{id}' not found in collection '{collection}'")]
    NotFound { collection: String, id: String },
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Handle to the realtime document store.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Point-in-time copy of a collection. Unknown collections are empty.
    async fn snapshot(&self, collection: &str) -> StoreResult<Vec<Document>>;

    /// Subscribe to a collection. The receiver holds the current snapshot
    /// immediately and is updated with a full snapshot after every change;
    /// dropping the receiver unsubscribes.
    fn watch(&self, collection: &str) -> watch::Receiver<Vec<Document>>;

    /// Create a document; the store assigns and returns its id.
    async fn insert(&self, collection: &str, data: Value) -> StoreResult<String>;

    /// Replace the fields of an existing document.
    async fn update(&self, collection: &str, id: &str, data: Value) -> StoreResult<()>;

    /// Delete a document.
    async fn remove(&self, collection: &str, id: &str) -> StoreResult<()>;
}
